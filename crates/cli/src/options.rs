use std::path::PathBuf;

const DEFAULT_ASSETS_DIR: &str = "assets";
const DATA_DIR_NAME: &str = ".hotseat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub seed: Option<u64>,
    pub assets: PathBuf,
    pub data: PathBuf,
}

/// Flags win over environment variables, which win over defaults.
pub fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut seed = std::env::var("HOTSEAT_SEED")
        .ok()
        .and_then(|value| value.parse::<u64>().ok());
    let mut assets = std::env::var_os("HOTSEAT_ASSETS").map(PathBuf::from);
    let mut data = std::env::var_os("HOTSEAT_DATA").map(PathBuf::from);
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--assets" => {
                if let Some(value) = args.get(idx + 1) {
                    assets = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--data" => {
                if let Some(value) = args.get(idx + 1) {
                    data = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    CliOptions {
        seed,
        assets: assets.unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR)),
        data: data.unwrap_or_else(default_data_dir),
    }
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn flags_override_defaults() {
        let options = parse_cli_options(&args(&[
            "--seed", "42", "--assets", "/tmp/a", "--data", "/tmp/d",
        ]));
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.assets, PathBuf::from("/tmp/a"));
        assert_eq!(options.data, PathBuf::from("/tmp/d"));
    }

    #[test]
    fn bad_seed_is_ignored() {
        let options = parse_cli_options(&args(&["--seed", "soon", "--data", "/tmp/d"]));
        assert_eq!(options.seed, None);
        assert_eq!(options.data, PathBuf::from("/tmp/d"));
    }
}
