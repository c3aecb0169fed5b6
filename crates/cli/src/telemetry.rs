use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber. Logs go to stderr so they never mix with
/// the game transcript; `RUST_LOG` overrides the default `warn` filter.
pub fn init() {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
