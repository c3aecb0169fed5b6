use hotseat_core::{KeyValueStore, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One `<key>.json` file per key under a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|ch| if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' { ch } else { '_' })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(body) => Ok(Some(body)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|err| StoreError::Io(err.to_string()))?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|err| StoreError::Io(err.to_string()))?;
        fs::rename(&tmp, &path).map_err(|err| StoreError::Io(err.to_string()))
    }
}
