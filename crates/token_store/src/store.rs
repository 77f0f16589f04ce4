use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::StoreError;

/// String key/value storage with write-through semantics.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// JSON-object file store. The file is created lazily on first write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let path = path.to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => parse_store(&path, &contents)?,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "store file missing; starting empty");
                BTreeMap::new()
            }
            Err(source) => return Err(StoreError::io("reading store file", &path, source)),
        };

        Ok(Self { path, values })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| {
                    StoreError::io("creating store directory", parent, source)
                })?;
            }
        }

        let serialized = serde_json::to_vec_pretty(&self.values)
            .map_err(|source| StoreError::json_serialize(&self.path, source))?;
        let staging = staging_path(&self.path);
        fs::write(&staging, serialized)
            .map_err(|source| StoreError::io("writing staged store file", &staging, source))?;
        fs::rename(&staging, &self.path)
            .map_err(|source| StoreError::io("replacing store file", &self.path, source))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value.to_owned());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.values.remove(key).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.persist()
    }
}

fn parse_store(path: &Path, contents: &str) -> Result<BTreeMap<String, String>, StoreError> {
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let parsed = serde_json::from_str::<Value>(contents)
        .map_err(|source| StoreError::json_parse(path, source))?;
    let Value::Object(object) = parsed else {
        return Err(StoreError::InvalidLayout {
            path: path.to_path_buf(),
        });
    };

    object
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(value) => Ok((key, value)),
            _ => Err(StoreError::InvalidLayout {
                path: path.to_path_buf(),
            }),
        })
        .collect()
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
