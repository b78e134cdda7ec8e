//! File-backed persistence port.
//!
//! All keys live in one JSON object on disk. Writes go to a sibling temp file
//! that is renamed over the original, so readers never observe a partial
//! document.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use gamedeck_catalog::{PersistenceError, PersistencePort, PersistenceResult};
use tracing::warn;

const APP_DIR: &str = "gamedeck";
const FILE_NAME: &str = "storage.json";

type Document = BTreeMap<String, String>;

/// Key/value store persisted as a single JSON document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store at `<data_dir>/gamedeck/storage.json`.
    #[must_use]
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(APP_DIR).join(FILE_NAME))
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> io::Result<Document> {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Document::new()),
            Err(err) => Err(err),
        }
    }

    fn save(&self, document: &Document) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_vec_pretty(document)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, body)?;
        fs::rename(&staging, &self.path)
    }
}

impl PersistencePort for FileStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        let document = self.load().map_err(|err| PersistenceError::Read {
            key: key.to_string(),
            source: Box::new(err),
        })?;
        Ok(document.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PersistenceResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut document = match self.load() {
            Ok(document) => document,
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                warn!(path = %self.path.display(), error = %err, "replacing unreadable storage file");
                Document::new()
            }
            Err(err) => {
                return Err(PersistenceError::Write {
                    key: key.to_string(),
                    source: Box::new(err),
                });
            }
        };
        document.insert(key.to_string(), value.to_string());
        self.save(&document)
            .map_err(|err| PersistenceError::Write {
                key: key.to_string(),
                source: Box::new(err),
            })
    }
}
