use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::traits::StateStore;

/// One JSON file per key under a root directory.
///
/// Saves go through a temp file in the same directory followed by an atomic
/// rename, so the external processes that read these records never see a
/// partially written document. An in-place truncate-and-rewrite would expose
/// exactly that window.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl StateStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let path = self.record_path(key);
        let text = match std::fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
        };
        let value =
            serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
        Ok(Some(value))
    }

    fn save(&self, key: &str, record: &Value) -> Result<()> {
        let path = self.record_path(key);
        let dir = path.parent().unwrap_or(&self.root);
        std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

        let tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("create temp file in {}", dir.display()))?;
        serde_json::to_writer_pretty(tmp.as_file(), record)
            .with_context(|| format!("serialize record {}", key))?;
        tmp.persist(&path)
            .map_err(|e| e.error)
            .with_context(|| format!("rename into {}", path.display()))?;
        Ok(())
    }
}
