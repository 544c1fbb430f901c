use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    Changed,
    Unchanged,
}

/// Detects rewrites of a single file by watching its modification time.
///
/// The first successful read only seeds the baseline: after a restart we do
/// not know whether the file content was already processed, so the first
/// observation is a baseline, not a change. A missing file is a transient
/// condition (the producer may not have started yet) and never stops the
/// loop.
pub struct FileChangePoller {
    path: PathBuf,
    last_mtime: Option<SystemTime>,
}

impl FileChangePoller {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            last_mtime: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn poll(&mut self) -> PollOutcome {
        let mtime = match std::fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(t) => t,
            Err(e) => {
                debug!("poll {}: {}", self.path.display(), e);
                return PollOutcome::Unchanged;
            }
        };

        match self.last_mtime {
            None => {
                self.last_mtime = Some(mtime);
                PollOutcome::Unchanged
            }
            Some(last) if last != mtime => {
                self.last_mtime = Some(mtime);
                PollOutcome::Changed
            }
            Some(_) => PollOutcome::Unchanged,
        }
    }
}
