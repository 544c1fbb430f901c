use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Daemon configuration, loaded from `depotwatch.toml`. Every field has a
/// default so the daemon also runs with no config file at all.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// The producer's changes file (snapshot input).
    pub snapshot: String,
    /// Root directory for our persisted records.
    pub state_root: String,
    /// Record key of the service status table inside `state_root`.
    pub status: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            snapshot: "data_engine/bin/730_changes.json".to_string(),
            state_root: ".depotwatch".to_string(),
            status: "state.json".to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub snapshot_interval_secs: u64,
    pub status_interval_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            snapshot_interval_secs: 2,
            status_interval_secs: 5,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default)]
    pub targets: NotifyTargets,
}

/// Optional audience tags per notification category (e.g. role identifiers
/// the delivery surface should ping).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NotifyTargets {
    #[serde(default)]
    pub changelist: Option<String>,
    #[serde(default)]
    pub depots: Option<String>,
    #[serde(default)]
    pub services: Option<String>,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| "parse depotwatch.toml")?;
        Ok(cfg)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.paths.snapshot).to_string())
    }

    pub fn state_root(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.paths.state_root).to_string())
    }
}
