use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Producer revision identifier (change-list number). The producer writes it
/// as a JSON integer, older files carry it as a string; either way it is only
/// ever compared for equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Counter {
    Num(i64),
    Text(String),
}

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Counter::Num(n) => write!(f, "{}", n),
            Counter::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Counter {
    fn from(n: i64) -> Self {
        Counter::Num(n)
    }
}

impl From<&str> for Counter {
    fn from(s: &str) -> Self {
        Counter::Text(s.to_string())
    }
}

/// One manifest entry inside a depot. `extra` keeps whatever else the
/// producer attached (`download`, `size`, ...) without interpreting it, so
/// diffing by equality still notices a changed field we do not model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManifestUpdate {
    pub gid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_gid: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

pub type ManifestMap = IndexMap<String, ManifestUpdate>;
pub type DepotMap = IndexMap<String, ManifestMap>;

/// Parsed content of the producer's changes file at one point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChangeSnapshot {
    pub old: Counter,
    pub latest: Counter,
    #[serde(default)]
    pub depot_updates: DepotMap,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("legacy depots_old/depots_new snapshot shape is not supported")]
    LegacyShape,
}

impl ChangeSnapshot {
    /// Parse the canonical snapshot shape. The legacy two-map shape
    /// (`depots_old`/`depots_new`) is rejected outright so a misconfigured
    /// producer shows up as a loud schema error instead of silent empty diffs.
    pub fn parse(text: &str) -> Result<Self, SnapshotError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if value.get("depots_new").is_some() || value.get("depots_old").is_some() {
            return Err(SnapshotError::LegacyShape);
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_compare_by_value_within_shape() {
        assert_eq!(Counter::Num(5), Counter::Num(5));
        assert_ne!(Counter::Num(5), Counter::Num(6));
        assert_ne!(Counter::Num(5), Counter::Text("5".into()));
    }

    #[test]
    fn parses_canonical_snapshot() {
        let snap = ChangeSnapshot::parse(
            r#"{
                "old": 123,
                "latest": 124,
                "depot_updates": {
                    "731": {
                        "public": { "gid": "abc", "old_gid": "xyz", "size": "4051" }
                    }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(snap.old, Counter::Num(123));
        assert_eq!(snap.latest, Counter::Num(124));
        let update = &snap.depot_updates["731"]["public"];
        assert_eq!(update.gid, "abc");
        assert_eq!(update.old_gid.as_deref(), Some("xyz"));
        assert_eq!(update.extra["size"], "4051");
    }

    #[test]
    fn parses_string_counters_and_missing_depots() {
        let snap = ChangeSnapshot::parse(r#"{"old": "a1", "latest": "a2"}"#).unwrap();
        assert_eq!(snap.old, Counter::Text("a1".into()));
        assert!(snap.depot_updates.is_empty());
    }

    #[test]
    fn rejects_legacy_shape() {
        let err = ChangeSnapshot::parse(
            r#"{"old": 1, "latest": 2, "depots_new": {}, "depots_old": {}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SnapshotError::LegacyShape));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            ChangeSnapshot::parse("{not json").unwrap_err(),
            SnapshotError::Json(_)
        ));
    }
}
