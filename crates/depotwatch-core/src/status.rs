use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Baseline status value. Transitions into `normal` are never announced.
pub const NORMAL: &str = "normal";

/// The persisted service status record. `state` is written by an external
/// health probe; `last_state` is ours and mirrors `state` after every cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatusTable {
    #[serde(default)]
    pub state: IndexMap<String, String>,
    #[serde(default)]
    pub last_state: IndexMap<String, String>,
}

/// A service transition worth announcing.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusChange {
    pub service: String,
    pub status: String,
}

/// One monitor cycle over a freshly loaded table.
///
/// Emits a change for every service whose status is non-normal and differs
/// from the last observed value, then mirrors `state` into `last_state`
/// unconditionally. The unconditional mirror is the hysteresis: a sustained
/// outage alerts once, a flap back to the same outage alerts again, and a
/// recovery to normal is recorded silently.
pub fn step(table: &ServiceStatusTable) -> (Vec<StatusChange>, ServiceStatusTable) {
    let mut changes = Vec::new();
    let mut updated = table.clone();

    for (service, status) in &table.state {
        let last = table.last_state.get(service);
        if status != NORMAL && last != Some(status) {
            changes.push(StatusChange {
                service: service.clone(),
                status: status.clone(),
            });
        }
        updated
            .last_state
            .insert(service.clone(), status.clone());
    }

    (changes, updated)
}
