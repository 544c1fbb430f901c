use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use depotwatch_core::{status, ServiceStatusTable};
use depotwatch_notify::NotifySink;
use depotwatch_storage::StateStore;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::render;

/// One service-status cycle: load the record, run the pure step, deliver
/// alerts, persist the mirrored `last_state`.
///
/// The record is re-read fresh every cycle and only `last_state` is written
/// back: `state` belongs to the external health probe, and any sibling fields
/// it keeps in the record ride along untouched. Delivery happens before the
/// save, so a failed save can at worst repeat an alert on the next cycle,
/// never suppress one.
pub fn run_status_cycle(
    store: &dyn StateStore,
    key: &str,
    sink: &dyn NotifySink,
    audience: Option<&str>,
) -> Result<usize> {
    let mut record = match store.load(key)? {
        Some(r) => r,
        None => {
            debug!("status record {} not written yet", key);
            return Ok(0);
        }
    };

    let table: ServiceStatusTable =
        serde_json::from_value(record.clone()).with_context(|| format!("parse record {}", key))?;
    let (changes, updated) = status::step(&table);

    for change in &changes {
        let n = render::status_notification(change, audience);
        info!("notifying: {} is {}", change.service, change.status);
        if let Err(e) = sink.deliver(&n) {
            warn!("delivery failed for '{}': {}", n.title, e);
        }
    }

    record["last_state"] = serde_json::to_value(&updated.last_state)?;
    store.save(key, &record)?;

    Ok(changes.len())
}

/// Monitor the persisted service status table on a fixed interval.
pub fn spawn_status_monitor(
    cfg: Config,
    store: Arc<dyn StateStore>,
    sink: Arc<dyn NotifySink>,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let key = cfg.paths.status.clone();
        let audience = cfg.notify.targets.services.clone();
        let mut tick = interval(Duration::from_secs(cfg.poll.status_interval_secs));

        info!("status monitor started: {}", key);
        loop {
            tokio::select! {
                _ = tick.tick() => {}
                _ = shutdown.changed() => {
                    info!("status monitor stopping");
                    break;
                }
            }

            if let Err(e) = run_status_cycle(store.as_ref(), &key, sink.as_ref(), audience.as_deref())
            {
                // Recoverable: retry on the next natural cycle.
                warn!("status cycle error: {:#}", e);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use depotwatch_notify::MemorySink;
    use depotwatch_storage::InMemoryStore;
    use serde_json::json;

    #[test]
    fn transition_alerts_and_mirrors_last_state() {
        let store = InMemoryStore::new();
        let sink = MemorySink::new();
        store
            .save(
                "state.json",
                &json!({
                    "state": { "sessions": "down" },
                    "last_state": { "sessions": "normal" }
                }),
            )
            .unwrap();

        let fired = run_status_cycle(&store, "state.json", &sink, Some("role:svc")).unwrap();
        assert_eq!(fired, 1);
        let delivered = sink.take();
        assert_eq!(delivered[0].title, "Sessions Logon");
        assert_eq!(delivered[0].audience.as_deref(), Some("role:svc"));

        let record = store.load("state.json").unwrap().unwrap();
        assert_eq!(record["last_state"]["sessions"], "down");

        // Sustained state: second cycle is silent.
        let fired = run_status_cycle(&store, "state.json", &sink, None).unwrap();
        assert_eq!(fired, 0);
        assert!(sink.take().is_empty());
    }

    #[test]
    fn externally_owned_fields_survive_the_rewrite() {
        let store = InMemoryStore::new();
        let sink = MemorySink::new();
        store
            .save(
                "state.json",
                &json!({
                    "state": { "sessions": "down" },
                    "last_state": {},
                    "probe": { "updated_at": 1700000000 }
                }),
            )
            .unwrap();

        run_status_cycle(&store, "state.json", &sink, None).unwrap();

        let record = store.load("state.json").unwrap().unwrap();
        assert_eq!(record["state"]["sessions"], "down");
        assert_eq!(record["probe"]["updated_at"], 1700000000);
        assert_eq!(record["last_state"]["sessions"], "down");
    }

    #[test]
    fn missing_record_is_a_quiet_skip() {
        let store = InMemoryStore::new();
        let sink = MemorySink::new();
        assert_eq!(run_status_cycle(&store, "state.json", &sink, None).unwrap(), 0);
        assert!(store.load("state.json").unwrap().is_none());
    }

    #[test]
    fn malformed_record_surfaces_an_error() {
        let store = InMemoryStore::new();
        let sink = MemorySink::new();
        store.save("state.json", &json!("not a table")).unwrap();
        assert!(run_status_cycle(&store, "state.json", &sink, None).is_err());
    }
}
