use std::sync::Arc;
use std::time::Duration;

use depotwatch_core::{changelist, depots, ChangeSnapshot, Counter, DepotMap};
use depotwatch_notify::{Notification, NotifySink};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{info, warn};

use crate::config::{Config, NotifyTargets};
use crate::poller::{FileChangePoller, PollOutcome};
use crate::render;

/// Per-process differ state for the snapshot file: the last notified
/// change-list counter and the last seen depot map. Both differs consume the
/// same parsed snapshot, so one file read serves the whole tick and they can
/// never observe two different generations.
pub struct SnapshotTracker {
    last_notified: Option<Counter>,
    depot_baseline: Option<DepotMap>,
    targets: NotifyTargets,
}

impl SnapshotTracker {
    pub fn new(targets: NotifyTargets) -> Self {
        Self {
            last_notified: None,
            depot_baseline: None,
            targets,
        }
    }

    /// Run both differs over one snapshot and advance the baselines.
    pub fn observe(&mut self, snapshot: &ChangeSnapshot) -> Vec<Notification> {
        let mut out = Vec::new();

        let (update, baseline) = changelist::diff(snapshot, self.last_notified.as_ref());
        if let Some(update) = update {
            out.push(render::changelist_notification(
                &update,
                self.targets.changelist.as_deref(),
            ));
        }
        self.last_notified = Some(baseline);

        let changes = depots::diff(self.depot_baseline.as_ref(), &snapshot.depot_updates);
        if !changes.is_empty() {
            out.push(render::depot_notification(
                &snapshot.latest,
                &changes,
                self.targets.depots.as_deref(),
            ));
        }
        self.depot_baseline = Some(snapshot.depot_updates.clone());

        out
    }
}

/// Poll the producer's changes file and feed both differs from a single
/// consistent read per tick.
pub fn spawn_snapshot_watcher(
    cfg: Config,
    sink: Arc<dyn NotifySink>,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let path = cfg.snapshot_path();
        let mut poller = FileChangePoller::new(path.clone());
        let mut tracker = SnapshotTracker::new(cfg.notify.targets.clone());
        let mut tick = interval(Duration::from_secs(cfg.poll.snapshot_interval_secs));

        info!("snapshot watcher started: {}", path.display());
        loop {
            tokio::select! {
                _ = tick.tick() => {}
                _ = shutdown.changed() => {
                    info!("snapshot watcher stopping");
                    break;
                }
            }

            if poller.poll() == PollOutcome::Unchanged {
                continue;
            }

            // The mtime baseline has already advanced, so a bad write here is
            // skipped and the producer's next valid rewrite is still detected.
            let text = match std::fs::read_to_string(&path) {
                Ok(t) => t,
                Err(e) => {
                    warn!("read {}: {}", path.display(), e);
                    continue;
                }
            };
            let snapshot = match ChangeSnapshot::parse(&text) {
                Ok(s) => s,
                Err(e) => {
                    warn!("skipping snapshot cycle: {}", e);
                    continue;
                }
            };

            for n in tracker.observe(&snapshot) {
                info!("notifying: {}", n.title);
                if let Err(e) = sink.deliver(&n) {
                    // At-most-once: the baselines have advanced, a dropped
                    // notification is not retried.
                    warn!("delivery failed for '{}': {}", n.title, e);
                }
            }
        }
    })
}
