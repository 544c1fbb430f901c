use crate::{ChangeSnapshot, Counter};

/// A change-list advance worth announcing.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeListUpdate {
    pub from: Counter,
    pub to: Counter,
}

/// Decide whether a freshly loaded snapshot warrants a change-list
/// notification.
///
/// The rule is the direct-successor check: notify only when the snapshot's
/// `old` counter equals the value we last processed, which guards against
/// stale or out-of-order snapshots. The returned counter is always the
/// snapshot's `latest` so the baseline advances even when nothing fired;
/// otherwise a single anomaly would stall the differ forever.
///
/// With `last_notified == None` (cold start) the first snapshot only seeds
/// the baseline.
pub fn diff(
    snapshot: &ChangeSnapshot,
    last_notified: Option<&Counter>,
) -> (Option<ChangeListUpdate>, Counter) {
    let update = match last_notified {
        Some(last) if *last == snapshot.old => Some(ChangeListUpdate {
            from: snapshot.old.clone(),
            to: snapshot.latest.clone(),
        }),
        _ => None,
    };
    (update, snapshot.latest.clone())
}
