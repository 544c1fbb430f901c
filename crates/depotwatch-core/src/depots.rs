use crate::{DepotMap, ManifestUpdate};

/// One changed manifest leaf: (depot, manifest, new value).
#[derive(Clone, Debug, PartialEq)]
pub struct DepotChange {
    pub depot: String,
    pub manifest: String,
    pub update: ManifestUpdate,
}

/// Diff two generations of the depot map.
///
/// One-directional by design: depots or manifests that disappear between
/// generations are never reported, matching the producer's append-only
/// manifest history. A manifest is reported when its depot is new, when the
/// manifest itself is new, or when its value differs from the previous
/// generation. Result order follows `current`'s insertion order so the
/// notification text is reproducible.
///
/// With `previous == None` (cold start) the result is empty; the caller
/// adopts `current` as its baseline without notifying.
pub fn diff(previous: Option<&DepotMap>, current: &DepotMap) -> Vec<DepotChange> {
    let previous = match previous {
        Some(p) => p,
        None => return Vec::new(),
    };

    let mut changes = Vec::new();
    for (depot, manifests) in current {
        let old_manifests = previous.get(depot);
        for (manifest, update) in manifests {
            let changed = match old_manifests.and_then(|m| m.get(manifest)) {
                Some(old) => old != update,
                None => true,
            };
            if changed {
                changes.push(DepotChange {
                    depot: depot.clone(),
                    manifest: manifest.clone(),
                    update: update.clone(),
                });
            }
        }
    }
    changes
}
