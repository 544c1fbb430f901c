pub mod changelist;
pub mod depots;
pub mod display;
pub mod snapshot;
pub mod status;

pub use changelist::ChangeListUpdate;
pub use depots::DepotChange;
pub use display::{service_title, status_phrase};
pub use snapshot::{ChangeSnapshot, Counter, DepotMap, ManifestMap, ManifestUpdate, SnapshotError};
pub use status::{ServiceStatusTable, StatusChange, NORMAL};
