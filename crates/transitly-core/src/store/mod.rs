// ── Snapshot store ──
//
// Copy-on-write transit state with push-based change notification.

mod data_store;
mod snapshot;

pub use data_store::DataStore;
pub use snapshot::{SnapshotView, TransitSnapshot};
