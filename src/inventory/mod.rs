pub mod options;
pub mod raw;
pub mod snapshot;
pub mod transform;

pub use options::{OptionLookup, VehicleOption};
pub use raw::{OptionType, RawInventoryRecord};
pub use snapshot::SnapshotStore;
pub use transform::{transform_record, transform_snapshot, InventoryRow, Status, TransformError};
