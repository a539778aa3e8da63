pub mod export_xlsx;

pub use export_xlsx::{export_inventory_xlsx, inventory_workbook};
