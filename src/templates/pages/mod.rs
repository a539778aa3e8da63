pub mod inventory;

pub use inventory::{inventory_page, InventoryPageVm};
