pub mod cells;
pub mod error;
pub mod filters;
pub mod pagination;

pub use cells::{cell, format_money};
pub use error::error_page;
pub use filters::{column_header, FILTER_FORM_ID, SEARCH_DEBOUNCE_MS};
pub use pagination::pagination;
