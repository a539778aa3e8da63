pub mod codec;
pub mod column;
pub mod facets;
pub mod filter;
pub mod sort;
pub mod state;
pub mod view;

pub use column::{Cell, Column, ColumnId, FilterVariant, INVENTORY_COLUMNS};
pub use facets::Facet;
pub use filter::{ColumnFilters, FilterEntry, FilterValue, RangeFilter};
pub use sort::{SortEntry, SortState};
pub use state::{HistoryMode, TableState, UrlUpdate};
pub use view::{DisplayRow, PageView, TableView};
