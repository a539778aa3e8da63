use crate::inventory::InventoryRow;

use super::column::{Column, ColumnId, INVENTORY_COLUMNS};
use super::facets::{faceted_values, Facet};
use super::filter::{ColumnFilters, FilterValue};
use super::sort::{SortEntry, SortState};
use super::state::TableState;

/// A rendered line of the table body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayRow<'a> {
    Row(&'a InventoryRow),
    /// Padding so the last page keeps the height of a full one.
    Filler,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub rows: Vec<DisplayRow<'a>>,
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
    /// Rows passing the filters, filler excluded.
    pub matched: usize,
    pub total: usize,
}

impl PageView<'_> {
    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    pub fn filler_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r, DisplayRow::Filler))
            .count()
    }

    pub fn data_rows(&self) -> impl Iterator<Item = &InventoryRow> + '_ {
        self.rows.iter().filter_map(|r| match r {
            DisplayRow::Row(row) => Some(*row),
            DisplayRow::Filler => None,
        })
    }
}

/// Column set resolved once; filters and sort keys for columns outside the
/// set, or sort keys on unsortable columns, are ignored.
#[derive(Debug, Clone)]
pub struct TableView {
    columns: Vec<Column>,
}

impl Default for TableView {
    fn default() -> Self {
        Self::new(INVENTORY_COLUMNS.to_vec())
    }
}

impl TableView {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    fn effective_filters(&self, filters: &ColumnFilters) -> ColumnFilters {
        let mut out = ColumnFilters::new();
        for entry in filters.iter().filter(|e| self.column(e.column).is_some()) {
            out.set(entry.column, Some(entry.value.clone()));
        }
        out
    }

    fn effective_sort(&self, sort: &SortState) -> SortState {
        SortState::new(
            sort.entries()
                .iter()
                .filter(|e| self.column(e.column).is_some_and(|c| c.sortable))
                .copied()
                .collect::<Vec<SortEntry>>(),
        )
    }

    /// Rows passing the global search, which ANDs with the column filters.
    fn searched<'a>(&self, rows: &'a [InventoryRow], state: &TableState) -> Vec<&'a InventoryRow> {
        let needle = match &state.global_filter {
            Some(text) if !text.is_empty() => FilterValue::Text(text.clone()),
            _ => return rows.iter().collect(),
        };
        rows.iter()
            .filter(|row| self.columns.iter().any(|c| needle.matches(&c.id.cell(row))))
            .collect()
    }

    /// Filtered and sorted, all pages.
    pub fn arrange<'a>(&self, rows: &'a [InventoryRow], state: &TableState) -> Vec<&'a InventoryRow> {
        let filters = self.effective_filters(&state.filters);
        let mut matched: Vec<&InventoryRow> = self
            .searched(rows, state)
            .into_iter()
            .filter(|row| filters.matches(row))
            .collect();
        self.effective_sort(&state.sort).sort(&mut matched);
        matched
    }

    pub fn page<'a>(&self, rows: &'a [InventoryRow], state: &TableState) -> PageView<'a> {
        let arranged = self.arrange(rows, state);
        let matched = arranged.len();
        let page_size = state.page_size.max(1);
        let page_count = matched.div_ceil(page_size).max(1);
        let page_index = state.page_index.min(page_count - 1);

        let mut page_rows: Vec<DisplayRow<'a>> = arranged
            .into_iter()
            .skip(page_index * page_size)
            .take(page_size)
            .map(DisplayRow::Row)
            .collect();
        page_rows.resize(page_size, DisplayRow::Filler);

        PageView {
            rows: page_rows,
            page_index,
            page_count,
            page_size,
            matched,
            total: rows.len(),
        }
    }

    pub fn facets(&self, rows: &[InventoryRow], state: &TableState, id: ColumnId) -> Vec<Facet> {
        match self.column(id) {
            Some(column) => faceted_values(
                self.searched(rows, state),
                &self.effective_filters(&state.filters),
                column,
            ),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Status;
    use crate::table::filter::{FilterValue, RangeFilter};
    use crate::table::state::DEFAULT_PAGE_SIZE;

    fn row(i: usize) -> InventoryRow {
        InventoryRow {
            vin: format!("VIN{i:03}"),
            distance: i as f64,
            dealer: if i % 2 == 0 { "Acme Toyota" } else { "Best Toyota" }.to_string(),
            model: "LE".to_string(),
            color: String::new(),
            seating: String::new(),
            msrp: 0.0,
            tsrp: 0.0,
            markup: 0.0,
            price: 20000.0 + i as f64,
            dio_tsrp: 0.0,
            dio_price: 0.0,
            port_options: vec![],
            dealer_options: vec![],
            factory_options: vec![],
            status: Status::Available,
            est_date: String::new(),
            presold: false,
            link: String::new(),
        }
    }

    fn rows(n: usize) -> Vec<InventoryRow> {
        (0..n).map(row).collect()
    }

    #[test]
    fn last_page_is_padded_with_filler_rows() {
        let data = rows(23);
        let view = TableView::default();
        let mut state = TableState::new(DEFAULT_PAGE_SIZE);

        let fillers: Vec<usize> = (0..3)
            .map(|page| {
                state.set_page(page);
                let page = view.page(&data, &state);
                assert_eq!(page.rows.len(), 10);
                assert_eq!(page.matched, 23);
                assert_eq!(page.page_count, 3);
                page.filler_count()
            })
            .collect();

        assert_eq!(fillers, [0, 0, 7]);
    }

    #[test]
    fn filler_rows_never_count_as_matches() {
        let data = rows(23);
        let view = TableView::default();
        let mut state = TableState::new(DEFAULT_PAGE_SIZE);
        state.set_filter(
            ColumnId::Distance,
            Some(FilterValue::Range(RangeFilter::new(None, Some(4.0)))),
        );

        let page = view.page(&data, &state);
        assert_eq!(page.matched, 5);
        assert_eq!(page.total, 23);
        assert_eq!(page.data_rows().count(), 5);
        assert_eq!(page.filler_count(), 5);
        assert!(!page.can_next());
        assert!(!page.can_previous());
    }

    #[test]
    fn empty_result_is_one_page_of_filler() {
        let view = TableView::default();
        let page = view.page(&[], &TableState::new(5));
        assert_eq!(page.page_count, 1);
        assert_eq!(page.filler_count(), 5);
        assert_eq!(page.matched, 0);
    }

    #[test]
    fn page_index_is_clamped() {
        let data = rows(12);
        let view = TableView::default();
        let page = view.page(&data, &TableState::from_query("page=9", DEFAULT_PAGE_SIZE));
        assert_eq!(page.page_index, 1);
        assert!(page.can_previous());
        assert_eq!(page.data_rows().count(), 2);
    }

    #[test]
    fn global_search_ands_with_column_filters() {
        let data = rows(10);
        let view = TableView::default();
        let state = TableState::from_query("filter_distance=%3A4&q=BEST", DEFAULT_PAGE_SIZE);

        let vins: Vec<&str> = view.arrange(&data, &state).iter().map(|r| r.vin.as_str()).collect();
        assert_eq!(vins, ["VIN001", "VIN003"]);

        let facets = view.facets(&data, &state, ColumnId::Dealer);
        let counts: Vec<(&str, usize)> = facets.iter().map(|f| (f.value.as_str(), f.count)).collect();
        assert_eq!(counts, [("Best Toyota", 2)]);
    }

    #[test]
    fn global_search_matches_option_names() {
        let mut data = rows(3);
        data[2].port_options = vec![std::rc::Rc::new(crate::inventory::VehicleOption {
            option_cd: "MF".to_string(),
            marketing_name: "Mudguards".to_string(),
            marketing_long_name: String::new(),
            option_type: crate::inventory::OptionType::Port,
        })];
        let view = TableView::default();
        let state = TableState::from_query("q=mudguard", DEFAULT_PAGE_SIZE);

        let page = view.page(&data, &state);
        assert_eq!(page.matched, 1);
        assert_eq!(page.data_rows().next().map(|r| r.vin.as_str()), Some("VIN002"));
    }

    #[test]
    fn sorts_after_filtering_and_skips_unsortable_columns() {
        let data = rows(6);
        let view = TableView::default();
        let state = TableState::from_query(
            "filter_dealer=Acme_Toyota&sort=vin.asc;price.desc",
            DEFAULT_PAGE_SIZE,
        );

        let vins: Vec<&str> = view.arrange(&data, &state).iter().map(|r| r.vin.as_str()).collect();
        assert_eq!(vins, ["VIN004", "VIN002", "VIN000"]);
    }
}
