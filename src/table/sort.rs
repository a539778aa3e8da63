use std::cmp::Ordering;

use crate::inventory::InventoryRow;

use super::column::ColumnId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortEntry {
    pub column: ColumnId,
    pub descending: bool,
}

impl SortEntry {
    pub fn asc(column: ColumnId) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    pub fn desc(column: ColumnId) -> Self {
        Self {
            column,
            descending: true,
        }
    }

    pub fn compare(&self, a: &InventoryRow, b: &InventoryRow) -> Ordering {
        let ord = self.column.cell(a).compare(&self.column.cell(b));
        if self.descending {
            ord.reverse()
        } else {
            ord
        }
    }
}

/// Ordered sort keys, the first entry is the primary key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    entries: Vec<SortEntry>,
}

impl SortState {
    pub fn new(entries: Vec<SortEntry>) -> Self {
        let mut state = Self::default();
        for entry in entries {
            state.push(entry);
        }
        state
    }

    pub fn entries(&self) -> &[SortEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds or replaces the column's key; a column appears at most once.
    pub fn push(&mut self, entry: SortEntry) {
        match self.entries.iter_mut().find(|e| e.column == entry.column) {
            Some(existing) => existing.descending = entry.descending,
            None => self.entries.push(entry),
        }
    }

    /// Position (0-based) and direction of the column in the sort, if sorted.
    pub fn position(&self, column: ColumnId) -> Option<(usize, bool)> {
        self.entries
            .iter()
            .position(|e| e.column == column)
            .map(|i| (i, self.entries[i].descending))
    }

    /// unsorted -> asc, asc -> desc, desc -> asc.
    ///
    /// With `multi` the column keeps (or takes) its place among the other
    /// keys, otherwise it becomes the only key.
    pub fn toggle(&mut self, column: ColumnId, multi: bool) {
        let descending = matches!(self.position(column), Some((_, false)));
        if multi {
            self.push(SortEntry { column, descending });
        } else {
            self.entries = vec![SortEntry { column, descending }];
        }
    }

    pub fn clear(&mut self, column: ColumnId) {
        self.entries.retain(|e| e.column != column);
    }

    pub fn compare(&self, a: &InventoryRow, b: &InventoryRow) -> Ordering {
        self.entries
            .iter()
            .map(|e| e.compare(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Stable: ties keep their incoming relative order.
    pub fn sort(&self, rows: &mut [&InventoryRow]) {
        if !self.entries.is_empty() {
            rows.sort_by(|a, b| self.compare(a, b));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Status;

    fn row(vin: &str, price: f64, status: Status) -> InventoryRow {
        InventoryRow {
            vin: vin.to_string(),
            distance: 0.0,
            dealer: String::new(),
            model: String::new(),
            color: String::new(),
            seating: String::new(),
            msrp: 0.0,
            tsrp: 0.0,
            markup: 0.0,
            price,
            dio_tsrp: 0.0,
            dio_price: 0.0,
            port_options: vec![],
            dealer_options: vec![],
            factory_options: vec![],
            status,
            est_date: String::new(),
            presold: false,
            link: String::new(),
        }
    }

    fn vins(rows: &[&InventoryRow]) -> Vec<String> {
        rows.iter().map(|r| r.vin.clone()).collect()
    }

    #[test]
    fn multi_key_sort_falls_through_and_is_stable() {
        let data = [
            row("1", 20000.0, Status::Build),
            row("2", 20000.0, Status::Available),
            row("3", 18000.0, Status::Transit),
            row("4", 20000.0, Status::Available),
        ];
        let mut rows: Vec<&InventoryRow> = data.iter().collect();

        let sort = SortState::new(vec![SortEntry::desc(ColumnId::Price), SortEntry::asc(ColumnId::Status)]);
        sort.sort(&mut rows);

        assert_eq!(vins(&rows), ["2", "4", "1", "3"]);
    }

    #[test]
    fn status_sorts_by_priority_not_alphabet() {
        let data = [
            row("b", 0.0, Status::Build),
            row("t", 0.0, Status::Transit),
            row("a", 0.0, Status::Available),
        ];
        let mut rows: Vec<&InventoryRow> = data.iter().collect();
        SortState::new(vec![SortEntry::asc(ColumnId::Status)]).sort(&mut rows);
        assert_eq!(vins(&rows), ["a", "t", "b"]);
    }

    #[test]
    fn toggle_cycles_direction() {
        let mut sort = SortState::default();
        sort.toggle(ColumnId::Price, true);
        assert_eq!(sort.position(ColumnId::Price), Some((0, false)));
        sort.toggle(ColumnId::Distance, true);
        assert_eq!(sort.position(ColumnId::Distance), Some((1, false)));
        sort.toggle(ColumnId::Price, true);
        assert_eq!(sort.position(ColumnId::Price), Some((0, true)));
        sort.toggle(ColumnId::Price, true);
        assert_eq!(sort.position(ColumnId::Price), Some((0, false)));

        sort.toggle(ColumnId::Model, false);
        assert_eq!(sort.entries(), &[SortEntry::asc(ColumnId::Model)]);

        sort.clear(ColumnId::Model);
        assert!(sort.is_empty());
    }
}
