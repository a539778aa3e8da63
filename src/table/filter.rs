use crate::inventory::InventoryRow;

use super::column::{Cell, ColumnId};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeFilter {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeFilter {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Range(RangeFilter),
    /// Selected values, in selection order, without duplicates.
    Values(Vec<String>),
}

impl FilterValue {
    pub fn values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !value.is_empty() && !out.contains(&value) {
                out.push(value);
            }
        }
        FilterValue::Values(out)
    }

    /// A filter that would match everything.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(text) => text.is_empty(),
            FilterValue::Range(range) => range.is_unbounded(),
            FilterValue::Values(values) => values.is_empty(),
        }
    }

    pub fn matches(&self, cell: &Cell<'_>) -> bool {
        match self {
            FilterValue::Text(needle) => {
                let needle = needle.to_lowercase();
                match cell {
                    Cell::Options(options) => options.iter().any(|o| {
                        o.option_cd.to_lowercase().contains(&needle)
                            || o.marketing_name.to_lowercase().contains(&needle)
                    }),
                    _ => cell
                        .scalar_text()
                        .is_some_and(|text| text.to_lowercase().contains(&needle)),
                }
            }
            FilterValue::Range(range) => match cell {
                Cell::Number(n) => range.contains(*n),
                _ => false,
            },
            FilterValue::Values(selected) => match cell {
                // any of the row's options
                Cell::Options(_) => cell
                    .option_codes()
                    .any(|code| selected.iter().any(|s| s == code)),
                _ => cell
                    .scalar_text()
                    .is_some_and(|text| selected.contains(&text)),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterEntry {
    pub column: ColumnId,
    pub value: FilterValue,
}

impl FilterEntry {
    pub fn matches(&self, row: &InventoryRow) -> bool {
        self.value.is_empty() || self.value.matches(&self.column.cell(row))
    }
}

/// Active filters, at most one per column, in the order they were added.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnFilters {
    entries: Vec<FilterEntry>,
}

impl ColumnFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the column's filter; `None` or an empty value removes it.
    pub fn set(&mut self, column: ColumnId, value: Option<FilterValue>) {
        let value = value.filter(|v| !v.is_empty());
        match (self.entries.iter().position(|e| e.column == column), value) {
            (Some(i), Some(value)) => self.entries[i].value = value,
            (Some(i), None) => {
                self.entries.remove(i);
            }
            (None, Some(value)) => self.entries.push(FilterEntry { column, value }),
            (None, None) => {}
        }
    }

    pub fn with(mut self, column: ColumnId, value: FilterValue) -> Self {
        self.set(column, Some(value));
        self
    }

    pub fn get(&self, column: ColumnId) -> Option<&FilterValue> {
        self.entries
            .iter()
            .find(|e| e.column == column)
            .map(|e| &e.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// AND across every entry.
    pub fn matches(&self, row: &InventoryRow) -> bool {
        self.entries.iter().all(|e| e.matches(row))
    }

    /// Same as `matches`, ignoring the filter on `skip`.
    pub fn matches_except(&self, row: &InventoryRow, skip: ColumnId) -> bool {
        self.entries
            .iter()
            .filter(|e| e.column != skip)
            .all(|e| e.matches(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{OptionType, Status, VehicleOption};
    use std::rc::Rc;

    fn option(code: &str) -> Rc<VehicleOption> {
        Rc::new(VehicleOption {
            option_cd: code.to_string(),
            marketing_name: format!("{code} package"),
            marketing_long_name: String::new(),
            option_type: OptionType::Factory,
        })
    }

    fn row() -> InventoryRow {
        InventoryRow {
            vin: "JTDBCMFE0R3000001".to_string(),
            distance: 25.0,
            dealer: "Acme Toyota".to_string(),
            model: "LE".to_string(),
            color: "Blueprint".to_string(),
            seating: "Black Fabric".to_string(),
            msrp: 24000.0,
            tsrp: 25000.0,
            markup: 500.0,
            price: 25500.0,
            dio_tsrp: 0.0,
            dio_price: 0.0,
            port_options: vec![],
            dealer_options: vec![],
            factory_options: vec![option("A"), option("B")],
            status: Status::Transit,
            est_date: String::new(),
            presold: false,
            link: String::new(),
        }
    }

    #[test]
    fn option_filter_uses_any_semantics() {
        let row = row();
        let hit = FilterEntry {
            column: ColumnId::FactoryOptions,
            value: FilterValue::values(["B", "C"]),
        };
        let miss = FilterEntry {
            column: ColumnId::FactoryOptions,
            value: FilterValue::values(["C", "D"]),
        };
        assert!(hit.matches(&row));
        assert!(!miss.matches(&row));
    }

    #[test]
    fn range_bounds_are_inclusive_and_optional() {
        let row = row();
        let cell = ColumnId::Distance.cell(&row);
        assert!(FilterValue::Range(RangeFilter::new(Some(25.0), Some(25.0))).matches(&cell));
        assert!(FilterValue::Range(RangeFilter::new(None, Some(30.0))).matches(&cell));
        assert!(FilterValue::Range(RangeFilter::new(Some(10.0), None)).matches(&cell));
        assert!(!FilterValue::Range(RangeFilter::new(Some(26.0), None)).matches(&cell));
    }

    #[test]
    fn text_search_is_case_insensitive_substring() {
        let row = row();
        let entry = FilterEntry {
            column: ColumnId::Vin,
            value: FilterValue::Text("r3000".to_string()),
        };
        assert!(entry.matches(&row));
    }

    #[test]
    fn scalar_values_match_by_membership() {
        let row = row();
        let status = FilterValue::values(["build", "transit"]);
        assert!(status.matches(&ColumnId::Status.cell(&row)));

        let presold = FilterValue::values(["Yes"]);
        assert!(!presold.matches(&ColumnId::Presold.cell(&row)));
    }

    #[test]
    fn filters_are_anded_and_unique_per_column() {
        let row = row();
        let mut filters = ColumnFilters::new()
            .with(ColumnId::Dealer, FilterValue::values(["Acme Toyota"]))
            .with(ColumnId::Distance, FilterValue::Range(RangeFilter::new(None, Some(10.0))));
        assert!(!filters.matches(&row));
        assert!(filters.matches_except(&row, ColumnId::Distance));

        filters.set(
            ColumnId::Distance,
            Some(FilterValue::Range(RangeFilter::new(None, Some(50.0)))),
        );
        assert_eq!(filters.len(), 2);
        assert!(filters.matches(&row));

        filters.set(ColumnId::Dealer, Some(FilterValue::values(Vec::<String>::new())));
        assert_eq!(filters.len(), 1);
        assert!(filters.get(ColumnId::Dealer).is_none());
    }
}
