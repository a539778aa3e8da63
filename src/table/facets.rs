use std::collections::BTreeMap;
use std::rc::Rc;

use crate::inventory::{InventoryRow, VehicleOption};

use super::column::{Cell, Column, FilterVariant};
use super::filter::ColumnFilters;

/// One distinct value of a column, with how many rows carry it.
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    /// What the filter stores: the scalar text or the option code.
    pub value: String,
    pub label: String,
    pub detail: Option<String>,
    pub count: usize,
}

/// Distinct values of `column` across rows passing every other column's filter.
///
/// Range columns have no facets. Options are counted once per row, by code.
pub fn faceted_values<'a, I>(rows: I, filters: &ColumnFilters, column: &Column) -> Vec<Facet>
where
    I: IntoIterator<Item = &'a InventoryRow>,
{
    if column.filter == FilterVariant::Range {
        return Vec::new();
    }

    let candidates = rows
        .into_iter()
        .filter(|row| filters.matches_except(row, column.id));

    let mut scalars: BTreeMap<String, usize> = BTreeMap::new();
    let mut options: BTreeMap<&str, (Rc<VehicleOption>, usize)> = BTreeMap::new();

    for row in candidates {
        match column.id.cell(row) {
            Cell::Options(list) => {
                for option in list {
                    options
                        .entry(option.option_cd.as_str())
                        .or_insert_with(|| (Rc::clone(option), 0))
                        .1 += 1;
                }
            }
            cell => {
                if let Some(text) = cell.scalar_text() {
                    *scalars.entry(text).or_default() += 1;
                }
            }
        }
    }

    if !options.is_empty() {
        let mut entries: Vec<(Rc<VehicleOption>, usize)> = options.into_values().collect();
        entries.sort_by(|(a, _), (b, _)| a.display_cmp(b));
        return entries
            .into_iter()
            .map(|(option, count)| Facet {
                value: option.option_cd.clone(),
                label: option.option_cd.clone(),
                detail: Some(option.marketing_name.clone()),
                count,
            })
            .collect();
    }

    scalars
        .into_iter()
        .map(|(value, count)| Facet {
            label: value.clone(),
            value,
            detail: None,
            count,
        })
        .collect()
}
