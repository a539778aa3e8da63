// src/table/state.rs

use url::form_urlencoded;

use super::codec::{self, FILTER_KEY_PREFIX, SORT_KEY};
use super::column::{ColumnId, FilterVariant, INVENTORY_COLUMNS};
use super::filter::{ColumnFilters, FilterValue, RangeFilter};
use super::sort::SortState;

pub const PAGE_KEY: &str = "page";
pub const SIZE_KEY: &str = "size";
pub const DATE_KEY: &str = "date";
pub const APPLY_KEY: &str = "apply";
/// Free-text search across every column.
pub const GLOBAL_FILTER_KEY: &str = "q";

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;
pub const PAGE_SIZE_CHOICES: [usize; 5] = [10, 20, 30, 40, 50];

/// How a state change lands in the browser history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// New entry, back navigation returns to the previous state.
    Push,
    /// Overwrite the current entry.
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlUpdate {
    pub query: String,
    pub history: HistoryMode,
}

impl UrlUpdate {
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            "?".to_string()
        } else {
            format!("?{}", self.query)
        }
    }
}

/// Everything the table page keeps in its URL.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub filters: ColumnFilters,
    pub global_filter: Option<String>,
    pub sort: SortState,
    pub page_index: usize,
    pub page_size: usize,
    pub default_page_size: usize,
    pub date: Option<String>,
}

impl TableState {
    pub fn new(default_page_size: usize) -> Self {
        let default_page_size = clamp_page_size(default_page_size);
        Self {
            filters: ColumnFilters::new(),
            global_filter: None,
            sort: SortState::default(),
            page_index: 0,
            page_size: default_page_size,
            default_page_size,
            date: None,
        }
    }

    pub fn from_query(query: &str, default_page_size: usize) -> Self {
        let mut state = Self::new(default_page_size);
        state.apply_query(query);
        state
    }

    fn apply_query(&mut self, query: &str) {
        let (filters, sort) = codec::decode(query);
        self.filters = filters;
        self.sort = sort;
        self.global_filter = None;
        self.page_index = 0;
        self.page_size = self.default_page_size;
        self.date = None;

        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match &*key {
                PAGE_KEY => {
                    if let Ok(page) = value.parse::<usize>() {
                        self.page_index = page.saturating_sub(1);
                    }
                }
                SIZE_KEY => {
                    if let Ok(size) = value.parse::<usize>() {
                        self.page_size = clamp_page_size(size);
                    }
                }
                GLOBAL_FILTER_KEY if !value.is_empty() => self.global_filter = Some(value.into_owned()),
                DATE_KEY if !value.is_empty() => self.date = Some(value.into_owned()),
                _ => {}
            }
        }
    }

    /// Canonical query: filters, global search, sort, then paging and date, defaults omitted.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in codec::filter_params(&self.filters) {
            serializer.append_pair(&key, &value);
        }
        if let Some(text) = &self.global_filter {
            serializer.append_pair(GLOBAL_FILTER_KEY, text);
        }
        if let Some(sort) = codec::sort_param(&self.sort) {
            serializer.append_pair(SORT_KEY, &sort);
        }
        if self.page_index > 0 {
            serializer.append_pair(PAGE_KEY, &(self.page_index + 1).to_string());
        }
        if self.page_size != self.default_page_size {
            serializer.append_pair(SIZE_KEY, &self.page_size.to_string());
        }
        if let Some(date) = &self.date {
            serializer.append_pair(DATE_KEY, date);
        }
        serializer.finish()
    }

    fn update(&self, history: HistoryMode) -> UrlUpdate {
        UrlUpdate {
            query: self.to_query(),
            history,
        }
    }

    pub fn set_filter(&mut self, column: ColumnId, value: Option<FilterValue>) -> UrlUpdate {
        self.filters.set(column, value);
        self.page_index = 0;
        self.update(HistoryMode::Push)
    }

    pub fn set_global_filter(&mut self, text: Option<String>) -> UrlUpdate {
        self.global_filter = text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
        self.page_index = 0;
        self.update(HistoryMode::Push)
    }

    pub fn toggle_sort(&mut self, column: ColumnId, multi: bool) -> UrlUpdate {
        self.sort.toggle(column, multi);
        self.update(HistoryMode::Replace)
    }

    pub fn clear_sort(&mut self, column: ColumnId) -> UrlUpdate {
        self.sort.clear(column);
        self.update(HistoryMode::Replace)
    }

    pub fn set_page(&mut self, page_index: usize) -> UrlUpdate {
        self.page_index = page_index;
        self.update(HistoryMode::Push)
    }

    pub fn set_page_size(&mut self, page_size: usize) -> UrlUpdate {
        self.page_size = clamp_page_size(page_size);
        self.page_index = 0;
        self.update(HistoryMode::Push)
    }

    pub fn set_date(&mut self, date: Option<String>) -> UrlUpdate {
        self.date = date.filter(|d| !d.is_empty());
        self.page_index = 0;
        self.update(HistoryMode::Push)
    }

    /// Re-decodes the URL after back/forward navigation.
    ///
    /// Returns `true` when the view state changed.
    pub fn reconcile(&mut self, query: &str) -> bool {
        let before = self.clone();
        self.apply_query(query);
        *self != before
    }

    /// Builds state from a submitted filter form.
    ///
    /// Range columns arrive as `filter_<id>_min` / `filter_<id>_max`, value
    /// sets as repeated `filter_<id>` fields, searches as a single field.
    /// Global search, sort, size and date pass through, the page resets to
    /// the first one.
    pub fn from_form(query: &str, default_page_size: usize) -> Self {
        let mut state = Self::new(default_page_size);
        let pairs: Vec<(String, String)> = form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .into_owned()
            .collect();

        let first = |name: &str| form_value(&pairs, name);

        for column in INVENTORY_COLUMNS {
            let key = format!("{FILTER_KEY_PREFIX}{}", column.id);
            let value = match column.filter {
                FilterVariant::Range => {
                    let bound = |suffix: &str| {
                        first(&format!("{key}_{suffix}"))
                            .and_then(|v| v.trim().parse::<f64>().ok())
                            .filter(|n| n.is_finite())
                    };
                    Some(FilterValue::Range(RangeFilter::new(bound("min"), bound("max"))))
                }
                FilterVariant::Select | FilterVariant::MultiSelect => {
                    Some(FilterValue::values(form_values(&pairs, &key)))
                }
                FilterVariant::Search => first(&key).map(|v| FilterValue::Text(v.trim().to_string())),
                FilterVariant::None => None,
            };
            state.filters.set(column.id, value);
        }

        state.global_filter = first(GLOBAL_FILTER_KEY)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        if let Some(sort) = first(SORT_KEY) {
            state.sort = codec::parse_sort(sort);
        }
        if let Some(size) = first(SIZE_KEY).and_then(|v| v.parse::<usize>().ok()) {
            state.page_size = clamp_page_size(size);
        }
        state.date = first(DATE_KEY).filter(|d| !d.is_empty()).map(str::to_string);

        state
    }
}

fn form_values<'a>(pairs: &'a [(String, String)], name: &str) -> Vec<&'a str> {
    pairs
        .iter()
        .filter(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
        .collect()
}

fn form_value<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
}

pub fn clamp_page_size(size: usize) -> usize {
    size.clamp(1, MAX_PAGE_SIZE)
}

/// Whether the query came from the filter form rather than a canonical link.
pub fn is_form_submission(query: &str) -> bool {
    form_urlencoded::parse(query.as_bytes()).any(|(k, _)| k == APPLY_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::sort::SortEntry;

    #[test]
    fn filter_changes_push_and_reset_page() {
        let mut state = TableState::from_query("page=3", DEFAULT_PAGE_SIZE);
        assert_eq!(state.page_index, 2);

        let update = state.set_filter(ColumnId::Dealer, Some(FilterValue::values(["Acme Toyota"])));
        assert_eq!(update.history, HistoryMode::Push);
        assert_eq!(update.query, "filter_dealer=Acme_Toyota");
        assert_eq!(state.page_index, 0);
    }

    #[test]
    fn sort_changes_replace() {
        let mut state = TableState::new(DEFAULT_PAGE_SIZE);
        let update = state.toggle_sort(ColumnId::Price, true);
        assert_eq!(update.history, HistoryMode::Replace);
        assert_eq!(update.query, "sort=price.asc");
        assert_eq!(state.clear_sort(ColumnId::Price).history, HistoryMode::Replace);
    }

    #[test]
    fn query_round_trips_with_paging_and_date() {
        let query = "filter_status=transit+build&sort=status.desc&page=2&size=20&date=2025_01_01";
        let state = TableState::from_query(query, DEFAULT_PAGE_SIZE);
        assert_eq!(state.page_index, 1);
        assert_eq!(state.page_size, 20);
        assert_eq!(state.date.as_deref(), Some("2025_01_01"));
        assert_eq!(state.sort.entries(), &[SortEntry::desc(ColumnId::Status)]);
        assert_eq!(state.to_query(), query);
    }

    #[test]
    fn global_filter_round_trips_and_pushes() {
        let query = "filter_dealer=Acme_Toyota&q=wind+chill&sort=price.desc";
        let mut state = TableState::from_query(query, DEFAULT_PAGE_SIZE);
        assert_eq!(state.global_filter.as_deref(), Some("wind chill"));
        assert_eq!(state.to_query(), query);

        state.page_index = 2;
        let update = state.set_global_filter(Some("  ".to_string()));
        assert_eq!(update.history, HistoryMode::Push);
        assert_eq!(update.query, "filter_dealer=Acme_Toyota&sort=price.desc");
        assert_eq!(state.page_index, 0);

        assert!(state.reconcile("q=LE"));
        assert_eq!(state.global_filter.as_deref(), Some("LE"));
        assert!(state.filters.is_empty());
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(TableState::from_query("size=0", 10).page_size, 1);
        assert_eq!(TableState::from_query("size=500", 10).page_size, MAX_PAGE_SIZE);
        assert_eq!(TableState::from_query("size=abc", 10).page_size, 10);
    }

    #[test]
    fn reconcile_reports_changes_only() {
        let mut state = TableState::from_query("sort=price.desc", DEFAULT_PAGE_SIZE);
        assert!(!state.reconcile("sort=price.desc"));
        assert!(state.reconcile("filter_vin=JT"));
        assert!(state.sort.is_empty());
        assert_eq!(
            state.filters.get(ColumnId::Vin),
            Some(&FilterValue::Text("JT".to_string()))
        );
    }

    #[test]
    fn form_fields_become_canonical_state() {
        let query = "apply=1&filter_vin=+JT+&filter_distance_min=10&filter_distance_max=&filter_price_min=abc\
                     &filter_dealer=Acme+Toyota&filter_dealer=Best+Toyota&filter_factoryOptions=WL\
                     &q=+pearl+&sort=price.desc&size=20&date=";
        assert!(is_form_submission(query));

        let state = TableState::from_form(query, DEFAULT_PAGE_SIZE);
        assert_eq!(
            state.to_query(),
            "filter_vin=JT&filter_distance=10%3A&filter_dealer=Acme_Toyota+Best_Toyota\
             &filter_factoryOptions=WL&q=pearl&sort=price.desc&size=20"
        );
        assert!(state.filters.get(ColumnId::Price).is_none());
    }
}
