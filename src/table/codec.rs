//! Filter and sort state <-> URL query string.
//!
//! Each filter lives under its own `filter_<columnId>` parameter, the sort
//! under `sort`. Decoding is best-effort: anything that does not parse is
//! dropped rather than reported.

use url::form_urlencoded;

use super::column::{column, ColumnId, FilterVariant};
use super::filter::{ColumnFilters, FilterValue, RangeFilter};
use super::sort::{SortEntry, SortState};

pub const FILTER_KEY_PREFIX: &str = "filter_";
pub const SORT_KEY: &str = "sort";

const RANGE_SEPARATOR: char = ':';
const VALUE_SEPARATOR: char = ' ';
const SPACE_PLACEHOLDER: char = '_';
const SORT_SEPARATOR: char = ';';

/// A column-specific `value <-> string` pair.
#[derive(Debug, Clone, Copy)]
pub struct ValueCodec {
    pub resolve: fn(&FilterValue) -> Option<String>,
    pub parse: fn(&str) -> Option<FilterValue>,
}

pub const RANGE_CODEC: ValueCodec = ValueCodec {
    resolve: resolve_range,
    parse: parse_range,
};

pub const VALUES_CODEC: ValueCodec = ValueCodec {
    resolve: resolve_values,
    parse: parse_values,
};

/// Fallback for columns without a registered codec.
pub const TEXT_CODEC: ValueCodec = ValueCodec {
    resolve: resolve_text,
    parse: parse_text,
};

impl FilterVariant {
    pub fn codec(self) -> ValueCodec {
        match self {
            FilterVariant::Range => RANGE_CODEC,
            FilterVariant::Select | FilterVariant::MultiSelect => VALUES_CODEC,
            FilterVariant::Search | FilterVariant::None => TEXT_CODEC,
        }
    }
}

fn codec_for(id: ColumnId) -> ValueCodec {
    column(id).filter.codec()
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

fn resolve_range(value: &FilterValue) -> Option<String> {
    let FilterValue::Range(range) = value else {
        return None;
    };
    if range.is_unbounded() {
        return None;
    }
    let half = |bound: Option<f64>| bound.map(|n| n.to_string()).unwrap_or_default();
    Some(format!("{}{RANGE_SEPARATOR}{}", half(range.min), half(range.max)))
}

fn parse_range(raw: &str) -> Option<FilterValue> {
    let (min, max) = raw.split_once(RANGE_SEPARATOR)?;
    let half = |s: &str| s.trim().parse::<f64>().ok().filter(|n| n.is_finite());
    let range = RangeFilter::new(half(min), half(max));
    (!range.is_unbounded()).then_some(FilterValue::Range(range))
}

/// `%` and `_` are percent-escaped first so the space placeholder stays unambiguous.
fn escape_token(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace(SPACE_PLACEHOLDER, "%5F")
        .replace(VALUE_SEPARATOR, "_")
}

fn unescape_token(token: &str) -> String {
    token
        .replace(SPACE_PLACEHOLDER, " ")
        .replace("%5F", "_")
        .replace("%25", "%")
}

fn resolve_values(value: &FilterValue) -> Option<String> {
    let FilterValue::Values(values) = value else {
        return None;
    };
    let tokens: Vec<String> = values
        .iter()
        .filter(|v| !v.is_empty())
        .map(|v| escape_token(v))
        .collect();
    non_empty(tokens.join(&VALUE_SEPARATOR.to_string()))
}

fn parse_values(raw: &str) -> Option<FilterValue> {
    let value = FilterValue::values(
        raw.split(VALUE_SEPARATOR)
            .filter(|t| !t.is_empty())
            .map(unescape_token),
    );
    (!value.is_empty()).then_some(value)
}

fn resolve_text(value: &FilterValue) -> Option<String> {
    match value {
        FilterValue::Text(text) => non_empty(text.clone()),
        _ => None,
    }
}

fn parse_text(raw: &str) -> Option<FilterValue> {
    (!raw.is_empty()).then(|| FilterValue::Text(raw.to_string()))
}

/// The `(key, value)` pairs for every filter whose value resolves to something.
pub fn filter_params(filters: &ColumnFilters) -> Vec<(String, String)> {
    filters
        .iter()
        .filter_map(|entry| {
            let resolved = (codec_for(entry.column).resolve)(&entry.value)?;
            Some((format!("{FILTER_KEY_PREFIX}{}", entry.column), resolved))
        })
        .collect()
}

pub fn sort_param(sort: &SortState) -> Option<String> {
    let tokens: Vec<String> = sort
        .entries()
        .iter()
        .map(|e| format!("{}.{}", e.column, if e.descending { "desc" } else { "asc" }))
        .collect();
    non_empty(tokens.join(&SORT_SEPARATOR.to_string()))
}

pub fn parse_sort(raw: &str) -> SortState {
    let entries = raw
        .split(SORT_SEPARATOR)
        .filter_map(|token| {
            let (id, direction) = token.trim().rsplit_once('.')?;
            let column = ColumnId::parse(id)?;
            match direction {
                "asc" => Some(SortEntry::asc(column)),
                "desc" => Some(SortEntry::desc(column)),
                _ => None,
            }
        })
        .collect();
    SortState::new(entries)
}

/// Parses a single `filter_<columnId>` pair.
pub fn parse_filter_param(key: &str, value: &str) -> Option<(ColumnId, FilterValue)> {
    let id = ColumnId::parse(key.strip_prefix(FILTER_KEY_PREFIX)?)?;
    let value = (codec_for(id).parse)(value)?;
    Some((id, value))
}

pub fn encode(filters: &ColumnFilters, sort: &SortState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in filter_params(filters) {
        serializer.append_pair(&key, &value);
    }
    if let Some(sort) = sort_param(sort) {
        serializer.append_pair(SORT_KEY, &sort);
    }
    serializer.finish()
}

pub fn decode(query: &str) -> (ColumnFilters, SortState) {
    let mut filters = ColumnFilters::new();
    let mut sort = SortState::default();

    for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
        if key == SORT_KEY {
            sort = parse_sort(&value);
        } else if let Some((id, value)) = parse_filter_param(&key, &value) {
            filters.set(id, Some(value));
        }
    }

    (filters, sort)
}
