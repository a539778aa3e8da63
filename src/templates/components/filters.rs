use crate::table::codec::FILTER_KEY_PREFIX;
use crate::table::{Column, Facet, FilterValue, FilterVariant, TableState};
use maud::{html, Markup};

pub const FILTER_FORM_ID: &str = "filters";

/// Search inputs wait this long after the last keystroke before submitting.
pub const SEARCH_DEBOUNCE_MS: &str = "500";

/// Header cell: label, sort indicator and the column's filter control.
pub fn column_header(column: &Column, state: &TableState, facets: &[Facet]) -> Markup {
    let filtered = state.filters.get(column.id).is_some();
    let sorted = state.sort.position(column.id).is_some();

    html! {
        th.active[filtered || sorted] {
            div class="heading" {
                span { (column.id.label()) }
                @if column.sortable {
                    (sort_indicator(column, state))
                }
            }
            (filter_control(column, state, facets))
        }
    }
}

/// Click cycles asc/desc and appends to the multi-sort; right click clears.
fn sort_indicator(column: &Column, state: &TableState) -> Markup {
    let position = state.sort.position(column.id);

    let mut toggled = state.clone();
    let toggle = toggled.toggle_sort(column.id, true);
    let mut cleared = state.clone();
    let clear = cleared.clear_sort(column.id);

    let icon = match position {
        Some((_, false)) => "▲",
        Some((_, true)) => "▼",
        None => "☰",
    };

    html! {
        a.sort.sorted[position.is_some()]
            href=(toggle.href())
            data-history="replace"
            data-clear=(clear.href())
            title="Sort (right click to clear)"
        {
            @if let Some((index, _)) = position {
                (index + 1)
            }
            (icon)
        }
    }
}

fn filter_control(column: &Column, state: &TableState, facets: &[Facet]) -> Markup {
    let key = format!("{FILTER_KEY_PREFIX}{}", column.id);
    let current = state.filters.get(column.id);

    match column.filter {
        FilterVariant::Search => {
            let text = match current {
                Some(FilterValue::Text(text)) => text.as_str(),
                _ => "",
            };
            let list_id = format!("{key}_values");
            html! {
                input type="search" name=(key) form=(FILTER_FORM_ID) value=(text)
                    list=(list_id) placeholder="Search..." data-debounce=(SEARCH_DEBOUNCE_MS);
                datalist id=(list_id) {
                    @for facet in facets {
                        option value=(facet.value) {}
                    }
                }
            }
        }
        FilterVariant::Range => {
            let (min, max) = match current {
                Some(FilterValue::Range(range)) => (range.min, range.max),
                _ => (None, None),
            };
            let bound = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();
            html! {
                div class="range" {
                    input type="number" step="any" name=(format!("{key}_min")) form=(FILTER_FORM_ID)
                        value=(bound(min)) placeholder="Min" data-autosubmit;
                    input type="number" step="any" name=(format!("{key}_max")) form=(FILTER_FORM_ID)
                        value=(bound(max)) placeholder="Max" data-autosubmit;
                }
            }
        }
        FilterVariant::Select | FilterVariant::MultiSelect => {
            let selected: &[String] = match current {
                Some(FilterValue::Values(values)) => values,
                _ => &[],
            };
            // selections no remaining row carries still need a checkbox to clear them
            let missing = selected
                .iter()
                .filter(|v| !facets.iter().any(|f| &f.value == *v));

            html! {
                details {
                    summary {
                        @if selected.is_empty() { "All" } @else { (selected.len()) " selected" }
                    }
                    @for value in missing {
                        label {
                            input type="checkbox" name=(key) value=(value) form=(FILTER_FORM_ID) checked data-autosubmit;
                            (value) " " span class="count" { "(0)" }
                        }
                        br;
                    }
                    @for facet in facets {
                        label title=[facet.detail.as_deref()] {
                            input type="checkbox" name=(key) value=(facet.value) form=(FILTER_FORM_ID)
                                checked[selected.contains(&facet.value)] data-autosubmit;
                            (facet.label) " " span class="count" { "(" (facet.count) ")" }
                        }
                        br;
                    }
                }
            }
        }
        FilterVariant::None => html! {},
    }
}
