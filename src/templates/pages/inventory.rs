use crate::inventory::InventoryRow;
use crate::table::codec::{self, SORT_KEY};
use crate::table::state::{APPLY_KEY, GLOBAL_FILTER_KEY};
use crate::table::{ColumnFilters, DisplayRow, TableState, TableView};
use crate::templates::components::{cell, column_header, pagination, FILTER_FORM_ID, SEARCH_DEBOUNCE_MS};
use crate::templates::desktop_layout;
use maud::{html, Markup, PreEscaped};

// Sort links overwrite the current history entry, filter edits submit the
// form (the server answers with a redirect, which pushes).
const TABLE_SCRIPT: &str = r#"
(() => {
  const form = document.getElementById("filters");
  document.querySelectorAll('a[data-history="replace"]').forEach((link) => {
    link.addEventListener("click", (e) => { e.preventDefault(); location.replace(link.href); });
    link.addEventListener("contextmenu", (e) => { e.preventDefault(); location.replace(link.dataset.clear); });
  });
  document.querySelectorAll("[data-autosubmit]").forEach((el) => {
    el.addEventListener("change", () => form.requestSubmit());
  });
  document.querySelectorAll("[data-debounce]").forEach((input) => {
    let timer;
    input.addEventListener("input", () => {
      clearTimeout(timer);
      timer = setTimeout(() => form.requestSubmit(), Number(input.dataset.debounce));
    });
  });
})();
"#;

pub struct InventoryPageVm<'a> {
    pub view: &'a TableView,
    pub rows: &'a [InventoryRow],
    pub state: &'a TableState,
    /// Output of the snapshot listing, undated entries included.
    pub dates: &'a [Option<String>],
}

pub fn inventory_page(vm: &InventoryPageVm<'_>) -> Markup {
    let state = vm.state;
    let page = vm.view.page(vm.rows, state);
    let columns = vm.view.columns();

    let mut dates: Vec<&str> = vm.dates.iter().flatten().map(String::as_str).collect();
    dates.dedup();
    dates.reverse();

    let cleared = TableState {
        filters: ColumnFilters::new(),
        global_filter: None,
        page_index: 0,
        ..state.clone()
    };
    let export_href = format!("/api/inventory.xlsx?{}", state.to_query());

    desktop_layout(
        "Inventory",
        html! {
            main {
                form id=(FILTER_FORM_ID) method="get" action="/" {
                    input type="hidden" name=(APPLY_KEY) value="1";
                    @if let Some(sort) = codec::sort_param(&state.sort) {
                        input type="hidden" name=(SORT_KEY) value=(sort);
                    }
                }

                div class="toolbar" {
                    input type="search" name=(GLOBAL_FILTER_KEY) form=(FILTER_FORM_ID)
                        value=(state.global_filter.as_deref().unwrap_or_default())
                        placeholder="Filter all columns..." data-debounce=(SEARCH_DEBOUNCE_MS);
                    label {
                        "Snapshot "
                        select name="date" form=(FILTER_FORM_ID) data-autosubmit {
                            option value="" selected[state.date.is_none()] { "Latest" }
                            @for date in &dates {
                                option value=(date) selected[state.date.as_deref() == Some(*date)] { (date) }
                            }
                        }
                    }
                    @if !state.filters.is_empty() || state.global_filter.is_some() {
                        a href=(format!("/?{}", cleared.to_query())) { "Clear filters" }
                    }
                    a href=(export_href) { "Download XLSX" }
                }

                table {
                    thead {
                        tr {
                            @for column in columns {
                                (column_header(column, state, &vm.view.facets(vm.rows, state, column.id)))
                            }
                        }
                    }
                    tbody {
                        @for display in &page.rows {
                            @match display {
                                DisplayRow::Row(row) => {
                                    tr {
                                        @for column in columns {
                                            (cell(column, row))
                                        }
                                    }
                                }
                                DisplayRow::Filler => {
                                    tr class="filler" {
                                        @for _ in columns {
                                            td { (PreEscaped("&nbsp;")) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                (pagination(&page, state))
            }
            script { (PreEscaped(TABLE_SCRIPT)) }
        },
    )
}
