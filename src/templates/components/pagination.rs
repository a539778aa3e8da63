use crate::table::state::PAGE_SIZE_CHOICES;
use crate::table::{PageView, TableState};
use maud::{html, Markup};

use super::filters::FILTER_FORM_ID;

pub fn pagination(page: &PageView<'_>, state: &TableState) -> Markup {
    let link = |index: usize| {
        let mut next = state.clone();
        next.set_page(index).href()
    };

    let mut sizes: Vec<usize> = PAGE_SIZE_CHOICES.to_vec();
    if !sizes.contains(&page.page_size) {
        sizes.push(page.page_size);
        sizes.sort_unstable();
    }

    html! {
        div class="pagination" {
            span class="count" { (page.matched) " of " (page.total) " rows" }

            label {
                "Rows per page "
                select name="size" form=(FILTER_FORM_ID) data-autosubmit {
                    @for size in sizes.iter().copied() {
                        option value=(size) selected[size == page.page_size] { (size) }
                    }
                }
            }

            span { "Page " (page.page_index + 1) " of " (page.page_count) }

            @if page.can_previous() {
                a href=(link(page.page_index - 1)) { "Previous" }
            } @else {
                span class="count" { "Previous" }
            }
            @if page.can_next() {
                a href=(link(page.page_index + 1)) { "Next" }
            } @else {
                span class="count" { "Next" }
            }
        }
    }
}
