use crate::inventory::InventoryRow;
use crate::table::column::{yes_no, Cell, Column, ColumnId};
use maud::{html, Markup};

/// Renders one body cell, `td` included.
pub fn cell(column: &Column, row: &InventoryRow) -> Markup {
    match column.id.cell(row) {
        Cell::Number(value) if column.is_money() => money_cell(value),
        Cell::Number(value) => html! { td { (value.to_string()) " mi" } },
        Cell::Text(vin) if column.id == ColumnId::Vin => html! {
            td {
                a href=(row.link) target="_blank" rel="noopener noreferrer" { strong { (vin) } }
            }
        },
        Cell::Text(text) => html! { td { (text) } },
        Cell::Status(status) => html! { td { (status.as_str()) } },
        Cell::Flag(flag) => html! { td { (yes_no(flag)) } },
        Cell::Options(options) => html! {
            td class="options" {
                @for option in options {
                    span title=(option.marketing_name) { "(" (option.option_cd) ")" }
                }
            }
        },
    }
}

fn money_cell(value: f64) -> Markup {
    html! {
        td.money.negative[value < 0.0] {
            span { "$" }
            span { (format_money(value)) }
        }
    }
}

/// en-US grouping of the absolute value, negatives wrapped in parentheses.
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction != 0 {
        let digits = format!("{fraction:02}");
        grouped.push('.');
        grouped.push_str(digits.trim_end_matches('0'));
    }

    if value < 0.0 && cents != 0 {
        format!("({grouped})")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_money(0.0), "0");
        assert_eq!(format_money(999.0), "999");
        assert_eq!(format_money(30000.0), "30,000");
        assert_eq!(format_money(1234567.5), "1,234,567.5");
        assert_eq!(format_money(19.99), "19.99");
    }

    #[test]
    fn negatives_use_parentheses() {
        assert_eq!(format_money(-1000.0), "(1,000)");
        assert_eq!(format_money(-0.001), "0");
    }
}
