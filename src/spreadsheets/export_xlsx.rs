use crate::errors::ServerError;
use crate::inventory::InventoryRow;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use crate::table::column::{yes_no, Cell, Column};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

const MONEY_FORMAT: &str = "$#,##0;[Red]($#,##0)";

/// Builds the workbook for `rows` in column order, header on row 0.
pub fn inventory_workbook(rows: &[&InventoryRow], columns: &[Column]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let money = Format::new().set_num_format(MONEY_FORMAT);
    let bold = Format::new().set_bold();

    for (col, column) in columns.iter().enumerate() {
        let label = column.id.label();
        worksheet
            .write_string_with_format(0, col as u16, &label, &bold)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", label, e))
            })?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (c, column) in columns.iter().enumerate() {
            write_cell(worksheet, r, c as u16, column, row, &money)
                .map_err(|e| ServerError::XlsxError(format!("Failed to write {} for {}: {}", column.id, row.vin, e)))?;
        }
    }

    worksheet.autofit();

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}

fn write_cell(
    worksheet: &mut Worksheet,
    r: u32,
    c: u16,
    column: &Column,
    row: &InventoryRow,
    money: &Format,
) -> Result<(), rust_xlsxwriter::XlsxError> {
    match column.id.cell(row) {
        Cell::Number(n) if column.is_money() => worksheet.write_number_with_format(r, c, n, money)?,
        Cell::Number(n) => worksheet.write_number(r, c, n)?,
        Cell::Text(text) => worksheet.write_string(r, c, text)?,
        Cell::Status(status) => worksheet.write_string(r, c, status.as_str())?,
        Cell::Flag(flag) => worksheet.write_string(r, c, yes_no(flag))?,
        Cell::Options(options) => {
            let codes: Vec<&str> = options.iter().map(|o| o.option_cd.as_str()).collect();
            worksheet.write_string(r, c, codes.join(", "))?
        }
    };
    Ok(())
}

pub fn export_inventory_xlsx(rows: &[&InventoryRow], columns: &[Column], filename: &str) -> ResultResp {
    let buffer = inventory_workbook(rows, columns)?;
    xlsx_response(buffer, filename)
}
