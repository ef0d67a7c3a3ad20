use rust_xlsxwriter::{Format, Workbook, XlsxError};
use stockfeed_core::{COLUMNS, CellValue, ColumnKind, ProductRecord, SHEET_NAME};

const PRICE_NUM_FORMAT: &str = "0.00";

/// Render the feed as a single-sheet workbook with a bold, frozen header.
///
/// Column widths and number formats come from [`COLUMNS`].
pub fn render_xlsx(records: &[ProductRecord]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let integer = Format::new().set_num_format("0");
    let float = Format::new().set_num_format(PRICE_NUM_FORMAT);
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (idx, column) in COLUMNS.iter().enumerate() {
        let col = idx as u16;
        worksheet.write_string_with_format(0, col, column.name, &header)?;
        worksheet.set_column_width(col, column.width)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (idx, record) in records.iter().enumerate() {
        let row = u32::try_from(idx + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        for (col, (column, cell)) in COLUMNS.iter().zip(record.cells()).enumerate() {
            let col = col as u16;
            match (column.kind, cell) {
                (ColumnKind::Integer, CellValue::Integer(value)) => {
                    worksheet.write_number_with_format(row, col, value as f64, &integer)?;
                }
                (ColumnKind::Float, CellValue::Float(value)) => {
                    worksheet.write_number_with_format(row, col, value, &float)?;
                }
                (ColumnKind::Text, CellValue::Text(value)) => {
                    worksheet.write_string(row, col, value)?;
                }
                (_, cell) => {
                    return Err(XlsxError::ParameterError(format!(
                        "column {} expects {:?}, got {:?}",
                        column.name,
                        column.kind,
                        cell.kind()
                    )));
                }
            }
        }
    }

    workbook.save_to_buffer()
}
