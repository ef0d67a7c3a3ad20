use stockfeed_core::{ProductRecord, column_names};

/// Render the feed as CSV with the same header and row order as the workbook.
pub fn render_csv(records: &[ProductRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(column_names())?;
    for record in records {
        let row: Vec<String> = record.cells().iter().map(|cell| cell.to_text()).collect();
        writer.write_record(&row)?;
    }

    writer.flush()?;
    writer.into_inner().map_err(|err| err.into_error().into())
}
