//! Reader for product feed artifacts.
//!
//! Synchronisation consumers accept any XLSX or CSV artifact whose header
//! row matches the feed columns exactly.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use stockfeed_core::{COLUMNS, ProductRecord, column_names};
use tracing::info;

use crate::errors::GenerationError;
use crate::output::OutputFormat;

#[derive(Debug, Clone, PartialEq)]
enum RawCell {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
}

static EMPTY_CELL: RawCell = RawCell::Empty;

/// Read a feed artifact, choosing the parser from the file extension.
pub fn read_feed(path: &Path) -> Result<Vec<ProductRecord>, GenerationError> {
    let rows = match OutputFormat::from_path(path)? {
        OutputFormat::Xlsx => read_xlsx_rows(path)?,
        OutputFormat::Csv => read_csv_rows(path)?,
    };
    let records = parse_rows(rows)?;
    info!(path = %path.display(), rows = records.len(), "feed loaded");
    Ok(records)
}

fn read_xlsx_rows(path: &Path) -> Result<Vec<Vec<RawCell>>, GenerationError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| GenerationError::InvalidFeed("workbook has no sheets".to_string()))?;
    let range = workbook.worksheet_range(&sheet)?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(raw_from_data).collect())
        .collect())
}

fn raw_from_data(data: &Data) -> RawCell {
    match data {
        Data::Empty => RawCell::Empty,
        Data::Int(value) => RawCell::Int(*value),
        Data::Float(value) => RawCell::Float(*value),
        Data::String(value) => RawCell::Text(value.clone()),
        other => RawCell::Text(other.to_string()),
    }
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<RawCell>>, GenerationError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        RawCell::Empty
                    } else {
                        RawCell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(rows)
}

fn parse_rows(rows: Vec<Vec<RawCell>>) -> Result<Vec<ProductRecord>, GenerationError> {
    let mut rows = rows.into_iter();
    let header = rows
        .next()
        .ok_or_else(|| GenerationError::InvalidFeed("missing header row".to_string()))?;
    check_header(&header)?;

    rows.enumerate()
        .filter(|(_, row)| row.iter().any(|cell| *cell != RawCell::Empty))
        .map(|(idx, row)| parse_record(idx + 2, &row))
        .collect()
}

fn check_header(header: &[RawCell]) -> Result<(), GenerationError> {
    let mut found: Vec<String> = header.iter().map(cell_text).collect();
    while found.last().is_some_and(|name| name.is_empty()) {
        found.pop();
    }
    let expected = column_names();
    if found != expected {
        return Err(GenerationError::InvalidFeed(format!(
            "header mismatch: expected [{}], found [{}]",
            expected.join(", "),
            found.join(", ")
        )));
    }
    Ok(())
}

struct RowCursor<'a> {
    line: usize,
    cells: &'a [RawCell],
}

impl RowCursor<'_> {
    fn cell(&self, idx: usize) -> &RawCell {
        self.cells.get(idx).unwrap_or(&EMPTY_CELL)
    }

    fn text(&self, idx: usize) -> String {
        cell_text(self.cell(idx))
    }

    fn integer(&self, idx: usize) -> Result<i64, GenerationError> {
        let value = match self.cell(idx) {
            RawCell::Int(value) => Some(*value),
            RawCell::Float(value) if value.fract() == 0.0 => Some(*value as i64),
            RawCell::Text(value) => value.trim().parse::<i64>().ok(),
            _ => None,
        };
        value.ok_or_else(|| self.invalid(idx, "integer"))
    }

    fn float(&self, idx: usize) -> Result<f64, GenerationError> {
        let value = match self.cell(idx) {
            RawCell::Int(value) => Some(*value as f64),
            RawCell::Float(value) => Some(*value),
            RawCell::Text(value) => value.trim().parse::<f64>().ok(),
            RawCell::Empty => None,
        };
        value.ok_or_else(|| self.invalid(idx, "number"))
    }

    fn invalid(&self, idx: usize, expected: &str) -> GenerationError {
        let column = COLUMNS.get(idx).map(|column| column.name).unwrap_or("?");
        GenerationError::InvalidFeed(format!(
            "row {}: column {column} is not a valid {expected}",
            self.line
        ))
    }
}

fn parse_record(line: usize, cells: &[RawCell]) -> Result<ProductRecord, GenerationError> {
    let row = RowCursor { line, cells };
    Ok(ProductRecord {
        id: row.integer(0)?,
        brand: row.text(1),
        model: row.text(2),
        ram: row.text(3),
        storage: row.text(4),
        network: row.text(5),
        processor: row.text(6),
        display: row.text(7),
        camera: row.text(8),
        battery: row.text(9),
        nfc: row.text(10),
        fingerprint: row.text(11),
        color: row.text(12),
        condition: row.text(13),
        price: row.float(14)?,
        stock: row.integer(15)?,
        imei: row.text(16),
        serial: row.text(17),
        last_updated: row.text(18),
    })
}

fn cell_text(cell: &RawCell) -> String {
    match cell {
        RawCell::Empty => String::new(),
        RawCell::Int(value) => value.to_string(),
        RawCell::Float(value) if value.fract() == 0.0 => format!("{value:.0}"),
        RawCell::Float(value) => value.to_string(),
        RawCell::Text(value) => value.clone(),
    }
}
