/// Name of the single worksheet holding the product feed.
pub const SHEET_NAME: &str = "Products";

/// Cell type of a feed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

/// Column of the product feed with its display width in characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub width: f64,
}

impl ColumnSpec {
    const fn new(name: &'static str, kind: ColumnKind, width: f64) -> Self {
        Self { name, kind, width }
    }
}

/// Number of columns in the feed.
pub const COLUMN_COUNT: usize = 19;

/// Feed columns in header order.
pub const COLUMNS: [ColumnSpec; COLUMN_COUNT] = [
    ColumnSpec::new("ID", ColumnKind::Integer, 5.0),
    ColumnSpec::new("Brand", ColumnKind::Text, 10.0),
    ColumnSpec::new("Model", ColumnKind::Text, 20.0),
    ColumnSpec::new("RAM", ColumnKind::Text, 8.0),
    ColumnSpec::new("Storage", ColumnKind::Text, 10.0),
    ColumnSpec::new("Network", ColumnKind::Text, 8.0),
    ColumnSpec::new("Processor", ColumnKind::Text, 20.0),
    ColumnSpec::new("Display", ColumnKind::Text, 20.0),
    ColumnSpec::new("Camera", ColumnKind::Text, 20.0),
    ColumnSpec::new("Battery", ColumnKind::Text, 12.0),
    ColumnSpec::new("NFC", ColumnKind::Text, 6.0),
    ColumnSpec::new("Fingerprint", ColumnKind::Text, 15.0),
    ColumnSpec::new("Color", ColumnKind::Text, 10.0),
    ColumnSpec::new("Condition", ColumnKind::Text, 12.0),
    ColumnSpec::new("Price", ColumnKind::Float, 10.0),
    ColumnSpec::new("Stock", ColumnKind::Integer, 8.0),
    ColumnSpec::new("IMEI", ColumnKind::Text, 17.0),
    ColumnSpec::new("Serial", ColumnKind::Text, 12.0),
    ColumnSpec::new("LastUpdated", ColumnKind::Text, 20.0),
];

pub fn column_names() -> Vec<&'static str> {
    COLUMNS.iter().map(|column| column.name).collect()
}
