use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::columns::{COLUMN_COUNT, ColumnKind};

/// One handset row of the product feed.
///
/// Serialized field names match the feed header exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProductRecord {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Brand")]
    pub brand: String,
    /// `"{Brand} {model name}"`.
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "RAM")]
    pub ram: String,
    #[serde(rename = "Storage")]
    pub storage: String,
    #[serde(rename = "Network")]
    pub network: String,
    #[serde(rename = "Processor")]
    pub processor: String,
    #[serde(rename = "Display")]
    pub display: String,
    #[serde(rename = "Camera")]
    pub camera: String,
    #[serde(rename = "Battery")]
    pub battery: String,
    #[serde(rename = "NFC")]
    pub nfc: String,
    #[serde(rename = "Fingerprint")]
    pub fingerprint: String,
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "Condition")]
    pub condition: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Stock")]
    pub stock: i64,
    /// 15 decimal digits, not checksum validated.
    #[serde(rename = "IMEI")]
    pub imei: String,
    #[serde(rename = "Serial")]
    pub serial: String,
    /// RFC 3339 timestamp of the generation instant.
    #[serde(rename = "LastUpdated")]
    pub last_updated: String,
}

/// Typed view of a single feed cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Integer(i64),
    Float(f64),
    Text(&'a str),
}

impl ProductRecord {
    /// All cells in header order, one per entry of [`COLUMNS`](crate::COLUMNS).
    pub fn cells(&self) -> [CellValue<'_>; COLUMN_COUNT] {
        [
            CellValue::Integer(self.id),
            CellValue::Text(&self.brand),
            CellValue::Text(&self.model),
            CellValue::Text(&self.ram),
            CellValue::Text(&self.storage),
            CellValue::Text(&self.network),
            CellValue::Text(&self.processor),
            CellValue::Text(&self.display),
            CellValue::Text(&self.camera),
            CellValue::Text(&self.battery),
            CellValue::Text(&self.nfc),
            CellValue::Text(&self.fingerprint),
            CellValue::Text(&self.color),
            CellValue::Text(&self.condition),
            CellValue::Float(self.price),
            CellValue::Integer(self.stock),
            CellValue::Text(&self.imei),
            CellValue::Text(&self.serial),
            CellValue::Text(&self.last_updated),
        ]
    }
}

impl CellValue<'_> {
    pub fn kind(&self) -> ColumnKind {
        match self {
            CellValue::Integer(_) => ColumnKind::Integer,
            CellValue::Float(_) => ColumnKind::Float,
            CellValue::Text(_) => ColumnKind::Text,
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            CellValue::Integer(value) => value.to_string(),
            CellValue::Float(value) => value.to_string(),
            CellValue::Text(value) => (*value).to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::ProductRecord;

    pub fn iphone(id: i64) -> ProductRecord {
        ProductRecord {
            id,
            brand: "iPhone".to_string(),
            model: "iPhone 13 Pro Max".to_string(),
            ram: "8GB".to_string(),
            storage: "256GB".to_string(),
            network: "5G".to_string(),
            processor: "A15 Bionic".to_string(),
            display: "6.7\" OLED 120Hz".to_string(),
            camera: "48MP+12MP+12MP".to_string(),
            battery: "4352mAh".to_string(),
            nfc: "Yes".to_string(),
            fingerprint: "Face ID".to_string(),
            color: "Blue".to_string(),
            condition: "New".to_string(),
            price: 1328.0,
            stock: 3,
            imei: "356789012345678".to_string(),
            serial: "IPHA1B2C3D".to_string(),
            last_updated: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::COLUMNS;

    #[test]
    fn cells_follow_header_order() {
        let record = fixtures::iphone(7);
        let cells = record.cells();
        assert_eq!(cells[0], CellValue::Integer(7));
        assert_eq!(cells[2], CellValue::Text("iPhone 13 Pro Max"));
        assert_eq!(cells[14], CellValue::Float(1328.0));
        assert_eq!(cells[15], CellValue::Integer(3));
        assert_eq!(cells[18], CellValue::Text("2024-01-01T00:00:00.000Z"));
    }

    #[test]
    fn cell_kinds_match_column_contract() {
        let record = fixtures::iphone(1);
        for (column, cell) in COLUMNS.iter().zip(record.cells()) {
            assert_eq!(cell.kind(), column.kind, "column {}", column.name);
        }
    }

    #[test]
    fn cells_pair_with_column_names() {
        let record = fixtures::iphone(1);
        let by_name: Vec<(&str, String)> = COLUMNS
            .iter()
            .map(|column| column.name)
            .zip(record.cells().iter().map(|cell| cell.to_text()))
            .collect();
        assert!(by_name.contains(&("Brand", "iPhone".to_string())));
        assert!(by_name.contains(&("IMEI", "356789012345678".to_string())));
        assert!(by_name.contains(&("Serial", "IPHA1B2C3D".to_string())));
    }
}
