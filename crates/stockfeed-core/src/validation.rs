use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::record::ProductRecord;
use crate::size::{is_valid_pair, parse_size_gb};

/// Length of the brand prefix that opens every serial number.
pub const SERIAL_PREFIX_LEN: usize = 3;
/// Random characters following the serial prefix.
pub const SERIAL_SUFFIX_LEN: usize = 7;
/// Number of digits in a generated IMEI.
pub const IMEI_LEN: usize = 15;
/// Highest stock level the generator emits.
pub const MAX_STOCK: i64 = 9;

/// Upper-cased serial prefix for a brand: its first three characters, or
/// the whole name when shorter.
pub fn serial_prefix(brand: &str) -> String {
    brand
        .chars()
        .take(SERIAL_PREFIX_LEN)
        .collect::<String>()
        .to_uppercase()
}

fn imei_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{15}$").expect("valid imei pattern"))
}

fn serial_suffix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z0-9]{7}$").expect("valid serial pattern"))
}

/// Validate a full feed.
///
/// This checks:
/// - IDs run 1..N in emission order
/// - every record passes [`validate_record`]
pub fn validate_records(records: &[ProductRecord]) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        let expected = index as i64 + 1;
        if record.id != expected {
            return Err(Error::InvalidFeed(format!(
                "expected ID {expected} at row {}, found {}",
                index + 1,
                record.id
            )));
        }
        validate_record(record)?;
    }
    Ok(())
}

/// Validate the invariants of a single record.
pub fn validate_record(record: &ProductRecord) -> Result<()> {
    let invalid = |message: String| Error::InvalidRecord {
        id: record.id,
        message,
    };

    if !record.model.starts_with(&format!("{} ", record.brand)) {
        return Err(invalid(format!(
            "model '{}' is not prefixed by brand '{}'",
            record.model, record.brand
        )));
    }

    let ram = parse_size_gb(&record.ram)
        .ok_or_else(|| invalid(format!("unparsable RAM '{}'", record.ram)))?;
    let storage = parse_size_gb(&record.storage)
        .ok_or_else(|| invalid(format!("unparsable storage '{}'", record.storage)))?;
    if !is_valid_pair(ram, storage) {
        return Err(invalid(format!(
            "RAM {} with storage {} violates the size constraint",
            record.ram, record.storage
        )));
    }

    if record.imei.len() != IMEI_LEN || !imei_pattern().is_match(&record.imei) {
        return Err(invalid(format!("malformed IMEI '{}'", record.imei)));
    }

    let prefix = serial_prefix(&record.brand);
    let suffix = record
        .serial
        .strip_prefix(&prefix)
        .ok_or_else(|| invalid(format!("serial '{}' lacks prefix '{prefix}'", record.serial)))?;
    if !serial_suffix_pattern().is_match(suffix) {
        return Err(invalid(format!("malformed serial '{}'", record.serial)));
    }

    if !(0..=MAX_STOCK).contains(&record.stock) {
        return Err(invalid(format!("stock {} out of range", record.stock)));
    }

    if record.nfc != "Yes" {
        return Err(invalid(format!("unexpected NFC value '{}'", record.nfc)));
    }

    Ok(())
}
