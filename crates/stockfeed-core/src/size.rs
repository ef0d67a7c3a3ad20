//! Memory and storage size labels such as `8GB` or `1TB`.

const GB_PER_TB: u32 = 1000;

/// Parse a size label into gigabytes.
///
/// Accepts a decimal magnitude followed by `GB` or `TB`. Terabytes are
/// normalised so labels with different units compare correctly.
pub fn parse_size_gb(label: &str) -> Option<u32> {
    let label = label.trim();
    let split = label.find(|ch: char| !ch.is_ascii_digit())?;
    let (magnitude, unit) = label.split_at(split);
    if magnitude.is_empty() {
        return None;
    }
    let magnitude: u32 = magnitude.parse().ok()?;
    match unit.trim() {
        "GB" => Some(magnitude),
        "TB" => magnitude.checked_mul(GB_PER_TB),
        _ => None,
    }
}

/// RAM/storage validity constraint for a generated handset.
pub fn is_valid_pair(ram_gb: u32, storage_gb: u32) -> bool {
    ram_gb <= storage_gb && u64::from(storage_gb) >= u64::from(ram_gb) * 8
}
