//! Randomized operational fields: price, stock and identifiers.

use rand::Rng;
use stockfeed_core::{IMEI_LEN, MAX_STOCK, SERIAL_SUFFIX_LEN, serial_prefix};

/// Closed-open bounds of the randomized base price.
pub const BASE_PRICE_MIN: i64 = 300;
pub const BASE_PRICE_MAX: i64 = 1500;
pub const PRICE_PER_RAM_GB: f64 = 50.0;
pub const PRICE_PER_STORAGE_GB: f64 = 0.5;

const SERIAL_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn pick<'a, R: Rng + ?Sized>(values: &'a [String], rng: &mut R) -> Option<&'a str> {
    if values.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..values.len());
    Some(values[idx].as_str())
}

/// Integer base price in `[BASE_PRICE_MIN, BASE_PRICE_MAX)`.
pub fn base_price<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    rng.random_range(BASE_PRICE_MIN..BASE_PRICE_MAX)
}

pub fn price(base: i64, ram_gb: u32, storage_gb: u32) -> f64 {
    base as f64
        + f64::from(ram_gb) * PRICE_PER_RAM_GB
        + f64::from(storage_gb) * PRICE_PER_STORAGE_GB
}

pub fn stock<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    rng.random_range(0..=MAX_STOCK)
}

/// Fifteen uniformly random decimal digits. No Luhn check digit.
pub fn imei<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..IMEI_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10_u8)))
        .collect()
}

pub fn serial<R: Rng + ?Sized>(brand: &str, rng: &mut R) -> String {
    let mut serial = serial_prefix(brand);
    for _ in 0..SERIAL_SUFFIX_LEN {
        let idx = rng.random_range(0..SERIAL_CHARS.len());
        serial.push(char::from(SERIAL_CHARS[idx]));
    }
    serial
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn imei_is_fifteen_digits() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let value = imei(&mut rng);
            assert_eq!(value.len(), 15);
            assert!(value.chars().all(|ch| ch.is_ascii_digit()));
        }
    }

    #[test]
    fn serial_keeps_brand_prefix() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let value = serial("Samsung", &mut rng);
        assert!(value.starts_with("SAM"));
        assert_eq!(value.len(), 10);
        assert!(
            value[3..]
                .chars()
                .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit())
        );
        assert!(serial("LG", &mut rng).starts_with("LG"));
    }

    #[test]
    fn base_price_stays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1000 {
            let value = base_price(&mut rng);
            assert!((BASE_PRICE_MIN..BASE_PRICE_MAX).contains(&value));
            assert!((0..=9).contains(&stock(&mut rng)));
        }
    }

    #[test]
    fn price_adds_size_contributions() {
        assert_eq!(price(300, 8, 256), 300.0 + 400.0 + 128.0);
        assert_eq!(price(1000, 16, 1000), 1000.0 + 800.0 + 500.0);
    }

    #[test]
    fn pick_returns_none_for_empty_axis() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(pick(&[], &mut rng), None);
        let values = vec!["only".to_string()];
        assert_eq!(pick(&values, &mut rng), Some("only"));
    }
}
