use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::GenerationError;

/// Brands the derivation rules know about.
///
/// Anything else resolves to [`Brand::Other`] and takes the default branch
/// of every rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brand {
    IPhone,
    Samsung,
    Google,
    OnePlus,
    Xiaomi,
    Oppo,
    Vivo,
    Other,
}

impl Brand {
    pub fn from_name(name: &str) -> Self {
        match name {
            "iPhone" => Brand::IPhone,
            "Samsung" => Brand::Samsung,
            "Google" => Brand::Google,
            "OnePlus" => Brand::OnePlus,
            "Xiaomi" => Brand::Xiaomi,
            "OPPO" => Brand::Oppo,
            "Vivo" => Brand::Vivo,
            _ => Brand::Other,
        }
    }
}

/// Categorical axes the generator enumerates and samples from.
///
/// `models` and `processors` are keyed by brand name. A brand listed in
/// `brands` but missing from a keyed table has no models (and therefore no
/// records) or no processor options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisCatalog {
    pub brands: Vec<String>,
    pub ram: Vec<String>,
    pub storage: Vec<String>,
    pub networks: Vec<String>,
    pub colors: Vec<String>,
    pub conditions: Vec<String>,
    pub models: BTreeMap<String, Vec<String>>,
    pub processors: BTreeMap<String, Vec<String>>,
}

impl AxisCatalog {
    /// Load a catalog from a TOML file. Omitted axes keep their defaults.
    pub fn load(path: &Path) -> Result<Self, GenerationError> {
        let content = std::fs::read_to_string(path)?;
        let catalog: AxisCatalog = toml::from_str(&content)?;
        Ok(catalog)
    }

    pub fn models_for(&self, brand: &str) -> &[String] {
        self.models.get(brand).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn processors_for(&self, brand: &str) -> &[String] {
        self.processors.get(brand).map(Vec::as_slice).unwrap_or(&[])
    }

    /// SHA-256 of the canonical JSON encoding, hex encoded.
    pub fn fingerprint(&self) -> Result<String, GenerationError> {
        let encoded = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&encoded)))
    }
}

const DEFAULT_BRANDS: &[&str] = &[
    "iPhone", "Samsung", "Google", "OnePlus", "Xiaomi", "OPPO", "Vivo",
];

const DEFAULT_MODELS: &[(&str, &[&str])] = &[
    (
        "iPhone",
        &[
            "13 Pro Max",
            "13 Pro",
            "13",
            "12 Pro Max",
            "12 Pro",
            "12",
            "11 Pro Max",
            "11 Pro",
            "11",
        ],
    ),
    (
        "Samsung",
        &[
            "S23 Ultra",
            "S23+",
            "S23",
            "S22 Ultra",
            "S22+",
            "S22",
            "A73",
            "A53",
        ],
    ),
    (
        "Google",
        &["Pixel 7 Pro", "Pixel 7", "Pixel 6 Pro", "Pixel 6", "Pixel 6a"],
    ),
    ("OnePlus", &["11", "10 Pro", "10T", "9 Pro", "9", "Nord 3"]),
    (
        "Xiaomi",
        &["13 Pro", "13", "12 Pro", "12", "Poco F5", "Redmi Note 12 Pro"],
    ),
    ("OPPO", &["Find X6 Pro", "Find X6", "Reno 8 Pro", "Reno 8"]),
    ("Vivo", &["X90 Pro", "X90", "V27 Pro", "V27"]),
];

const DEFAULT_PROCESSORS: &[(&str, &[&str])] = &[
    ("iPhone", &["A16 Bionic", "A15 Bionic", "A14 Bionic"]),
    (
        "Samsung",
        &["Snapdragon 8 Gen 2", "Snapdragon 8 Gen 1", "Exynos 2200"],
    ),
    ("Google", &["Google Tensor G2", "Google Tensor"]),
    ("OnePlus", &["Snapdragon 8 Gen 2", "Snapdragon 8 Gen 1"]),
    ("Xiaomi", &["Snapdragon 8 Gen 2", "Snapdragon 8 Gen 1"]),
    ("OPPO", &["Snapdragon 8 Gen 2", "Dimensity 9000"]),
    ("Vivo", &["Snapdragon 8 Gen 2", "Dimensity 9000"]),
];

const DEFAULT_RAM: &[&str] = &["4GB", "6GB", "8GB", "12GB", "16GB"];
const DEFAULT_STORAGE: &[&str] = &["64GB", "128GB", "256GB", "512GB", "1TB"];
const DEFAULT_NETWORKS: &[&str] = &["4G", "5G"];
const DEFAULT_COLORS: &[&str] = &[
    "Black", "White", "Gold", "Silver", "Blue", "Red", "Purple", "Green",
];
const DEFAULT_CONDITIONS: &[&str] = &["New", "Like New", "Used", "Refurbished"];

impl Default for AxisCatalog {
    fn default() -> Self {
        Self {
            brands: strings(DEFAULT_BRANDS),
            ram: strings(DEFAULT_RAM),
            storage: strings(DEFAULT_STORAGE),
            networks: strings(DEFAULT_NETWORKS),
            colors: strings(DEFAULT_COLORS),
            conditions: strings(DEFAULT_CONDITIONS),
            models: keyed(DEFAULT_MODELS),
            processors: keyed(DEFAULT_PROCESSORS),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn keyed(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(brand, values)| (brand.to_string(), strings(values)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_models_for_every_brand() {
        let catalog = AxisCatalog::default();
        let total: usize = catalog
            .brands
            .iter()
            .map(|brand| catalog.models_for(brand).len())
            .sum();
        assert_eq!(total, 42);
        for brand in &catalog.brands {
            assert!(!catalog.processors_for(brand).is_empty(), "{brand}");
            assert_ne!(Brand::from_name(brand), Brand::Other, "{brand}");
        }
    }

    #[test]
    fn unknown_brand_has_empty_tables() {
        let catalog = AxisCatalog::default();
        assert!(catalog.models_for("Nokia").is_empty());
        assert!(catalog.processors_for("Nokia").is_empty());
        assert_eq!(Brand::from_name("Nokia"), Brand::Other);
    }

    #[test]
    fn partial_toml_keeps_default_axes() {
        let catalog: AxisCatalog = toml::from_str(
            r#"
brands = ["Nokia"]
ram = ["4GB"]

[models]
Nokia = ["G60"]
"#,
        )
        .expect("parse catalog");
        assert_eq!(catalog.brands, vec!["Nokia".to_string()]);
        assert_eq!(catalog.models_for("Nokia"), ["G60".to_string()]);
        assert_eq!(catalog.storage, AxisCatalog::default().storage);
    }

    #[test]
    fn default_catalog_survives_toml_encoding() {
        let encoded = toml::to_string_pretty(&AxisCatalog::default()).expect("encode catalog");
        let decoded: AxisCatalog = toml::from_str(&encoded).expect("decode catalog");
        assert_eq!(decoded, AxisCatalog::default());
    }

    #[test]
    fn fingerprint_tracks_catalog_content() {
        let catalog = AxisCatalog::default();
        let mut changed = catalog.clone();
        changed.colors.push("Pink".to_string());
        let a = catalog.fingerprint().expect("fingerprint");
        assert_eq!(a.len(), 64);
        assert_eq!(a, catalog.fingerprint().expect("fingerprint"));
        assert_ne!(a, changed.fingerprint().expect("fingerprint"));
    }
}
