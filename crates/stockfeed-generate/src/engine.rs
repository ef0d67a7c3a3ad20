use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stockfeed_core::{ProductRecord, is_valid_pair, parse_size_gb};
use tracing::{debug, info, warn};

use crate::axes::AxisCatalog;
use crate::errors::GenerationError;
use crate::model::{GenerateOptions, GenerationReport};
use crate::output::OutputTarget;
use crate::output::atomic::write_json_atomic;
use crate::rules::derive_specs;
use crate::synth;

const NFC: &str = "Yes";

/// Wall-clock source for `LastUpdated` stamps.
pub type Clock = fn() -> DateTime<Utc>;

/// A brand/model/RAM/storage tuple that passed the size constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    pub brand: String,
    /// Bare model name, without the brand prefix.
    pub model: String,
    pub ram: String,
    pub storage: String,
    pub ram_gb: u32,
    pub storage_gb: u32,
}

/// Candidate set produced by [`enumerate_combinations`].
#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    pub combinations: Vec<Combination>,
    /// Tuples tested against the size constraint.
    pub considered: u64,
}

impl Enumeration {
    pub fn rejected(&self) -> u64 {
        self.considered - self.combinations.len() as u64
    }
}

/// Enumerate valid combinations in brand, model, RAM, storage order.
///
/// Size labels that do not parse are dropped from their axis. Empty axes
/// simply yield no combinations.
pub fn enumerate_combinations(catalog: &AxisCatalog) -> Enumeration {
    let ram = parse_axis("ram", &catalog.ram);
    let storage = parse_axis("storage", &catalog.storage);
    let mut enumeration = Enumeration::default();

    for brand in &catalog.brands {
        let models = catalog.models_for(brand);
        if models.is_empty() {
            warn!(brand = %brand, "brand has no models");
        }
        for model in models {
            for (ram_label, ram_gb) in &ram {
                for (storage_label, storage_gb) in &storage {
                    enumeration.considered += 1;
                    if is_valid_pair(*ram_gb, *storage_gb) {
                        enumeration.combinations.push(Combination {
                            brand: brand.clone(),
                            model: model.clone(),
                            ram: ram_label.clone(),
                            storage: storage_label.clone(),
                            ram_gb: *ram_gb,
                            storage_gb: *storage_gb,
                        });
                    }
                }
            }
        }
    }

    enumeration
}

fn parse_axis(axis: &'static str, labels: &[String]) -> Vec<(String, u32)> {
    labels
        .iter()
        .filter_map(|label| match parse_size_gb(label) {
            Some(gb) => Some((label.clone(), gb)),
            None => {
                warn!(axis, label = %label, "dropping unparsable size label");
                None
            }
        })
        .collect()
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub output_path: PathBuf,
    pub records: Vec<ProductRecord>,
    pub report: GenerationReport,
}

/// Entry point for generating the synthetic product feed.
#[derive(Debug, Clone)]
pub struct CatalogGenerator {
    catalog: AxisCatalog,
    options: GenerateOptions,
    clock: Clock,
}

impl CatalogGenerator {
    pub fn new(catalog: AxisCatalog, options: GenerateOptions) -> Self {
        Self {
            catalog,
            options,
            clock: Utc::now,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Generate records in memory from the given random source.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<ProductRecord> {
        let enumeration = enumerate_combinations(&self.catalog);
        self.materialize(&enumeration.combinations, rng)
    }

    fn materialize<R: Rng + ?Sized>(
        &self,
        combinations: &[Combination],
        rng: &mut R,
    ) -> Vec<ProductRecord> {
        combinations
            .iter()
            .enumerate()
            .map(|(idx, combination)| self.build_record(idx as i64 + 1, combination, rng))
            .collect()
    }

    fn build_record<R: Rng + ?Sized>(
        &self,
        id: i64,
        combination: &Combination,
        rng: &mut R,
    ) -> ProductRecord {
        let specs = derive_specs(&combination.brand, &combination.model, &self.catalog, rng);
        let base_price = synth::base_price(rng);
        let color = synth::pick(&self.catalog.colors, rng).unwrap_or_default();
        let condition = synth::pick(&self.catalog.conditions, rng).unwrap_or_default();

        ProductRecord {
            id,
            brand: combination.brand.clone(),
            model: format!("{} {}", combination.brand, combination.model),
            ram: combination.ram.clone(),
            storage: combination.storage.clone(),
            network: specs.network,
            processor: specs.processor,
            display: specs.display,
            camera: specs.camera,
            battery: specs.battery,
            nfc: NFC.to_string(),
            fingerprint: specs.fingerprint,
            color: color.to_string(),
            condition: condition.to_string(),
            price: synth::price(base_price, combination.ram_gb, combination.storage_gb),
            stock: synth::stock(rng),
            imei: synth::imei(rng),
            serial: synth::serial(&combination.brand, rng),
            last_updated: (self.clock)().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Generate the feed and write it to the configured output path.
    pub fn run(&self) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let started_at = (self.clock)();
        let run_id = uuid::Uuid::new_v4().to_string();
        let seed = self.options.seed.unwrap_or_else(rand::random);
        let catalog_fingerprint = self.catalog.fingerprint()?;
        let target = OutputTarget::acquire(&self.options.output_path, self.options.format)?;

        info!(
            run_id = %run_id,
            seed,
            format = %target.format(),
            path = %target.path().display(),
            "generation started"
        );

        let enumeration = enumerate_combinations(&self.catalog);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let records = self.materialize(&enumeration.combinations, &mut rng);

        let mut rows_by_brand: BTreeMap<String, u64> = BTreeMap::new();
        for record in &records {
            *rows_by_brand.entry(record.brand.clone()).or_insert(0) += 1;
        }
        for (brand, rows) in &rows_by_brand {
            debug!(brand = %brand, rows, "brand generated");
        }

        let backup_path = if self.options.backup_existing {
            target.backup(started_at)?
        } else {
            None
        };
        if let Some(path) = &backup_path {
            info!(path = %path.display(), "previous feed backed up");
        }

        let bytes_written = target.write(&records)?;

        let report = GenerationReport {
            run_id: run_id.clone(),
            started_at,
            seed,
            catalog_fingerprint,
            format: target.format(),
            output_path: target.path().to_path_buf(),
            backup_path,
            combinations_considered: enumeration.considered,
            combinations_rejected: enumeration.rejected(),
            rows_generated: records.len() as u64,
            rows_by_brand,
            bytes_written,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        if let Some(report_path) = &self.options.report_path {
            write_json_atomic(report_path, &report)?;
        }

        info!(
            run_id = %run_id,
            rows = report.rows_generated,
            rejected = report.combinations_rejected,
            bytes_written,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult {
            output_path: target.path().to_path_buf(),
            records,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_order_is_brand_major() {
        let enumeration = enumerate_combinations(&AxisCatalog::default());
        let labels = |c: &Combination| {
            [c.brand.clone(), c.model.clone(), c.ram.clone(), c.storage.clone()]
        };
        let first = labels(&enumeration.combinations[0]);
        assert_eq!(first, ["iPhone", "13 Pro Max", "4GB", "64GB"]);
        let last = labels(enumeration.combinations.last().expect("non-empty"));
        assert_eq!(last, ["Vivo", "V27", "16GB", "1TB"]);
    }

    #[test]
    fn default_catalog_yields_23_combinations_per_model() {
        let enumeration = enumerate_combinations(&AxisCatalog::default());
        assert_eq!(enumeration.considered, 42 * 25);
        assert_eq!(enumeration.combinations.len(), 42 * 23);
        assert_eq!(enumeration.rejected(), 42 * 2);
    }

    #[test]
    fn empty_axis_yields_nothing() {
        let mut catalog = AxisCatalog::default();
        catalog.storage.clear();
        let enumeration = enumerate_combinations(&catalog);
        assert!(enumeration.combinations.is_empty());
        assert_eq!(enumeration.considered, 0);
    }

    #[test]
    fn unparsable_labels_are_dropped() {
        let mut catalog = AxisCatalog::default();
        catalog.brands = vec!["iPhone".to_string()];
        catalog.ram = vec!["lots".to_string(), "4GB".to_string()];
        catalog.storage = vec!["64GB".to_string()];
        let enumeration = enumerate_combinations(&catalog);
        assert_eq!(enumeration.combinations.len(), 9);
        assert!(enumeration.combinations.iter().all(|c| c.ram == "4GB"));
    }
}
