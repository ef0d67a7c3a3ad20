use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// Default location of the generated product feed.
pub const DEFAULT_OUTPUT_PATH: &str = "data/products.xlsx";

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Feed artifact path.
    pub output_path: PathBuf,
    /// Artifact format; inferred from `output_path` when absent.
    pub format: Option<OutputFormat>,
    /// Seed for the random source. A fresh seed is drawn when absent.
    pub seed: Option<u64>,
    /// Optional path of the JSON generation report.
    pub report_path: Option<PathBuf>,
    /// Copy an existing artifact into `backups/` before overwriting it.
    pub backup_existing: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            format: None,
            seed: None,
            report_path: None,
            backup_existing: false,
        }
    }
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub seed: u64,
    pub catalog_fingerprint: String,
    pub format: OutputFormat,
    pub output_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<PathBuf>,
    pub combinations_considered: u64,
    pub combinations_rejected: u64,
    pub rows_generated: u64,
    pub rows_by_brand: BTreeMap<String, u64>,
    pub bytes_written: u64,
    pub duration_ms: u64,
}
