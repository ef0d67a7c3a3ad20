pub mod atomic;
pub mod csv;
pub mod xlsx;

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockfeed_core::ProductRecord;

use crate::errors::GenerationError;
use atomic::write_bytes_atomic;

/// Tabular artifact formats the feed can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Xlsx,
    Csv,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, GenerationError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("xlsx") => Ok(OutputFormat::Xlsx),
            Some("csv") => Ok(OutputFormat::Csv),
            _ => Err(GenerationError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
        }
    }

    pub fn render(&self, records: &[ProductRecord]) -> Result<Vec<u8>, GenerationError> {
        match self {
            OutputFormat::Xlsx => Ok(xlsx::render_xlsx(records)?),
            OutputFormat::Csv => Ok(csv::render_csv(records)?),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output location whose containing directory is known to exist.
#[derive(Debug, Clone)]
pub struct OutputTarget {
    path: PathBuf,
    format: OutputFormat,
}

impl OutputTarget {
    /// Resolve the format and create the parent directory of `path`.
    pub fn acquire(path: &Path, format: Option<OutputFormat>) -> Result<Self, GenerationError> {
        let format = match format {
            Some(format) => format,
            None => OutputFormat::from_path(path)?,
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path: path.to_path_buf(),
            format,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Copy an existing artifact to `<dir>/backups/<stem>_<timestamp>.<ext>`.
    pub fn backup(&self, now: DateTime<Utc>) -> Result<Option<PathBuf>, GenerationError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let stem = self
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "feed".to_string());
        let backup_dir = self
            .path
            .parent()
            .map(|parent| parent.join("backups"))
            .unwrap_or_else(|| PathBuf::from("backups"));
        std::fs::create_dir_all(&backup_dir)?;

        let file_name = format!(
            "{stem}_{}.{}",
            now.format("%Y%m%d_%H%M%S"),
            self.format.as_str()
        );
        let backup_path = backup_dir.join(file_name);
        std::fs::copy(&self.path, &backup_path)?;
        Ok(Some(backup_path))
    }

    /// Render and write the records, returning the artifact size in bytes.
    pub fn write(&self, records: &[ProductRecord]) -> Result<u64, GenerationError> {
        let bytes = self.format.render(records)?;
        write_bytes_atomic(&self.path, &bytes)?;
        Ok(bytes.len() as u64)
    }
}
