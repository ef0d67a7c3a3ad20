use thiserror::Error;

/// Errors emitted by the generation engine and the feed reader.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid feed: {0}")]
    InvalidFeed(String),
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("xlsx write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),
    #[error("xlsx read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),
    #[error(transparent)]
    Core(#[from] stockfeed_core::Error),
}
