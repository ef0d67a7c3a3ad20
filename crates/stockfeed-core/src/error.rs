use thiserror::Error;

/// Core error type shared across Stockfeed crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A record violates one of the feed invariants.
    #[error("invalid record {id}: {message}")]
    InvalidRecord { id: i64, message: String },
    /// The record sequence as a whole is inconsistent.
    #[error("invalid feed: {0}")]
    InvalidFeed(String),
}

/// Convenience alias for results returned by Stockfeed crates.
pub type Result<T> = std::result::Result<T, Error>;
