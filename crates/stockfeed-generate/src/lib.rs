//! Synthetic handset catalog generation for Stockfeed.
//!
//! This crate expands the axis catalog into valid brand/model/RAM/storage
//! combinations, derives technical specs, synthesizes operational fields
//! and writes the product feed as XLSX or CSV.

pub mod axes;
pub mod engine;
pub mod errors;
pub mod feed;
pub mod model;
pub mod output;
pub mod rules;
pub mod synth;

pub use axes::{AxisCatalog, Brand};
pub use engine::{
    CatalogGenerator, Clock, Combination, Enumeration, GenerationResult, enumerate_combinations,
};
pub use errors::GenerationError;
pub use feed::read_feed;
pub use model::{GenerateOptions, GenerationReport};
pub use output::{OutputFormat, OutputTarget};
pub use rules::{DerivedSpecs, derive_specs};
