mod logging;
mod settings;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use schemars::schema_for;
use stockfeed_core::{
    DEFAULT_LOW_STOCK_THRESHOLD, Error as CoreError, ProductRecord, render_summary, summarize,
    validate_records,
};
use stockfeed_generate::model::DEFAULT_OUTPUT_PATH;
use stockfeed_generate::{
    AxisCatalog, CatalogGenerator, GenerateOptions, GenerationError, OutputFormat, read_feed,
};
use thiserror::Error;

use logging::init_logging;
use settings::{Settings, load_settings};

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("toml encoding error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Parser, Debug)]
#[command(name = "stockfeed", version, about = "Synthetic handset feed generator")]
struct Cli {
    /// Settings file (defaults to ./stockfeed.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log level filter, e.g. `info` or `stockfeed_generate=debug`.
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Append JSON logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the product feed.
    Generate(GenerateArgs),
    /// Validate and summarize an existing feed.
    Inspect(InspectArgs),
    /// Print the built-in axis catalog as TOML.
    Catalog,
    /// Print the JSON schema of a feed record.
    Schema,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Output artifact path.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format; inferred from the extension when omitted.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    /// Seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML axis catalog replacing the built-in one.
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Write a JSON generation report to this path.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Back up an existing artifact before overwriting it.
    #[arg(long, default_value_t = false)]
    backup: bool,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Feed artifact to inspect (defaults to the configured output path).
    path: Option<PathBuf>,
    /// Stock level counted as low stock.
    #[arg(long)]
    low_stock: Option<i64>,
    /// Print the summary as JSON instead of markdown.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Xlsx,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Xlsx => OutputFormat::Xlsx,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| settings.log_level().to_string());
    let log_file = cli.log_file.clone().or_else(|| settings.log_file.clone());
    init_logging(&level, log_file.as_deref())?;

    match cli.command {
        Command::Generate(args) => run_generate(args, &settings),
        Command::Inspect(args) => run_inspect(args, &settings),
        Command::Catalog => {
            print!("{}", toml::to_string_pretty(&AxisCatalog::default())?);
            Ok(())
        }
        Command::Schema => {
            let schema = schema_for!(ProductRecord);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

fn run_generate(args: GenerateArgs, settings: &Settings) -> Result<(), CliError> {
    let GenerateArgs {
        out,
        format,
        seed,
        catalog,
        report,
        backup,
    } = args;

    let options = GenerateOptions {
        output_path: out
            .or_else(|| settings.output_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
        format: format.map(OutputFormat::from).or(settings.format),
        seed,
        report_path: report.or_else(|| settings.report_path.clone()),
        backup_existing: backup,
    };

    let catalog = match catalog.or_else(|| settings.catalog_path.clone()) {
        Some(path) => load_catalog(&path)?,
        None => AxisCatalog::default(),
    };

    let result = CatalogGenerator::new(catalog, options).run()?;
    tracing::info!(
        event = "feed_written",
        rows = result.report.rows_generated,
        seed = result.report.seed,
        path = %result.output_path.display()
    );
    println!(
        "Sample data has been generated in {}",
        result.output_path.display()
    );
    Ok(())
}

fn load_catalog(path: &Path) -> Result<AxisCatalog, CliError> {
    let catalog = AxisCatalog::load(path)?;
    if catalog.brands.is_empty() {
        tracing::warn!(path = %path.display(), "catalog defines no brands");
    }
    tracing::info!(
        event = "catalog_loaded",
        path = %path.display(),
        brands = catalog.brands.len()
    );
    Ok(catalog)
}

fn run_inspect(args: InspectArgs, settings: &Settings) -> Result<(), CliError> {
    let path = args
        .path
        .or_else(|| settings.output_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));
    let threshold = args
        .low_stock
        .or(settings.low_stock_threshold)
        .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
    if threshold < 0 {
        return Err(CliError::InvalidConfig(
            "low stock threshold must be >= 0".to_string(),
        ));
    }

    let records = read_feed(&path)?;
    validate_records(&records)?;
    tracing::info!(event = "feed_validated", rows = records.len(), path = %path.display());

    let summary = summarize(&records, threshold);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", render_summary(&summary));
    }
    Ok(())
}
