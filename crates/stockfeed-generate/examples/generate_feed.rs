use std::env;
use std::path::PathBuf;

use stockfeed_generate::{AxisCatalog, CatalogGenerator, GenerateOptions};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut options = GenerateOptions::default();
    let mut catalog_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => {
                options.output_path = args.next().map(PathBuf::from).ok_or("missing --out path")?
            }
            "--catalog" => {
                catalog_path = Some(args.next().map(PathBuf::from).ok_or("missing --catalog path")?)
            }
            "--seed" => options.seed = Some(args.next().ok_or("missing --seed value")?.parse()?),
            _ => return Err(format!("unexpected argument '{arg}'").into()),
        }
    }

    let catalog = match catalog_path {
        Some(path) => AxisCatalog::load(&path)?,
        None => AxisCatalog::default(),
    };

    let result = CatalogGenerator::new(catalog, options).run()?;
    println!(
        "rows={} seed={} output={}",
        result.report.rows_generated,
        result.report.seed,
        result.output_path.display()
    );
    Ok(())
}
