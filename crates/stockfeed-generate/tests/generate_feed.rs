use std::collections::BTreeSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx, open_workbook};
use chrono::{DateTime, TimeZone, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use stockfeed_core::{COLUMNS, SHEET_NAME, column_names, parse_size_gb, validate_records};
use stockfeed_generate::{
    AxisCatalog, CatalogGenerator, GenerateOptions, GenerationError, OutputFormat, read_feed,
};

fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
        .single()
        .unwrap_or_default()
}

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "stockfeed_generate_{label}_{}",
        uuid::Uuid::new_v4()
    ));
    dir
}

fn options_for(path: PathBuf, seed: u64) -> GenerateOptions {
    GenerateOptions {
        output_path: path,
        seed: Some(seed),
        ..GenerateOptions::default()
    }
}

#[test]
fn generated_records_satisfy_feed_invariants() {
    let generator = CatalogGenerator::new(AxisCatalog::default(), GenerateOptions::default());
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let records = generator.generate(&mut rng);

    assert_eq!(records.len(), 42 * 23);
    validate_records(&records).expect("feed invariants hold");

    let ids: BTreeSet<i64> = records.iter().map(|record| record.id).collect();
    assert_eq!(ids, (1..=records.len() as i64).collect::<BTreeSet<i64>>());

    for record in &records {
        let ram = parse_size_gb(&record.ram).expect("ram label");
        let storage = parse_size_gb(&record.storage).expect("storage label");
        assert!(ram <= storage && storage >= ram * 8);
        assert!(record.model.starts_with(&format!("{} ", record.brand)));

        let base = record.price - f64::from(ram) * 50.0 - f64::from(storage) * 0.5;
        assert!((300.0..1500.0).contains(&base), "base price {base}");
    }
}

#[test]
fn seeded_generation_is_reproducible() {
    let generator = CatalogGenerator::new(AxisCatalog::default(), GenerateOptions::default())
        .with_clock(fixed_clock);
    let a = generator.generate(&mut ChaCha8Rng::seed_from_u64(99));
    let b = generator.generate(&mut ChaCha8Rng::seed_from_u64(99));
    let c = generator.generate(&mut ChaCha8Rng::seed_from_u64(100));

    assert_eq!(a, b);
    assert_eq!(a.len(), c.len());
    assert_ne!(a, c);
    assert_eq!(a[0].last_updated, "2024-03-01T09:30:00.000Z");
}

#[test]
fn run_writes_xlsx_with_stable_header() {
    let dir = temp_out_dir("xlsx");
    let path = dir.join("data").join("products.xlsx");
    let generator = CatalogGenerator::new(AxisCatalog::default(), options_for(path.clone(), 1));

    let result = generator.run().expect("run generation");
    assert_eq!(result.output_path, path);
    assert_eq!(result.report.format, OutputFormat::Xlsx);
    assert_eq!(result.report.rows_generated, 42 * 23);
    assert_eq!(result.report.rows_by_brand.get("iPhone"), Some(&(9 * 23)));
    assert!(result.report.bytes_written > 0);

    let mut workbook: Xlsx<_> = open_workbook(&path).expect("open workbook");
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
    let range = workbook.worksheet_range(SHEET_NAME).expect("products sheet");
    let header: Vec<String> = range
        .rows()
        .next()
        .expect("header row")
        .iter()
        .map(|cell| cell.to_string())
        .collect();
    assert_eq!(header, column_names());
    assert_eq!(range.height(), 42 * 23 + 1);

    let first = range.rows().nth(1).expect("first data row");
    assert!(matches!(first[0], Data::Float(_) | Data::Int(_)));
    assert!(matches!(first[14], Data::Float(_) | Data::Int(_)));
    assert!(matches!(first[15], Data::Float(_) | Data::Int(_)));
    assert!(matches!(first[16], Data::String(_)));

    let records = read_feed(&path).expect("read feed back");
    assert_eq!(records, result.records);
}

/// Character widths of the first sheet, one entry per column.
fn sheet_column_widths(path: &Path) -> Vec<f64> {
    let file = fs::File::open(path).expect("open workbook file");
    let mut archive = zip::ZipArchive::new(file).expect("read workbook archive");
    let mut xml = String::new();
    archive
        .by_name("xl/worksheets/sheet1.xml")
        .expect("sheet1 part")
        .read_to_string(&mut xml)
        .expect("read sheet xml");

    let col = regex::Regex::new(r#"<col min="(\d+)" max="(\d+)" width="([0-9.]+)""#)
        .expect("col pattern");
    let mut widths = Vec::new();
    for caps in col.captures_iter(&xml) {
        let min: usize = caps[1].parse().expect("min");
        let max: usize = caps[2].parse().expect("max");
        let width: f64 = caps[3].parse().expect("width");
        assert_eq!(min, widths.len() + 1, "columns are contiguous");
        widths.extend(std::iter::repeat_n(width, max - min + 1));
    }
    widths
}

#[test]
fn run_writes_column_widths() {
    let dir = temp_out_dir("widths");
    let path = dir.join("products.xlsx");
    CatalogGenerator::new(AxisCatalog::default(), options_for(path.clone(), 5))
        .run()
        .expect("run generation");

    let widths = sheet_column_widths(&path);
    assert_eq!(widths.len(), COLUMNS.len());
    for (column, stored) in COLUMNS.iter().zip(&widths) {
        // Excel stores widths with cell padding added to the character count.
        let padded = (column.width * 7.0 + 5.0) / 7.0;
        assert!(
            (stored - padded).abs() < 0.01,
            "column {} width {stored}, expected about {padded}",
            column.name
        );
    }
}

#[test]
fn successive_runs_share_layout_but_not_data() {
    let dir = temp_out_dir("runs");
    let first_path = dir.join("first.csv");
    let second_path = dir.join("second.csv");

    let first = CatalogGenerator::new(AxisCatalog::default(), options_for(first_path.clone(), 7))
        .run()
        .expect("first run");
    let second = CatalogGenerator::new(AxisCatalog::default(), options_for(second_path.clone(), 8))
        .run()
        .expect("second run");

    let first_csv = fs::read_to_string(&first_path).expect("read first csv");
    let second_csv = fs::read_to_string(&second_path).expect("read second csv");
    assert_eq!(first_csv.lines().next(), second_csv.lines().next());
    assert_eq!(first_csv.lines().count(), second_csv.lines().count());
    assert_ne!(first.records, second.records);

    let reread = read_feed(&second_path).expect("read csv feed");
    assert_eq!(reread.len(), second.records.len());
    assert_eq!(reread[0].imei, second.records[0].imei);
}

#[test]
fn report_and_backup_are_written() {
    let dir = temp_out_dir("report");
    let path = dir.join("products.xlsx");
    let report_path = dir.join("generation_report.json");

    let mut options = options_for(path.clone(), 3);
    options.report_path = Some(report_path.clone());
    options.backup_existing = true;

    let generator = CatalogGenerator::new(AxisCatalog::default(), options).with_clock(fixed_clock);
    let first = generator.run().expect("first run");
    assert!(first.report.backup_path.is_none());

    let second = generator.run().expect("second run");
    let backup = second.report.backup_path.expect("backup path");
    assert_eq!(
        backup,
        dir.join("backups").join("products_20240301_093000.xlsx")
    );
    assert!(backup.exists());

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).expect("read report"))
            .expect("parse report");
    assert_eq!(report["seed"], serde_json::json!(3));
    assert_eq!(report["rows_generated"], serde_json::json!(42 * 23));
    assert_eq!(report["format"], serde_json::json!("xlsx"));
}

#[test]
fn unwritable_target_fails_loudly() {
    let dir = temp_out_dir("blocked");
    fs::create_dir_all(&dir).expect("create temp dir");
    let blocker = dir.join("data");
    fs::write(&blocker, b"not a directory").expect("write blocker file");

    let generator = CatalogGenerator::new(
        AxisCatalog::default(),
        options_for(blocker.join("products.xlsx"), 1),
    );
    assert!(matches!(generator.run(), Err(GenerationError::Io(_))));
}

#[test]
fn brand_without_models_yields_no_rows() {
    let mut catalog = AxisCatalog::default();
    catalog.brands.push("Nokia".to_string());
    let generator = CatalogGenerator::new(catalog, GenerateOptions::default());
    let records = generator.generate(&mut ChaCha8Rng::seed_from_u64(2));
    assert_eq!(records.len(), 42 * 23);
    assert!(records.iter().all(|record| record.brand != "Nokia"));
}
