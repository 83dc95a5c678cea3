use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use convert_core::db::build_db;
use convert_core::dataset::build_dataset;
use convert_core::harness::{canonical_json, compare_with_golden, write_canonical};
use convert_core::{MappingRegistry, Setting};

/// Normalizes the bilingual dialogue corpus into the canonical schema.
#[derive(Parser)]
#[command(name = "convert", version)]
struct Args {
    /// Code root directory; every other path is resolved against it
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Path to the original data, relative to the root
    #[arg(long, default_value = "data/original")]
    data_dir: PathBuf,

    /// Where converted splits are written, relative to the root
    #[arg(long, default_value = "data")]
    save_dir: PathBuf,

    /// Language setting: zh, en or en_zh
    #[arg(long, default_value = "zh")]
    setting: Setting,

    /// Dataset splits to convert
    #[arg(long, num_args = 1.., default_values_t = [String::from("valid")])]
    splits: Vec<String>,

    /// Directory the entity store snapshot is materialized under
    #[arg(long, default_value = "data/db_store")]
    store_dir: PathBuf,

    /// Directory holding the mapping side files
    #[arg(long, default_value = "data/mappings")]
    mappings_dir: PathBuf,

    /// Compare each converted split against its committed golden file
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let setting = args.setting;

    let registry = MappingRegistry::load(&args.root.join(&args.mappings_dir))
        .context("loading translation tables")?;

    let db_json_path = args.root.join("database").join(format!("db_{setting}"));
    let db = build_db(
        &registry,
        &db_json_path,
        None,
        setting,
        &args.root.join(&args.store_dir),
    )
    .with_context(|| format!("building the {setting} entity database"))?;

    for split in &args.splits {
        println!("processing {split} data...");
        let raw_path = args
            .root
            .join(&args.data_dir)
            .join(format!("{setting}_{split}.json"));
        let converted = build_dataset(&raw_path, &db, setting, &registry)
            .with_context(|| format!("converting the {split} split"))?;

        let out_path = args
            .root
            .join(&args.save_dir)
            .join(format!("{setting}_{split}_converted.json"));
        write_canonical(&out_path, &converted)
            .with_context(|| format!("writing {}", out_path.display()))?;

        if args.check {
            let golden_path = args
                .root
                .join("tests/data")
                .join(format!("converted_{split}.json"));
            let rendered = canonical_json(&converted)?;
            compare_with_golden(&rendered, &golden_path)
                .with_context(|| format!("regression check for the {split} split"))?;
            println!("{split} matches the golden file");
        }
    }

    Ok(())
}
