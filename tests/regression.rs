use std::path::PathBuf;

use convert_core::harness::{run_regression, RegressionConfig};
use convert_core::{ConvertError, MappingRegistry, Setting};

fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// The repository's own regression contract: converting the committed
/// zh/valid split must reproduce the golden file byte for byte.
#[test]
fn zh_valid_split_matches_the_golden_file() {
    let registry = MappingRegistry::load(&root().join("data/mappings")).unwrap();
    let store = tempfile::tempdir().unwrap();
    let config = RegressionConfig {
        db_json_path: root().join("database/db_zh"),
        raw_path: root().join("data/original/zh_valid.json"),
        golden_path: root().join("tests/data/converted_valid.json"),
        store_dir: store.path().to_path_buf(),
        setting: Setting::Zh,
    };
    run_regression(&registry, &config).unwrap();
}

/// A golden file that disagrees fails with a mismatch, not a panic, after
/// the diff has been emitted.
#[test]
fn a_stale_golden_file_is_a_mismatch() {
    let registry = MappingRegistry::load(&root().join("data/mappings")).unwrap();
    let store = tempfile::tempdir().unwrap();
    let golden_dir = tempfile::tempdir().unwrap();
    let stale = golden_dir.path().join("converted_valid.json");
    std::fs::write(&stale, "[]\n").unwrap();

    let config = RegressionConfig {
        db_json_path: root().join("database/db_zh"),
        raw_path: root().join("data/original/zh_valid.json"),
        golden_path: stale,
        store_dir: store.path().to_path_buf(),
        setting: Setting::Zh,
    };
    let err = run_regression(&registry, &config).unwrap_err();
    assert!(matches!(err, ConvertError::GoldenMismatch { .. }));
}
