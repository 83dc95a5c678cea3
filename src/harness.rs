use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;

use crate::core::registry::MappingRegistry;
use crate::core::types::Setting;
use crate::dataset::build_dataset;
use crate::db::build_db;
use crate::error::ConvertError;

const DIFF_CONTEXT: usize = 3;

/// Renders a value in the canonical form the golden files are committed
/// in: four-space indent, key order as inserted, non-ASCII characters
/// literal, one trailing newline.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, ConvertError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).map_err(ConvertError::Render)?;
    let mut out = String::from_utf8_lossy(&buf).into_owned();
    out.push('\n');
    Ok(out)
}

/// Writes the canonical rendering of `value` to `path` atomically.
pub fn write_canonical<T: Serialize>(path: &Path, value: &T) -> Result<(), ConvertError> {
    let rendered = canonical_json(value)?;
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| ConvertError::io(parent, e))?;
    let mut tmp = NamedTempFile::new_in(parent)
        .map_err(|e| ConvertError::Persist { path: path.to_path_buf(), source: e })?;
    tmp.write_all(rendered.as_bytes())
        .map_err(|e| ConvertError::Persist { path: path.to_path_buf(), source: e })?;
    tmp.persist(path)
        .map_err(|e| ConvertError::Persist { path: path.to_path_buf(), source: e.error })?;
    Ok(())
}

/// Compares the canonical rendering against the committed golden file.
/// On mismatch the unified diff is printed before the error is returned,
/// so the first divergent record is locatable from the output.
pub fn compare_with_golden(actual: &str, golden_path: &Path) -> Result<(), ConvertError> {
    let golden =
        fs::read_to_string(golden_path).map_err(|e| ConvertError::io(golden_path, e))?;
    if actual == golden {
        return Ok(());
    }
    let diff = unified_diff(
        &golden,
        actual,
        &golden_path.display().to_string(),
        "converted",
    );
    println!("{diff}");
    Err(ConvertError::GoldenMismatch { path: golden_path.to_path_buf() })
}

/// Everything one regression run needs. Paths are absolute or relative to
/// the process working directory.
pub struct RegressionConfig {
    pub db_json_path: PathBuf,
    pub raw_path: PathBuf,
    pub golden_path: PathBuf,
    pub store_dir: PathBuf,
    pub setting: Setting,
}

/// Drives `build_db` then `build_dataset` over one split and asserts the
/// canonical rendering equals the golden file byte for byte.
pub fn run_regression(
    registry: &MappingRegistry,
    config: &RegressionConfig,
) -> Result<(), ConvertError> {
    let db = build_db(
        registry,
        &config.db_json_path,
        None,
        config.setting,
        &config.store_dir,
    )?;
    let converted = build_dataset(&config.raw_path, &db, config.setting, registry)?;
    let rendered = canonical_json(&converted)?;
    compare_with_golden(&rendered, &config.golden_path)?;
    tracing::info!(golden = %config.golden_path.display(), "regression check passed");
    Ok(())
}

#[derive(Clone, Copy, PartialEq)]
enum Op {
    Keep,
    Del,
    Add,
}

/// A plain unified diff over lines, longest-common-subsequence based,
/// with three lines of context per hunk.
pub fn unified_diff(old: &str, new: &str, old_label: &str, new_label: &str) -> String {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();
    let ops = diff_ops(&old_lines, &new_lines);
    if ops.iter().all(|(op, _, _)| *op == Op::Keep) {
        return String::new();
    }

    let mut out = format!("--- {old_label}\n+++ {new_label}\n");
    for (start, end) in hunks(&ops) {
        let old_start = ops[start..end]
            .iter()
            .find_map(|(op, i, _)| (*op != Op::Add).then_some(*i))
            .unwrap_or(0);
        let new_start = ops[start..end]
            .iter()
            .find_map(|(op, _, j)| (*op != Op::Del).then_some(*j))
            .unwrap_or(0);
        let old_count = ops[start..end].iter().filter(|(op, _, _)| *op != Op::Add).count();
        let new_count = ops[start..end].iter().filter(|(op, _, _)| *op != Op::Del).count();
        out.push_str(&format!(
            "@@ -{},{} +{},{} @@\n",
            old_start + 1,
            old_count,
            new_start + 1,
            new_count
        ));
        for &(op, i, j) in &ops[start..end] {
            match op {
                Op::Keep => {
                    out.push(' ');
                    out.push_str(old_lines[i]);
                }
                Op::Del => {
                    out.push('-');
                    out.push_str(old_lines[i]);
                }
                Op::Add => {
                    out.push('+');
                    out.push_str(new_lines[j]);
                }
            }
            out.push('\n');
        }
    }
    out
}

/// Aligns the two line sequences into keep/delete/add operations. Each op
/// carries the old and new indices it was emitted at.
fn diff_ops(old: &[&str], new: &[&str]) -> Vec<(Op, usize, usize)> {
    let n = old.len();
    let m = new.len();
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i] == new[j] {
            ops.push((Op::Keep, i, j));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            ops.push((Op::Del, i, j));
            i += 1;
        } else {
            ops.push((Op::Add, i, j));
            j += 1;
        }
    }
    while i < n {
        ops.push((Op::Del, i, j));
        i += 1;
    }
    while j < m {
        ops.push((Op::Add, i, j));
        j += 1;
    }
    ops
}

/// Groups changed op runs into hunk ranges, keeping up to `DIFF_CONTEXT`
/// unchanged lines on each side and merging hunks whose context touches.
fn hunks(ops: &[(Op, usize, usize)]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for (idx, (op, _, _)) in ops.iter().enumerate() {
        if *op == Op::Keep {
            continue;
        }
        let start = idx.saturating_sub(DIFF_CONTEXT);
        let end = (idx + DIFF_CONTEXT + 1).min(ops.len());
        match ranges.last_mut() {
            Some((_, last_end)) if start <= *last_end => *last_end = end,
            _ => ranges.push((start, end)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_json_uses_four_space_indent_and_literal_unicode() {
        let rendered = canonical_json(&json!({"名称": "拙政园", "rating": 4.6})).unwrap();
        assert_eq!(
            rendered,
            "{\n    \"名称\": \"拙政园\",\n    \"rating\": 4.6\n}\n"
        );
    }

    #[test]
    fn identical_inputs_produce_an_empty_diff() {
        assert_eq!(unified_diff("a\nb\n", "a\nb\n", "old", "new"), "");
    }

    #[test]
    fn diff_marks_the_divergent_line() {
        let old = "one\ntwo\nthree\nfour\nfive\nsix\nseven\neight\nnine\n";
        let new = "one\ntwo\nthree\nfour\nFIVE\nsix\nseven\neight\nnine\n";
        let diff = unified_diff(old, new, "old", "new");
        assert!(diff.starts_with("--- old\n+++ new\n@@ -2,7 +2,7 @@\n"));
        assert!(diff.contains("-five\n"));
        assert!(diff.contains("+FIVE\n"));
        assert!(!diff.contains("one"));
        assert!(!diff.contains("nine"));
    }

    #[test]
    fn mismatch_is_reported_as_golden_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let golden = dir.path().join("golden.json");
        fs::write(&golden, "[]\n").unwrap();
        assert!(compare_with_golden("[]\n", &golden).is_ok());
        let err = compare_with_golden("[1]\n", &golden).unwrap_err();
        assert!(matches!(err, ConvertError::GoldenMismatch { .. }));
    }
}
