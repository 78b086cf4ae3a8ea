//! Test harness for the key-value parser against fixture files.
//!
//! Reads every .kv file from test/kv/, parses it, and compares the JSON
//! encoding against test/json/. Reads every .nay file from test/nay/
//! (expected to fail) and compares the error message with the
//! corresponding .error file.

use std::fs;
use std::path::{Path, PathBuf};

use libkvtok::{encode, parse, Format};

/// Root test directory.
fn test_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("test")
}

/// All files matching `test/<subdir>/*.<ext>`, sorted.
fn fixture_files(subdir: &str, ext: &str) -> Vec<PathBuf> {
    let pattern = test_root().join(subdir).join(format!("*.{}", ext));
    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .expect("valid glob pattern")
        .flatten()
        .collect();
    files.sort();
    files
}

fn sibling(path: &Path, subdir: &str, ext: &str) -> PathBuf {
    let stem = path.file_stem().unwrap().to_string_lossy();
    test_root().join(subdir).join(format!("{}.{}", stem, ext))
}

#[test]
fn kv_fixtures() {
    let files = fixture_files("kv", "kv");
    assert!(!files.is_empty(), "no .kv fixtures found");

    let mut failures = Vec::new();
    for path in &files {
        let input = fs::read_to_string(path).unwrap();
        let expected = match fs::read_to_string(sibling(path, "json", "json")) {
            Ok(s) => s,
            Err(_) => {
                failures.push(format!("{}: missing expected .json", path.display()));
                continue;
            }
        };
        match parse(&input) {
            Ok(parsed) => {
                let actual = encode(&parsed, Format::Json).unwrap();
                if actual.trim() != expected.trim() {
                    failures.push(format!(
                        "{}:\n  expected: {}\n  actual:   {}",
                        path.display(),
                        expected.trim(),
                        actual
                    ));
                }
            }
            Err(e) => failures.push(format!("{}: unexpected error: {}", path.display(), e)),
        }
    }

    assert!(failures.is_empty(), "fixture failures:\n{}", failures.join("\n"));
}

#[test]
fn kv_fixtures_round_trip_through_canonical_form() {
    for path in fixture_files("kv", "kv") {
        let input = fs::read_to_string(&path).unwrap();
        let parsed = parse(&input).unwrap();
        let canonical = encode(&parsed, Format::Kv).unwrap();
        assert_eq!(
            parse(&canonical).unwrap(),
            parsed,
            "{} did not round-trip via {:?}",
            path.display(),
            canonical
        );
    }
}

#[test]
fn nay_fixtures() {
    let files = fixture_files("nay", "nay");
    assert!(!files.is_empty(), "no .nay fixtures found");

    let mut failures = Vec::new();
    for path in &files {
        let input = fs::read_to_string(path).unwrap();
        let expected = fs::read_to_string(sibling(path, "nay", "error"))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        match parse(&input) {
            Ok(parsed) => failures.push(format!(
                "{}: expected error, parsed {:?}",
                path.display(),
                parsed
            )),
            Err(e) => {
                if e.to_string() != expected {
                    failures.push(format!(
                        "{}:\n  expected: {}\n  actual:   {}",
                        path.display(),
                        expected,
                        e
                    ));
                }
            }
        }
    }

    assert!(failures.is_empty(), "fixture failures:\n{}", failures.join("\n"));
}
