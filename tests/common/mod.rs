#![allow(dead_code)]

use bump_build_nr::pattern::{BuildNrPattern, DEFAULT_IDENTIFIER};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A realistic Swift version file with one build number declaration.
pub const VERSION_SWIFT: &str = "\
//
//  Version.swift
//

import Foundation

// String fields allow only alphanumerics and a hyphen (-)
public struct AppVersion {
    public static let BUILD_NR: Int = 42
    public static let MAJOR = 0
    public static let MINOR = 1
}
";

/// Pattern for the default `BUILD_NR` identifier.
pub fn default_pattern() -> BuildNrPattern {
    BuildNrPattern::new(DEFAULT_IDENTIFIER).unwrap()
}

/// Write `content` to `name` inside a fresh temp dir.
pub fn create_version_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(name);
    fs::write(&path, content).unwrap();
    (tmp, path)
}

/// Names of every entry in the fixture directory.
pub fn dir_entries(tmp: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

/// Indices of lines that differ between two texts with the same line count.
pub fn differing_lines(a: &str, b: &str) -> Vec<usize> {
    let a: Vec<&str> = a.split_inclusive('\n').collect();
    let b: Vec<&str> = b.split_inclusive('\n').collect();
    assert_eq!(a.len(), b.len(), "line counts differ");
    a.iter()
        .zip(&b)
        .enumerate()
        .filter(|(_, (x, y))| x != y)
        .map(|(i, _)| i)
        .collect()
}
