//! Shared test utilities for integration tests.
//!
//! Fixture archives are written with `zip::ZipWriter` directly so the tests
//! never depend on the code under test to produce their inputs.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use filetime::FileTime;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Builds zip bytes from `(name, data)` pairs.
///
/// Names ending in `/` become directory markers; everything else is a stored
/// file entry, in the given order.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Writes a fixture archive to `path`.
pub fn create_zip(path: &Path, entries: &[(&str, &[u8])]) {
    fs::write(path, zip_bytes(entries)).unwrap();
}

/// Writes a fixture archive named `name` inside `dir` and returns its path.
pub fn zip_in(dir: &Path, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    create_zip(&path, entries);
    path
}

/// Returns the entry names of the archive at `path`, in central-directory order.
pub fn entry_names(path: &Path) -> Vec<String> {
    let mut archive = ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

/// Reads the content of one entry of the archive at `path`.
pub fn read_entry(path: &Path, name: &str) -> Vec<u8> {
    let mut archive = ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut data = Vec::new();
    file.read_to_end(&mut data).unwrap();
    data
}

/// Creates files (and their parent directories) below `root`.
pub fn create_tree(root: &Path, files: &[(&str, &[u8])]) {
    for (relative, data) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, data).unwrap();
    }
}

/// Returns the current time in seconds since the Unix epoch.
pub fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// Sets the modification time of `path` to `seconds_ago` before now.
pub fn age_file(path: &Path, seconds_ago: i64) {
    let mtime = FileTime::from_unix_time(unix_now() - seconds_ago, 0);
    filetime::set_file_mtime(path, mtime).unwrap();
}

/// Deterministic pseudo-random test data.
pub fn test_data(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i.wrapping_mul(31) % 251) as u8).collect()
}
