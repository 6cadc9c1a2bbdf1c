//! Fuzz target for ZipReader::new with arbitrary byte input.
//!
//! Exercises central directory scanning, entry classification and content
//! decoding with malformed or adversarial archives.
//!
//! Run with: cargo +nightly fuzz run zip_reader

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let Ok(mut reader) = dirzip::ZipReader::new(Cursor::new(data)) else {
        return;
    };

    let names: Vec<String> = reader
        .entries()
        .iter()
        .map(|entry| {
            // Scan-time classification must agree with the stored name
            if entry.name.ends_with('/') {
                assert!(entry.has_directory_marker());
            }
            entry.name.clone()
        })
        .collect();
    let _ = reader.total_file_size();

    // Decode at most a few entries to keep each run short
    for name in names.iter().take(4) {
        let _ = reader.read_text(name);
    }
});
