//! Fuzz target for entry name validation and path ordering.
//!
//! Run with: cargo +nightly fuzz run entry_name
//!
//! Properties checked:
//! - Accepted names are non-empty and NUL-free
//! - An enclosed name never has a `..` segment or a leading separator
//! - The depth comparator is antisymmetric and reflexive

#![no_main]

use std::cmp::Ordering;

use dirzip::EntryName;
use dirzip::index::compare_by_depth;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(name) = EntryName::new(text) {
        let s = name.as_str();
        assert!(!s.is_empty());
        assert!(!s.contains('\0'));

        if name.is_enclosed() {
            assert!(!s.starts_with('/') && !s.starts_with('\\'));
            assert!(!s.split(['/', '\\']).any(|segment| segment == ".."));
        }

        let directory = name.clone().into_directory();
        assert!(directory.is_directory());
        assert_eq!(directory.file_name(), "");
    }

    // Split the input in two and compare both halves
    let mid = text
        .char_indices()
        .map(|(i, _)| i)
        .nth(text.chars().count() / 2)
        .unwrap_or(text.len());
    let (a, b) = text.split_at(mid);
    assert_eq!(compare_by_depth(a, b), compare_by_depth(b, a).reverse());
    assert_eq!(compare_by_depth(a, a), Ordering::Equal);
});
