//! Integration tests for archive modification.
//!
//! These tests verify that:
//! - Added entries appear alongside the untouched existing ones
//! - Removal matches exact names and falls back to directory markers
//! - Preconditions fail before the archive is rewritten
//! - A failed rewrite leaves the original archive intact

mod common;

use std::fs;

use dirzip::edit::{ArchiveEditor, Compression, WriteOptions};
use dirzip::{Error, NoProgress, StatisticsProgress, add_directory_entry, add_file, remove_entry};
use tempfile::TempDir;

use common::{entry_names, read_entry, test_data, zip_in};

fn sample_archive(dir: &std::path::Path) -> std::path::PathBuf {
    zip_in(
        dir,
        "sample.zip",
        &[
            ("docs/", b""),
            ("docs/readme.txt", b"read me"),
            ("notes.txt", b"remember"),
        ],
    )
}

// ============================================================================
// add_directory_entry
// ============================================================================

#[test]
fn test_add_directory_entry_appends_marker() {
    let temp = TempDir::new().unwrap();
    let archive = sample_archive(temp.path());

    add_directory_entry(&archive, "logs").unwrap();

    assert_eq!(
        entry_names(&archive),
        vec!["docs/", "docs/readme.txt", "notes.txt", "logs/"]
    );
    assert_eq!(read_entry(&archive, "notes.txt"), b"remember");
}

#[test]
fn test_add_directory_entry_to_empty_file() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("fresh.zip");
    fs::File::create(&archive).unwrap();

    add_directory_entry(&archive, "nested/dir/").unwrap();
    assert_eq!(entry_names(&archive), vec!["nested/dir/"]);
}

#[test]
fn test_add_existing_directory_keeps_single_marker() {
    let temp = TempDir::new().unwrap();
    let archive = sample_archive(temp.path());

    add_directory_entry(&archive, "docs").unwrap();

    let names = entry_names(&archive);
    assert_eq!(names.iter().filter(|n| *n == "docs/").count(), 1);
    assert_eq!(names.len(), 3);
}

#[test]
fn test_add_directory_entry_preconditions() {
    let temp = TempDir::new().unwrap();
    let archive = sample_archive(temp.path());

    assert!(matches!(
        add_directory_entry(&archive, ""),
        Err(Error::InvalidEntryName(_))
    ));
    assert!(matches!(
        add_directory_entry(temp.path().join("none.zip"), "logs"),
        Err(Error::NotAFile { .. })
    ));
    assert_eq!(entry_names(&archive).len(), 3);
}

// ============================================================================
// add_file
// ============================================================================

#[test]
fn test_add_file_keeps_existing_entries() {
    let temp = TempDir::new().unwrap();
    let archive = sample_archive(temp.path());
    let source = temp.path().join("report.csv");
    let data = test_data(50_000);
    fs::write(&source, &data).unwrap();

    let mut stats = StatisticsProgress::new();
    assert!(add_file(&source, &archive, "reports/q3.csv", &mut stats).unwrap());

    assert_eq!(
        entry_names(&archive),
        vec!["docs/", "docs/readme.txt", "notes.txt", "reports/q3.csv"]
    );
    assert_eq!(read_entry(&archive, "reports/q3.csv"), data);
    assert_eq!(read_entry(&archive, "docs/readme.txt"), b"read me");
    assert_eq!(stats.state().total_bytes, 50_000);
    assert_eq!(stats.updates, vec![(50_000, 50_000)]);
    assert!(stats.errors.is_empty());
}

#[test]
fn test_add_file_replaces_same_name() {
    let temp = TempDir::new().unwrap();
    let archive = sample_archive(temp.path());
    let source = temp.path().join("notes.txt");
    fs::write(&source, b"rewritten").unwrap();

    assert!(add_file(&source, &archive, "notes.txt", &mut NoProgress).unwrap());

    let names = entry_names(&archive);
    assert_eq!(names.iter().filter(|n| *n == "notes.txt").count(), 1);
    assert_eq!(read_entry(&archive, "notes.txt"), b"rewritten");
}

#[test]
fn test_add_file_preconditions() {
    let temp = TempDir::new().unwrap();
    let archive = sample_archive(temp.path());
    let source = temp.path().join("data.bin");
    fs::write(&source, b"data").unwrap();
    let before = fs::read(&archive).unwrap();

    assert!(matches!(
        add_file(&source, &archive, "", &mut NoProgress),
        Err(Error::InvalidEntryName(_))
    ));
    assert!(matches!(
        add_file(temp.path().join("missing.bin"), &archive, "data.bin", &mut NoProgress),
        Err(Error::NotAFile { .. })
    ));
    assert!(matches!(
        add_file(temp.path(), &archive, "data.bin", &mut NoProgress),
        Err(Error::NotAFile { .. })
    ));
    assert!(matches!(
        add_file(&source, temp.path().join("none.zip"), "data.bin", &mut NoProgress),
        Err(Error::NotAFile { .. })
    ));
    assert_eq!(fs::read(&archive).unwrap(), before);
}

#[test]
fn test_add_file_with_compression() {
    let temp = TempDir::new().unwrap();
    let archive = sample_archive(temp.path());
    let source = temp.path().join("zeros.bin");
    fs::write(&source, vec![0u8; 64 * 1024]).unwrap();

    let mut editor = ArchiveEditor::open(&archive)
        .unwrap()
        .with_options(WriteOptions::new().compression(Compression::default()));
    editor.add_file("zeros.bin", &source).unwrap();
    let result = editor.apply().unwrap();

    assert_eq!(result.entries_added, 1);
    assert_eq!(result.bytes_added, 64 * 1024);
    assert_eq!(read_entry(&archive, "zeros.bin").len(), 64 * 1024);
}

// ============================================================================
// remove_entry
// ============================================================================

#[test]
fn test_remove_entry_exact_name() {
    let temp = TempDir::new().unwrap();
    let archive = sample_archive(temp.path());

    assert_eq!(remove_entry(&archive, "notes.txt").unwrap(), 1);
    assert_eq!(entry_names(&archive), vec!["docs/", "docs/readme.txt"]);
}

#[test]
fn test_remove_entry_falls_back_to_directory_marker() {
    let temp = TempDir::new().unwrap();
    let archive = sample_archive(temp.path());

    // The marker goes together with everything stored below it
    assert_eq!(remove_entry(&archive, "docs").unwrap(), 2);
    assert_eq!(entry_names(&archive), vec!["notes.txt"]);
}

#[test]
fn test_remove_directory_entry_removes_subtree() {
    let temp = TempDir::new().unwrap();
    let archive = zip_in(
        temp.path(),
        "tree.zip",
        &[
            ("docs/", b""),
            ("docs/readme.txt", b"read me"),
            ("docs/sub/a.txt", b"a"),
            ("docs-old.txt", b"old"),
            ("notes.txt", b"remember"),
        ],
    );

    assert_eq!(remove_entry(&archive, "docs/").unwrap(), 3);
    assert_eq!(entry_names(&archive), vec!["docs-old.txt", "notes.txt"]);
}

#[test]
fn test_remove_file_entry_does_not_match_prefix() {
    let temp = TempDir::new().unwrap();
    let archive = zip_in(
        temp.path(),
        "names.zip",
        &[("log", b"plain"), ("log.1", b"rotated")],
    );

    assert_eq!(remove_entry(&archive, "log").unwrap(), 1);
    assert_eq!(entry_names(&archive), vec!["log.1"]);
}

#[test]
fn test_remove_missing_entry_leaves_archive_untouched() {
    let temp = TempDir::new().unwrap();
    let archive = sample_archive(temp.path());
    let before = fs::read(&archive).unwrap();

    assert_eq!(remove_entry(&archive, "absent.txt").unwrap(), 0);
    assert_eq!(fs::read(&archive).unwrap(), before);
}

#[test]
fn test_remove_last_entry_leaves_valid_archive() {
    let temp = TempDir::new().unwrap();
    let archive = zip_in(temp.path(), "single.zip", &[("only.txt", b"alone")]);

    assert_eq!(remove_entry(&archive, "only.txt").unwrap(), 1);
    assert!(archive.exists());
    assert!(entry_names(&archive).is_empty());
}

#[test]
fn test_remove_entry_preconditions() {
    let temp = TempDir::new().unwrap();
    let archive = sample_archive(temp.path());

    assert!(matches!(
        remove_entry(&archive, ""),
        Err(Error::InvalidEntryName(_))
    ));
    assert!(matches!(
        remove_entry(temp.path().join("none.zip"), "notes.txt"),
        Err(Error::NotAFile { .. })
    ));
}

// ============================================================================
// ArchiveEditor
// ============================================================================

#[test]
fn test_editor_batch_counts() {
    let temp = TempDir::new().unwrap();
    let archive = sample_archive(temp.path());

    let mut editor = ArchiveEditor::open(&archive).unwrap();
    assert_eq!(editor.entries().len(), 3);
    assert_eq!(editor.delete("notes.txt").unwrap(), 1);
    // A second delete of the same name is not counted twice
    assert_eq!(editor.delete("notes.txt").unwrap(), 0);
    editor.add_bytes("docs/readme.txt", b"new text".to_vec()).unwrap();
    editor.add_bytes("extra.txt", b"extra".to_vec()).unwrap();
    editor.add_directory("empty").unwrap();
    assert_eq!(editor.pending_operations(), 4);

    let result = editor.apply().unwrap();
    assert_eq!(result.entries_kept, 1);
    assert_eq!(result.entries_deleted, 1);
    assert_eq!(result.entries_replaced, 1);
    assert_eq!(result.entries_added, 3);
    assert_eq!(result.bytes_added, 13);
    assert_eq!(result.total_entries(), 4);

    assert_eq!(
        entry_names(&archive),
        vec!["docs/", "docs/readme.txt", "extra.txt", "empty/"]
    );
    assert_eq!(read_entry(&archive, "docs/readme.txt"), b"new text");
}

#[test]
fn test_editor_later_addition_wins() {
    let temp = TempDir::new().unwrap();
    let archive = sample_archive(temp.path());

    let mut editor = ArchiveEditor::open(&archive).unwrap();
    editor.add_bytes("new.txt", b"first".to_vec()).unwrap();
    editor.add_bytes("new.txt", b"second".to_vec()).unwrap();
    assert_eq!(editor.pending_operations(), 1);
    let _ = editor.apply().unwrap();

    assert_eq!(read_entry(&archive, "new.txt"), b"second");
}

#[test]
fn test_failed_apply_keeps_original() {
    let temp = TempDir::new().unwrap();
    let archive = sample_archive(temp.path());
    let before = fs::read(&archive).unwrap();
    let source = temp.path().join("vanishing.txt");
    fs::write(&source, b"here for now").unwrap();

    let mut editor = ArchiveEditor::open(&archive).unwrap();
    editor.delete("notes.txt").unwrap();
    editor.add_file("vanishing.txt", &source).unwrap();
    fs::remove_file(&source).unwrap();

    let err = editor.apply().unwrap_err();
    assert!(matches!(err, Error::SourceRead { ref path, .. } if path == &source));
    assert_eq!(fs::read(&archive).unwrap(), before);

    // No temporary files are left next to the archive
    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1);
}

#[test]
fn test_rewrite_failure_is_not_a_source_error() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("gone");
    fs::create_dir(&dir).unwrap();
    let archive = sample_archive(&dir);
    let source = temp.path().join("ok.txt");
    fs::write(&source, b"readable").unwrap();

    let mut editor = ArchiveEditor::open(&archive).unwrap();
    editor.add_file("ok.txt", &source).unwrap();
    // The temporary file can no longer be created next to the archive
    fs::remove_dir_all(&dir).unwrap();

    let err = editor.apply().unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_delete_cancels_pending_addition() {
    let temp = TempDir::new().unwrap();
    let archive = sample_archive(temp.path());

    let mut editor = ArchiveEditor::open(&archive).unwrap();
    editor.add_bytes("scratch.txt", b"temporary".to_vec()).unwrap();
    assert_eq!(editor.delete("scratch.txt").unwrap(), 0);
    assert!(!editor.has_pending_operations());

    editor.add_bytes("notes.txt", b"replacement".to_vec()).unwrap();
    assert_eq!(editor.delete("notes.txt").unwrap(), 1);
    assert_eq!(editor.pending_operations(), 1);

    let result = editor.apply().unwrap();
    assert_eq!(result.entries_added, 0);
    assert_eq!(result.entries_deleted, 1);
    assert_eq!(entry_names(&archive), vec!["docs/", "docs/readme.txt"]);
}

#[test]
fn test_delete_directory_cancels_additions_below_it() {
    let temp = TempDir::new().unwrap();
    let archive = sample_archive(temp.path());

    let mut editor = ArchiveEditor::open(&archive).unwrap();
    editor.add_bytes("docs/new.txt", b"new".to_vec()).unwrap();
    editor.add_bytes("top.txt", b"top".to_vec()).unwrap();
    assert_eq!(editor.delete("docs").unwrap(), 2);
    // Deleting an entry already covered by the queued deletion counts nothing
    assert_eq!(editor.delete("docs/readme.txt").unwrap(), 0);

    let result = editor.apply().unwrap();
    assert_eq!(result.entries_deleted, 2);
    assert_eq!(result.entries_added, 1);
    assert_eq!(entry_names(&archive), vec!["notes.txt", "top.txt"]);
}

#[test]
fn test_editor_rejects_garbage_archive() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("garbage.zip");
    fs::write(&archive, b"not a zip at all").unwrap();

    assert!(matches!(
        ArchiveEditor::open(&archive),
        Err(Error::Zip(_))
    ));
}
