//! Integration tests for the retention sweep.

mod common;

use std::fs;

use dirzip::retention::{RetentionSweeper, RetentionWindow, SECONDS_PER_DAY};
use dirzip::{SweepResult, clean_up_files};
use filetime::FileTime;
use tempfile::TempDir;

use common::{age_file, create_tree};

const DAY: i64 = SECONDS_PER_DAY;

fn aged_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    create_tree(
        temp.path(),
        &[
            ("fresh.log", b"fresh"),
            ("stale.log", b"stale"),
            ("archive/old.log", b"old"),
            ("archive/new.log", b"new"),
        ],
    );
    age_file(&temp.path().join("fresh.log"), 60);
    age_file(&temp.path().join("stale.log"), 3 * DAY);
    age_file(&temp.path().join("archive/old.log"), 10 * DAY);
    age_file(&temp.path().join("archive/new.log"), DAY / 2);
    temp
}

#[test]
fn test_clean_up_top_level_only() {
    let temp = aged_tree();

    assert_eq!(clean_up_files(temp.path(), 1, false), 1);
    assert!(temp.path().join("fresh.log").exists());
    assert!(!temp.path().join("stale.log").exists());
    assert!(temp.path().join("archive/old.log").exists());
}

#[test]
fn test_clean_up_recursive() {
    let temp = aged_tree();

    assert_eq!(clean_up_files(temp.path(), 1, true), 2);
    assert!(!temp.path().join("archive/old.log").exists());
    assert!(temp.path().join("archive/new.log").exists());
    // Directories are never removed
    assert!(temp.path().join("archive").is_dir());
}

#[test]
fn test_clean_up_wider_window_keeps_more() {
    let temp = aged_tree();

    assert_eq!(clean_up_files(temp.path(), 5, true), 1);
    assert!(temp.path().join("stale.log").exists());
    assert!(!temp.path().join("archive/old.log").exists());
}

#[test]
fn test_clean_up_invalid_root() {
    let temp = aged_tree();

    assert_eq!(clean_up_files(temp.path().join("missing"), 1, true), 0);
    assert_eq!(clean_up_files(temp.path().join("fresh.log"), 0, true), 0);
    assert!(temp.path().join("fresh.log").exists());
}

#[test]
fn test_sweep_at_fixed_clock() {
    const NOW: i64 = 1_700_000_000;
    let temp = TempDir::new().unwrap();
    create_tree(temp.path(), &[("edge.txt", b"e"), ("past.txt", b"p")]);
    filetime::set_file_mtime(
        temp.path().join("edge.txt"),
        FileTime::from_unix_time(NOW - DAY, 0),
    )
    .unwrap();
    filetime::set_file_mtime(
        temp.path().join("past.txt"),
        FileTime::from_unix_time(NOW - DAY - 1, 0),
    )
    .unwrap();

    let result = RetentionSweeper::new(RetentionWindow::days(1)).sweep_at(temp.path(), NOW);
    assert_eq!(
        result,
        SweepResult {
            examined: 2,
            deleted: 1,
            failed: 0,
        }
    );
    assert!(temp.path().join("edge.txt").exists());
    assert!(!temp.path().join("past.txt").exists());
}

#[test]
fn test_zero_day_window_removes_everything_older_than_now() {
    let temp = aged_tree();
    let now = common::unix_now() + 10;

    let result = RetentionSweeper::new(RetentionWindow::days(0))
        .recursive(true)
        .sweep_at(temp.path(), now);
    assert_eq!(result.examined, 4);
    assert_eq!(result.deleted, 4);
    assert_eq!(fs::read_dir(temp.path().join("archive")).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn test_sweep_handles_non_utf8_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = TempDir::new().unwrap();
    let first = temp.path().join(OsStr::from_bytes(b"old\xff1.log"));
    let second = temp.path().join(OsStr::from_bytes(b"old\xfe1.log"));
    // Some filesystems refuse names that are not UTF-8
    if fs::write(&first, b"a").is_err() || fs::write(&second, b"b").is_err() {
        return;
    }
    age_file(&first, 10 * DAY);
    age_file(&second, 10 * DAY);

    let result = RetentionSweeper::new(RetentionWindow::days(1)).sweep(temp.path());
    assert_eq!(
        result,
        SweepResult {
            examined: 2,
            deleted: 2,
            failed: 0,
        }
    );
    assert!(!first.exists());
    assert!(!second.exists());
}
