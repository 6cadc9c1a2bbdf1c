//! Command implementations for the CLI tool.

use std::fs::File;
use std::path::Path;

use dirzip::progress::format_bytes_iec;
use dirzip::{
    ArchiveEditor, Compression, ExtractOptions, ListOptions, PathIndex, PathType,
    RetentionSweeper, RetentionWindow, WriteOptions, fsops,
};

use crate::exit_codes::{ExitCode, report};
use crate::progress::CliProgress;

/// Configuration for the ls command.
pub struct ListConfig<'a> {
    pub root: &'a Path,
    pub folders: bool,
    pub recursive: bool,
    pub relative: bool,
    pub sorted: bool,
    pub normalize: bool,
}

/// Configuration for the extract command.
pub struct ExtractConfig<'a> {
    pub archive_path: &'a Path,
    pub output_dir: &'a Path,
    pub buffer_size: Option<usize>,
    pub remove_partial: bool,
    pub quiet: bool,
}

/// Configuration for the add command.
pub struct AddConfig<'a> {
    pub archive_path: &'a Path,
    pub file: &'a Path,
    pub name: Option<&'a str>,
    pub method: &'a str,
    pub create: bool,
}

/// ls command implementation
pub fn list(config: &ListConfig<'_>) -> ExitCode {
    if !fsops::is_directory(config.root) {
        eprintln!("Error: Not a directory: {}", config.root.display());
        return ExitCode::Failure;
    }

    let path_type = if config.relative {
        PathType::Relative
    } else {
        PathType::Absolute
    };
    let options = ListOptions::new()
        .recursive(config.recursive)
        .path_type(path_type)
        .normalize_separators(config.normalize);

    let mut index = PathIndex::new();
    let listing = if config.folders {
        index.list_folders(config.root, &options)
    } else {
        index.list_files(config.root, &options)
    };
    let role = if config.folders {
        index.folders()
    } else {
        index.files()
    };

    if config.sorted {
        print!("{}", role.sorted_listing(path_type));
    } else {
        print!("{}", listing);
    }

    if role.skipped() > 0 {
        eprintln!("Warning: {} entries could not be read", role.skipped());
        return ExitCode::Incomplete;
    }
    ExitCode::Success
}

/// extract command implementation
pub fn extract(config: &ExtractConfig<'_>) -> ExitCode {
    let mut options = ExtractOptions::new().remove_partial_files(config.remove_partial);
    if let Some(size) = config.buffer_size {
        options = options.buffer_size(size);
    }

    let mut progress = CliProgress::new(config.quiet);
    let result = dirzip::read::extract_all_with(
        config.output_dir,
        config.archive_path,
        &options,
        &mut progress,
    );
    progress.finish();

    let result = match result {
        Ok(r) => r,
        Err(e) => return report(&e),
    };

    if progress.errors() > 0 {
        eprintln!("{} entries could not be extracted", progress.errors());
    }
    if !config.quiet {
        println!(
            "Extracted {}/{} entries ({} directories, {} files, {})",
            result.entries_extracted,
            result.entries_total,
            result.directories_created,
            result.files_written,
            format_bytes_iec(result.bytes_written)
        );
    }
    ExitCode::from_complete(result.is_complete())
}

/// extract-one command implementation
pub fn extract_one(archive_path: &Path, entry: &str, output_dir: &Path) -> ExitCode {
    let mut progress = CliProgress::new(true);
    match dirzip::extract_one(output_dir, archive_path, entry, &mut progress) {
        Ok(written) => ExitCode::from_complete(written),
        Err(e) => report(&e),
    }
}

/// cat command implementation
pub fn cat(archive_path: &Path, entry: &str) -> ExitCode {
    match dirzip::extract_text(archive_path, entry) {
        Ok(Some(text)) => {
            print!("{}", text);
            ExitCode::Success
        }
        Ok(None) => {
            eprintln!("Error: Entry not found: {}", entry);
            ExitCode::Incomplete
        }
        Err(e) => report(&e),
    }
}

/// Creates an empty archive file when asked to and none exists
fn ensure_archive(archive_path: &Path, create: bool) -> Result<(), ExitCode> {
    if create && !archive_path.exists() {
        if let Err(e) = File::create(archive_path) {
            eprintln!("Error creating {}: {}", archive_path.display(), e);
            return Err(ExitCode::Failure);
        }
    }
    Ok(())
}

/// add command implementation
pub fn add(config: &AddConfig<'_>) -> ExitCode {
    let Some(compression) = Compression::from_name(config.method) else {
        eprintln!(
            "Error: Compression method '{}' is not enabled in this build",
            config.method
        );
        return ExitCode::Failure;
    };
    if let Err(code) = ensure_archive(config.archive_path, config.create) {
        return code;
    }

    let name = match config.name {
        Some(name) => name.to_string(),
        None => config
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let mut editor = match ArchiveEditor::open(config.archive_path) {
        Ok(editor) => editor.with_options(WriteOptions::new().compression(compression)),
        Err(e) => return report(&e),
    };
    if let Err(e) = editor.add_file(&name, config.file) {
        return report(&e);
    }
    match editor.apply() {
        Ok(result) => {
            println!(
                "Added {} ({}) to {}",
                name,
                format_bytes_iec(result.bytes_added),
                config.archive_path.display()
            );
            ExitCode::Success
        }
        Err(e) => report(&e),
    }
}

/// mkdir command implementation
pub fn mkdir(archive_path: &Path, entry: &str, create: bool) -> ExitCode {
    if let Err(code) = ensure_archive(archive_path, create) {
        return code;
    }
    match dirzip::add_directory_entry(archive_path, entry) {
        Ok(()) => ExitCode::Success,
        Err(e) => report(&e),
    }
}

/// rm command implementation
pub fn remove(archive_path: &Path, entry: &str) -> ExitCode {
    match dirzip::remove_entry(archive_path, entry) {
        Ok(0) => {
            eprintln!("Error: Entry not found: {}", entry);
            ExitCode::Incomplete
        }
        Ok(count) => {
            println!("Removed {} entries", count);
            ExitCode::Success
        }
        Err(e) => report(&e),
    }
}

/// cleanup command implementation
pub fn cleanup(root: &Path, days: u64, recursive: bool, quiet: bool) -> ExitCode {
    if !fsops::is_directory(root) {
        eprintln!("Error: Not a directory: {}", root.display());
        return ExitCode::Failure;
    }
    let result = RetentionSweeper::new(RetentionWindow::days(days))
        .recursive(recursive)
        .sweep(root);
    if !quiet {
        println!(
            "Deleted {} of {} files ({} failures)",
            result.deleted, result.examined, result.failed
        );
    }
    ExitCode::from_complete(result.failed == 0)
}
