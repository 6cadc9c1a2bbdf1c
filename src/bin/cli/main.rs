//! CLI tool for dirzip directory listing and zip archive operations.

mod commands;
mod exit_codes;
mod progress;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use exit_codes::ExitCode;

/// Directory listings and zip archive maintenance
#[derive(Parser)]
#[command(name = "dirzip")]
#[command(author, version, about = "Directory listings and zip archive maintenance", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Suppress progress output
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List files or folders below a directory
    Ls {
        /// Directory to list
        root: PathBuf,

        /// List folders instead of files
        #[arg(long)]
        folders: bool,

        /// Descend into subdirectories
        #[arg(short = 'r', long)]
        recursive: bool,

        /// Print paths relative to the root
        #[arg(long)]
        relative: bool,

        /// Print shallowest paths first instead of traversal order
        #[arg(long)]
        sorted: bool,

        /// Use '/' in relative paths on every platform
        #[arg(long)]
        normalize: bool,
    },

    /// Extract every entry of an archive (alias: x)
    #[command(alias = "x")]
    Extract {
        /// Archive file to extract
        archive: PathBuf,

        /// Output directory (must exist)
        #[arg(short = 'o', long, default_value = ".")]
        output: PathBuf,

        /// Streaming buffer size in bytes
        #[arg(long, env = "DIRZIP_BUFFER_SIZE")]
        buffer_size: Option<usize>,

        /// Delete files that could not be written completely
        #[arg(long)]
        remove_partial: bool,
    },

    /// Extract one entry, flattened to its file name
    ExtractOne {
        /// Archive file
        archive: PathBuf,

        /// Full entry name inside the archive
        entry: String,

        /// Output directory (must exist)
        #[arg(short = 'o', long, default_value = ".")]
        output: PathBuf,
    },

    /// Print an entry as text
    Cat {
        /// Archive file
        archive: PathBuf,

        /// Full entry name inside the archive
        entry: String,
    },

    /// Add a file to an archive (alias: a)
    #[command(alias = "a")]
    Add {
        /// Archive file
        archive: PathBuf,

        /// File to add
        file: PathBuf,

        /// Entry name (defaults to the file name)
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Compression method
        #[arg(short = 'm', long, value_enum, default_value = "deflate")]
        method: CompressionMethod,

        /// Create an empty archive first if it does not exist
        #[arg(long)]
        create: bool,
    },

    /// Add a directory entry to an archive
    Mkdir {
        /// Archive file
        archive: PathBuf,

        /// Directory entry name ('/' is appended if missing)
        entry: String,

        /// Create an empty archive first if it does not exist
        #[arg(long)]
        create: bool,
    },

    /// Remove entries from an archive (alias: d)
    #[command(alias = "d")]
    Rm {
        /// Archive file
        archive: PathBuf,

        /// Entry name; 'dir' also matches 'dir/'
        entry: String,
    },

    /// Delete files older than a number of days
    Cleanup {
        /// Directory to sweep
        root: PathBuf,

        /// Keep files modified within this many days
        #[arg(short = 'd', long)]
        days: u64,

        /// Sweep subdirectories too
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum CompressionMethod {
    Stored,
    Deflate,
    Bzip2,
    Zstd,
}

impl CompressionMethod {
    fn name(self) -> &'static str {
        match self {
            CompressionMethod::Stored => "stored",
            CompressionMethod::Deflate => "deflate",
            CompressionMethod::Bzip2 => "bzip2",
            CompressionMethod::Zstd => "zstd",
        }
    }
}

fn main() {
    // Set up Ctrl+C handler
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupted");
        std::process::exit(exit_codes::USER_INTERRUPT);
    })
    .ok();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Ls {
            root,
            folders,
            recursive,
            relative,
            sorted,
            normalize,
        } => commands::list(&commands::ListConfig {
            root: &root,
            folders,
            recursive,
            relative,
            sorted,
            normalize,
        }),

        Commands::Extract {
            archive,
            output,
            buffer_size,
            remove_partial,
        } => commands::extract(&commands::ExtractConfig {
            archive_path: &archive,
            output_dir: &output,
            buffer_size,
            remove_partial,
            quiet: cli.quiet,
        }),

        Commands::ExtractOne {
            archive,
            entry,
            output,
        } => commands::extract_one(&archive, &entry, &output),

        Commands::Cat { archive, entry } => commands::cat(&archive, &entry),

        Commands::Add {
            archive,
            file,
            name,
            method,
            create,
        } => commands::add(&commands::AddConfig {
            archive_path: &archive,
            file: &file,
            name: name.as_deref(),
            method: method.name(),
            create,
        }),

        Commands::Mkdir {
            archive,
            entry,
            create,
        } => commands::mkdir(&archive, &entry, create),

        Commands::Rm { archive, entry } => commands::remove(&archive, &entry),

        Commands::Cleanup {
            root,
            days,
            recursive,
        } => commands::cleanup(&root, days, recursive, cli.quiet),

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            ExitCode::Success
        }
    };

    std::process::exit(exit_code.code());
}
