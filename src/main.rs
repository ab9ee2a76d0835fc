//! CLI entry point for folderkit

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use folderkit::output::write_json_line;
use folderkit::{
    EntryFormatter, EntryMode, FilterConfig, FolderError, KnownFolder, OutputConfig, ScanOptions,
    SortKey, SortOrder, WalkWarning, count_items, folder_size, iter_scan, print_json, scan, search,
};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "folderkit")]
#[command(about = "Scan, search and measure folders")]
#[command(version)]
struct Cli {
    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto", global = true)]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List folder contents, optionally filtered and sorted
    Scan(ScanArgs),

    /// Find entries whose name matches a glob (e.g. "*.txt")
    Find {
        /// Glob matched against each base name, case-insensitively
        pattern: String,

        /// Folder to search
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Only search direct children
        #[arg(short, long)]
        shallow: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Count files and directories and sum file sizes
    Count {
        /// Folder to count
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Only count direct children
        #[arg(short, long)]
        shallow: bool,

        /// Show sizes in K/M/G units
        #[arg(short = 'H', long)]
        human: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the total size of all files in a folder
    Size {
        /// Folder to measure
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Show size in K/M/G units
        #[arg(short = 'H', long)]
        human: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the location of a well-known folder
    Where {
        #[arg(value_enum)]
        folder: KnownFolder,
    },
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Folder to scan
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Descend into subfolders
    #[arg(short, long)]
    recursive: bool,

    /// List files only
    #[arg(short = 'f', long = "files", conflicts_with = "dirs")]
    files: bool,

    /// List directories only
    #[arg(short = 'd', long = "dirs")]
    dirs: bool,

    /// Keep files with this extension (can be used multiple times)
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Keep entries whose name contains KEYWORD (case-insensitive)
    #[arg(short = 'k', long = "keyword")]
    keyword: Option<String>,

    /// Sort the results
    #[arg(long = "sort", value_name = "KEY")]
    sort: Option<SortArg>,

    /// Reverse the sort order
    #[arg(long = "reverse", requires = "sort")]
    reverse: bool,

    /// Print base names instead of full paths
    #[arg(short = 'n', long = "names")]
    names: bool,

    /// Stream results as they are found instead of collecting them first
    #[arg(long = "lazy", conflicts_with = "sort")]
    lazy: bool,

    /// Do not descend into symlinked directories
    #[arg(long = "no-follow")]
    no_follow: bool,

    /// Output in JSON format (JSON lines with --lazy; names only with --names)
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Path,
    Name,
    Size,
    Modified,
    Created,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Path => SortKey::Path,
            SortArg::Name => SortKey::Name,
            SortArg::Size => SortKey::Size,
            SortArg::Modified => SortKey::Modified,
            SortArg::Created => SortKey::Created,
        }
    }
}

impl ScanArgs {
    fn scan_options(&self) -> ScanOptions {
        let mode = if self.files {
            EntryMode::Files
        } else if self.dirs {
            EntryMode::Dirs
        } else {
            EntryMode::All
        };
        ScanOptions {
            recursive: self.recursive,
            follow_symlinks: !self.no_follow,
            filter: FilterConfig {
                extensions: self.extensions.clone(),
                keyword: self.keyword.clone(),
                mode,
                pattern: None,
            },
        }
    }

    fn sort_order(&self) -> Option<SortOrder> {
        self.sort.map(|key| SortOrder {
            key: key.into(),
            reverse: self.reverse,
        })
    }
}

/// Why a command failed.
enum Failure {
    Folder(FolderError),
    Output(io::Error),
}

impl From<FolderError> for Failure {
    fn from(e: FolderError) -> Self {
        Failure::Folder(e)
    }
}

impl From<io::Error> for Failure {
    fn from(e: io::Error) -> Self {
        Failure::Output(e)
    }
}

#[derive(Serialize)]
struct SizeReport<'a> {
    path: &'a PathBuf,
    total_size_bytes: u64,
}

fn main() {
    // Library events go to stderr; RUST_LOG=folderkit=debug shows walk details
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .init();

    let cli = Cli::parse();
    let use_color = should_use_color(cli.color);

    match run(cli.command, use_color) {
        Ok(()) => {}
        Err(Failure::Folder(FolderError::InvalidPattern { pattern, message })) => {
            eprintln!("folderkit: invalid pattern '{}': {}", pattern, message);
            process::exit(2);
        }
        Err(Failure::Folder(e)) => {
            match e.path() {
                Some(path) => eprintln!("folderkit: cannot access '{}': {}", path.display(), e),
                None => eprintln!("folderkit: {}", e),
            }
            process::exit(1);
        }
        Err(Failure::Output(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(Failure::Output(e)) => {
            eprintln!("folderkit: error writing output: {}", e);
            process::exit(1);
        }
    }
}

fn run(command: Command, use_color: bool) -> Result<(), Failure> {
    match command {
        Command::Scan(args) => run_scan(&args, use_color),
        Command::Find {
            pattern,
            path,
            shallow,
            json,
        } => {
            let result = search(&path, &pattern, !shallow)?;
            if json {
                let found: Vec<&Path> = result.paths().collect();
                print_json(&found)?;
            } else {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                for p in result.paths() {
                    writeln!(out, "{}", p.display())?;
                }
            }
            report_warnings(&result.warnings);
            Ok(())
        }
        Command::Count {
            path,
            shallow,
            human,
            json,
        } => {
            let count = count_items(&path, !shallow)?;
            if json {
                print_json(&count)?;
            } else {
                let mut formatter = EntryFormatter::stdout(OutputConfig {
                    use_color,
                    human_sizes: human,
                    ..Default::default()
                });
                formatter.write_count(&count)?;
            }
            Ok(())
        }
        Command::Size { path, human, json } => {
            let total_size_bytes = folder_size(&path)?;
            if json {
                print_json(&SizeReport {
                    path: &path,
                    total_size_bytes,
                })?;
            } else {
                let mut formatter = EntryFormatter::stdout(OutputConfig {
                    use_color,
                    human_sizes: human,
                    ..Default::default()
                });
                formatter.write_size(total_size_bytes)?;
            }
            Ok(())
        }
        Command::Where { folder } => {
            println!("{}", folder.resolve().display());
            Ok(())
        }
    }
}

fn run_scan(args: &ScanArgs, use_color: bool) -> Result<(), Failure> {
    let options = args.scan_options();
    let config = OutputConfig {
        use_color: use_color && !args.json,
        names_only: args.names,
        human_sizes: false,
    };

    if args.lazy {
        // Stream entries straight from the walk; nothing is collected
        let mut iter = iter_scan(&args.path, &options)?;
        if args.json {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for entry in iter.by_ref() {
                if args.names {
                    write_json_line(&mut out, &entry.name())?;
                } else {
                    write_json_line(&mut out, &entry)?;
                }
            }
        } else {
            let mut formatter = EntryFormatter::stdout(config);
            for entry in iter.by_ref() {
                formatter.write_entry(&entry)?;
            }
            formatter.flush()?;
        }
        report_warnings(iter.warnings());
        return Ok(());
    }

    let result = scan(&args.path, &options, args.sort_order())?;
    if args.json {
        if args.names {
            let names: Vec<String> = result.entries.iter().map(|e| e.name().into_owned()).collect();
            print_json(&names)?;
        } else {
            print_json(&result.entries)?;
        }
    } else {
        let mut formatter = EntryFormatter::stdout(config);
        formatter.write_entries(&result.entries)?;
        formatter.flush()?;
    }
    report_warnings(&result.warnings);
    Ok(())
}

fn report_warnings(warnings: &[WalkWarning]) {
    for warning in warnings {
        eprintln!("folderkit: warning: {}", warning);
    }
}
