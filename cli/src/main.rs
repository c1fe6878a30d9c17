//! treecp - tree copy
//!
//! Recursive copy, shadow copy, file comparison and emptiness checks
//! powered by treecopy.

use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Value, json};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use treecopy::{
    ContentStrategy, CopyOptions, CopyStats, EntryKind, Error as TreecopyError, ErrorCode,
    PlanItem, compare_file, copy_tree, is_file_empty, plan_tree,
};

/// treecp - copy trees with or without their content
///
/// Usage:
///   treecp copy SOURCE DEST
///   treecp shadow SOURCE DEST
///   treecp cmp FILE1 FILE2
///   treecp empty PATH
#[derive(Parser, Debug)]
#[command(name = "treecp", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Copy a file or directory tree, including file contents
    ///
    /// If DEST is an existing directory, SOURCE is copied into it under its
    /// own name. Otherwise DEST becomes the copy.
    Copy(CopyArgs),

    /// Replicate a file or directory tree with zero-length files
    Shadow(TreeArgs),

    /// Compare two files byte by byte
    ///
    /// Exits 0 when identical, 1 when different, 2 on error.
    Cmp {
        /// First file
        file1: PathBuf,
        /// Second file
        file2: PathBuf,
    },

    /// Check whether a file is empty
    ///
    /// Exits 0 when PATH is a zero-length file, 1 otherwise (including
    /// when PATH does not exist).
    Empty {
        /// File to check
        path: PathBuf,

        /// Print nothing, only set the exit status
        #[arg(short = 'q', long)]
        quiet: bool,
    },
}

#[derive(Args, Debug)]
struct CopyArgs {
    #[command(flatten)]
    tree: TreeArgs,

    /// Create empty files instead of copying content (same as `treecp shadow`)
    #[arg(long)]
    shadow: bool,
}

#[derive(Args, Debug)]
struct TreeArgs {
    /// Source file or directory
    source: PathBuf,

    /// Destination path
    dest: PathBuf,

    /// Print where every entry would land without copying
    #[arg(short = 'n', long = "plan", alias = "dry-run")]
    plan: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    output: OutputMode,

    /// Do not call fsync after each file (faster but less safe)
    #[arg(long)]
    no_sync: bool,

    /// Permission bits for created directories, in octal
    #[arg(long, value_name = "MODE", value_parser = parse_mode)]
    dir_mode: Option<u32>,

    /// Disable the progress spinner
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Print every directory created and file copied
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

fn parse_mode(s: &str) -> Result<u32, String> {
    let digits = s.strip_prefix("0o").unwrap_or(s);
    match u32::from_str_radix(digits, 8) {
        Ok(mode) if mode <= 0o7777 => Ok(mode),
        Ok(_) => Err(format!("mode out of range: {s}")),
        Err(e) => Err(format!("invalid octal mode '{s}': {e}")),
    }
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to copy {path}: {source}")]
    Copy { path: PathBuf, source: TreecopyError },

    #[error("Failed to plan copy of {path}: {source}")]
    Plan { path: PathBuf, source: TreecopyError },

    #[error("Failed to compare: {source}")]
    Compare { source: TreecopyError },

    #[error("Failed to serialize JSON output: {source}")]
    JsonSerialize { source: serde_json::Error },
}

impl CliError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Copy { source, .. } | Self::Plan { source, .. } | Self::Compare { source } => {
                source.code()
            }
            Self::JsonSerialize { .. } => ErrorCode::Internal,
        }
    }

    fn exit_code(&self) -> i32 {
        match (self, self.code()) {
            // 1 already means "files differ"
            (Self::Compare { .. }, _) => 2,
            (_, ErrorCode::InvalidInput) => 2,
            _ => 1,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    match run(cli) {
        Ok(status) => std::process::exit(status),
        Err(error) => {
            eprintln!("error[{}]: {}", error.code(), error);
            std::process::exit(error.exit_code());
        }
    }
}

fn run(cli: Cli) -> CliResult<i32> {
    match cli.command {
        Command::Copy(args) => {
            let strategy = if args.shadow {
                ContentStrategy::Shadow
            } else {
                ContentStrategy::Full
            };
            run_tree(&args.tree, strategy)
        }
        Command::Shadow(args) => run_tree(&args, ContentStrategy::Shadow),
        Command::Cmp { file1, file2 } => run_compare(&file1, &file2),
        Command::Empty { path, quiet } => Ok(run_empty(&path, quiet)),
    }
}

fn build_options(args: &TreeArgs, strategy: ContentStrategy) -> CopyOptions {
    let mut options = CopyOptions::default()
        .with_strategy(strategy)
        .with_warn_handler(|msg| eprintln!("warning: {msg}"));

    if args.no_sync {
        options = options.without_fsync();
    }
    if let Some(mode) = args.dir_mode {
        options = options.with_dir_mode(mode);
    }
    if args.verbose && args.output == OutputMode::Human {
        options = options.with_verbose_handler(|msg| eprintln!("{msg}"));
    }
    options
}

fn run_tree(args: &TreeArgs, strategy: ContentStrategy) -> CliResult<i32> {
    let options = build_options(args, strategy);

    if args.plan {
        let items = plan_tree(&args.source, &args.dest).map_err(|source| CliError::Plan {
            path: args.source.clone(),
            source,
        })?;
        emit_plan(args.output, strategy, &items)?;
        return Ok(0);
    }

    let pb = if args.output == OutputMode::Human && !args.quiet && !args.verbose {
        let pb = ProgressBar::new_spinner();
        match ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            Ok(style) => {
                pb.set_style(style);
                pb.enable_steady_tick(Duration::from_millis(100));
                pb.set_message(format!("Copying {}...", args.source.display()));
                Some(pb)
            }
            Err(_) => None,
        }
    } else {
        None
    };

    let result = copy_tree(&args.source, &args.dest, &options);

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    match result {
        Ok(stats) => {
            match args.output {
                OutputMode::Human => print_stats(&stats, strategy),
                OutputMode::Json => print_json_value(&json!({
                    "schema_version": "1.0",
                    "mode": "execute",
                    "strategy": strategy_value(strategy)?,
                    "stats": stats_value(&stats),
                }))?,
            }
            Ok(0)
        }
        Err(source) => {
            if args.output == OutputMode::Json {
                print_json_value(&json!({
                    "schema_version": "1.0",
                    "mode": "execute",
                    "strategy": strategy_value(strategy)?,
                    "error": {
                        "code": source.code().as_str(),
                        "message": source.to_string(),
                    },
                }))?;
            }
            Err(CliError::Copy {
                path: args.source.clone(),
                source,
            })
        }
    }
}

fn run_compare(file1: &Path, file2: &Path) -> CliResult<i32> {
    let ordering = compare_file(file1, file2).map_err(|source| CliError::Compare { source })?;
    match ordering {
        Ordering::Equal => Ok(0),
        Ordering::Less => {
            println!(
                "{} {} differ: {} sorts first",
                file1.display(),
                file2.display(),
                file1.display()
            );
            Ok(1)
        }
        Ordering::Greater => {
            println!(
                "{} {} differ: {} sorts first",
                file1.display(),
                file2.display(),
                file2.display()
            );
            Ok(1)
        }
    }
}

fn run_empty(path: &Path, quiet: bool) -> i32 {
    let empty = is_file_empty(path);
    if !quiet {
        if empty {
            println!("{}: empty", path.display());
        } else {
            println!("{}: not empty", path.display());
        }
    }
    if empty { 0 } else { 1 }
}

fn emit_plan(output: OutputMode, strategy: ContentStrategy, items: &[PlanItem]) -> CliResult<()> {
    match output {
        OutputMode::Human => {
            println!("Plan ({} items):", items.len());
            for item in items {
                match &item.destination {
                    Some(destination) => println!(
                        "  {} {} -> {}",
                        item.kind.as_str(),
                        item.source.display(),
                        destination.display()
                    ),
                    None => println!("  skip {}", item.source.display()),
                }
            }
            Ok(())
        }
        OutputMode::Json => {
            let items = items
                .iter()
                .map(plan_item_value)
                .collect::<CliResult<Vec<Value>>>()?;
            print_json_value(&json!({
                "schema_version": "1.0",
                "mode": "plan",
                "strategy": strategy_value(strategy)?,
                "items": items,
            }))
        }
    }
}

fn plan_item_value(item: &PlanItem) -> CliResult<Value> {
    let kind =
        serde_json::to_value(item.kind).map_err(|source| CliError::JsonSerialize { source })?;
    let action = match item.kind {
        EntryKind::Directory => "create_dir",
        EntryKind::File => "write_file",
        EntryKind::Other => "skip",
    };
    Ok(json!({
        "source": display_path(&item.source),
        "destination": item.destination.as_deref().map(display_path),
        "kind": kind,
        "action": action,
    }))
}

fn strategy_value(strategy: ContentStrategy) -> CliResult<Value> {
    serde_json::to_value(strategy).map_err(|source| CliError::JsonSerialize { source })
}

fn stats_value(stats: &CopyStats) -> Value {
    json!({
        "files_copied": stats.files_copied,
        "dirs_created": stats.dirs_created,
        "bytes_copied": stats.bytes_copied,
        "entries_skipped": stats.entries_skipped,
        "duration_ms": u64::try_from(stats.duration.as_millis()).unwrap_or(u64::MAX),
    })
}

fn print_stats(stats: &CopyStats, strategy: ContentStrategy) {
    if stats.files_copied == 0 && stats.dirs_created == 0 {
        println!("Nothing to copy");
        return;
    }

    let mut parts = vec![];
    if stats.files_copied > 0 {
        parts.push(format!("{} files", stats.files_copied));
    }
    if stats.dirs_created > 0 {
        parts.push(format!("{} dirs", stats.dirs_created));
    }
    if stats.entries_skipped > 0 {
        parts.push(format!("{} skipped", stats.entries_skipped));
    }

    match strategy {
        ContentStrategy::Full => println!(
            "Copied {} ({})",
            parts.join(", "),
            format_bytes(stats.bytes_copied)
        ),
        ContentStrategy::Shadow => println!("Shadowed {}", parts.join(", ")),
    }
}

fn print_json_value(value: &Value) -> CliResult<()> {
    let serialized =
        serde_json::to_string(value).map_err(|source| CliError::JsonSerialize { source })?;
    println!("{serialized}");
    Ok(())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
