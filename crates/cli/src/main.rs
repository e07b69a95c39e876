// ABOUTME: CLI that runs the scribe Markdown cleaner over files, directories or stdin.
// ABOUTME: Keeps a .backup of every rewritten file and exits non-zero when any file fails.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use scribe::{clean_path, cleanup_markdown, BatchReport, CleanupOptions, CleanupRule};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Clean Markdown files in place.
#[derive(Parser, Debug)]
#[command(name = "scribe-clean")]
#[command(about = "Apply Markdown cleanup rules to files and directories", long_about = None)]
struct Args {
    /// Markdown files or directories (searched recursively). Use "-" to clean stdin to stdout.
    #[arg(required = true)]
    targets: Vec<String>,

    /// Turn off a rule, e.g. standardize-emphasis (repeatable).
    #[arg(long = "disable", value_name = "RULE")]
    disable: Vec<CleanupRule>,

    /// JSON file with cleanup options; missing keys keep their defaults.
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_options(config: Option<&Path>, disable: &[CleanupRule]) -> Result<CleanupOptions> {
    let mut options = match config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => CleanupOptions::default(),
    };
    for rule in disable {
        options.set(*rule, false);
    }
    Ok(options)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let options = load_options(args.config.as_deref(), &args.disable)?;
    debug!(?options, "cleanup options");

    let mut report = BatchReport::default();
    for target in &args.targets {
        if target == "-" {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            println!("{}", cleanup_markdown(&input, &options));
            continue;
        }

        let path = Path::new(target);
        if !path.exists() {
            eprintln!("error: not found: {}", target);
            report.failed += 1;
            continue;
        }
        report.merge(clean_path(path, &options));
    }

    if args.targets.iter().any(|t| t != "-") {
        eprintln!(
            "Processed {} file(s), {} failed",
            report.processed, report.failed
        );
    }

    if !report.is_success() {
        bail!("{} file(s) could not be cleaned", report.failed);
    }
    Ok(())
}
