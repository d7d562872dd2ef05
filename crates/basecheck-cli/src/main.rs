mod display;

use anyhow::{Context, Result};
use basecheck_core::{audit_file, find_dockerfiles, AllowList, RunReport, RunSummary};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

const ALLOWLIST_ENV: &str = "BASECHECK_ALLOWLIST";
const DEFAULT_ALLOWLIST: &str = "allowed-images.json";

#[derive(Parser)]
#[command(
    name = "basecheck",
    version,
    about = "basecheck — Dockerfile base-image compliance checker",
    long_about = "Recursively find Dockerfiles, extract every FROM directive, and report base \
                  images that are not on your approved allow-list."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory tree and check every FROM directive against the allow-list
    Check {
        /// Root directory to scan for Dockerfiles
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Allow-list JSON file (falls back to $BASECHECK_ALLOWLIST, then allowed-images.json)
        #[arg(short, long)]
        allowlist: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Write a starter allow-list file
    Init {
        /// Output file path
        #[arg(short, long, default_value = DEFAULT_ALLOWLIST)]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            2
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Check {
            path,
            allowlist,
            format,
            no_color,
        } => cmd_check(&path, allowlist.as_deref(), &format, no_color),
        Commands::Init { output } => cmd_init(&output),
    }
}

fn cmd_check(path: &Path, allowlist: Option<&Path>, format: &str, no_color: bool) -> Result<i32> {
    if no_color || format == "json" {
        colored::control::set_override(false);
    }

    // The allow-list is loaded before any scanning; a broken one aborts the
    // whole run with a config error, distinct from a compliance failure.
    let allowlist_path = resolve_allowlist_path(allowlist);
    let allowlist = match AllowList::load(&allowlist_path) {
        Ok(list) => list,
        Err(err) => {
            display::print_config_error(&err);
            return Ok(2);
        }
    };

    let files = find_dockerfiles(path)?;

    match format {
        "json" => {
            let mut summary = RunSummary::default();
            let mut reports = Vec::with_capacity(files.len());
            for file in &files {
                let report = audit_file(file, &allowlist)?;
                summary.record(&report);
                reports.push(report);
            }
            let exit = summary.exit_code();
            let run = RunReport {
                files: reports,
                summary,
            };
            println!("{}", serde_json::to_string_pretty(&run)?);
            Ok(exit)
        }
        _ => {
            display::print_banner();
            let mut summary = RunSummary::default();
            for file in &files {
                let report = audit_file(file, &allowlist)?;
                display::print_file_report(&report);
                summary.record(&report);
            }
            display::print_summary(&summary);
            Ok(summary.exit_code())
        }
    }
}

fn resolve_allowlist_path(arg: Option<&Path>) -> PathBuf {
    if let Some(path) = arg {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var(ALLOWLIST_ENV) {
        return PathBuf::from(path);
    }
    PathBuf::from(DEFAULT_ALLOWLIST)
}

fn cmd_init(output: &Path) -> Result<i32> {
    if output.exists() {
        anyhow::bail!(
            "'{}' already exists; remove it first or pass a different --output",
            output.display()
        );
    }
    std::fs::write(output, AllowList::starter_document())
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    println!("Starter allow-list written to {}", output.display());
    println!("Add your approved base images to the \"images\" array.");
    Ok(0)
}
