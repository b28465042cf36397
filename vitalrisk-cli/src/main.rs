//! vitalrisk CLI - health-risk scoring from the command line

#![deny(warnings)]

// Global invariants enforced:
// - Output keeps input order unless --sort is given
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use vitalrisk_core::config::{self, ResolvedConfig};
use vitalrisk_core::demo::reference_profiles;
use vitalrisk_core::recommend::MAX_RECOMMENDATIONS;
use vitalrisk_core::report::{render_summary_json, render_summary_jsonl, render_summary_text};
use vitalrisk_core::{
    assess_into_reports, parse_records, render_json, render_jsonl, render_text, sort_reports,
    summarize, ParsedRecord, PatientRiskReport, RejectedRecord,
};

/// Records per progress-bar tick
const CHUNK_SIZE: usize = 256;

/// Batches smaller than this never show a progress bar
const PROGRESS_MIN_RECORDS: usize = 1_000;

#[derive(Parser)]
#[command(name = "vitalrisk")]
#[command(about = "Deterministic chronic-disease risk scoring for patient records")]
#[command(version = env!("VITALRISK_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess patient records (JSON object, JSON array, or JSON Lines)
    Assess {
        /// Path to input file, or "-" for stdin
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Append a population summary
        #[arg(long)]
        summary: bool,

        /// Order by risk score (highest first) instead of input order
        #[arg(long)]
        sort: bool,

        /// Exit with an error if any record fails validation
        #[arg(long)]
        strict: bool,

        /// Override the recommendation cap from the config file (1 to 6)
        #[arg(long)]
        max_recommendations: Option<usize>,
    },
    /// Assess the built-in reference profiles
    Demo {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Validate or show a configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without assessing anything
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Jsonl,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Assess {
            path,
            format,
            config: config_path,
            summary,
            sort,
            strict,
            max_recommendations,
        } => {
            let cwd = std::env::current_dir()?;
            let mut resolved = config::load_and_resolve(&cwd, config_path.as_deref())
                .context("failed to load configuration")?;

            if let Some(config_path) = &resolved.config_path {
                log::info!("using config: {}", config_path.display());
            }

            // CLI flags override config file values
            if let Some(cap) = max_recommendations {
                if cap == 0 || cap > MAX_RECOMMENDATIONS {
                    anyhow::bail!(
                        "--max-recommendations must be between 1 and {} (got {})",
                        MAX_RECOMMENDATIONS,
                        cap
                    );
                }
                resolved.max_recommendations = cap;
            }

            let content = read_input(&path)?;
            let records = parse_records(&content)
                .with_context(|| format!("failed to read records from {}", path.display()))?;

            let (reports, rejected) = assess_all(&records, &resolved);
            if !rejected.is_empty() {
                eprintln!(
                    "Skipped {} of {} record(s) that could not be read or failed validation",
                    rejected.len(),
                    records.len()
                );
            }

            let reports = if sort { sort_reports(reports) } else { reports };
            print_reports(&reports, format, summary);

            if strict && !rejected.is_empty() {
                let (index, err) = &rejected[0];
                anyhow::bail!("record #{} is invalid: {}", index, err);
            }
        }
        Commands::Demo { format } => {
            let resolved = ResolvedConfig::defaults()?;
            let profiles = reference_profiles();
            for (i, profile) in profiles.iter().enumerate() {
                log::debug!("demo profile #{}: {}", i + 1, profile.name);
            }
            let records: Vec<ParsedRecord> = profiles
                .into_iter()
                .map(|profile| Ok(profile.record))
                .collect();
            let (reports, _) = assess_all(&records, &resolved);
            print_reports(&reports, format, false);
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let cwd = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&cwd, path.as_deref());

                match resolved {
                    Ok(config) => {
                        if let Some(ref p) = config.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let cwd = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&cwd, path.as_deref())
                    .context("failed to load configuration")?;
                print_config(&resolved);
            }
        },
    }

    Ok(())
}

/// Read the whole input from a file or stdin
fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
        return Ok(content);
    }

    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Assess in chunks so large batches can report progress
fn assess_all(
    records: &[ParsedRecord],
    resolved: &ResolvedConfig,
) -> (Vec<PatientRiskReport>, Vec<RejectedRecord>) {
    let progress = if records.len() >= PROGRESS_MIN_RECORDS && std::io::stderr().is_terminal() {
        let bar = ProgressBar::new(records.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} records ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    } else {
        None
    };

    let mut reports = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();
    for (chunk_no, chunk) in records.chunks(CHUNK_SIZE).enumerate() {
        let (chunk_reports, chunk_rejected) =
            assess_into_reports(chunk, chunk_no * CHUNK_SIZE + 1, resolved);
        reports.extend(chunk_reports);
        rejected.extend(chunk_rejected);
        if let Some(ref bar) = progress {
            bar.inc(chunk.len() as u64);
        }
    }

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    (reports, rejected)
}

fn print_reports(reports: &[PatientRiskReport], format: OutputFormat, with_summary: bool) {
    let summary = with_summary.then(|| summarize(reports));

    match format {
        OutputFormat::Text => {
            print!("{}", render_text(reports));
            if let Some(ref s) = summary {
                println!();
                print!("{}", render_summary_text(s));
            }
        }
        OutputFormat::Json => {
            println!("{}", render_json(reports));
            if let Some(ref s) = summary {
                println!("{}", render_summary_json(s));
            }
        }
        OutputFormat::Jsonl => {
            print!("{}", render_jsonl(reports));
            if let Some(ref s) = summary {
                print!("{}", render_summary_jsonl(s));
            }
        }
    }
}

fn print_bounds(name: &str, bounds: Option<vitalrisk_core::validate::Bounds>) {
    match bounds {
        Some(b) => println!("  {}: {} - {}", name, b.min, b.max),
        None => println!("  {}: unchecked", name),
    }
}

fn print_config(resolved: &ResolvedConfig) {
    println!("Configuration:");
    if let Some(ref p) = resolved.config_path {
        println!("  Source: {}", p.display());
    } else {
        println!("  Source: defaults (no config file found)");
    }
    println!();
    println!("Thresholds:");
    println!("  medium: {}", resolved.medium_threshold);
    println!("  high: {}", resolved.high_threshold);
    println!();
    println!("Recommendations:");
    println!("  max: {}", resolved.max_recommendations);
    println!();
    println!("Limits:");
    let limits = &resolved.limits;
    print_bounds("age", limits.age);
    print_bounds("height_cm", limits.height_cm);
    print_bounds("weight_kg", limits.weight_kg);
    print_bounds("systolic_bp", limits.systolic_bp);
    print_bounds("diastolic_bp", limits.diastolic_bp);
    print_bounds("pulse_rate", limits.pulse_rate);
    print_bounds("fasting_glucose", limits.fasting_glucose);
}
