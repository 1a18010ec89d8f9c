//! CLI entry point for the grade statistics tool.
//!
//! Loads a raw grade payload exported from the school portal, aggregates it
//! per subject and renders the result as text, JSON or CSV.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use grade_stats::analyzers::aggregate::aggregate;
use grade_stats::analyzers::grade::parse_grade;
use grade_stats::config::{Settings, pass_mark_from_env};
use grade_stats::{
    fetch::load_source,
    output::{OutputFormat, print_pretty, render, write_output},
    parser::parse_records,
};
use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "grade_stats")]
#[command(about = "Per-subject and overall statistics for school grades", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a grade payload from a JSON file or URL
    Analyze {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write to this file instead of stdout (gzip-compressed if it ends in .gz)
        #[arg(short, long)]
        output: Option<String>,

        /// Subject mean at or above which a subject counts as passing
        #[arg(long)]
        pass_mark: Option<f64>,
    },
    /// Show how individual grade tokens parse
    Parse {
        #[arg(value_name = "TOKEN", required = true)]
        tokens: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();

    let settings = Settings::from_env();
    let _file_guard = init_tracing(&settings.log_file_path)?;

    match cli.command {
        Commands::Analyze {
            source,
            format,
            output,
            pass_mark,
        } => {
            let pass_mark = match pass_mark {
                Some(pass_mark) => pass_mark,
                None => pass_mark_from_env()?,
            };
            analyze(&source, format, output.as_deref(), pass_mark).await?;
        }
        Commands::Parse { tokens } => {
            let mut stdout = std::io::stdout().lock();
            for token in &tokens {
                match parse_grade(Some(token.as_str())) {
                    Ok(value) => writeln!(stdout, "{token:?} -> {value}")?,
                    Err(e) => writeln!(stdout, "{token:?} -> unparseable ({e})")?,
                }
            }
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_tracing(log_file_path: &str) -> Result<WorkerGuard> {
    let log_dir = Path::new(log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("grade_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}

/// Loads, aggregates and renders one grade payload.
#[tracing::instrument(skip(format, output))]
async fn analyze(
    source: &str,
    format: OutputFormat,
    output: Option<&str>,
    pass_mark: f64,
) -> Result<()> {
    let bytes = load_source(source)
        .await
        .with_context(|| format!("failed to load {source}"))?;
    let records = parse_records(&bytes).with_context(|| format!("failed to decode {source}"))?;

    let report = aggregate(&records);
    print_pretty(&report);

    match report.overall() {
        Ok(mean) => info!(
            records = records.len(),
            parsed = report.parsed,
            skipped = report.skipped,
            subjects = report.subjects.len(),
            overall_mean = mean,
            "Grades aggregated"
        ),
        Err(e) => warn!(records = records.len(), skipped = report.skipped, "{e}"),
    }

    let rendered = render(&report, format, pass_mark)?;
    match output {
        Some(path) => write_output(path, &rendered)?,
        None => std::io::stdout().lock().write_all(&rendered)?,
    }

    Ok(())
}
