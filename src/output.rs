//! Rendering and persistence of grade reports.
//!
//! Supports a plain-text summary, a JSON document, and one CSV row per grade.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::types::GradeReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// JSON envelope around a report.
#[derive(Serialize)]
struct ReportDocument<'a> {
    generated_at: DateTime<Utc>,
    pass_mark: f64,
    report: &'a GradeReport,
}

#[derive(Serialize)]
struct GradeRow<'a> {
    subject: &'a str,
    subject_mean: f64,
    value: f64,
    display: &'a str,
}

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &GradeReport) {
    debug!("{:#?}", report);
}

/// Renders `report` in the requested format.
pub fn render(report: &GradeReport, format: OutputFormat, pass_mark: f64) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Text => Ok(render_text(report, pass_mark).into_bytes()),
        OutputFormat::Json => render_json(report, pass_mark).map(String::into_bytes),
        OutputFormat::Csv => render_csv(report),
    }
}

/// Human-readable summary: overall mean, then one block per subject.
pub fn render_text(report: &GradeReport, pass_mark: f64) -> String {
    let mut out = match report.overall() {
        Ok(mean) => format!("Overall mean: {mean:.2} ({})\n", verdict(mean >= pass_mark)),
        Err(e) => format!("Overall mean: n/a ({e})\n"),
    };
    out.push_str(&format!(
        "Grades: {} parsed, {} skipped\n",
        report.parsed, report.skipped
    ));

    for subject in &report.subjects {
        let displays: Vec<&str> = subject.displays().collect();
        out.push_str(&format!(
            "\n{}: mean {:.2} ({})\n  Grades: {}\n",
            subject.name,
            subject.mean,
            verdict(subject.is_passing(pass_mark)),
            displays.join(", ")
        ));
    }

    out
}

fn verdict(passing: bool) -> &'static str {
    if passing { "pass" } else { "fail" }
}

/// Pretty-printed JSON document stamped with the current time.
pub fn render_json(report: &GradeReport, pass_mark: f64) -> Result<String> {
    let doc = ReportDocument {
        generated_at: Utc::now(),
        pass_mark,
        report,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Column names of the CSV output.
const CSV_HEADER: [&str; 4] = ["subject", "subject_mean", "value", "display"];

/// One CSV row per grade, in presentation order. The header line is written
/// even when the report holds no grades.
pub fn render_csv(report: &GradeReport) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for subject in &report.subjects {
        for grade in &subject.grades {
            writer.serialize(GradeRow {
                subject: &subject.name,
                subject_mean: subject.mean,
                value: grade.value,
                display: &grade.display,
            })?;
        }
    }

    writer.flush()?;
    writer.into_inner().map_err(|e| e.into_error().into())
}

/// Writes rendered bytes to `path`, gzip-compressing when it ends in `.gz`.
pub fn write_output(path: &str, bytes: &[u8]) -> Result<()> {
    let gzip = Path::new(path).extension().and_then(|e| e.to_str()) == Some("gz");
    let mut file = File::create(path)?;

    if gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes)?;
        file.write_all(&encoder.finish()?)?;
    } else {
        file.write_all(bytes)?;
    }
    file.flush()?;

    info!(path, gzip, bytes = bytes.len(), "Report written");
    Ok(())
}
