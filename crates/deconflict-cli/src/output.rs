//! Report printing.

use anyhow::Result;
use clap::ValueEnum;
use deconflict_core::{ConflictKind, ConflictRecord, ConflictReport, ReportStatus};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Process exit code for a finished scan: 0 approves the plan, 2 rejects it.
pub fn exit_code(report: &ConflictReport) -> u8 {
    match report.status {
        ReportStatus::Clear => 0,
        ReportStatus::Conflict => 2,
    }
}

pub fn render(report: &ConflictReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => Ok(render_text(report)),
    }
}

fn render_text(report: &ConflictReport) -> String {
    let mut out = String::new();
    let status = match report.status {
        ReportStatus::Clear => "CLEAR",
        ReportStatus::Conflict => "CONFLICT",
    };
    let _ = writeln!(
        out,
        "Status: {} ({} conflict(s), {} samples, {} evaluations)",
        status,
        report.conflicts.len(),
        report.samples,
        report.evaluations
    );
    for record in &report.conflicts {
        let _ = writeln!(out, " - {}", describe(record));
    }
    out
}

fn describe(record: &ConflictRecord) -> String {
    let kind = match record.kind {
        ConflictKind::Spatial => "spatial",
        ConflictKind::Temporal => "temporal",
        ConflictKind::Spatiotemporal => "spatiotemporal",
    };
    let when = record
        .time
        .map(|t| format!(" @ t={t:.2}s"))
        .unwrap_or_default();
    let waypoint = record
        .waypoint_index
        .map(|i| format!(" (waypoint {i})"))
        .unwrap_or_default();
    let [a, b] = &record.positions;
    format!(
        "[{kind}] {} <-> {}{when}{waypoint}: {:.3}m at ({:.2}, {:.2}, {:.2}) / ({:.2}, {:.2}, {:.2})",
        record.participants[0], record.participants[1], record.distance, a.x, a.y, a.z, b.x, b.y, b.z
    )
}
