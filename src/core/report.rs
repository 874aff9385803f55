// LogTally - core/report.rs
//
// Derived statistics (percentages, error rate, health) and the plain-text
// report. Core layer: builds strings only; writing is the platform layer's job.

use crate::core::model::{Analysis, HealthRating, MatchedMessage, Severity, SeverityCounts};
use crate::util::constants;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// Percentage share of one severity among classified lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeverityShare {
    pub severity: Severity,
    pub percent: f64,
}

/// Read-only view over `SeverityCounts` with the derived figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportStats {
    /// One entry per severity in priority order. `None` when no line was
    /// classified, in which case the report omits the section.
    pub percentages: Option<Vec<SeverityShare>>,

    /// ERROR count as a percentage of classified lines; 0 when none.
    pub error_rate: f64,

    pub health: HealthRating,
}

impl ReportStats {
    pub fn from_counts(counts: &SeverityCounts) -> Self {
        let classified = counts.classified_total();

        if classified == 0 {
            return Self {
                percentages: None,
                error_rate: 0.0,
                health: HealthRating::from_error_rate(0.0),
            };
        }

        let percent_of = |n: usize| n as f64 / classified as f64 * 100.0;
        let percentages = Severity::PRIORITY
            .iter()
            .map(|&severity| SeverityShare {
                severity,
                percent: percent_of(counts.get(severity)),
            })
            .collect();
        let error_rate = percent_of(counts.error);

        Self {
            percentages: Some(percentages),
            error_rate,
            health: HealthRating::from_error_rate(error_rate),
        }
    }
}

/// Header metadata that is not part of the analysis itself.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub generated_at: DateTime<Local>,
    pub source: &'a Path,
}

impl<'a> ReportContext<'a> {
    /// Context stamped with the current local time.
    pub fn now(source: &'a Path) -> Self {
        Self {
            generated_at: Local::now(),
            source,
        }
    }
}

/// Render the full text report.
///
/// Section order: header, raw statistics, percentage breakdown (only when
/// something was classified), error details, warning details, health.
pub fn render_report(analysis: &Analysis, ctx: &ReportContext<'_>) -> String {
    let counts = &analysis.counts;
    let stats = ReportStats::from_counts(counts);
    let mut out = String::new();

    // Writing into a String cannot fail, so the fmt::Results are discarded.
    let _ = writeln!(out, "=== LOG ANALYSIS REPORT ===");
    let _ = writeln!(
        out,
        "Generated: {}",
        ctx.generated_at.format(constants::REPORT_TIMESTAMP_FORMAT)
    );
    let _ = writeln!(out, "Source file: {}", ctx.source.display());
    out.push('\n');

    let _ = writeln!(out, "GENERAL STATISTICS:");
    let _ = writeln!(out, "- Total lines: {}", counts.total_lines);
    for severity in Severity::PRIORITY {
        let _ = writeln!(
            out,
            "- {} ({}): {}",
            severity.description(),
            severity.keyword(),
            counts.get(severity)
        );
    }
    let _ = writeln!(out, "- Unclassified lines: {}", counts.unmatched());
    out.push('\n');

    if let Some(shares) = &stats.percentages {
        let _ = writeln!(out, "PERCENTAGE BREAKDOWN:");
        for share in shares {
            let _ = writeln!(out, "- {}: {:.1}%", share.severity, share.percent);
        }
        out.push('\n');
    }

    write_itemized(&mut out, "ERROR DETAILS:", &analysis.errors);
    write_itemized(&mut out, "WARNING DETAILS:", &analysis.warnings);

    let _ = writeln!(out, "HEALTH ANALYSIS:");
    let _ = writeln!(out, "Error rate: {:.1}%", stats.error_rate);
    let _ = writeln!(
        out,
        "{}: {}",
        stats.health.label(),
        stats.health.description()
    );

    out
}

fn write_itemized(out: &mut String, title: &str, messages: &[MatchedMessage]) {
    if messages.is_empty() {
        return;
    }
    let _ = writeln!(out, "{title}");
    for msg in messages {
        let _ = writeln!(out, "  {msg}");
    }
    out.push('\n');
}
