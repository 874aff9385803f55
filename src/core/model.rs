// LogTally - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// console or platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::Serialize;
use std::fmt;

// =============================================================================
// Severity
// =============================================================================

/// Severity buckets a log line can be classified into.
///
/// The set is fixed; a line whose text contains none of the keywords is
/// counted as a line but belongs to no bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Debug,
}

impl Severity {
    /// Classification priority, highest first. The first keyword found in a
    /// line decides its bucket, so a line containing both "ERROR" and
    /// "WARNING" is an error.
    pub const PRIORITY: [Severity; 4] = [
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::Debug,
    ];

    /// Keyword searched for (case-sensitive substring) when classifying.
    pub fn keyword(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }

    /// Plural description used in the report's raw statistics section.
    pub fn description(&self) -> &'static str {
        match self {
            Severity::Error => "Errors",
            Severity::Warning => "Warnings",
            Severity::Info => "Information",
            Severity::Debug => "Debug",
        }
    }

    /// Whether matching lines are itemized in the report.
    pub fn is_itemized(&self) -> bool {
        matches!(self, Severity::Error | Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

// =============================================================================
// Counts
// =============================================================================

/// Per-severity line counts for one analysed file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
    pub debug: usize,

    /// Every line read, classified or not.
    pub total_lines: usize,
}

impl SeverityCounts {
    /// Count for a single severity.
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
            Severity::Debug => self.debug,
        }
    }

    pub(crate) fn increment(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.error += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
            Severity::Debug => self.debug += 1,
        }
    }

    /// Sum of all severity buckets. Denominator for percentages.
    pub fn classified_total(&self) -> usize {
        self.error + self.warning + self.info + self.debug
    }

    /// Lines that matched no severity keyword.
    pub fn unmatched(&self) -> usize {
        self.total_lines.saturating_sub(self.classified_total())
    }
}

// =============================================================================
// Matched messages
// =============================================================================

/// A line recorded for the itemized ERROR / WARNING report sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedMessage {
    /// 1-based line number in the source file.
    pub line_number: u64,

    pub severity: Severity,

    /// Line text with surrounding whitespace stripped.
    pub text: String,
}

impl fmt::Display for MatchedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line_number, self.text)
    }
}

// =============================================================================
// Analysis
// =============================================================================

/// Result of one classification pass. Built once by the aggregator and
/// read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub counts: SeverityCounts,

    /// ERROR lines in file order.
    pub errors: Vec<MatchedMessage>,

    /// WARNING lines in file order.
    pub warnings: Vec<MatchedMessage>,
}

// =============================================================================
// Health rating
// =============================================================================

/// Three-tier health label derived from the error rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthRating {
    #[serde(rename = "CRITIQUE")]
    Critical,
    #[serde(rename = "ATTENTION")]
    Attention,
    #[serde(rename = "BON")]
    Good,
}

impl HealthRating {
    /// Rate a file from its error percentage of classified lines.
    pub fn from_error_rate(error_rate: f64) -> Self {
        use crate::util::constants::{ATTENTION_ERROR_RATE, CRITICAL_ERROR_RATE};

        if error_rate > CRITICAL_ERROR_RATE {
            HealthRating::Critical
        } else if error_rate > ATTENTION_ERROR_RATE {
            HealthRating::Attention
        } else {
            HealthRating::Good
        }
    }

    /// Label written to the report and console.
    pub fn label(&self) -> &'static str {
        match self {
            HealthRating::Critical => "CRITIQUE",
            HealthRating::Attention => "ATTENTION",
            HealthRating::Good => "BON",
        }
    }

    /// One-line explanation shown after the label in the report.
    pub fn description(&self) -> &'static str {
        match self {
            HealthRating::Critical => "High error rate (>20%)",
            HealthRating::Attention => "Moderate error rate (>10%)",
            HealthRating::Good => "Acceptable error rate (<=10%)",
        }
    }
}

impl fmt::Display for HealthRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
