// LogTally - core/export.rs
//
// Machine-readable exports of an analysis: the full result as JSON and the
// itemized messages as CSV.
// Core layer: writes to any Write trait object.

use crate::core::model::{Analysis, MatchedMessage, SeverityCounts};
use crate::core::report::ReportStats;
use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// JSON document shape. Borrowed so exporting never clones messages.
#[derive(Serialize)]
struct AnalysisExport<'a> {
    counts: &'a SeverityCounts,
    classified_total: usize,
    unmatched: usize,
    #[serde(flatten)]
    stats: ReportStats,
    errors: &'a [MatchedMessage],
    warnings: &'a [MatchedMessage],
}

/// Export the analysis and its derived statistics as pretty-printed JSON.
pub fn export_json<W: Write>(
    analysis: &Analysis,
    writer: W,
    export_path: &Path,
) -> Result<(), ExportError> {
    let doc = AnalysisExport {
        counts: &analysis.counts,
        classified_total: analysis.counts.classified_total(),
        unmatched: analysis.counts.unmatched(),
        stats: ReportStats::from_counts(&analysis.counts),
        errors: &analysis.errors,
        warnings: &analysis.warnings,
    };
    serde_json::to_writer_pretty(writer, &doc).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })
}

/// Export itemized messages to CSV.
///
/// Writes: line, severity, message. Returns the number of records written.
pub fn export_csv<'a, W, I>(
    messages: I,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a MatchedMessage>,
{
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["line", "severity", "message"])
        .map_err(csv_err)?;

    let mut count = 0;
    for msg in messages {
        csv_writer
            .write_record([
                msg.line_number.to_string().as_str(),
                msg.severity.keyword(),
                msg.text.as_str(),
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}
