// LogTally - core/classifier.rs
//
// Severity classification and aggregation.
// Core layer: pure logic over in-memory text, no I/O.

use crate::core::model::{Analysis, MatchedMessage, Severity};

/// Returns the bucket for a single line, or `None` if no keyword appears.
///
/// Keywords are tested in `Severity::PRIORITY` order and the first
/// substring hit wins. Matching is case-sensitive: "error" is not "ERROR".
pub fn classify_line(line: &str) -> Option<Severity> {
    Severity::PRIORITY
        .iter()
        .copied()
        .find(|severity| line.contains(severity.keyword()))
}

/// Classify every line and build the aggregate.
///
/// Lines are numbered from 1 in iteration order. Each line is trimmed
/// before matching; the trimmed text is what itemized records store.
pub fn aggregate<I, S>(lines: I) -> Analysis
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut analysis = Analysis::default();

    for (idx, raw) in lines.into_iter().enumerate() {
        let line_number = idx as u64 + 1;
        let line = raw.as_ref().trim();
        analysis.counts.total_lines += 1;

        let Some(severity) = classify_line(line) else {
            continue;
        };
        analysis.counts.increment(severity);

        if severity.is_itemized() {
            let record = MatchedMessage {
                line_number,
                severity,
                text: line.to_string(),
            };
            match severity {
                Severity::Error => analysis.errors.push(record),
                _ => analysis.warnings.push(record),
            }
        }
    }

    tracing::debug!(
        total_lines = analysis.counts.total_lines,
        classified = analysis.counts.classified_total(),
        errors = analysis.counts.error,
        warnings = analysis.counts.warning,
        "Aggregation complete"
    );

    analysis
}

/// Split file content into lines and aggregate them.
pub fn analyze_content(content: &str) -> Analysis {
    aggregate(split_lines(content))
}

/// Iterate over the lines of `content`.
///
/// `\n`, `\r\n` and a bare `\r` each end a line. A terminator at end of
/// input does not produce an extra empty line, and empty input yields zero
/// lines.
pub fn split_lines(content: &str) -> SplitLines<'_> {
    SplitLines { rest: content }
}

/// Iterator returned by [`split_lines`].
#[derive(Debug, Clone)]
pub struct SplitLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for SplitLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let Some(end) = self.rest.find(|c| c == '\r' || c == '\n') else {
            return Some(std::mem::take(&mut self.rest));
        };
        let line = &self.rest[..end];
        let terminator = if self.rest[end..].starts_with("\r\n") { 2 } else { 1 };
        self.rest = &self.rest[end + terminator..];
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_keyword() {
        assert_eq!(classify_line("x ERROR y"), Some(Severity::Error));
        assert_eq!(classify_line("WARNING: disk"), Some(Severity::Warning));
        assert_eq!(classify_line("INFO started"), Some(Severity::Info));
        assert_eq!(classify_line("DEBUG cache"), Some(Severity::Debug));
        assert_eq!(classify_line("plain text"), None);
    }

    #[test]
    fn test_classify_multi_keyword_takes_highest_priority() {
        assert_eq!(
            classify_line("WARNING escalated to ERROR"),
            Some(Severity::Error)
        );
        assert_eq!(classify_line("INFO about a WARNING"), Some(Severity::Warning));
        assert_eq!(classify_line("DEBUG INFO"), Some(Severity::Info));
    }

    #[test]
    fn test_classify_is_case_sensitive_substring() {
        assert_eq!(classify_line("error: lowercase"), None);
        assert_eq!(classify_line("MYERRORCODE"), Some(Severity::Error));
    }

    #[test]
    fn test_aggregate_reference_scenario() {
        let analysis = aggregate(["INFO - a", "ERROR - b", "ERROR - c", "WARNING - d"]);

        assert_eq!(analysis.counts.error, 2);
        assert_eq!(analysis.counts.warning, 1);
        assert_eq!(analysis.counts.info, 1);
        assert_eq!(analysis.counts.debug, 0);
        assert_eq!(analysis.counts.total_lines, 4);

        let errors: Vec<String> = analysis.errors.iter().map(|m| m.to_string()).collect();
        assert_eq!(errors, vec!["Line 2: ERROR - b", "Line 3: ERROR - c"]);
        assert_eq!(analysis.warnings.len(), 1);
        assert_eq!(analysis.warnings[0].line_number, 4);
    }

    #[test]
    fn test_aggregate_counts_unmatched_lines_in_total_only() {
        let analysis = aggregate(["nothing here", "", "INFO ok", "  "]);
        assert_eq!(analysis.counts.total_lines, 4);
        assert_eq!(analysis.counts.classified_total(), 1);
        assert_eq!(analysis.counts.unmatched(), 3);
    }

    #[test]
    fn test_aggregate_strips_whitespace_in_records() {
        let analysis = aggregate(["   ERROR padded \t"]);
        assert_eq!(analysis.errors[0].text, "ERROR padded");
    }

    #[test]
    fn test_multi_keyword_line_counted_once() {
        let analysis = aggregate(["ERROR and WARNING together"]);
        assert_eq!(analysis.counts.error, 1);
        assert_eq!(analysis.counts.warning, 0);
        assert!(analysis.warnings.is_empty());
        assert_eq!(analysis.counts.classified_total(), 1);
    }

    #[test]
    fn test_analyze_content_empty() {
        let analysis = analyze_content("");
        assert_eq!(analysis, Analysis::default());
    }

    #[test]
    fn test_analyze_content_line_endings() {
        let analysis = analyze_content("INFO a\r\nERROR b\nDEBUG c\n");
        assert_eq!(analysis.counts.total_lines, 3);
        assert_eq!(analysis.errors[0].text, "ERROR b");
        assert_eq!(analysis.errors[0].line_number, 2);
        assert_eq!(analysis.counts.debug, 1);
    }

    #[test]
    fn test_analyze_content_carriage_return_only() {
        let analysis = analyze_content("ERROR a\rWARNING b\rINFO c\r");
        assert_eq!(analysis.counts.total_lines, 3);
        assert_eq!(analysis.counts.error, 1);
        assert_eq!(analysis.counts.warning, 1);
        assert_eq!(analysis.counts.info, 1);
        assert_eq!(analysis.warnings[0].line_number, 2);
    }

    #[test]
    fn test_split_lines_mixed_terminators() {
        let lines: Vec<&str> = split_lines("a\r\nb\rc\nd").collect();
        assert_eq!(lines, vec!["a", "b", "c", "d"]);

        let lines: Vec<&str> = split_lines("a\n\r\nb\r\r").collect();
        assert_eq!(lines, vec!["a", "", "b", ""]);

        assert_eq!(split_lines("").count(), 0);
        assert_eq!(split_lines("\n").collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_total_lines_bounds_bucket_sum() {
        let content = "ERROR\nWARNING\nINFO\nDEBUG\nother\nERROR WARNING\n";
        let counts = analyze_content(content).counts;
        assert_eq!(counts.total_lines, 6);
        assert_eq!(counts.classified_total() + counts.unmatched(), counts.total_lines);
        assert!(counts.classified_total() <= counts.total_lines);
    }
}
