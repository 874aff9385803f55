// LogTally - app/sample.rs
//
// Example log written on first run so the tool has something to analyse.

use crate::platform::fs;
use crate::util::error::FileAccessError;
use std::path::Path;

/// Content of the generated example log. Covers all four severities.
pub const SAMPLE_LINES: &[&str] = &[
    "2025-05-31 10:15:32 INFO - Application started successfully",
    "2025-05-31 10:16:01 INFO - User login: admin",
    "2025-05-31 10:16:30 DEBUG - Loading configuration",
    "2025-05-31 10:17:15 WARNING - Failed login attempt for user123",
    "2025-05-31 10:18:22 ERROR - Unable to connect to the database",
    "2025-05-31 10:19:45 INFO - Automatic backup completed",
    "2025-05-31 10:20:10 WARNING - Low disk space (85% used)",
    "2025-05-31 10:21:33 ERROR - Timeout calling external API",
    "2025-05-31 10:22:18 INFO - Finished processing data.csv",
    "2025-05-31 10:22:45 DEBUG - Clearing temporary cache",
    "2025-05-31 10:23:47 ERROR - User data validation failed",
    "2025-05-31 10:24:56 WARNING - Redis cache unavailable, using local cache",
    "2025-05-31 10:25:30 DEBUG - Cleanup finished",
];

/// Write the example log to `path` unless something already exists there.
///
/// Returns `true` when the file was created.
pub fn ensure_sample_log(path: &Path) -> Result<bool, FileAccessError> {
    if fs::exists(path) {
        return Ok(false);
    }

    fs::write_text_file(path, &SAMPLE_LINES.join("\n"), "create sample")?;
    tracing::info!(path = %path.display(), lines = SAMPLE_LINES.len(), "Sample log created");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::analyze_content;

    #[test]
    fn test_creates_sample_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");

        assert!(ensure_sample_log(&path).unwrap());
        let content = std::fs::read_to_string(&path).unwrap();
        let counts = analyze_content(&content).counts;
        assert_eq!(counts.total_lines, 13);
        assert_eq!(counts.error, 3);
        assert_eq!(counts.warning, 3);
        assert_eq!(counts.info, 4);
        assert_eq!(counts.debug, 3);
    }

    #[test]
    fn test_leaves_existing_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "mine").unwrap();

        assert!(!ensure_sample_log(&path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "mine");
    }
}
