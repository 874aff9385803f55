// LogTally - platform/fs.rs
//
// Filesystem access for the input log and the output files.
// Every function opens, uses and drops its handle before returning, so no
// handle outlives the call on either the success or the error path.

use crate::util::error::{FileAccessError, LogTallyError, MalformedEncodingError};
use std::io;
use std::path::Path;

/// How invalid UTF-8 in the input is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Policy {
    /// Invalid bytes are a `MalformedEncodingError`.
    Strict,
    /// Invalid bytes are replaced with U+FFFD.
    Lossy,
}

/// Read the whole input log as text.
pub fn read_log_text(path: &Path, policy: Utf8Policy) -> Result<String, LogTallyError> {
    let bytes = std::fs::read(path).map_err(|e| FileAccessError::from_io(path, "read", e))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Input read");

    match policy {
        Utf8Policy::Lossy => Ok(decode_lossy(bytes)),
        Utf8Policy::Strict => match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(e) => {
                let utf8_error = e.utf8_error();
                let valid = &e.as_bytes()[..utf8_error.valid_up_to()];
                let line_number = count_terminators(valid) + 1;
                Err(MalformedEncodingError {
                    path: path.to_path_buf(),
                    line_number,
                    source: utf8_error,
                }
                .into())
            }
        },
    }
}

/// Number of line terminators in `bytes`, with `\r\n` counted once and a
/// bare `\r` counted like `\n`.
fn count_terminators(bytes: &[u8]) -> u64 {
    let mut count = 0;
    let mut prev = 0u8;
    for &b in bytes {
        if b == b'\r' || (b == b'\n' && prev != b'\r') {
            count += 1;
        }
        prev = b;
    }
    count
}

fn decode_lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(error = %e.utf8_error(), "Replacing invalid UTF-8 in input");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

/// Write `content` to `path`, creating or truncating the file.
///
/// The parent directory is not created: a path into a missing directory is
/// an error like any other.
pub fn write_text_file(
    path: &Path,
    content: &str,
    operation: &'static str,
) -> Result<(), FileAccessError> {
    std::fs::write(path, content).map_err(|e| FileAccessError::from_io(path, operation, e))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), operation, "File written");
    Ok(())
}

/// Create (or truncate) a file for streaming writers such as the exporters.
pub fn create_file(path: &Path, operation: &'static str) -> Result<std::fs::File, FileAccessError> {
    std::fs::File::create(path).map_err(|e| FileAccessError::from_io(path, operation, e))
}

/// Returns true if `path` exists. Errors other than "not found" count as
/// existing.
pub fn exists(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(_) => true,
        Err(e) => e.kind() != io::ErrorKind::NotFound,
    }
}
