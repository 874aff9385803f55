// LogTally - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every variant carries the path it
// concerns and, where one exists, the underlying cause via `source()`.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Top-level error type for all LogTally operations.
#[derive(Debug)]
pub enum LogTallyError {
    /// Reading the input log or writing an output file failed.
    FileAccess(FileAccessError),

    /// The input log is not valid UTF-8 and strict decoding is enabled.
    MalformedEncoding(MalformedEncodingError),

    /// JSON or CSV export failed.
    Export(ExportError),

    /// An explicitly requested configuration file could not be loaded.
    Config(ConfigError),
}

impl LogTallyError {
    /// File the failure concerns.
    pub fn path(&self) -> &Path {
        match self {
            Self::FileAccess(e) => e.path(),
            Self::MalformedEncoding(e) => &e.path,
            Self::Export(
                ExportError::Io { path, .. }
                | ExportError::Csv { path, .. }
                | ExportError::Json { path, .. },
            ) => path,
            Self::Config(ConfigError::TomlParse { path, .. } | ConfigError::Io { path, .. }) => {
                path
            }
        }
    }
}

impl fmt::Display for LogTallyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileAccess(e) => write!(f, "File access error: {e}"),
            Self::MalformedEncoding(e) => write!(f, "Encoding error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for LogTallyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileAccess(e) => Some(e),
            Self::MalformedEncoding(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// File access errors
// ---------------------------------------------------------------------------

/// I/O failures on the input log, the report, or the sample log.
///
/// "Not found" is split out from other failures so the caller can tell a
/// mistyped path apart from a permission or device problem.
#[derive(Debug)]
pub enum FileAccessError {
    /// The file does not exist.
    NotFound {
        path: PathBuf,
        operation: &'static str,
    },

    /// The process lacks permission for the operation.
    PermissionDenied {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// Any other I/O failure (invalid path, device error, ...).
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl FileAccessError {
    /// Classify an `io::Error` raised while performing `operation` on `path`.
    pub fn from_io(path: &Path, operation: &'static str, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path, operation },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path,
                operation,
                source,
            },
            _ => Self::Io {
                path,
                operation,
                source,
            },
        }
    }

    /// Path the failed operation targeted.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path, .. }
            | Self::PermissionDenied { path, .. }
            | Self::Io { path, .. } => path,
        }
    }
}

impl fmt::Display for FileAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path, operation } => {
                write!(
                    f,
                    "cannot {operation} '{}': file does not exist",
                    path.display()
                )
            }
            Self::PermissionDenied {
                path,
                operation,
                source,
            } => write!(
                f,
                "cannot {operation} '{}': permission denied ({source})",
                path.display()
            ),
            Self::Io {
                path,
                operation,
                source,
            } => write!(f, "cannot {operation} '{}': {source}", path.display()),
        }
    }
}

impl std::error::Error for FileAccessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::PermissionDenied { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<FileAccessError> for LogTallyError {
    fn from(e: FileAccessError) -> Self {
        Self::FileAccess(e)
    }
}

// ---------------------------------------------------------------------------
// Encoding errors
// ---------------------------------------------------------------------------

/// The input log contains bytes that are not valid UTF-8.
#[derive(Debug)]
pub struct MalformedEncodingError {
    /// Input file path.
    pub path: PathBuf,

    /// 1-based line number containing the first invalid byte.
    pub line_number: u64,

    pub source: std::str::Utf8Error,
}

impl fmt::Display for MalformedEncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' line {}: invalid UTF-8: {}",
            self.path.display(),
            self.line_number,
            self.source
        )
    }
}

impl std::error::Error for MalformedEncodingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl From<MalformedEncodingError> for LogTallyError {
    fn from(e: MalformedEncodingError) -> Self {
        Self::MalformedEncoding(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for LogTallyError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for LogTallyError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LogTally results.
pub type Result<T> = std::result::Result<T, LogTallyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_from_io_distinguishes_not_found() {
        let err = FileAccessError::from_io(
            Path::new("missing.log"),
            "read",
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(matches!(err, FileAccessError::NotFound { .. }));
        assert!(err.to_string().contains("does not exist"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_from_io_permission_denied_keeps_source() {
        let err = FileAccessError::from_io(
            Path::new("locked.log"),
            "write",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, FileAccessError::PermissionDenied { .. }));
        assert!(err.source().is_some());
        assert_eq!(err.path(), Path::new("locked.log"));
    }

    #[test]
    fn test_from_io_other_kinds_are_io() {
        let err = FileAccessError::from_io(
            Path::new("x"),
            "read",
            io::Error::new(io::ErrorKind::Other, "device gone"),
        );
        assert!(matches!(err, FileAccessError::Io { .. }));
        assert!(err.to_string().contains("device gone"));
    }

    #[test]
    fn test_top_level_display_and_source_chain() {
        let inner = FileAccessError::NotFound {
            path: PathBuf::from("log.txt"),
            operation: "read",
        };
        let err: LogTallyError = inner.into();
        assert!(err.to_string().starts_with("File access error:"));
        assert!(err.to_string().contains("log.txt"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_top_level_path_per_variant() {
        let err: LogTallyError =
            FileAccessError::from_io(Path::new("in.log"), "read", io::ErrorKind::NotFound.into())
                .into();
        assert_eq!(err.path(), Path::new("in.log"));

        let err: LogTallyError = ExportError::Io {
            path: PathBuf::from("out.csv"),
            source: io::ErrorKind::Other.into(),
        }
        .into();
        assert_eq!(err.path(), Path::new("out.csv"));

        let err: LogTallyError = ConfigError::Io {
            path: PathBuf::from("config.toml"),
            source: io::ErrorKind::NotFound.into(),
        }
        .into();
        assert_eq!(err.path(), Path::new("config.toml"));
    }
}
