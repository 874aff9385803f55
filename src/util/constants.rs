// LogTally - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogTally";

/// Application identifier used for config directories.
pub const APP_ID: &str = "LogTally";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Input / output defaults
// =============================================================================

/// Log file analysed when none is given on the command line or in config.
pub const DEFAULT_INPUT_FILE: &str = "log.txt";

/// Report file written when none is given on the command line or in config.
pub const DEFAULT_REPORT_FILE: &str = "rapport.txt";

/// Whether invalid UTF-8 in the input is a hard error by default.
pub const DEFAULT_STRICT_UTF8: bool = true;

/// Whether a sample log is generated when the default input is missing.
pub const DEFAULT_CREATE_SAMPLE: bool = true;

// =============================================================================
// Health rating thresholds (error rate, percent of classified lines)
// =============================================================================

/// Error rate strictly above which the health rating is critical.
pub const CRITICAL_ERROR_RATE: f64 = 20.0;

/// Error rate strictly above which the health rating needs attention.
pub const ATTENTION_ERROR_RATE: f64 = 10.0;

// =============================================================================
// Report / console layout
// =============================================================================

/// Timestamp format used in the report header.
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Clock format used as the prefix of console status lines.
pub const STATUS_TIME_FORMAT: &str = "%H:%M:%S";

/// Width of the `=` rule framing the console summary.
pub const SUMMARY_RULE_WIDTH: usize = 60;

/// Width of the `-` rule under the startup banner.
pub const BANNER_RULE_WIDTH: usize = 50;

// =============================================================================
// Logging
// =============================================================================

/// Default log level for diagnostics on stderr.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Accepted values for `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
