// LogTally - platform/config.rs
//
// Configuration directory resolution and config.toml loading with
// validation against the named constants.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogTally configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logtally/ or %APPDATA%\LogTally\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[analysis]` section.
    pub analysis: AnalysisSection,
    /// `[report]` section.
    pub report: ReportSection,
    /// `[console]` section.
    pub console: ConsoleSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[analysis]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Log file to analyse.
    pub input_file: Option<String>,
    /// Reject invalid UTF-8 (true) or replace it (false).
    pub strict_utf8: Option<bool>,
    /// Generate an example log when the default input is missing.
    pub create_sample: Option<bool>,
}

/// `[report]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Text report path.
    pub output_file: Option<String>,
    /// JSON export path (empty = disabled).
    pub json_file: Option<String>,
    /// CSV export path (empty = disabled).
    pub csv_file: Option<String>,
}

/// `[console]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ConsoleSection {
    /// "auto", "always" or "never".
    pub color: Option<String>,
    /// "auto", "always" or "never".
    pub emoji: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Three-way switch shared by the colour and emoji settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Toggle {
    #[default]
    Auto,
    Always,
    Never,
}

impl Toggle {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }
}

/// Validated application configuration.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Analysis --
    pub input_file: PathBuf,
    pub strict_utf8: bool,
    pub create_sample: bool,

    // -- Report --
    pub output_file: PathBuf,
    pub json_file: Option<PathBuf>,
    pub csv_file: Option<PathBuf>,

    // -- Console --
    pub color: Toggle,
    pub emoji: Toggle,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from(constants::DEFAULT_INPUT_FILE),
            strict_utf8: constants::DEFAULT_STRICT_UTF8,
            create_sample: constants::DEFAULT_CREATE_SAMPLE,
            output_file: PathBuf::from(constants::DEFAULT_REPORT_FILE),
            json_file: None,
            csv_file: None,
            color: Toggle::Auto,
            emoji: Toggle::Auto,
            log_level: None,
            log_file: None,
        }
    }
}

/// Load config.toml from the platform location.
///
/// A missing file yields defaults with no warnings (first run). An
/// unreadable or unparseable file yields defaults plus a warning: the tool
/// still runs, but the user is told why their settings were ignored.
pub fn load_config(paths: &PlatformPaths) -> (AppConfig, Vec<String>) {
    let config_path = paths.config_file();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    match load_config_file(&config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            (AppConfig::default(), vec![msg])
        }
    }
}

/// Load a config file the user named explicitly. Read and parse failures
/// are errors; invalid individual values are still only warnings.
pub fn load_config_file(path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let loaded = parse_config(&content, path)?;
    tracing::info!(path = %path.display(), "Loaded config.toml");
    Ok(loaded)
}

/// Parse and validate config.toml content.
pub fn parse_config(content: &str, path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(validate(raw))
}

/// Validate each field, accumulating all warnings rather than stopping at
/// the first bad value.
fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Analysis: input_file --
    match raw.analysis.input_file.as_deref() {
        Some("") => warnings.push(format!(
            "[analysis] input_file is empty. Using default ({}).",
            constants::DEFAULT_INPUT_FILE
        )),
        Some(path) => config.input_file = PathBuf::from(path),
        None => {}
    }
    if let Some(strict) = raw.analysis.strict_utf8 {
        config.strict_utf8 = strict;
    }
    if let Some(create) = raw.analysis.create_sample {
        config.create_sample = create;
    }
    // Only the built-in default input may be filled with sample data; a
    // configured path must exist.
    if config.input_file != Path::new(constants::DEFAULT_INPUT_FILE) {
        config.create_sample = false;
    }

    // -- Report: output_file --
    match raw.report.output_file.as_deref() {
        Some("") => warnings.push(format!(
            "[report] output_file is empty. Using default ({}).",
            constants::DEFAULT_REPORT_FILE
        )),
        Some(path) => config.output_file = PathBuf::from(path),
        None => {}
    }
    config.json_file = non_empty_path(raw.report.json_file);
    config.csv_file = non_empty_path(raw.report.csv_file);

    // -- Console --
    if let Some(ref color) = raw.console.color {
        match Toggle::parse(color) {
            Some(t) => config.color = t,
            None => warnings.push(format!(
                "[console] color = \"{color}\" is not recognised. \
                 Expected \"auto\", \"always\" or \"never\". Using default (auto).",
            )),
        }
    }
    if let Some(ref emoji) = raw.console.emoji {
        match Toggle::parse(emoji) {
            Some(t) => config.emoji = t,
            None => warnings.push(format!(
                "[console] emoji = \"{emoji}\" is not recognised. \
                 Expected \"auto\", \"always\" or \"never\". Using default (auto).",
            )),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: {}. Using default ({}).",
                constants::VALID_LOG_LEVELS.join(", "),
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }
    config.log_file = non_empty_path(raw.logging.file);

    (config, warnings)
}

fn non_empty_path(value: Option<String>) -> Option<PathBuf> {
    value.filter(|s| !s.is_empty()).map(PathBuf::from)
}
