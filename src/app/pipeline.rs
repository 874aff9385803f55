// LogTally - app/pipeline.rs
//
// One analysis run: optional sample creation, read + classify, write the
// report, optional exports, console summary.
//
// Input failures abort the run before anything is written. Output failures
// are recorded, the remaining steps still run, and the first one recorded
// is returned at the end so the caller can exit non-zero.

use crate::app::console::{emit, Console, StatusLevel};
use crate::app::sample;
use crate::core::classifier;
use crate::core::export;
use crate::core::model::Analysis;
use crate::core::report::{self, ReportContext};
use crate::platform::config::AppConfig;
use crate::platform::fs::{self, Utf8Policy};
use crate::util::error::{ExportError, LogTallyError, Result};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Everything one run needs, after CLI and config have been merged.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output: PathBuf,

    /// Write the example log to `input` if it does not exist.
    pub create_sample: bool,

    pub utf8: Utf8Policy,
    pub json_export: Option<PathBuf>,
    pub csv_export: Option<PathBuf>,
}

impl RunOptions {
    /// Options straight from a validated config.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            input: config.input_file.clone(),
            output: config.output_file.clone(),
            create_sample: config.create_sample,
            utf8: if config.strict_utf8 {
                Utf8Policy::Strict
            } else {
                Utf8Policy::Lossy
            },
            json_export: config.json_file.clone(),
            csv_export: config.csv_file.clone(),
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub analysis: Analysis,
    pub sample_created: bool,
}

/// Read `path` and classify its lines.
pub fn analyze_file(path: &Path, utf8: Utf8Policy) -> Result<Analysis> {
    let content = fs::read_log_text(path, utf8)?;
    let analysis = classifier::analyze_content(&content);

    tracing::info!(
        path = %path.display(),
        total_lines = analysis.counts.total_lines,
        errors = analysis.counts.error,
        warnings = analysis.counts.warning,
        "Log analysed"
    );
    Ok(analysis)
}

/// Execute a full run, writing console output to `out`.
pub fn run<W: Write>(opts: &RunOptions, console: &Console, out: &mut W) -> Result<RunOutcome> {
    let mut sample_created = false;
    if opts.create_sample {
        sample_created = sample::ensure_sample_log(&opts.input)?;
        if sample_created {
            emit(
                out,
                &console.status_line(
                    StatusLevel::Success,
                    &format!("Created {} with sample data", opts.input.display()),
                ),
            );
        }
    }

    let analysis = analyze_file(&opts.input, opts.utf8)?;
    emit(
        out,
        &console.status_line(
            StatusLevel::Success,
            &format!(
                "Analysis complete: {} lines processed",
                analysis.counts.total_lines
            ),
        ),
    );

    let mut steps = vec![write_report(&analysis, opts)];
    if let Some(path) = &opts.json_export {
        steps.push(write_json(&analysis, path));
    }
    if let Some(path) = &opts.csv_export {
        steps.push(write_csv(&analysis, path));
    }

    let mut first_error: Option<LogTallyError> = None;
    for step in steps {
        match step {
            Ok(done) => emit(out, &console.status_line(StatusLevel::Success, &done)),
            Err(e) => {
                tracing::error!(error = %e, "Output step failed");
                emit(out, &console.status_line(StatusLevel::Error, &e.to_string()));
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    emit(out, &console.render_summary(&analysis, &opts.input));

    match first_error {
        Some(e) => Err(e),
        None => Ok(RunOutcome {
            analysis,
            sample_created,
        }),
    }
}

fn write_report(analysis: &Analysis, opts: &RunOptions) -> Result<String> {
    let text = report::render_report(analysis, &ReportContext::now(&opts.input));
    fs::write_text_file(&opts.output, &text, "write report")?;
    Ok(format!("Report written: {}", opts.output.display()))
}

fn write_json(analysis: &Analysis, path: &Path) -> Result<String> {
    let mut writer = BufWriter::new(fs::create_file(path, "write JSON export")?);
    export::export_json(analysis, &mut writer, path)?;
    flush_export(&mut writer, path)?;
    Ok(format!("JSON export written: {}", path.display()))
}

fn write_csv(analysis: &Analysis, path: &Path) -> Result<String> {
    let mut writer = BufWriter::new(fs::create_file(path, "write CSV export")?);
    let count = export::export_csv(
        analysis.errors.iter().chain(&analysis.warnings),
        &mut writer,
        path,
    )?;
    flush_export(&mut writer, path)?;
    Ok(format!("CSV export written: {} ({count} messages)", path.display()))
}

fn flush_export<W: Write>(writer: &mut W, path: &Path) -> std::result::Result<(), ExportError> {
    writer.flush().map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::FileAccessError;

    fn options(dir: &Path) -> RunOptions {
        RunOptions {
            input: dir.join("log.txt"),
            output: dir.join("rapport.txt"),
            create_sample: false,
            utf8: Utf8Policy::Strict,
            json_export: None,
            csv_export: None,
        }
    }

    #[test]
    fn test_from_config_maps_fields() {
        let config = AppConfig {
            strict_utf8: false,
            json_file: Some(PathBuf::from("a.json")),
            ..AppConfig::default()
        };
        let opts = RunOptions::from_config(&config);
        assert_eq!(opts.utf8, Utf8Policy::Lossy);
        assert_eq!(opts.input, PathBuf::from("log.txt"));
        assert_eq!(opts.output, PathBuf::from("rapport.txt"));
        assert!(opts.create_sample);
        assert_eq!(opts.json_export, Some(PathBuf::from("a.json")));
    }

    #[test]
    fn test_run_writes_report_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path());
        std::fs::write(&opts.input, "INFO - a\nERROR - b\nERROR - c\nWARNING - d\n").unwrap();

        let mut out = Vec::new();
        let outcome = run(&opts, &Console::plain(), &mut out).unwrap();
        assert!(!outcome.sample_created);
        assert_eq!(outcome.analysis.counts.error, 2);

        let report = std::fs::read_to_string(&opts.output).unwrap();
        assert!(report.contains("CRITIQUE"));
        let console = String::from_utf8(out).unwrap();
        assert!(console.contains("Analysis complete: 4 lines processed"));
        assert!(console.contains("Report written:"));
        assert!(console.contains("Status: CRITIQUE"));
    }

    #[test]
    fn test_run_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path());

        let mut out = Vec::new();
        let err = run(&opts, &Console::plain(), &mut out).unwrap_err();
        assert!(matches!(
            err,
            LogTallyError::FileAccess(FileAccessError::NotFound { .. })
        ));
        assert!(!opts.output.exists());
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_missing_configured_input_is_not_sampled() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("app.log");
        let content = format!("[analysis]\ninput_file = {:?}\n", input.display().to_string());
        let (config, _) =
            crate::platform::config::parse_config(&content, Path::new("config.toml")).unwrap();
        let mut opts = RunOptions::from_config(&config);
        opts.output = dir.path().join("rapport.txt");

        let mut out = Vec::new();
        let err = run(&opts, &Console::plain(), &mut out).unwrap_err();
        assert!(matches!(
            err,
            LogTallyError::FileAccess(FileAccessError::NotFound { .. })
        ));
        assert!(!input.exists());
        assert!(!opts.output.exists());
    }

    #[test]
    fn test_run_report_failure_still_prints_summary() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path());
        opts.output = dir.path().join("no-such-dir").join("rapport.txt");
        std::fs::write(&opts.input, "INFO ok\n").unwrap();

        let mut out = Vec::new();
        let err = run(&opts, &Console::plain(), &mut out).unwrap_err();
        assert!(matches!(err, LogTallyError::FileAccess(_)));

        let console = String::from_utf8(out).unwrap();
        assert!(console.contains("[x] File access error"));
        assert!(console.contains("Status: BON"));
    }

    #[test]
    fn test_run_creates_sample_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path());
        opts.create_sample = true;

        let mut out = Vec::new();
        let outcome = run(&opts, &Console::plain(), &mut out).unwrap();
        assert!(outcome.sample_created);
        assert_eq!(outcome.analysis.counts.total_lines, sample::SAMPLE_LINES.len());
        assert!(String::from_utf8(out).unwrap().contains("with sample data"));
    }

    #[test]
    fn test_run_exports() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path());
        opts.json_export = Some(dir.path().join("r.json"));
        opts.csv_export = Some(dir.path().join("r.csv"));
        std::fs::write(&opts.input, "ERROR one\nWARNING two\nINFO three\n").unwrap();

        let mut out = Vec::new();
        run(&opts, &Console::plain(), &mut out).unwrap();

        let json = std::fs::read_to_string(dir.path().join("r.json")).unwrap();
        assert!(json.contains("\"health\": \"CRITIQUE\""));
        let csv = std::fs::read_to_string(dir.path().join("r.csv")).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("(2 messages)"));
    }
}
