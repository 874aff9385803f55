// LogTally - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading (platform config.toml or --config)
// 3. Logging initialisation (debug mode support)
// 4. Running the analysis pipeline and mapping its result to an exit code

use clap::Parser;
use logtally::app::console::{emit, Console, StatusLevel};
use logtally::app::pipeline::{self, RunOptions};
use logtally::platform::config::{self, AppConfig, PlatformPaths, Toggle};
use logtally::platform::fs::Utf8Policy;
use logtally::util;
use std::path::PathBuf;
use std::process::ExitCode;

/// LogTally - count log lines by severity and rate the file's health.
///
/// Every line is classified by the first of ERROR, WARNING, INFO, DEBUG it
/// contains. A text report is written and a summary printed.
#[derive(Parser, Debug)]
#[command(name = "logtally", version, about)]
struct Cli {
    /// Log file to analyse [default: log.txt, created with sample data if missing].
    input: Option<PathBuf>,

    /// Report file to write (overwritten if present).
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Configuration file to use instead of the platform config.toml.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Never generate a sample log, even for the default input.
    #[arg(long = "no-sample")]
    no_sample: bool,

    /// Replace invalid UTF-8 instead of failing.
    #[arg(long = "lossy")]
    lossy: bool,

    /// Also export the analysis as JSON.
    #[arg(long = "json", value_name = "PATH")]
    json: Option<PathBuf>,

    /// Also export error and warning lines as CSV.
    #[arg(long = "csv", value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Colour output: auto, always or never.
    #[arg(long = "color", value_name = "WHEN", value_parser = parse_toggle)]
    color: Option<Toggle>,

    /// Use ASCII markers instead of emoji.
    #[arg(long = "no-emoji")]
    no_emoji: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn parse_toggle(s: &str) -> Result<Toggle, String> {
    Toggle::parse(s).ok_or_else(|| format!("expected auto, always or never, got '{s}'"))
}

/// Apply command-line overrides on top of the config-derived options.
fn merge_options(cli: &Cli, config: &AppConfig) -> RunOptions {
    let mut opts = RunOptions::from_config(config);

    if let Some(input) = &cli.input {
        opts.input = input.clone();
        // An explicitly named input must exist.
        opts.create_sample = false;
    }
    if cli.no_sample {
        opts.create_sample = false;
    }
    if let Some(output) = &cli.output {
        opts.output = output.clone();
    }
    if cli.lossy {
        opts.utf8 = Utf8Policy::Lossy;
    }
    if cli.json.is_some() {
        opts.json_export = cli.json.clone();
    }
    if cli.csv.is_some() {
        opts.csv_export = cli.csv.clone();
    }
    opts
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config is loaded before logging so [logging] can take effect; its
    // warnings are replayed once the subscriber exists.
    let (app_config, config_warnings) = match &cli.config {
        Some(path) => match config::load_config_file(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                let console = Console::new(cli.color.unwrap_or_default(), Toggle::Auto);
                emit(
                    &mut std::io::stderr(),
                    &console.status_line(StatusLevel::Error, &e.to_string()),
                );
                return ExitCode::FAILURE;
            }
        },
        None => config::load_config(&PlatformPaths::resolve()),
    };

    util::logging::init(
        cli.debug,
        app_config.log_level.as_deref(),
        app_config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "LogTally starting"
    );

    let console = Console::new(
        cli.color.unwrap_or(app_config.color),
        if cli.no_emoji {
            Toggle::Never
        } else {
            app_config.emoji
        },
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    emit(&mut out, &console.banner());

    if let Some(path) = &cli.config {
        emit(
            &mut out,
            &console.status_line(
                StatusLevel::Info,
                &format!("Using configuration file {}", path.display()),
            ),
        );
    }

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
        emit(&mut out, &console.status_line(StatusLevel::Warning, warning));
    }

    let opts = merge_options(&cli, &app_config);
    tracing::debug!(?opts, "Run options resolved");

    match pipeline::run(&opts, &console, &mut out) {
        Ok(_) => {
            emit(
                &mut out,
                &console.status_line(StatusLevel::Success, "Analysis finished successfully"),
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, path = %e.path().display(), "Run failed");
            emit(
                &mut out,
                &console.status_line(StatusLevel::Error, &format!("Analysis failed: {e}")),
            );
            ExitCode::FAILURE
        }
    }
}
