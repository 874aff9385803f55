// LogTally - app/console.rs
//
// Console presentation: timestamped status lines and the end-of-run
// summary. Colour and emoji are optional decorations; with both disabled
// the output is plain ASCII apart from the analysed file's own text.

use crate::core::model::{Analysis, HealthRating, Severity};
use crate::core::report::ReportStats;
use crate::platform::config::Toggle;
use crate::util::constants;
use chrono::Local;
use colored::{ColoredString, Colorize};
use std::env;
use std::io::{IsTerminal, Write};
use std::path::Path;

/// Kind of a status line, selecting its marker and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Renders console text with colour and emoji resolved once at startup.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    use_color: bool,
    use_emoji: bool,
}

impl Console {
    /// Resolve `auto` settings against the environment and stdout.
    pub fn new(color: Toggle, emoji: Toggle) -> Self {
        let use_color = resolve_color(color);
        let use_emoji = match emoji {
            Toggle::Always => true,
            Toggle::Never => false,
            Toggle::Auto => use_color,
        };

        // `colored` runs its own TTY and env detection otherwise.
        colored::control::set_override(use_color);

        tracing::debug!(use_color, use_emoji, "Console formatting resolved");
        Self {
            use_color,
            use_emoji,
        }
    }

    /// No colour, no emoji.
    pub fn plain() -> Self {
        Self {
            use_color: false,
            use_emoji: false,
        }
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.use_color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn marker(&self, emoji: &str, fallback: &str) -> String {
        if self.use_emoji {
            emoji.to_string()
        } else {
            fallback.to_string()
        }
    }

    /// `[HH:MM:SS] <marker> message`, coloured by level.
    pub fn status_line(&self, level: StatusLevel, message: &str) -> String {
        let timestamp = Local::now().format(constants::STATUS_TIME_FORMAT);
        let marker = match level {
            StatusLevel::Success => self.marker("✅", "[OK]"),
            StatusLevel::Info => self.marker("ℹ️ ", "[i]"),
            StatusLevel::Warning => self.marker("⚠️ ", "[!]"),
            StatusLevel::Error => self.marker("❌", "[x]"),
        };
        let line = format!("[{timestamp}] {marker} {message}");
        match level {
            StatusLevel::Success => self.paint(&line, |s| s.green()),
            StatusLevel::Info => self.paint(&line, |s| s.cyan()),
            StatusLevel::Warning => self.paint(&line, |s| s.yellow()),
            StatusLevel::Error => self.paint(&line, |s| s.red()),
        }
    }

    /// Startup banner printed before the run.
    pub fn banner(&self) -> String {
        let title = format!(
            "{} {} v{}",
            self.marker("🔍", ">>"),
            constants::APP_NAME,
            constants::APP_VERSION
        );
        format!(
            "{}\n{}",
            self.paint(&title, |s| s.cyan().bold()),
            self.paint(&"-".repeat(constants::BANNER_RULE_WIDTH), |s| s.purple())
        )
    }

    /// End-of-run summary: counts per severity plus the health indicator.
    pub fn render_summary(&self, analysis: &Analysis, source: &Path) -> String {
        let counts = &analysis.counts;
        let stats = ReportStats::from_counts(counts);
        let rule = self.paint(&"=".repeat(constants::SUMMARY_RULE_WIDTH), |s| {
            s.purple().bold()
        });
        let title = format!(
            "{:^width$}",
            "ANALYSIS SUMMARY",
            width = constants::SUMMARY_RULE_WIDTH
        );

        let mut lines = vec![
            String::new(),
            rule.clone(),
            self.paint(title.trim_end(), |s| s.purple().bold()),
            rule.clone(),
            format!(
                "{} {}",
                self.paint("File analysed:", |s| s.cyan()),
                self.paint(&source.display().to_string(), |s| s.white())
            ),
            format!(
                "{} {}",
                self.paint("Total lines:", |s| s.cyan()),
                self.paint(&counts.total_lines.to_string(), |s| s.white())
            ),
        ];

        for severity in Severity::PRIORITY {
            let line = format!("{}: {}", severity.keyword(), counts.get(severity));
            lines.push(match severity {
                Severity::Error => self.paint(&line, |s| s.red()),
                Severity::Warning => self.paint(&line, |s| s.yellow()),
                Severity::Info => self.paint(&line, |s| s.green()),
                Severity::Debug => self.paint(&line, |s| s.blue()),
            });
        }

        lines.push(String::new());
        lines.push(self.paint(&format!("Error rate: {:.1}%", stats.error_rate), |s| s.bold()));
        lines.push(self.health_line(stats.health));
        lines.push(rule);

        lines.join("\n")
    }

    fn health_line(&self, health: HealthRating) -> String {
        let (emoji, fallback) = match health {
            HealthRating::Critical => ("🔴", "[!!]"),
            HealthRating::Attention => ("🟡", "[!]"),
            HealthRating::Good => ("🟢", "[ok]"),
        };
        let line = format!("{} Status: {}", self.marker(emoji, fallback), health.label());
        match health {
            HealthRating::Critical => self.paint(&line, |s| s.red()),
            HealthRating::Attention => self.paint(&line, |s| s.yellow()),
            HealthRating::Good => self.paint(&line, |s| s.green()),
        }
    }
}

/// Write one line of console output.
///
/// Console write failures (closed pipe, full disk on redirect) never change
/// the outcome of a run.
pub fn emit<W: Write>(out: &mut W, text: &str) {
    if let Err(e) = writeln!(out, "{text}") {
        tracing::debug!(error = %e, "Console write failed");
    }
}

/// Explicit settings win; `auto` honours NO_COLOR, CLICOLOR, CLICOLOR_FORCE
/// and TERM=dumb before falling back to TTY detection.
fn resolve_color(toggle: Toggle) -> bool {
    match toggle {
        Toggle::Always => true,
        Toggle::Never => false,
        Toggle::Auto => {
            if env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if env::var("CLICOLOR_FORCE").is_ok_and(|v| v == "1") {
                return true;
            }
            if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
                return false;
            }
            if env::var("TERM").is_ok_and(|t| t == "dumb") {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::aggregate;

    #[test]
    fn test_plain_summary_contents() {
        let analysis = aggregate(["INFO - a", "ERROR - b", "ERROR - c", "WARNING - d"]);
        let summary = Console::plain().render_summary(&analysis, Path::new("log.txt"));

        assert!(summary.contains("File analysed: log.txt"));
        assert!(summary.contains("Total lines: 4"));
        assert!(summary.contains("\nERROR: 2\n"));
        assert!(summary.contains("\nWARNING: 1\n"));
        assert!(summary.contains("\nINFO: 1\n"));
        assert!(summary.contains("\nDEBUG: 0\n"));
        assert!(summary.contains("Error rate: 50.0%"));
        assert!(summary.contains("[!!] Status: CRITIQUE"));
        assert!(!summary.contains('\u{1b}'), "plain output must not contain ANSI escapes");
    }

    #[test]
    fn test_summary_health_shown_for_empty_input() {
        let summary = Console::plain().render_summary(&Analysis::default(), Path::new("e.log"));
        assert!(summary.contains("Error rate: 0.0%"));
        assert!(summary.contains("[ok] Status: BON"));
    }

    #[test]
    fn test_status_line_fallback_markers() {
        let console = Console::plain();
        let line = console.status_line(StatusLevel::Error, "boom");
        assert!(line.starts_with('['));
        assert!(line.ends_with("] [x] boom"));
        assert!(console
            .status_line(StatusLevel::Success, "done")
            .ends_with("[OK] done"));
    }

    #[test]
    fn test_info_status_line_marker() {
        let line = Console::plain().status_line(StatusLevel::Info, "Using config x.toml");
        assert!(line.ends_with("] [i] Using config x.toml"));
    }

    #[test]
    fn test_emit_writes_line_and_ignores_failures() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut buf = Vec::new();
        emit(&mut buf, "hello");
        assert_eq!(buf, b"hello\n");
        emit(&mut Closed, "dropped");
    }

    // One test drives both settings: the `colored` override is process-wide.
    #[test]
    fn test_new_sets_colour_override_both_ways() {
        let console = Console::new(Toggle::Always, Toggle::Always);
        let line = console.status_line(StatusLevel::Success, "done");
        assert!(line.contains('✅'));
        assert!(line.contains('\u{1b}'));

        let console = Console::new(Toggle::Never, Toggle::Auto);
        let banner = console.banner();
        assert!(banner.starts_with(">> LogTally v"));
        assert!(!banner.contains('\u{1b}'));
        assert!(!"x".red().to_string().contains('\u{1b}'));
    }
}
