//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let resolved_format = args.output_format.resolve(io::stdout().is_terminal());

        Self {
            resolved_format,
            quiet: args.quiet || resolved_format.is_json(),
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// `   create : <path>` for every generated entry.
    pub fn created(&self, path: &Path, is_dir: bool) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut shown = path.display().to_string();
        if is_dir {
            shown.push(std::path::MAIN_SEPARATOR);
        }
        let line = if self.no_color {
            format!("   create : {shown}")
        } else {
            format!("   {} {}", "create :".cyan(), shown.green())
        };
        self.term.write_line(&line)
    }

    /// An indented shell command in the next-steps block.
    pub fn command(&self, label: &str, command: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line("")?;
        self.term.write_line(&format!("  {label}:"))?;
        let line = if self.no_color {
            format!("    {command}")
        } else {
            format!("    {}", command.blue().bold())
        };
        self.term.write_line(&line)
    }

    /// `<label> <url>` with the URL underlined.
    pub fn link(&self, label: &str, url: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("{label} {url}")
        } else {
            format!("{label} {}", url.cyan().underline())
        };
        self.term.write_line(&line)
    }

    /// Machine-readable payload; printed only in JSON mode.
    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        if !self.resolved_format.is_json() {
            return Ok(());
        }
        self.term.write_line(&value.to_string())
    }

    /// Spinner for a blocking step. Hidden when quiet or not on a terminal.
    pub fn spinner(&self, msg: impl Into<String>) -> ProgressBar {
        let bar = ProgressBar::new_spinner();
        if self.quiet || !io::stderr().is_terminal() {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        } else {
            bar.enable_steady_tick(Duration::from_millis(100));
        }
        if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(msg.into());
        bar
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            quiet,
            no_color,
            output_format: format,
            ..GlobalArgs::default()
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
        assert!(out.quiet);
    }

    #[test]
    fn human_format_keeps_color_unless_disabled() {
        assert!(make_manager(false, false, OutputFormat::Human).supports_color());
        assert!(!make_manager(false, true, OutputFormat::Human).supports_color());
    }

    #[test]
    fn plain_format_never_colors() {
        assert!(!make_manager(false, false, OutputFormat::Plain).supports_color());
    }

    #[test]
    fn json_format_silences_human_lines() {
        let out = make_manager(false, false, OutputFormat::Json);
        assert!(out.quiet);
        assert_eq!(out.resolved_format, OutputFormat::Json);
    }

    #[test]
    fn config_no_color_is_honoured() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        let args = GlobalArgs {
            output_format: OutputFormat::Human,
            ..GlobalArgs::default()
        };
        assert!(!OutputManager::new(&args, &config).supports_color());
    }

    #[test]
    fn spinner_is_hidden_when_quiet() {
        let out = make_manager(true, true, OutputFormat::Plain);
        let bar = out.spinner("Installing");
        assert!(bar.is_hidden());
        bar.finish_and_clear();
    }
}
