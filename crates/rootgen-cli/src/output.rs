//! Output management and formatting.
//!
//! Everything a command prints on stdout goes through [`OutputManager`].
//! Status lines honour `--quiet` and colour settings; data (generated source,
//! JSON documents) is always written.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
    err_term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_config(&config.output.format),
            explicit => explicit,
        };
        Self::with_format(
            resolve_auto(requested, io::stdout().is_terminal()),
            args.quiet,
            args.no_color || config.output.no_color,
        )
    }

    fn with_format(format: OutputFormat, quiet: bool, no_color: bool) -> Self {
        Self {
            resolved_format: format,
            quiet,
            no_color: no_color || format != OutputFormat::Human,
            term: Term::stdout(),
            err_term: Term::stderr(),
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

    /// Command payload (generated source, listings); never suppressed.
    pub fn data(&self, content: &str) -> io::Result<()> {
        self.term.write_str(content)?;
        if !content.ends_with('\n') {
            self.term.write_line("")?;
        }
        Ok(())
    }

    /// Pretty-printed JSON document; never suppressed.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
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

    /// Warning indicator: `⚠ <msg>`, on stderr so stdout payloads stay clean.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.err_term.write_line(&line)
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

    /// Dimmed detail line, indented under a header.
    pub fn detail(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("  {text}")
        } else {
            format!("  {}", text.dimmed())
        };
        self.term.write_line(&line)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

/// Resolve `Auto` to `Human` on a terminal and `Plain` otherwise.
fn resolve_auto(format: OutputFormat, is_terminal: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto if is_terminal => OutputFormat::Human,
        OutputFormat::Auto => OutputFormat::Plain,
        other => other,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(format: OutputFormat, quiet: bool, no_color: bool) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: format,
        }
    }

    #[test]
    fn auto_resolution() {
        assert_eq!(resolve_auto(OutputFormat::Auto, true), OutputFormat::Human);
        assert_eq!(resolve_auto(OutputFormat::Auto, false), OutputFormat::Plain);
        assert_eq!(resolve_auto(OutputFormat::Json, true), OutputFormat::Json);
    }

    #[test]
    fn flag_wins_over_config() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let out = OutputManager::new(&args(OutputFormat::Plain, false, false), &config);
        assert_eq!(out.resolved_format, OutputFormat::Plain);
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let out = OutputManager::new(&args(OutputFormat::Auto, false, false), &config);
        assert!(out.is_json());
    }

    #[test]
    fn colour_only_for_human_output() {
        assert!(!OutputManager::with_format(OutputFormat::Human, false, false).no_color);
        assert!(OutputManager::with_format(OutputFormat::Human, false, true).no_color);
        assert!(OutputManager::with_format(OutputFormat::Plain, false, false).no_color);
    }

    #[test]
    fn config_no_color_is_honoured() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        let out = OutputManager::new(&args(OutputFormat::Human, false, false), &config);
        assert!(out.no_color);
    }

    #[test]
    fn quiet_suppresses_status_lines() {
        let out = OutputManager::with_format(OutputFormat::Plain, true, true);
        assert!(out.print("hello").is_ok());
        assert!(out.success("done").is_ok());
    }
}
