//! Colored terminal output for CLI status lines.

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use std::io::{self, Write};

/// Writes status messages to the terminal, honoring verbose and quiet modes.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose && !self.quiet {
            self.line(None, false, "", message)?;
        }
        Ok(())
    }

    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.line(Some(Color::Cyan), false, "→ ", message)
    }

    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.line(Some(Color::Green), true, "✓ ", message)
    }

    /// Warnings go to stderr and are shown even in quiet mode.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        let mut stream = StandardStream::stderr(ColorChoice::Auto);
        stream.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
        write!(stream, "warning: ")?;
        stream.reset()?;
        writeln!(stream, "{}", message)
    }

    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.line(None, true, "", title)
    }

    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.line(None, false, "  ", message)
    }

    fn line(&self, color: Option<Color>, bold: bool, prefix: &str, message: &str) -> io::Result<()> {
        let mut stream = StandardStream::stdout(ColorChoice::Auto);
        stream.set_color(ColorSpec::new().set_fg(color).set_bold(bold))?;
        write!(stream, "{}{}", prefix, message)?;
        stream.reset()?;
        writeln!(stream)
    }
}
