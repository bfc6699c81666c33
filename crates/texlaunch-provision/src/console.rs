//! User-facing status output and the "Press Enter" gate.

use std::io::{self, BufRead, Write};

pub trait Console {
    /// Print one status line.
    fn line(&self, text: &str);

    /// Show `prompt` and block until the user presses Enter (or stdin closes).
    fn wait_for_enter(&self, prompt: &str) -> io::Result<()>;
}

/// Console on the process's stdout/stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl Console for StdConsole {
    fn line(&self, text: &str) {
        let mut out = io::stdout().lock();
        if let Err(e) = writeln!(out, "{}", text) {
            tracing::debug!(error = %e, "Failed to write status line");
        }
    }

    fn wait_for_enter(&self, prompt: &str) -> io::Result<()> {
        {
            let mut out = io::stdout().lock();
            write!(out, "{}", prompt)?;
            out.flush()?;
        }
        let mut buf = String::new();
        io::stdin().lock().read_line(&mut buf)?;
        Ok(())
    }
}

/// Horizontal rule used between sections.
pub(crate) fn rule(width: usize) -> String {
    "=".repeat(width)
}
