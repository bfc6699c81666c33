//! Package installation via an ordered list of pip invocations.
//!
//! Attempts run in order; the first one that exits 0 wins and the rest are
//! never started.

use std::path::Path;

use crate::console::Console;
use crate::error::ProvisionError;
use crate::runner::{CommandOutput, CommandRunner, CommandSpec};
use crate::PACKAGE;

/// Requirement with the optional GUI extras.
pub const REQUIREMENT_GUI: &str = "pix2tex[gui]";

/// Command shown to the user when every attempt failed.
pub const MANUAL_INSTALL_HINT: &str = "pip install \"pix2tex[gui]\"";

/// The fixed fallback list: bare `pip` first, then `<python> -m pip`,
/// each with and without extras.
pub fn install_commands(python: &Path) -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("pip").args(["install", REQUIREMENT_GUI]),
        CommandSpec::new("pip").args(["install", PACKAGE]),
        CommandSpec::new(python).args(["-m", "pip", "install", REQUIREMENT_GUI]),
        CommandSpec::new(python).args(["-m", "pip", "install", PACKAGE]),
    ]
}

/// Try each command until one succeeds. Returns the index of the winner.
pub fn install_package(
    runner: &dyn CommandRunner,
    console: &dyn Console,
    commands: &[CommandSpec],
) -> Result<usize, ProvisionError> {
    console.line(&format!("🚀 Installing {} (LaTeX-OCR)...", PACKAGE));

    for (index, cmd) in commands.iter().enumerate() {
        let description = format!("Installing {} with: {}", PACKAGE, cmd);
        if run_attempt(runner, console, cmd, &description) {
            tracing::info!(attempt = index + 1, command = %cmd, "Install succeeded");
            return Ok(index);
        }
    }

    console.line(&format!("❌ Failed to install {}. Please install manually:", PACKAGE));
    console.line(MANUAL_INSTALL_HINT);
    Err(ProvisionError::InstallExhausted {
        package: PACKAGE.to_string(),
        attempts: commands.len(),
    })
}

fn run_attempt(
    runner: &dyn CommandRunner,
    console: &dyn Console,
    cmd: &CommandSpec,
    description: &str,
) -> bool {
    console.line(&format!("\n🔄 {}...", description));
    let output = match runner.run(cmd) {
        Ok(out) => out,
        // A missing `pip` binary is just a failed attempt.
        Err(e) => {
            tracing::debug!(command = %cmd, error = %e, "Install attempt could not start");
            CommandOutput {
                success: false,
                code: None,
                stdout: String::new(),
                stderr: e.to_string(),
            }
        }
    };

    if output.success {
        console.line(&format!("✅ {} completed successfully!", description));
        if !output.stdout.is_empty() {
            console.line(&format!("Output: {}", output.stdout));
        }
        true
    } else {
        tracing::warn!(command = %cmd, code = ?output.code, "Install attempt failed");
        console.line(&format!("❌ {} failed!", description));
        console.line(&format!("Error: {}", output.stderr));
        false
    }
}
