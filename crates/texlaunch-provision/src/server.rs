//! Blocking run of the pix2tex API server.

use std::path::Path;

use crate::console::{rule, Console};
use crate::error::ProvisionError;
use crate::runner::{CommandRunner, CommandSpec, ForegroundExit};

/// Module executed with `python -m`.
pub const SERVER_MODULE: &str = "pix2tex.api.run";

/// Address the server binds. Only shown to the user, never connected to.
pub const SERVER_URL: &str = "http://localhost:8502";

/// How a server run that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerOutcome {
    /// Ctrl+C while the server was running.
    StoppedByUser,
    /// The server exited on its own with status 0.
    Exited,
}

pub fn server_command(python: &Path) -> CommandSpec {
    CommandSpec::new(python).args(["-m", SERVER_MODULE])
}

/// Command suggested when the server fails.
pub fn manual_server_hint() -> String {
    format!("python -m {}", SERVER_MODULE)
}

pub fn print_banner(console: &dyn Console) {
    console.line("\n🚀 Starting pix2tex API server...");
    console.line(&format!("📝 The server will start at {}", SERVER_URL));
    console.line("🌐 Your web interface will automatically open");
    console.line("⚠️  Keep this terminal window open while using the OCR!");
    console.line(&format!("\n{}", rule(50)));
}

/// Run the server until it exits or the user interrupts it. Never restarts.
pub fn run_server(
    runner: &dyn CommandRunner,
    console: &dyn Console,
    python: &Path,
) -> Result<ServerOutcome, ProvisionError> {
    let spec = server_command(python);
    match runner.run_foreground(&spec) {
        Ok(ForegroundExit { interrupted: true, .. }) => {
            console.line("\n\n🛑 Server stopped by user.");
            Ok(ServerOutcome::StoppedByUser)
        }
        Ok(exit) if exit.success() => Ok(ServerOutcome::Exited),
        Ok(exit) => {
            let status = exit
                .code
                .map(|c| format!("exit status {}", c))
                .unwrap_or_else(|| "terminated by signal".to_string());
            report_failure(console, &status);
            Err(ProvisionError::ServerFailed { code: exit.code })
        }
        Err(e) => {
            report_failure(console, &e.to_string());
            Err(ProvisionError::ServerSpawn(e))
        }
    }
}

fn report_failure(console: &dyn Console, detail: &str) {
    console.line(&format!("❌ Failed to start server: {}", detail));
    console.line("\nTry running manually:");
    console.line(&manual_server_hint());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingConsole, ScriptedRunner};

    fn python() -> &'static Path {
        Path::new("python3")
    }

    #[test]
    fn test_interrupt_is_graceful() {
        let runner = ScriptedRunner::new().foreground(ForegroundExit {
            code: None,
            interrupted: true,
        });
        let console = RecordingConsole::default();

        let outcome = run_server(&runner, &console, python()).unwrap();

        assert_eq!(outcome, ServerOutcome::StoppedByUser);
        assert!(console.contains("Server stopped by user."));
        assert!(!console.contains("Failed to start server"));
        assert_eq!(runner.foreground_calls(), vec!["python3 -m pix2tex.api.run"]);
    }

    #[test]
    fn test_interrupt_with_nonzero_code_still_graceful() {
        let runner = ScriptedRunner::new().foreground(ForegroundExit {
            code: Some(130),
            interrupted: true,
        });
        let console = RecordingConsole::default();
        assert_eq!(
            run_server(&runner, &console, python()).unwrap(),
            ServerOutcome::StoppedByUser
        );
    }

    #[test]
    fn test_clean_exit() {
        let runner = ScriptedRunner::new().foreground(ForegroundExit {
            code: Some(0),
            interrupted: false,
        });
        let console = RecordingConsole::default();
        assert_eq!(run_server(&runner, &console, python()).unwrap(), ServerOutcome::Exited);
    }

    #[test]
    fn test_failure_suggests_manual_command() {
        let runner = ScriptedRunner::new().foreground(ForegroundExit {
            code: Some(1),
            interrupted: false,
        });
        let console = RecordingConsole::default();

        let err = run_server(&runner, &console, python()).unwrap_err();

        assert!(matches!(err, ProvisionError::ServerFailed { code: Some(1) }));
        assert!(console.contains("Failed to start server: exit status 1"));
        assert!(console.contains("python -m pix2tex.api.run"));
        assert_eq!(runner.foreground_calls().len(), 1);
    }

    #[test]
    fn test_spawn_failure() {
        let runner = ScriptedRunner::new();
        let console = RecordingConsole::default();
        let err = run_server(&runner, &console, python()).unwrap_err();
        assert!(matches!(err, ProvisionError::ServerSpawn(_)));
        assert!(console.contains("Try running manually:"));
    }

    #[test]
    fn test_banner_mentions_url() {
        let console = RecordingConsole::default();
        print_banner(&console);
        assert!(console.contains("http://localhost:8502"));
    }
}
