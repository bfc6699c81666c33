//! CommandRunner trait: the seam between the workflow and the OS.
//!
//! Every sub-process the provisioner starts goes through a runner, so the
//! workflow can be driven by a scripted runner in tests.

use std::ffi::OsString;
use std::io;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

/// How often a foreground child is polled for exit or interrupt.
pub const POLL_INTERVAL_MS: u64 = 50;

/// Time a child gets to exit on its own after Ctrl+C before it is killed.
pub const INTERRUPT_GRACE_MS: u64 = 250;

/// One sub-process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl CommandSpec {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Shell-like rendering for status messages: `pip install "pix2tex[gui]"`.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|part| quote_for_display(&part.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

fn quote_for_display(part: &str) -> String {
    let needs_quotes = part.is_empty()
        || part
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '[' | ']' | '*' | '?' | '"' | '\'' | '$'));
    if needs_quotes {
        format!("\"{}\"", part.replace('"', "\\\""))
    } else {
        part.to_string()
    }
}

/// Captured result of a finished sub-process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Result of a foreground (inherited stdio) sub-process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForegroundExit {
    pub code: Option<i32>,
    /// The user pressed Ctrl+C while the child was running.
    pub interrupted: bool,
}

impl ForegroundExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs sub-processes on behalf of the workflow.
pub trait CommandRunner {
    /// Run to completion with stdout/stderr captured.
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput>;

    /// Run to completion with the terminal attached. A Ctrl+C while the
    /// child runs must not kill the caller; it is reported in the result.
    fn run_foreground(&self, spec: &CommandSpec) -> io::Result<ForegroundExit>;
}

/// Runner backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
        tracing::debug!(command = %spec, "Running captured command");
        let out = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .output()?;
        let output = CommandOutput {
            success: out.status.success(),
            code: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        };
        tracing::debug!(command = %spec, code = ?output.code, "Captured command finished");
        Ok(output)
    }

    fn run_foreground(&self, spec: &CommandSpec) -> io::Result<ForegroundExit> {
        let flag = interrupt_flag()?;
        flag.store(false, Ordering::SeqCst);

        tracing::info!(command = %spec, "Starting foreground command");
        let mut child = Command::new(&spec.program).args(&spec.args).spawn()?;
        let poll = Duration::from_millis(POLL_INTERVAL_MS);
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if flag.load(Ordering::SeqCst) {
                break stop_after_grace(&mut child)?;
            }
            thread::sleep(poll);
        };
        let exit = ForegroundExit {
            code: status.code(),
            interrupted: flag.load(Ordering::SeqCst),
        };
        tracing::info!(code = ?exit.code, interrupted = exit.interrupted, "Foreground command exited");
        Ok(exit)
    }
}

/// The child may already be shutting down from the same SIGINT (terminal
/// process group); give it the grace period, then kill it.
fn stop_after_grace(child: &mut Child) -> io::Result<ExitStatus> {
    let deadline = Instant::now() + Duration::from_millis(INTERRUPT_GRACE_MS);
    let poll = Duration::from_millis(POLL_INTERVAL_MS);
    while Instant::now() < deadline {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        thread::sleep(poll);
    }
    tracing::info!(pid = child.id(), "Child still running after Ctrl+C, killing it");
    // Fails only if the child exited in between; wait() below reaps it either way.
    let _ = child.kill();
    child.wait()
}

/// Process-wide Ctrl+C flag. The handler is installed on first use;
/// `ctrlc` only allows one handler per process.
fn interrupt_flag() -> io::Result<Arc<AtomicBool>> {
    static FLAG: OnceLock<Result<Arc<AtomicBool>, String>> = OnceLock::new();
    let installed = FLAG.get_or_init(|| {
        let flag = Arc::new(AtomicBool::new(false));
        let handler_flag = flag.clone();
        ctrlc::set_handler(move || {
            handler_flag.store(true, Ordering::SeqCst);
        })
        .map(|()| flag)
        .map_err(|e| e.to_string())
    });
    installed
        .clone()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Failed to set Ctrl+C handler: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_quotes_extras() {
        let spec = CommandSpec::new("pip").args(["install", "pix2tex[gui]"]);
        assert_eq!(spec.display(), "pip install \"pix2tex[gui]\"");
    }

    #[test]
    fn test_display_plain_args() {
        let spec = CommandSpec::new("python3").args(["-m", "pix2tex.api.run"]);
        assert_eq!(spec.to_string(), "python3 -m pix2tex.api.run");
    }

    #[test]
    fn test_display_path_with_space() {
        let spec = CommandSpec::new("/opt/my python/bin/python").arg("-c").arg("import pix2tex");
        assert_eq!(
            spec.display(),
            "\"/opt/my python/bin/python\" -c \"import pix2tex\""
        );
    }

    #[test]
    fn test_foreground_exit_success() {
        assert!(ForegroundExit { code: Some(0), interrupted: false }.success());
        assert!(!ForegroundExit { code: Some(1), interrupted: false }.success());
        assert!(!ForegroundExit { code: None, interrupted: true }.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_exit_code() {
        let runner = SystemRunner::new();
        let ok = runner.run(&CommandSpec::new("sh").args(["-c", "echo hi"])).unwrap();
        assert!(ok.success);
        assert_eq!(ok.stdout.trim(), "hi");

        let failed = runner
            .run(&CommandSpec::new("sh").args(["-c", "echo oops >&2; exit 3"]))
            .unwrap();
        assert!(!failed.success);
        assert_eq!(failed.code, Some(3));
        assert_eq!(failed.stderr.trim(), "oops");
    }

    // The Ctrl+C flag is process-wide; foreground tests must not overlap.
    #[cfg(unix)]
    static FOREGROUND_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[cfg(unix)]
    fn send_sigint_to_self_after(delay: Duration) -> thread::JoinHandle<()> {
        let pid = std::process::id().to_string();
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = Command::new("kill").args(["-INT", &pid]).status();
        })
    }

    #[cfg(unix)]
    #[test]
    fn test_foreground_interrupt_kills_child_that_keeps_running() {
        let _guard = FOREGROUND_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let runner = SystemRunner::new();
        // SIGINT goes to this process only, so the child never sees it.
        let signaller = send_sigint_to_self_after(Duration::from_millis(500));

        let start = Instant::now();
        let exit = runner
            .run_foreground(&CommandSpec::new("sleep").arg("5"))
            .unwrap();
        let elapsed = start.elapsed();
        signaller.join().unwrap();

        assert!(exit.interrupted);
        assert!(!exit.success());
        assert!(elapsed < Duration::from_secs(3), "returned after {:?}", elapsed);
    }

    #[cfg(unix)]
    #[test]
    fn test_foreground_flag_reset_between_runs() {
        let _guard = FOREGROUND_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let runner = SystemRunner::new();

        let signaller = send_sigint_to_self_after(Duration::from_millis(300));
        let first = runner
            .run_foreground(&CommandSpec::new("sleep").arg("5"))
            .unwrap();
        signaller.join().unwrap();
        assert!(first.interrupted);

        let second = runner
            .run_foreground(&CommandSpec::new("sh").args(["-c", "exit 0"]))
            .unwrap();
        assert!(!second.interrupted);
        assert!(second.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_foreground_reports_exit_code() {
        let _guard = FOREGROUND_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let exit = SystemRunner::new()
            .run_foreground(&CommandSpec::new("sh").args(["-c", "exit 7"]))
            .unwrap();
        assert_eq!(exit, ForegroundExit { code: Some(7), interrupted: false });
    }

    #[test]
    fn test_system_runner_missing_program_is_io_error() {
        let runner = SystemRunner::new();
        let err = runner
            .run(&CommandSpec::new("texlaunch-definitely-not-a-real-binary"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
