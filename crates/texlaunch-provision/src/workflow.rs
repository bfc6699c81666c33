//! The provisioning state machine.
//!
//! `Idle → VersionChecked → Installed → Verified → ServerRunning → {Stopped | Failed}`
//!
//! Strictly linear: a failing step jumps to `Failed` and the run ends. The
//! only retry anywhere is the bounded command list inside the install step.

use std::path::PathBuf;

use texlaunch_core::config::LaunchConfig;

use crate::browser::{self, BrowserOpener};
use crate::console::{rule, Console};
use crate::error::ProvisionError;
use crate::install;
use crate::runner::CommandRunner;
use crate::runtime::{self, InterpreterLookup, MIN_PYTHON};
use crate::server::{self, ServerOutcome};
use crate::verify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    VersionChecked,
    Installed,
    Verified,
    ServerRunning,
    Stopped,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Stopped | Stage::Failed)
    }
}

pub const ENTER_PROMPT: &str = "\nPress Enter to continue...";

pub struct Provisioner<'a> {
    config: LaunchConfig,
    runner: &'a dyn CommandRunner,
    browser: &'a dyn BrowserOpener,
    console: &'a dyn Console,
    lookup: InterpreterLookup,
    stage: Stage,
    history: Vec<Stage>,
}

impl<'a> Provisioner<'a> {
    pub fn new(
        config: LaunchConfig,
        runner: &'a dyn CommandRunner,
        browser: &'a dyn BrowserOpener,
        console: &'a dyn Console,
    ) -> Self {
        Self {
            config,
            runner,
            browser,
            console,
            lookup: runtime::which_on_path,
            stage: Stage::Idle,
            history: vec![Stage::Idle],
        }
    }

    /// Replace the PATH search used when no interpreter is configured.
    pub fn with_interpreter_lookup(mut self, lookup: InterpreterLookup) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Every stage entered so far, starting with `Idle`.
    pub fn history(&self) -> &[Stage] {
        &self.history
    }

    /// Run the whole workflow. One run per provisioner.
    pub fn run(&mut self) -> Result<ServerOutcome, ProvisionError> {
        let result = self.run_steps();
        match &result {
            Ok(outcome) => {
                tracing::info!(?outcome, "Provisioning finished");
                self.advance(Stage::Stopped);
            }
            Err(e) => {
                tracing::warn!(error = %e, stage = ?self.stage, "Provisioning failed");
                self.advance(Stage::Failed);
            }
        }
        result
    }

    fn advance(&mut self, next: Stage) {
        tracing::debug!(from = ?self.stage, to = ?next, "Stage transition");
        self.stage = next;
        self.history.push(next);
    }

    fn run_steps(&mut self) -> Result<ServerOutcome, ProvisionError> {
        let console = self.console;
        console.line("🔬 LaTeX OCR Setup with pix2tex");
        console.line(&rule(40));

        let python = self.resolve_python()?;
        runtime::check_runtime_version(self.runner, console, &python, MIN_PYTHON)?;
        self.advance(Stage::VersionChecked);

        let commands = install::install_commands(&python);
        install::install_package(self.runner, console, &commands)?;
        self.advance(Stage::Installed);

        verify::verify_install(self.runner, console, &python)?;
        self.advance(Stage::Verified);

        self.print_summary();
        if !self.config.assume_yes {
            console.wait_for_enter(ENTER_PROMPT)?;
        }

        server::print_banner(console);
        if self.config.open_browser {
            let page = self.page_path();
            browser::launch_ui(self.browser, page.as_deref());
        }

        self.advance(Stage::ServerRunning);
        server::run_server(self.runner, console, &python)
    }

    fn resolve_python(&self) -> Result<PathBuf, ProvisionError> {
        runtime::resolve_interpreter_with(self.config.python.as_deref(), self.lookup).map_err(|e| {
            self.console.line(&format!(
                "❌ Python {}.{}+ is required, but no interpreter was found ({}).",
                MIN_PYTHON.major,
                MIN_PYTHON.minor,
                runtime::INTERPRETER_CANDIDATES.join(", ")
            ));
            e
        })
    }

    fn page_path(&self) -> Option<PathBuf> {
        self.config.page.clone().or_else(browser::default_page_path)
    }

    fn print_summary(&self) {
        let console = self.console;
        console.line(&format!("\n{}", rule(40)));
        console.line("✅ Setup completed successfully!");
        console.line("\n📋 Next steps:");
        console.line("1. The pix2tex server will start automatically");
        console.line("2. Use your web interface at the opened browser window");
        console.line("3. Click 'Try pix2tex (Better OCR)' button for better results");
        console.line("4. Keep this terminal open while using the OCR");
        console.line("\n🚀 Starting server now...");
    }
}
