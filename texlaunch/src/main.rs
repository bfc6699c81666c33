mod cli;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use cli::Cli;
use texlaunch_core::config::LaunchConfig;
use texlaunch_core::observability;
use texlaunch_provision::{
    ProvisionError, Provisioner, StdConsole, SystemBrowser, SystemRunner,
};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    observability::init_tracing();

    let config = LaunchConfig::from_env().with_cli_overrides(cli.overrides());
    tracing::debug!(?config, "Resolved launch config");

    let runner = SystemRunner::new();
    let browser = SystemBrowser;
    let console = StdConsole;

    let mut provisioner = Provisioner::new(config, &runner, &browser, &console);
    match provisioner.run() {
        Ok(outcome) => {
            tracing::debug!(?outcome, "Server stopped");
            Ok(ExitCode::SUCCESS)
        }
        Err(ProvisionError::Io(e)) => Err(anyhow::Error::new(e).context("Failed to talk to the terminal")),
        Err(e) => {
            // The failing step already printed its guidance.
            tracing::error!(error = %e, stage = ?provisioner.stage(), "Setup aborted");
            Ok(ExitCode::from(exit_status_byte(e.exit_code())))
        }
    }
}

fn exit_status_byte(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
