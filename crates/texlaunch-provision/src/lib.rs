//! Provisioning workflow for the pix2tex LaTeX-OCR server.
//!
//! Steps, in order: interpreter version check, pip install through a list of
//! fallback commands, import check, browser launch, blocking server run.
//! All process access goes through [`runner::CommandRunner`].

pub mod browser;
pub mod console;
pub mod error;
pub mod install;
pub mod runner;
pub mod runtime;
pub mod server;
pub mod verify;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub use browser::{BrowserOpener, SystemBrowser};
pub use console::{Console, StdConsole};
pub use error::ProvisionError;
pub use runner::{CommandRunner, SystemRunner};
pub use server::ServerOutcome;
pub use workflow::{Provisioner, Stage};

/// Python distribution and import name.
pub const PACKAGE: &str = "pix2tex";
