use thiserror::Error;

use crate::runtime::PythonVersion;

/// Fatal outcomes of a provisioning run.
///
/// Every variant has already been explained to the user on the console by
/// the step that produced it; the binary only maps it to an exit code.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Python interpreter not found (tried: {tried})")]
    InterpreterNotFound { tried: String },

    #[error("Could not determine Python version: {0}")]
    VersionUnknown(String),

    #[error("Python {found} is too old (need {required}+)")]
    VersionTooOld {
        found: PythonVersion,
        required: PythonVersion,
    },

    #[error("All {attempts} install attempts for {package} failed")]
    InstallExhausted { package: String, attempts: usize },

    #[error("{package} is not importable after installation")]
    VerifyFailed { package: String },

    #[error("Server exited with status {code:?}")]
    ServerFailed { code: Option<i32> },

    #[error("Failed to start server: {0}")]
    ServerSpawn(#[source] std::io::Error),

    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ProvisionError {
    /// Process exit code for this failure category.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InterpreterNotFound { .. } | Self::VersionUnknown(_) | Self::VersionTooOld { .. } => 2,
            Self::InstallExhausted { .. } => 3,
            Self::VerifyFailed { .. } => 4,
            Self::ServerFailed { .. } | Self::ServerSpawn(_) => 5,
            Self::Io(_) => 1,
        }
    }
}
