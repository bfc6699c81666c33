//! Post-install import check.

use std::path::Path;

use crate::console::Console;
use crate::error::ProvisionError;
use crate::runner::{CommandRunner, CommandSpec};
use crate::PACKAGE;

pub fn import_command(python: &Path) -> CommandSpec {
    CommandSpec::new(python).args(["-c".to_string(), format!("import {}", PACKAGE)])
}

/// Import the package with the target interpreter. No reinstall on failure.
pub fn verify_install(
    runner: &dyn CommandRunner,
    console: &dyn Console,
    python: &Path,
) -> Result<(), ProvisionError> {
    let spec = import_command(python);
    let importable = match runner.run(&spec) {
        Ok(out) => {
            if !out.success {
                tracing::debug!(stderr = %out.stderr.trim(), "Import check failed");
            }
            out.success
        }
        Err(e) => {
            tracing::debug!(error = %e, "Import check could not start");
            false
        }
    };

    if importable {
        console.line(&format!("✅ {} is installed correctly!", PACKAGE));
        Ok(())
    } else {
        console.line(&format!("❌ {} installation test failed.", PACKAGE));
        Err(ProvisionError::VerifyFailed {
            package: PACKAGE.to_string(),
        })
    }
}
