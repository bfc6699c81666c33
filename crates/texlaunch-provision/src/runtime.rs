//! Python runtime resolution and the minimum-version check.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::console::Console;
use crate::error::ProvisionError;
use crate::runner::{CommandRunner, CommandSpec};

/// Oldest interpreter pix2tex supports.
pub const MIN_PYTHON: PythonVersion = PythonVersion::new(3, 7, 0);

/// Interpreter names searched on PATH when none is configured.
pub const INTERPRETER_CANDIDATES: &[&str] = &["python3", "python"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl PythonVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Parse `python --version` output, e.g. `Python 3.9.13` or `Python 3.13.0rc2`.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.trim().strip_prefix("Python")?.trim_start();
        let token = rest.split_whitespace().next()?;
        let mut parts = token.split('.');
        let major = leading_number(parts.next()?)?;
        let minor = leading_number(parts.next()?)?;
        let patch = parts.next().and_then(leading_number).unwrap_or(0);
        Some(Self::new(major, minor, patch))
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

fn leading_number(s: &str) -> Option<u32> {
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// PATH lookup used by [`resolve_interpreter_with`].
pub type InterpreterLookup = fn(&str) -> Option<PathBuf>;

/// Look `name` up on PATH.
pub fn which_on_path(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Pick the interpreter: the configured one as given, else the first
/// candidate found on PATH.
pub fn resolve_interpreter(configured: Option<&Path>) -> Result<PathBuf, ProvisionError> {
    resolve_interpreter_with(configured, which_on_path)
}

pub fn resolve_interpreter_with(
    configured: Option<&Path>,
    lookup: InterpreterLookup,
) -> Result<PathBuf, ProvisionError> {
    if let Some(path) = configured {
        return Ok(path.to_path_buf());
    }
    for &name in INTERPRETER_CANDIDATES {
        if let Some(found) = lookup(name) {
            tracing::debug!(interpreter = %found.display(), "Resolved Python from PATH");
            return Ok(found);
        }
    }
    Err(ProvisionError::InterpreterNotFound {
        tried: INTERPRETER_CANDIDATES.join(", "),
    })
}

/// Run `<python> --version` and require at least `minimum`.
pub fn check_runtime_version(
    runner: &dyn CommandRunner,
    console: &dyn Console,
    python: &Path,
    minimum: PythonVersion,
) -> Result<PythonVersion, ProvisionError> {
    let spec = CommandSpec::new(python).arg("--version");
    let output = match runner.run(&spec) {
        Ok(out) => out,
        Err(e) => {
            console.line(&format!("❌ Could not run {}: {}", python.display(), e));
            return Err(ProvisionError::VersionUnknown(e.to_string()));
        }
    };

    // Python 2 prints its version on stderr.
    let version = PythonVersion::parse(&output.stdout).or_else(|| PythonVersion::parse(&output.stderr));
    let Some(version) = version else {
        console.line(&format!(
            "❌ Could not determine the version of {}.",
            python.display()
        ));
        let shown = if output.stdout.trim().is_empty() {
            output.stderr.trim()
        } else {
            output.stdout.trim()
        };
        return Err(ProvisionError::VersionUnknown(shown.to_string()));
    };

    if version < minimum {
        console.line(&format!(
            "❌ Python {}.{}+ is required. Please upgrade Python.",
            minimum.major, minimum.minor
        ));
        return Err(ProvisionError::VersionTooOld {
            found: version,
            required: minimum,
        });
    }

    console.line(&format!("✅ Python {} is compatible.", version));
    Ok(version)
}
