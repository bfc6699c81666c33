//! Config structs grouped by concern, loaded from the environment.

use super::env_keys::{launch, observability as obv_keys};
use super::loader::{env_bool, env_optional, env_or};
use std::path::PathBuf;

/// Settings for one provisioning run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Explicit interpreter. `None` means search PATH.
    pub python: Option<PathBuf>,
    /// Explicit web page. `None` means `index.html` next to the executable.
    pub page: Option<PathBuf>,
    pub open_browser: bool,
    pub assume_yes: bool,
}

/// Values given on the command line; `Some`/`true` wins over the environment.
#[derive(Debug, Clone, Default)]
pub struct LaunchOverrides {
    pub python: Option<PathBuf>,
    pub page: Option<PathBuf>,
    pub no_browser: bool,
    pub assume_yes: bool,
}

impl LaunchConfig {
    /// Load from environment (loads `.env` first).
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self {
            python: env_optional(launch::TEXLAUNCH_PYTHON, &[])
                .map(PathBuf::from),
            page: env_optional(launch::TEXLAUNCH_PAGE, &[]).map(PathBuf::from),
            open_browser: !env_bool(launch::TEXLAUNCH_NO_BROWSER, &[], false),
            assume_yes: env_bool(launch::TEXLAUNCH_ASSUME_YES, &[], false),
        }
    }

    pub fn with_cli_overrides(mut self, overrides: LaunchOverrides) -> Self {
        if let Some(python) = overrides.python {
            self.python = Some(python);
        }
        if let Some(page) = overrides.page {
            self.page = Some(page);
        }
        if overrides.no_browser {
            self.open_browser = false;
        }
        if overrides.assume_yes {
            self.assume_yes = true;
        }
        self
    }
}

/// Logging settings.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| {
            super::loader::load_dotenv();
            Self {
                quiet: env_bool(obv_keys::TEXLAUNCH_QUIET, &[], false),
                log_level: env_or(obv_keys::TEXLAUNCH_LOG_LEVEL, &[], || {
                    "warn".to_string()
                }),
                log_json: env_bool(obv_keys::TEXLAUNCH_LOG_JSON, &[], false),
            }
        })
    }
}
