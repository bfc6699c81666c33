//! Environment variable keys.

/// Provisioning workflow
pub mod launch {
    /// Interpreter used for the version check, `-m pip`, verification and the server.
    /// No alias: a generic `PYTHON` is often set by unrelated build tools.
    pub const TEXLAUNCH_PYTHON: &str = "TEXLAUNCH_PYTHON";

    /// Path of the web front-end opened before the server starts.
    pub const TEXLAUNCH_PAGE: &str = "TEXLAUNCH_PAGE";

    pub const TEXLAUNCH_NO_BROWSER: &str = "TEXLAUNCH_NO_BROWSER";

    /// Skip the "Press Enter" gate (CI, scripted installs).
    pub const TEXLAUNCH_ASSUME_YES: &str = "TEXLAUNCH_ASSUME_YES";
}

/// Logging
pub mod observability {
    pub const TEXLAUNCH_QUIET: &str = "TEXLAUNCH_QUIET";
    pub const TEXLAUNCH_LOG_LEVEL: &str = "TEXLAUNCH_LOG_LEVEL";
    pub const TEXLAUNCH_LOG_JSON: &str = "TEXLAUNCH_LOG_JSON";
}
