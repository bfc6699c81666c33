use clap::Parser;
use std::path::PathBuf;

use texlaunch_core::config::LaunchOverrides;

/// texlaunch - install pix2tex, check it, open the web page and run the OCR server
///
/// Run with no arguments for the full setup. Every flag is optional.
#[derive(Parser, Debug)]
#[command(name = "texlaunch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Python interpreter to use (default: python3, then python, from PATH)
    #[arg(long, value_name = "PATH")]
    pub python: Option<PathBuf>,

    /// Web page to open before the server starts (default: index.html next to this binary)
    #[arg(long, value_name = "PATH")]
    pub page: Option<PathBuf>,

    /// Do not open the browser
    #[arg(long, default_value = "false")]
    pub no_browser: bool,

    /// Start the server without waiting for Enter
    #[arg(short = 'y', long, default_value = "false")]
    pub yes: bool,
}

impl Cli {
    pub fn overrides(&self) -> LaunchOverrides {
        LaunchOverrides {
            python: self.python.clone(),
            page: self.page.clone(),
            no_browser: self.no_browser,
            assume_yes: self.yes,
        }
    }
}
