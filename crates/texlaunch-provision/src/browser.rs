//! Best-effort opening of the local web front-end.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// File name of the front-end shipped next to the executable.
pub const PAGE_FILE_NAME: &str = "index.html";

pub trait BrowserOpener {
    /// Open `url` in the user's default browser. Must not block on the browser.
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Opens URLs with the platform's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserOpener for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        let mut cmd = opener_command(url);
        cmd.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
        cmd.spawn().map(|_| ())
    }
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

/// `index.html` in the directory of the running executable.
pub fn default_page_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(PAGE_FILE_NAME))
}

/// `file://` URL for an absolute form of `path`. Each segment is
/// percent-encoded so `#`, `?` and spaces stay part of the path.
pub fn file_url(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let s = absolute.to_string_lossy().replace('\\', "/");
    let encoded = s
        .split('/')
        .map(|segment| {
            if is_drive_segment(segment) {
                segment.to_string()
            } else {
                urlencoding::encode(segment).into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("/");
    if encoded.starts_with('/') {
        format!("file://{}", encoded)
    } else {
        format!("file:///{}", encoded)
    }
}

// `C:` in `C:/Users/...`
fn is_drive_segment(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Open `page` if it exists. Absence or opener failure is not an error.
/// Returns whether the browser was asked to open the page.
pub fn launch_ui(browser: &dyn BrowserOpener, page: Option<&Path>) -> bool {
    let Some(page) = page else {
        return false;
    };
    if !page.is_file() {
        tracing::debug!(page = %page.display(), "Web page not found, skipping browser");
        return false;
    }
    let url = file_url(page);
    match browser.open(&url) {
        Ok(()) => {
            tracing::debug!(url = %url, "Opened web page");
            true
        }
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "Could not open browser");
            false
        }
    }
}
