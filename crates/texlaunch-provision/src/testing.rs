//! Scripted stand-ins for the OS seams, shared by the unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

use crate::browser::BrowserOpener;
use crate::console::Console;
use crate::runner::{CommandOutput, CommandRunner, CommandSpec, ForegroundExit};

/// Replies by command display string. Unknown commands fail to spawn
/// (`NotFound`) unless a default output is set.
#[derive(Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, Option<CommandOutput>>,
    default: Option<CommandOutput>,
    foreground: Option<ForegroundExit>,
    calls: RefCell<Vec<String>>,
    foreground_calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, spec: &CommandSpec, output: CommandOutput) -> Self {
        self.responses.insert(spec.display(), Some(output));
        self
    }

    /// The program for `spec` does not exist.
    pub fn missing(mut self, spec: &CommandSpec) -> Self {
        self.responses.insert(spec.display(), None);
        self
    }

    pub fn default_output(mut self, output: CommandOutput) -> Self {
        self.default = Some(output);
        self
    }

    pub fn foreground(mut self, exit: ForegroundExit) -> Self {
        self.foreground = Some(exit);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn foreground_calls(&self) -> Vec<String> {
        self.foreground_calls.borrow().clone()
    }
}

fn not_found(spec: &CommandSpec) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("{}: not found", spec.program.to_string_lossy()))
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
        let key = spec.display();
        self.calls.borrow_mut().push(key.clone());
        match self.responses.get(&key) {
            Some(Some(out)) => Ok(out.clone()),
            Some(None) => Err(not_found(spec)),
            None => self.default.clone().ok_or_else(|| not_found(spec)),
        }
    }

    fn run_foreground(&self, spec: &CommandSpec) -> io::Result<ForegroundExit> {
        self.foreground_calls.borrow_mut().push(spec.display());
        self.foreground.ok_or_else(|| not_found(spec))
    }
}

/// Collects status lines; the Enter gate returns immediately and is counted.
#[derive(Default)]
pub struct RecordingConsole {
    lines: RefCell<Vec<String>>,
    prompts: RefCell<Vec<String>>,
}

impl RecordingConsole {
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|l| l.contains(needle))
    }
}

impl Console for RecordingConsole {
    fn line(&self, text: &str) {
        self.lines.borrow_mut().push(text.to_string());
    }

    fn wait_for_enter(&self, prompt: &str) -> io::Result<()> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingBrowser {
    fail: bool,
    opened: RefCell<Vec<String>>,
}

impl RecordingBrowser {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl BrowserOpener for RecordingBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::NotFound, "xdg-open: not found"));
        }
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}
