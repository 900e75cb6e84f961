//! The command the gate hands control to.

use std::ffi::{OsStr, OsString};
use std::process::Command;

/// Program and arguments, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailingCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl TrailingCommand {
    /// Split an argument vector into program and arguments.
    ///
    /// Returns `None` for an empty vector.
    pub fn from_args<I, S>(argv: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next()?;
        Some(Self {
            program,
            args: argv.collect(),
        })
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Build a process builder that inherits stdio and environment.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}
