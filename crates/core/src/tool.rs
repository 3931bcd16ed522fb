//! Running external tools.

use std::{
    ffi::OsString,
    path::Path,
    process::{Command, Stdio},
};

use log::debug;

use crate::error::{Error, Result};

/// Observable result of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success() -> Self {
        Self { success: true, code: Some(0), stderr: String::new() }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self { success: false, code: Some(code), stderr: stderr.into() }
    }

    /// Convert a failed run into [`Error::ToolFailed`].
    pub fn check(self, tool: &Path) -> Result<()> {
        if self.success { Ok(()) } else { Err(self.into_error(tool)) }
    }

    pub fn into_error(self, tool: &Path) -> Error {
        Error::ToolFailed {
            tool: tool.display().to_string(),
            code: self.code,
            stderr: self.stderr.trim().to_string(),
        }
    }
}

/// Something that can run a program to completion.
pub trait ToolRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<ToolOutput>;
}

/// Runs tools as child processes, blocking until they exit.
///
/// Stdout is discarded; stderr is captured for diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<ToolOutput> {
        debug!("Running {} {:?}", program.display(), args);

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| Error::Spawn { tool: program.display().to_string(), source })?;

        Ok(ToolOutput {
            success: output.status.success(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
