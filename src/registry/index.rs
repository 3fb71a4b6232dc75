// src/registry/index.rs

//! System package index backed by an external query command

use super::SystemPackageIndex;
use crate::error::{Error, Result};
use std::process::Command;
use tracing::debug;

/// Default query: ask dnf for any available package with this exact name
pub const DEFAULT_INDEX_COMMAND: &[&str] = &["dnf", "repoquery", "--quiet"];

/// Runs a query command with the candidate name appended
///
/// A candidate exists when the command succeeds and prints at least one
/// non-blank line. `dnf repoquery` exits zero with empty output for unknown
/// names, while `rpm -q` exits non-zero; both conventions are handled.
#[derive(Debug, Clone)]
pub struct CommandIndex {
    program: String,
    args: Vec<String>,
}

impl CommandIndex {
    /// Build an index from a command line such as `["rpm", "-q"]`
    pub fn new(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| Error::ParseError("index command is empty".to_string()))?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for CommandIndex {
    fn default() -> Self {
        Self {
            program: DEFAULT_INDEX_COMMAND[0].to_string(),
            args: DEFAULT_INDEX_COMMAND[1..].iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SystemPackageIndex for CommandIndex {
    fn exists(&self, candidate: &str) -> Result<bool> {
        debug!("Looking up {} with {}", candidate, self.program);

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(candidate)
            .output()
            .map_err(|e| Error::CommandFailed {
                command: self.command_line(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Ok(false);
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .any(|line| !line.trim().is_empty()))
    }
}
