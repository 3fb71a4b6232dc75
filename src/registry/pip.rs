// src/registry/pip.rs

//! pip-backed registry and installer
//!
//! Queries installed Python distributions with `pip show` and installs
//! missing ones with `pip install`.

use super::{Installer, PackageRegistry};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Locate the pip executable on PATH, falling back to the bare name
pub fn default_pip() -> PathBuf {
    which::which("pip").unwrap_or_else(|_| PathBuf::from("pip"))
}

/// Extract the requirement names from `pip show` output
///
/// Only the `Requires:` field is read. An empty field means the package has
/// no requirements; a missing field is an error since every `pip show`
/// record carries one.
pub fn parse_requires(output: &str) -> Result<Vec<String>> {
    let line = output
        .lines()
        .find_map(|line| line.strip_prefix("Requires:"))
        .ok_or_else(|| Error::ParseError("pip show output has no Requires field".to_string()))?;

    Ok(line
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

/// Registry view of the distributions installed for one pip
#[derive(Debug, Clone)]
pub struct PipRegistry {
    pip: PathBuf,
}

impl PipRegistry {
    pub fn new(pip: impl Into<PathBuf>) -> Self {
        Self { pip: pip.into() }
    }

    pub fn pip(&self) -> &Path {
        &self.pip
    }
}

impl PackageRegistry for PipRegistry {
    fn get(&self, name: &str) -> Result<Vec<String>> {
        debug!("Querying pip for installed package: {}", name);

        let output = Command::new(&self.pip)
            .args(["show", name])
            .output()
            .map_err(|e| Error::CommandFailed {
                command: format!("{} show", self.pip.display()),
                message: format!("{}. Is pip installed?", e),
            })?;

        // pip show exits non-zero and warns on stderr for unknown packages
        if !output.status.success() {
            return Err(Error::NotFound(name.to_string()));
        }

        let requires = parse_requires(&String::from_utf8_lossy(&output.stdout))?;
        debug!("{} requires {:?}", name, requires);
        Ok(requires)
    }
}

/// Installs distributions with `pip install`
#[derive(Debug, Clone)]
pub struct PipInstaller {
    pip: PathBuf,
}

impl PipInstaller {
    pub fn new(pip: impl Into<PathBuf>) -> Self {
        Self { pip: pip.into() }
    }
}

impl Installer for PipInstaller {
    fn install(&self, names: &[String]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }

        info!("Installing with pip: {}", names.join(" "));

        let status = Command::new(&self.pip)
            .arg("install")
            .args(names)
            .status()
            .map_err(|e| Error::CommandFailed {
                command: format!("{} install", self.pip.display()),
                message: e.to_string(),
            })?;

        if !status.success() {
            warn!("pip install {} exited with {}", names.join(" "), status);
            return Err(Error::CommandFailed {
                command: format!("{} install {}", self.pip.display(), names.join(" ")),
                message: status.to_string(),
            });
        }

        Ok(())
    }
}
