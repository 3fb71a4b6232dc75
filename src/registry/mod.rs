// src/registry/mod.rs

//! Package sources consumed by the resolver
//!
//! The resolver never talks to a package manager directly. It goes through
//! three small traits so the tree builder and cross-checker stay decoupled
//! from pip, dnf or whatever else backs them:
//!
//! - [`PackageRegistry`] reports the direct requirements of an installed package
//! - [`Installer`] makes a package available to the registry, best-effort
//! - [`SystemPackageIndex`] answers whether a candidate name exists elsewhere

mod index;
mod pip;

pub use index::{CommandIndex, DEFAULT_INDEX_COMMAND};
pub use pip::{PipInstaller, PipRegistry, default_pip, parse_requires};

use crate::error::Result;

/// Source of truth for installed packages and their declared requirements
pub trait PackageRegistry: Send + Sync {
    /// Return the direct runtime requirements of an installed package
    ///
    /// Requirements come back in the order the registry reports them,
    /// duplicates included. Fails with [`Error::NotFound`] when the package
    /// is not currently installed.
    ///
    /// [`Error::NotFound`]: crate::Error::NotFound
    fn get(&self, name: &str) -> Result<Vec<String>>;
}

/// Installs packages so a later registry query can find them
pub trait Installer: Send + Sync {
    /// Attempt to install the given packages
    ///
    /// Callers must not rely on the returned status; success is only
    /// observable by querying the registry again.
    fn install(&self, names: &[String]) -> Result<()>;
}

/// A second, independent package repository used for existence checks
pub trait SystemPackageIndex: Send + Sync {
    /// Check whether an entry named exactly `candidate` exists
    fn exists(&self, candidate: &str) -> Result<bool>;
}

/// An installer that never installs anything
///
/// Use this to resolve against what is already installed; missing packages
/// then exhaust their retries without touching the system.
pub struct NoopInstaller;

impl Installer for NoopInstaller {
    fn install(&self, _names: &[String]) -> Result<()> {
        Ok(())
    }
}
