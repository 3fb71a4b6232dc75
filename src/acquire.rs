// src/acquire.rs

//! Direct-dependency acquisition with install-on-demand
//!
//! A package that is missing from the registry gets handed to the installer
//! and looked up again. Installer failures are never inspected; they show up
//! as the package still being missing on the next lookup, which spends the
//! same retry budget as any other miss.

use crate::error::{Error, Result};
use crate::registry::{Installer, PackageRegistry};
use tracing::{debug, info, warn};

/// Install-and-recheck cycles allowed after the initial registry miss
pub const MAX_INSTALL_RETRIES: u32 = 2;

/// Resolves the direct requirements of one package at a time
pub struct Acquirer<'a> {
    registry: &'a dyn PackageRegistry,
    installer: &'a dyn Installer,
}

impl<'a> Acquirer<'a> {
    pub fn new(registry: &'a dyn PackageRegistry, installer: &'a dyn Installer) -> Self {
        Self {
            registry,
            installer,
        }
    }

    /// Return the direct requirements of `name`, installing it if needed
    ///
    /// Performs at most `1 + MAX_INSTALL_RETRIES` registry lookups. The list
    /// is returned exactly as the registry reports it, duplicates included.
    pub fn resolve_direct_dependencies(&self, name: &str) -> Result<Vec<String>> {
        let mut retries = 0;

        loop {
            match self.registry.get(name) {
                Ok(requires) => return Ok(requires),
                Err(Error::NotFound(_)) if retries >= MAX_INSTALL_RETRIES => {
                    warn!("{} still missing after {} install attempts", name, retries);
                    return Err(Error::AcquisitionExhausted {
                        name: name.to_string(),
                        attempts: retries,
                    });
                }
                Err(Error::NotFound(_)) => {
                    retries += 1;
                    info!("{} is not installed, installing (attempt {})", name, retries);
                    if let Err(e) = self.installer.install(&[name.to_string()]) {
                        warn!("Installing {} failed: {}", name, e);
                    }
                    debug!("Rechecking registry for {}", name);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
