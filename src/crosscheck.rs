// src/crosscheck.rs

//! Existence checks against a second package repository

use crate::error::Result;
use crate::registry::SystemPackageIndex;
use crate::variants::NameVariants;
use serde::Serialize;
use tracing::debug;

/// Whether a package exists in the system index, and under which name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExistenceRecord {
    pub name: String,
    pub found: bool,
    /// The first candidate spelling the index recognised
    pub matched: Option<String>,
}

impl ExistenceRecord {
    fn found(name: &str, matched: String) -> Self {
        Self {
            name: name.to_string(),
            found: true,
            matched: Some(matched),
        }
    }

    fn missing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            found: false,
            matched: None,
        }
    }
}

/// Looks packages up in a [`SystemPackageIndex`] under every name variant
pub struct CrossChecker<'a> {
    index: &'a dyn SystemPackageIndex,
    variants: NameVariants,
}

impl<'a> CrossChecker<'a> {
    pub fn new(index: &'a dyn SystemPackageIndex, variants: NameVariants) -> Self {
        Self { index, variants }
    }

    /// Check one package, stopping at the first variant the index knows
    pub fn exists(&self, name: &str) -> Result<ExistenceRecord> {
        for candidate in self.variants.variants(name) {
            if self.index.exists(&candidate)? {
                debug!("{} found as {}", name, candidate);
                return Ok(ExistenceRecord::found(name, candidate));
            }
        }

        debug!("{} not found under any variant", name);
        Ok(ExistenceRecord::missing(name))
    }

    /// Check every package of a flattened order, keeping that order
    pub fn check_all<S: AsRef<str>>(&self, order: &[S]) -> Result<Vec<ExistenceRecord>> {
        order.iter().map(|name| self.exists(name.as_ref())).collect()
    }
}
