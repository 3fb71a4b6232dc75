// src/lib.rs

//! depwalk: transitive dependency resolution and cross-repository checks
//!
//! Resolves the dependency tree of one or more packages from a local
//! registry, installing missing packages on demand, then flattens the trees
//! into a dependency-first order and checks each package against a second,
//! independent package index.
//!
//! # Pipeline
//!
//! - [`Acquirer`]: direct requirements of one package, with install-and-retry
//! - [`TreeBuilder`]: nested [`DependencyTree`] per root, collected in a [`Forest`]
//! - [`flatten`]: dependency-first, duplicate-free ordering and occurrence counts
//! - [`CrossChecker`]: existence of each package under its [`NameVariants`]

pub mod acquire;
pub mod config;
pub mod crosscheck;
mod error;
pub mod flatten;
pub mod registry;
pub mod tree;
pub mod variants;

pub use acquire::{Acquirer, MAX_INSTALL_RETRIES};
pub use config::{Config, ConfigError};
pub use crosscheck::{CrossChecker, ExistenceRecord};
pub use error::{Error, Result};
pub use flatten::OccurrenceCounts;
pub use registry::{Installer, NoopInstaller, PackageRegistry, SystemPackageIndex};
pub use tree::{DependencyTree, Forest, TreeBuilder};
pub use variants::NameVariants;
