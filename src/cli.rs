// src/cli.rs
//! Command-line arguments for depwalk
//!
//! Global flags choose the config file, JSON output and whether missing
//! packages may be installed. The `tree`, `order`, `check` and `counts`
//! subcommands dispatch to the `cmd_*` handlers in `commands`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "depwalk")]
#[command(author, version)]
#[command(about = "Resolve package dependencies and check them against a system package index", long_about = None)]
pub struct Cli {
    /// Configuration file (default: <config dir>/depwalk/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Never install missing packages; resolve against what is installed
    #[arg(long, global = true)]
    pub no_install: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the nested dependency tree of each package
    Tree {
        /// Packages to resolve
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// List every dependency once, dependencies before dependents
    Order {
        /// Packages to resolve
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// Check which dependencies already exist in the system package index
    Check {
        /// Packages to resolve
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// Count how many times each package is required across all trees
    Counts {
        /// Packages to resolve
        #[arg(required = true)]
        packages: Vec<String>,
    },
}
