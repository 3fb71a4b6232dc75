// src/config.rs
//! Configuration file parsing
//!
//! Supports a TOML configuration file with the following sections, all
//! optional:
//! - [registry] - pip executable used to query and install packages
//! - [index] - command used to query the system package index
//! - [variants] - prefix used when generating alternate package names
//! - [resolve] - tree construction settings

use crate::registry::{CommandIndex, DEFAULT_INDEX_COMMAND, PipInstaller, PipRegistry, default_pip};
use crate::variants::{DEFAULT_PREFIX, NameVariants};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up under the user configuration directory
pub const CONFIG_FILE: &str = "depwalk/config.toml";

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistrySection,

    #[serde(default)]
    pub index: IndexSection,

    #[serde(default)]
    pub variants: VariantsSection,

    #[serde(default)]
    pub resolve: ResolveSection,
}

/// Registry configuration section
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    /// pip executable (default: `pip` on PATH)
    pub pip: Option<PathBuf>,
}

/// System index configuration section
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexSection {
    /// Query command; the candidate name is appended as the last argument
    #[serde(default = "default_index_command")]
    pub command: Vec<String>,
}

impl Default for IndexSection {
    fn default() -> Self {
        Self {
            command: default_index_command(),
        }
    }
}

/// Name variant configuration section
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantsSection {
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for VariantsSection {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

/// Tree construction configuration section
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolveSection {
    /// Resolve each package once per run instead of once per edge
    #[serde(default)]
    pub memoize: bool,
}

fn default_index_command() -> Vec<String> {
    DEFAULT_INDEX_COMMAND.iter().map(|s| s.to_string()).collect()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the per-user config file is
    /// read when present, and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Per-user configuration file location, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.index.command.is_empty() {
            return Err(ConfigError::Invalid("index.command must not be empty".to_string()));
        }
        Ok(())
    }

    /// pip executable to use for the registry and installer
    pub fn pip(&self) -> PathBuf {
        self.registry.pip.clone().unwrap_or_else(default_pip)
    }

    pub fn package_registry(&self) -> PipRegistry {
        PipRegistry::new(self.pip())
    }

    pub fn installer(&self) -> PipInstaller {
        PipInstaller::new(self.pip())
    }

    pub fn system_index(&self) -> crate::Result<CommandIndex> {
        CommandIndex::new(&self.index.command)
    }

    pub fn name_variants(&self) -> NameVariants {
        NameVariants::new(self.variants.prefix.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert!(config.registry.pip.is_none());
        assert_eq!(config.index.command, vec!["dnf", "repoquery", "--quiet"]);
        assert_eq!(config.variants.prefix, "python-");
        assert!(!config.resolve.memoize);
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
[registry]
pip = "/opt/venv/bin/pip"

[index]
command = ["rpm", "-q"]

[variants]
prefix = "python3-"

[resolve]
memoize = true
"#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.pip(), PathBuf::from("/opt/venv/bin/pip"));
        assert_eq!(config.index.command, vec!["rpm", "-q"]);
        assert_eq!(config.name_variants().prefix(), "python3-");
        assert!(config.resolve.memoize);
    }

    #[test]
    fn test_empty_index_command_rejected() {
        let result = Config::from_toml("[index]\ncommand = []\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Config::from_toml("[resolve]\nmemoise = true\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[variants]\nprefix = \"py-\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.variants.prefix, "py-");
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
