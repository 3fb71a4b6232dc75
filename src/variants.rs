// src/variants.rs

//! Alternate spellings of a package name for cross-repository lookup
//!
//! Distributions rarely ship a package under its upstream name. A PyPI
//! project `PasteDeploy` is packaged as `python-paste-deploy` or
//! `python-pastedeploy`, depending on the packager. These candidates are
//! only ever used against the system index; registry lookups stay exact.

use crate::flatten::unique_in_order;
use regex::Regex;
use std::sync::LazyLock;

/// Marker prepended to names by distribution packagers
pub const DEFAULT_PREFIX: &str = "python-";

/// Generates candidate names in the order they should be tried
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameVariants {
    prefix: String,
}

impl NameVariants {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Candidate spellings of `name`, most literal first
    ///
    /// 1. the name unchanged
    /// 2. the prefixed name
    /// 3. the prefixed name lower-cased
    /// 4. the prefixed name split on camel-case boundaries, lower-cased and
    ///    joined with dashes
    ///
    /// Repeated candidates are listed once.
    pub fn variants(&self, name: &str) -> Vec<String> {
        let prefixed = format!("{}{}", self.prefix, name);
        let lowered = prefixed.to_lowercase();
        let dashed = camel_tokens(&prefixed)
            .iter()
            .map(|token| token.to_lowercase())
            .collect::<Vec<_>>()
            .join("-");

        unique_in_order([name.to_string(), prefixed, lowered, dashed])
    }
}

impl Default for NameVariants {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

/// Acronym running into a capitalised word: `SQLAlchemy` -> `SQL-Alchemy`
static ACRONYM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap());
/// Lowercase letter or digit running into a capital: `PasteDeploy` -> `Paste-Deploy`
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());

/// Split a name into camel-case words
///
/// A new word starts wherever a lowercase letter or digit is followed by a
/// capital, and at the last capital of an acronym that runs into a lowercase
/// letter. Anything that is not alphanumeric separates words and is dropped.
pub fn camel_tokens(name: &str) -> Vec<String> {
    let split = ACRONYM_RE.replace_all(name, "$1-$2");
    let split = WORD_RE.replace_all(&split, "$1-$2");

    split
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
