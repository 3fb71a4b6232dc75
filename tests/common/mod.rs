// tests/common/mod.rs

//! Shared fakes for integration tests.

use depwalk::{Error, Installer, PackageRegistry, Result, SystemPackageIndex};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// An in-memory package world: some packages installed, others installable.
///
/// The same value serves as registry and installer, so installing a package
/// makes it visible to the next registry lookup.
pub struct FakeRepo {
    requires: HashMap<String, Vec<String>>,
    installed: Mutex<HashSet<String>>,
    /// Installs that must fail before one succeeds, per package
    failing_installs: Mutex<HashMap<String, u32>>,
    lookups: Mutex<Vec<String>>,
    installs: Mutex<Vec<Vec<String>>>,
}

impl FakeRepo {
    /// Every package in `graph` starts out installed.
    pub fn installed(graph: &[(&str, &[&str])]) -> Self {
        let repo = Self::installable(graph);
        {
            let mut installed = repo.installed.lock().unwrap();
            installed.extend(repo.requires.keys().cloned());
        }
        repo
    }

    /// Every package in `graph` is known but not yet installed.
    pub fn installable(graph: &[(&str, &[&str])]) -> Self {
        Self {
            requires: graph
                .iter()
                .map(|(name, deps)| {
                    (name.to_string(), deps.iter().map(|d| d.to_string()).collect())
                })
                .collect(),
            installed: Mutex::new(HashSet::new()),
            failing_installs: Mutex::new(HashMap::new()),
            lookups: Mutex::new(Vec::new()),
            installs: Mutex::new(Vec::new()),
        }
    }

    /// An installed chain `p0 -> p1 -> ... -> p{len - 1}`.
    pub fn chain(len: usize) -> Self {
        let requires: HashMap<String, Vec<String>> = (0..len)
            .map(|i| {
                let next = (i + 1 < len).then(|| format!("p{}", i + 1));
                (format!("p{i}"), next.into_iter().collect())
            })
            .collect();
        let installed = requires.keys().cloned().collect();
        Self {
            requires,
            installed: Mutex::new(installed),
            failing_installs: Mutex::new(HashMap::new()),
            lookups: Mutex::new(Vec::new()),
            installs: Mutex::new(Vec::new()),
        }
    }

    pub fn uninstall(self, name: &str) -> Self {
        self.installed.lock().unwrap().remove(name);
        self
    }

    pub fn fail_installs(self, name: &str, times: u32) -> Self {
        self.failing_installs
            .lock()
            .unwrap()
            .insert(name.to_string(), times);
        self
    }

    pub fn lookups_of(&self, name: &str) -> usize {
        self.lookups
            .lock()
            .unwrap()
            .iter()
            .filter(|n| *n == name)
            .count()
    }

    pub fn installs(&self) -> Vec<Vec<String>> {
        self.installs.lock().unwrap().clone()
    }
}

impl PackageRegistry for FakeRepo {
    fn get(&self, name: &str) -> Result<Vec<String>> {
        self.lookups.lock().unwrap().push(name.to_string());
        if !self.installed.lock().unwrap().contains(name) {
            return Err(Error::NotFound(name.to_string()));
        }
        Ok(self.requires.get(name).cloned().unwrap_or_default())
    }
}

impl Installer for FakeRepo {
    fn install(&self, names: &[String]) -> Result<()> {
        self.installs.lock().unwrap().push(names.to_vec());

        let mut failing = self.failing_installs.lock().unwrap();
        let mut installed = self.installed.lock().unwrap();
        for name in names {
            if let Some(left) = failing.get_mut(name) {
                if *left > 0 {
                    *left -= 1;
                    return Err(Error::CommandFailed {
                        command: format!("pip install {}", name),
                        message: "exit status: 1".to_string(),
                    });
                }
            }
            if self.requires.contains_key(name) {
                installed.insert(name.clone());
            }
        }
        Ok(())
    }
}

/// A system index holding a fixed set of names.
pub struct FakeIndex {
    known: HashSet<String>,
    queries: Mutex<Vec<String>>,
}

impl FakeIndex {
    pub fn new(known: &[&str]) -> Self {
        Self {
            known: known.iter().map(|s| s.to_string()).collect(),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl SystemPackageIndex for FakeIndex {
    fn exists(&self, candidate: &str) -> Result<bool> {
        self.queries.lock().unwrap().push(candidate.to_string());
        Ok(self.known.contains(candidate))
    }
}

/// The dependency graph of tw2.jquery as pip reported it at the time.
pub const TW2_GRAPH: &[(&str, &[&str])] = &[
    ("tw2.jquery", &["tw2.core", "tw2.forms"]),
    ("tw2.forms", &["tw2.core"]),
    (
        "tw2.core",
        &["WebOb", "simplejson", "PasteDeploy", "speaklater", "decorator"],
    ),
    ("WebOb", &[]),
    ("simplejson", &[]),
    ("PasteDeploy", &[]),
    ("speaklater", &[]),
    ("decorator", &[]),
];
