// src/commands.rs
//! Command handlers for the depwalk CLI

use anyhow::{Context, Result};
use depwalk::{
    Acquirer, Config, CrossChecker, ExistenceRecord, Forest, Installer, NoopInstaller,
    OccurrenceCounts, TreeBuilder,
};
use tracing::info;

/// Resolve one dependency tree per requested package
pub fn resolve_forest(config: &Config, packages: &[String], install: bool) -> Result<Forest> {
    let registry = config.package_registry();
    let pip_installer = config.installer();
    let installer: &dyn Installer = if install { &pip_installer } else { &NoopInstaller };

    info!(
        "Resolving {} package(s) with {}",
        packages.len(),
        registry.pip().display()
    );

    let mut builder = TreeBuilder::new(Acquirer::new(&registry, installer));
    if config.resolve.memoize {
        builder = builder.with_memo();
    }

    builder
        .build_forest(packages)
        .context("Failed to resolve dependencies")
}

pub fn cmd_tree(config: &Config, packages: &[String], install: bool, json: bool) -> Result<()> {
    let forest = resolve_forest(config, packages, install)?;

    if !json {
        let msg = format!(
            "| The list of dependencies according to {} |",
            config.pip().display()
        );
        println!("{}", "-".repeat(msg.len()));
        println!("{}", msg);
        println!("{}", "-".repeat(msg.len()));
    }
    println!("{}", serde_json::to_string_pretty(&forest)?);
    Ok(())
}

pub fn cmd_order(config: &Config, packages: &[String], install: bool, json: bool) -> Result<()> {
    let order = resolve_forest(config, packages, install)?.flatten();

    if json {
        println!("{}", serde_json::to_string_pretty(&order)?);
    } else {
        for name in &order {
            println!("{}", name);
        }
    }
    Ok(())
}

pub fn cmd_check(config: &Config, packages: &[String], install: bool, json: bool) -> Result<()> {
    let order = resolve_forest(config, packages, install)?.flatten();

    let index = config
        .system_index()
        .context("Invalid system index command")?;
    let checker = CrossChecker::new(&index, config.name_variants());
    let records = checker
        .check_all(&order)
        .context("Failed to query the system package index")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print!("{}", format_check_table(&records));
    }
    Ok(())
}

pub fn cmd_counts(config: &Config, packages: &[String], install: bool, json: bool) -> Result<()> {
    let counts = resolve_forest(config, packages, install)?.count_occurrences();

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        for (name, count) in sorted_counts(&counts) {
            println!("{:>6}  {}", count, name);
        }
    }
    Ok(())
}

/// Two-column present/absent listing followed by a summary line
pub fn format_check_table(records: &[ExistenceRecord]) -> String {
    let width = records.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
    let mut out = String::new();

    for record in records {
        let status = match &record.matched {
            Some(matched) if *matched != record.name => format!("present (as {})", matched),
            Some(_) => "present".to_string(),
            None => "absent".to_string(),
        };
        out.push_str(&format!("{:<width$}  {}\n", record.name, status, width = width));
    }

    let present = records.iter().filter(|r| r.found).count();
    out.push_str(&format!(
        "\n{} of {} package(s) present\n",
        present,
        records.len()
    ));
    out
}

/// Counts ordered most frequent first, ties by name
pub fn sorted_counts(counts: &OccurrenceCounts) -> Vec<(&str, usize)> {
    let mut sorted: Vec<(&str, usize)> = counts
        .iter()
        .map(|(name, count)| (name.as_str(), *count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    sorted
}
