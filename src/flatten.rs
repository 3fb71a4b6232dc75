// src/flatten.rs

//! Dependency-first flattening and occurrence counting
//!
//! Flattening lists every child's subtree before the children themselves,
//! so a package always comes after everything it depends on. Repeats are
//! dropped afterwards, keeping the first occurrence. Since every occurrence
//! of a package is preceded by its own subtree, keeping the first one never
//! breaks the ordering.

use crate::tree::{DependencyTree, Forest};
use std::collections::{BTreeMap, HashSet};

/// Number of tree positions in which each package is a direct child
pub type OccurrenceCounts = BTreeMap<String, usize>;

/// Drop repeated names, keeping each at its first position
pub fn unique_in_order<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Flatten a tree into a dependency-first, duplicate-free sequence
///
/// For children `{k1: t1, k2: t2}` this is `flatten(t1) ++ flatten(t2) ++
/// [k1, k2]` before deduplication. An empty tree flattens to nothing.
pub fn flatten(tree: &DependencyTree) -> Vec<String> {
    let mut order = Vec::new();
    push_post_order(tree, &mut order);
    unique_in_order(order)
}

/// Flatten each root's tree in turn, root last, then deduplicate once
pub fn flatten_forest(forest: &Forest) -> Vec<String> {
    let mut order = Vec::new();
    for (root, tree) in forest.iter() {
        push_post_order(tree, &mut order);
        order.push(root.to_string());
    }
    unique_in_order(order)
}

enum Step<'t> {
    Expand(&'t DependencyTree),
    Emit(&'t str),
}

fn push_post_order(tree: &DependencyTree, order: &mut Vec<String>) {
    let mut stack = vec![Step::Expand(tree)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Emit(name) => order.push(name.to_string()),
            Step::Expand(node) => {
                // Pushed in reverse so subtrees pop first, then names, both in order
                stack.extend(node.keys().rev().map(Step::Emit));
                stack.extend(node.iter().rev().map(|(_, child)| Step::Expand(child)));
            }
        }
    }
}

/// Count how often each package appears as a direct child anywhere in the tree
///
/// Unlike [`flatten`], nothing is deduplicated: a package shared by two
/// parents counts twice.
pub fn count_occurrences(tree: &DependencyTree) -> OccurrenceCounts {
    let mut counts = OccurrenceCounts::new();
    add_occurrences(tree, &mut counts);
    counts
}

/// Occurrence counts across a forest, treating each root as one position
pub fn count_forest_occurrences(forest: &Forest) -> OccurrenceCounts {
    let mut counts = OccurrenceCounts::new();
    for (root, tree) in forest.iter() {
        *counts.entry(root.to_string()).or_insert(0) += 1;
        add_occurrences(tree, &mut counts);
    }
    counts
}

fn add_occurrences(tree: &DependencyTree, counts: &mut OccurrenceCounts) {
    let mut stack = vec![tree];
    while let Some(node) = stack.pop() {
        for (name, child) in node.iter() {
            *counts.entry(name.to_string()).or_insert(0) += 1;
            stack.push(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf() -> DependencyTree {
        DependencyTree::new()
    }

    fn node(children: Vec<(&str, DependencyTree)>) -> DependencyTree {
        children.into_iter().collect()
    }

    fn diamond() -> DependencyTree {
        node(vec![(
            "A",
            node(vec![
                ("B", node(vec![("D", leaf())])),
                ("C", node(vec![("D", leaf())])),
            ]),
        )])
    }

    #[test]
    fn test_unique_in_order() {
        let names = ["b", "a", "b", "c", "a"].map(String::from);
        assert_eq!(unique_in_order(names), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten(&leaf()).is_empty());
        assert!(flatten_forest(&Forest::new()).is_empty());
    }

    #[test]
    fn test_flatten_chain() {
        let tree = node(vec![("A", node(vec![("B", node(vec![("C", leaf())]))]))]);
        assert_eq!(flatten(&tree), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_flatten_diamond() {
        assert_eq!(flatten(&diamond()), vec!["D", "B", "C", "A"]);
    }

    #[test]
    fn test_subtrees_before_sibling_names() {
        // {x: {x1: {}}, y: {y1: {}}} lists both subtrees before x and y
        let tree = node(vec![
            ("x", node(vec![("x1", leaf())])),
            ("y", node(vec![("y1", leaf())])),
        ]);
        assert_eq!(flatten(&tree), vec!["x1", "y1", "x", "y"]);
    }

    #[test]
    fn test_flatten_forest_roots_follow_their_trees() {
        let forest: Forest = vec![
            ("tw2.forms", node(vec![("tw2.core", node(vec![("WebOb", leaf())]))])),
            ("tw2.jquery", node(vec![("tw2.core", node(vec![("WebOb", leaf())]))])),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            forest.flatten(),
            vec!["WebOb", "tw2.core", "tw2.forms", "tw2.jquery"]
        );
    }

    #[test]
    fn test_reflatten_flat_sequence_is_identity() {
        let flat = vec!["D", "B", "C", "A"];
        let forest: Forest = flat.iter().map(|name| (*name, leaf())).collect();
        assert_eq!(forest.flatten(), flat);
    }

    #[test]
    fn test_counts_empty() {
        assert!(count_occurrences(&leaf()).is_empty());
    }

    #[test]
    fn test_counts_without_repeats_are_one() {
        let tree = node(vec![("A", node(vec![("B", node(vec![("C", leaf())]))]))]);
        let counts = count_occurrences(&tree);
        assert_eq!(counts.len(), 3);
        assert!(counts.values().all(|&count| count == 1));
    }

    #[test]
    fn test_counts_shared_dependency_twice() {
        let counts = count_occurrences(&diamond());
        assert_eq!(counts["D"], 2);
        assert_eq!(counts["B"], 1);
        assert_eq!(counts["A"], 1);
        // Still listed once when flattened
        assert_eq!(flatten(&diamond()).iter().filter(|n| *n == "D").count(), 1);
    }

    #[test]
    fn test_forest_counts_include_roots() {
        let forest: Forest = vec![
            ("A", node(vec![("B", leaf())])),
            ("B", leaf()),
        ]
        .into_iter()
        .collect();

        let counts = forest.count_occurrences();
        assert_eq!(counts["A"], 1);
        assert_eq!(counts["B"], 2);
    }
}
