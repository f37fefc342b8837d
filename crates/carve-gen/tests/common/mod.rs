//! Helpers shared by the carve-gen integration tests

#![allow(dead_code)]

use std::collections::BTreeSet;

use carve_config::{BuildConfig, ParseOptions, parse_tokens};
use carve_registry::{Registry, ResolvedSet};

/// `exposed` plus its dependency closure, in registry order.
pub fn closed_set(registry: &Registry, exposed: &[&str]) -> ResolvedSet {
    let mut members = BTreeSet::new();
    let mut stack: Vec<String> = exposed.iter().map(|s| s.to_string()).collect();
    while let Some(name) = stack.pop() {
        let position = registry.position(&name).unwrap();
        if members.insert(position) {
            stack.extend(registry.lookup(&name).unwrap().dependencies().iter().cloned());
        }
    }
    let entries: Vec<_> = registry.entries().collect();
    ResolvedSet::new(
        members
            .into_iter()
            .map(|position| entries[position].name().to_string())
            .collect(),
        exposed.iter().map(|s| s.to_string()).collect(),
    )
}

pub fn full_set(registry: &Registry) -> ResolvedSet {
    let names: Vec<&str> = registry.all_names().iter().map(String::as_str).collect();
    closed_set(registry, &names)
}

pub fn config(tokens: &[&str]) -> BuildConfig {
    let registry = Registry::builtin().unwrap();
    parse_tokens(tokens, &registry, &ParseOptions::default()).unwrap()
}
