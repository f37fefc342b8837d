//! The immutable function registry.

use std::sync::Arc;

use once_cell::sync::Lazy;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use crate::bundle::BundleKind;
use crate::entry::{Category, EntryKind, FunctionEntry};
use crate::error::{RegistryError, Result};
use crate::manifest::{BundleManifest, CategoryManifest, HelperManifest, ManifestSource};

const HELPERS: ManifestSource<'static> =
    ManifestSource::new("helpers.toml", include_str!("../library/helpers.toml"));

const CATEGORIES: [ManifestSource<'static>; 6] = [
    ManifestSource::new("arrays.toml", include_str!("../library/arrays.toml")),
    ManifestSource::new("chaining.toml", include_str!("../library/chaining.toml")),
    ManifestSource::new("collections.toml", include_str!("../library/collections.toml")),
    ManifestSource::new("functions.toml", include_str!("../library/functions.toml")),
    ManifestSource::new("objects.toml", include_str!("../library/objects.toml")),
    ManifestSource::new("utilities.toml", include_str!("../library/utilities.toml")),
];

const BUNDLES: ManifestSource<'static> =
    ManifestSource::new("bundles.toml", include_str!("../library/bundles.toml"));

static BUILTIN: Lazy<Result<Arc<Registry>>> =
    Lazy::new(|| Registry::from_manifests(HELPERS, &CATEGORIES, BUNDLES).map(Arc::new));

/// Every function of the library with its aliases, category, dependencies and
/// source variants.
///
/// Entries are kept in declaration order: helpers first, then public functions
/// category by category. That order is the emission order of generated modules.
#[derive(Debug)]
pub struct Registry {
    entries: Vec<FunctionEntry>,
    index: FxHashMap<String, usize>,
    aliases: FxHashMap<String, String>,
    bindings: FxHashMap<String, usize>,
    categories: FxHashMap<Category, Vec<String>>,
    public: Vec<String>,
    bundles: FxHashMap<BundleKind, Vec<String>>,
}

impl Registry {
    /// The registry built from the embedded library manifests.
    ///
    /// Parsed and validated once per process; later calls share the result.
    pub fn builtin() -> Result<Arc<Registry>> {
        (*BUILTIN).clone()
    }

    /// Builds and validates a registry from manifest texts.
    pub fn from_manifests(
        helpers: ManifestSource<'_>,
        categories: &[ManifestSource<'_>],
        bundles: ManifestSource<'_>,
    ) -> Result<Self> {
        let mut entries = Vec::new();

        let helper_manifest: HelperManifest = helpers.parse()?;
        for def in helper_manifest.helper {
            entries.push(def.into_entry(EntryKind::Helper)?);
        }
        for source in categories {
            let manifest: CategoryManifest = source.parse()?;
            for def in manifest.function {
                entries.push(def.into_entry(EntryKind::Public(manifest.category))?);
            }
        }

        let mut registry = Self::index_entries(entries)?;
        registry.validate_dependencies()?;

        let bundle_manifest: BundleManifest = bundles.parse()?;
        registry.bundles = registry.resolve_bundles(bundle_manifest)?;

        Ok(registry)
    }

    fn index_entries(entries: Vec<FunctionEntry>) -> Result<Self> {
        let mut index = FxHashMap::default();
        let mut bindings = FxHashMap::default();
        let mut categories: FxHashMap<Category, Vec<String>> = FxHashMap::default();
        let mut public = Vec::new();

        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.name.clone(), position).is_some() {
                return Err(RegistryError::DuplicateName {
                    name: entry.name.clone(),
                });
            }
            for identifier in &entry.provides {
                if let Some(first) = bindings.insert(identifier.clone(), position) {
                    return Err(RegistryError::DuplicateBinding {
                        identifier: identifier.clone(),
                        first: entries[first].name.clone(),
                        second: entry.name.clone(),
                    });
                }
            }
            if let Some(category) = entry.category() {
                categories
                    .entry(category)
                    .or_default()
                    .push(entry.name.clone());
                public.push(entry.name.clone());
            }
        }

        let mut aliases: FxHashMap<String, String> = FxHashMap::default();
        for entry in &entries {
            for alias in &entry.aliases {
                if let Some(&taken) = index.get(alias) {
                    return Err(RegistryError::DuplicateAlias {
                        alias: alias.clone(),
                        owner: entry.name.clone(),
                        taken_by: entries[taken].name.clone(),
                    });
                }
                if let Some(taken_by) = aliases.insert(alias.clone(), entry.name.clone()) {
                    return Err(RegistryError::DuplicateAlias {
                        alias: alias.clone(),
                        owner: entry.name.clone(),
                        taken_by,
                    });
                }
            }
        }

        Ok(Self {
            entries,
            index,
            aliases,
            bindings,
            categories,
            public,
            bundles: FxHashMap::default(),
        })
    }

    /// Checks that dependencies exist, that helpers only lean on helpers
    /// declared before them, and that the graph is acyclic.
    fn validate_dependencies(&self) -> Result<()> {
        let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(self.entries.len(), 0);
        let nodes: Vec<NodeIndex> = (0..self.entries.len()).map(|i| graph.add_node(i)).collect();

        for (position, entry) in self.entries.iter().enumerate() {
            for dependency in &entry.dependencies {
                let target = *self
                    .index
                    .get(dependency)
                    .ok_or_else(|| RegistryError::unknown_dependency(&entry.name, dependency))?;

                if entry.is_helper() && self.entries[target].is_helper() && target >= position {
                    return Err(RegistryError::HelperOrder {
                        helper: entry.name.clone(),
                        dependency: dependency.clone(),
                    });
                }
                graph.add_edge(nodes[position], nodes[target], ());
            }
        }

        toposort(&graph, None).map_err(|cycle| RegistryError::DependencyCycle {
            name: self.entries[graph[cycle.node_id()]].name.clone(),
        })?;
        Ok(())
    }

    fn resolve_bundles(&self, manifest: BundleManifest) -> Result<FxHashMap<BundleKind, Vec<String>>> {
        let mut bundles = FxHashMap::default();

        for (key, def) in manifest.bundle {
            let kind = BundleKind::from_keyword(&key).ok_or_else(|| {
                RegistryError::manifest_parse("bundles", format!("unknown bundle '{key}'"))
            })?;

            let check = |name: &String| -> Result<String> {
                let canonical = self.resolve_alias(name);
                match self.lookup(canonical) {
                    Some(entry) if !entry.is_helper() => Ok(canonical.to_string()),
                    _ => Err(RegistryError::UnknownBundleMember {
                        bundle: key.clone(),
                        name: name.clone(),
                    }),
                }
            };

            let members: Vec<String> = match def.include {
                Some(include) => include.iter().map(check).collect::<Result<_>>()?,
                None => {
                    let excluded = def.exclude.iter().map(check).collect::<Result<Vec<_>>>()?;
                    self.public
                        .iter()
                        .filter(|name| !excluded.contains(*name))
                        .cloned()
                        .collect()
                }
            };
            bundles.insert(kind, self.in_declaration_order(members));
        }

        for kind in BundleKind::ALL {
            if !bundles.contains_key(&kind) {
                return Err(RegistryError::MissingBundle {
                    bundle: kind.to_string(),
                });
            }
        }
        Ok(bundles)
    }

    fn in_declaration_order(&self, mut names: Vec<String>) -> Vec<String> {
        names.sort_by_key(|name| self.position(name).unwrap_or(usize::MAX));
        names.dedup();
        names
    }

    /// Entry by canonical name.
    pub fn lookup(&self, name: &str) -> Option<&FunctionEntry> {
        self.index.get(name).map(|&position| &self.entries[position])
    }

    /// Canonical name for an alias; any other input is returned unchanged.
    pub fn resolve_alias<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Public canonical names of a category, in declaration order.
    pub fn by_category(&self, category: Category) -> &[String] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every public canonical name, in declaration order.
    pub fn all_names(&self) -> &[String] {
        &self.public
    }

    /// Members of a bundle, canonical and in declaration order.
    pub fn bundle(&self, kind: BundleKind) -> &[String] {
        self.bundles
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All entries, helpers first, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &FunctionEntry> {
        self.entries.iter()
    }

    /// Declaration index of a canonical name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Entry whose fragment declares the JavaScript identifier `identifier`.
    pub fn entry_for_binding(&self, identifier: &str) -> Option<&FunctionEntry> {
        self.bindings
            .get(identifier)
            .map(|&position| &self.entries[position])
    }

    /// Whether `name` is a known canonical name or alias of a public function.
    pub fn is_public_name(&self, name: &str) -> bool {
        self.lookup(self.resolve_alias(name))
            .is_some_and(|entry| !entry.is_helper())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
