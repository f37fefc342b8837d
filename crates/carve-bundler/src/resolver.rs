//! Selection resolution: from a parsed command to a closed function set.
//!
//! Every name list is expanded first (exact category names become their
//! members, aliases become canonical names), then combined as
//! `(base ∪ plus) − minus − exclude`, filtered to public functions, and
//! closed over dependencies. Unknown names are dropped, never reported: the
//! resolver is total.

use carve_config::BuildConfig;
use carve_registry::{BundleKind, Category, Registry, ResolvedSet};
use rustc_hash::FxHashSet;

/// Resolves `config` against `registry`.
///
/// Both halves of the result are in registry declaration order, so the
/// order of tokens in the command never changes the output.
///
/// # Example
///
/// ```rust
/// use carve_bundler::resolve;
/// use carve_config::{ParseOptions, parse_tokens};
/// use carve_registry::Registry;
///
/// let registry = Registry::builtin().unwrap();
/// let config = parse_tokens(&["include=each,map"], &registry, &ParseOptions::default()).unwrap();
/// let set = resolve(&registry, &config);
///
/// // `each` is an alias, only canonical names come back
/// assert_eq!(set.exposed(), ["forEach", "map"]);
/// assert!(set.members().len() > set.exposed().len());
/// ```
pub fn resolve(registry: &Registry, config: &BuildConfig) -> ResolvedSet {
    let mut selected = base_set(registry, config);
    selected.extend(expand(registry, &config.plus));
    for name in expand(registry, &config.minus).chain(expand(registry, &config.exclude)) {
        selected.remove(name);
    }

    let exposed = in_registry_order(registry, |name| {
        selected.contains(name) && registry.is_public_name(name)
    });
    let closure = close_over_dependencies(registry, &exposed);
    let members = in_registry_order(registry, |name| closure.contains(name));

    tracing::debug!(
        exposed = exposed.len(),
        members = members.len(),
        "resolved selection"
    );
    ResolvedSet::new(members, exposed)
}

/// The names a command starts from, before `plus` and `minus` apply.
///
/// An explicit `include=` shadows bundles, `backbone` shadows `underscore`,
/// and categories union into whichever base was chosen. A command with none
/// of these starts from every public function.
fn base_set<'r>(registry: &'r Registry, config: &'r BuildConfig) -> FxHashSet<&'r str> {
    let mut base: FxHashSet<&str> = FxHashSet::default();

    let bundle = [BundleKind::Backbone, BundleKind::Underscore]
        .into_iter()
        .find(|kind| config.bundles.contains(kind));

    match (&config.include, bundle) {
        (Some(include), _) => base.extend(expand(registry, include)),
        (None, Some(kind)) => base.extend(registry.bundle(kind).iter().map(String::as_str)),
        (None, None) if config.categories.is_empty() => {
            base.extend(registry.all_names().iter().map(String::as_str));
        }
        (None, None) => {}
    }

    for category in &config.categories {
        base.extend(registry.by_category(*category).iter().map(String::as_str));
    }
    base
}

/// Expands a name list into canonical names.
///
/// Names that are neither categories nor known functions pass through
/// unchanged and are filtered out later.
fn expand<'r>(registry: &'r Registry, names: &'r [String]) -> impl Iterator<Item = &'r str> + 'r {
    names.iter().flat_map(move |name| {
        let expanded: Vec<&'r str> = match Category::from_exact(name) {
            Some(category) => registry
                .by_category(category)
                .iter()
                .map(String::as_str)
                .collect(),
            None => vec![registry.resolve_alias(name)],
        };
        expanded
    })
}

fn close_over_dependencies<'r>(registry: &'r Registry, roots: &[String]) -> FxHashSet<&'r str> {
    let mut closed: FxHashSet<&str> = FxHashSet::default();
    let mut pending: Vec<&str> = roots
        .iter()
        .filter_map(|name| registry.lookup(name).map(|entry| entry.name()))
        .collect();

    while let Some(name) = pending.pop() {
        if !closed.insert(name) {
            continue;
        }
        if let Some(entry) = registry.lookup(name) {
            pending.extend(
                entry
                    .dependencies()
                    .iter()
                    .map(String::as_str)
                    .filter(|dependency| !closed.contains(dependency)),
            );
        }
    }
    closed
}

fn in_registry_order(registry: &Registry, keep: impl Fn(&str) -> bool) -> Vec<String> {
    registry
        .entries()
        .map(|entry| entry.name())
        .filter(|name| keep(name))
        .map(str::to_string)
        .collect()
}
