//! Module assembly.
//!
//! Generation runs in four steps:
//!
//! 1. **Select** a fragment per member: the highest-precedence variant whose
//!    mode is active, checked with the parser. A broken variant falls back to
//!    `default`; a broken default drops the member and everything that
//!    depends on it.
//! 2. **Render** the body through `templates/module.js.jinja`.
//! 3. **Wrap** the body in the default closure or the command's `iife=`
//!    template, under the banner.
//! 4. **Validate** the result by parsing it again and scanning it for free
//!    references that name registry entries.

use std::collections::BTreeSet;
use std::fmt;

use carve_config::{BuildConfig, WrapperTemplate};
use carve_registry::{FunctionEntry, LIBRARY_VERSION, ModeTag, Registry, ResolvedSet};
use minijinja::{AutoEscape, Environment};
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::analysis::free_references;
use crate::banner::banner;
use crate::error::{GenError, Result};
use crate::exports::{export_ladder, indent, needs_free_exports};
use crate::syntax::{fragment_parses, syntax_errors};

const MODULE_TEMPLATE: &str = include_str!("../templates/module.js.jinja");

/// What a warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// The selected variant did not parse; `default` was used instead.
    VariantFallback,
    /// Neither the selected variant nor `default` parsed.
    Excluded,
    /// A dependency of the member was excluded.
    ExcludedDependency,
    /// The module reads an identifier that a registry entry declares.
    DependencyGap,
    /// No public function was selected.
    EmptySelection,
}

impl WarningKind {
    /// Stable diagnostic code, shared with the build reports.
    pub fn code(&self) -> &'static str {
        match self {
            WarningKind::VariantFallback => "carve::gen::variant_fallback",
            WarningKind::Excluded => "carve::gen::excluded",
            WarningKind::ExcludedDependency => "carve::gen::excluded_dependency",
            WarningKind::DependencyGap => "carve::gen::dependency_gap",
            WarningKind::EmptySelection => "carve::gen::empty_selection",
        }
    }
}

/// A non-fatal problem found while generating.
///
/// Warnings are returned, not printed. Creating one emits a `debug` event so
/// `-v` shows them in context; reporting is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenWarning {
    pub kind: WarningKind,
    pub message: String,
}

impl GenWarning {
    fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        let warning = Self {
            kind,
            message: message.into(),
        };
        tracing::debug!(code = kind.code(), "{}", warning.message);
        warning
    }
}

impl fmt::Display for GenWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A generated module and what happened while building it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedModule {
    /// The complete script, banner included. Empty for an empty selection.
    pub source: String,
    /// Members whose fragments made it into `source`, in emission order.
    pub emitted: Vec<String>,
    pub warnings: Vec<GenWarning>,
}

impl GeneratedModule {
    /// True when nothing was generated.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Whether a public function ended up as a `lodash.<name>` member.
    pub fn exposes(&self, name: &str) -> bool {
        self.source.contains(&format!("lodash.{name} = "))
    }
}

#[derive(Serialize)]
struct Assignment<'a> {
    name: &'a str,
    binding: &'a str,
}

/// Everything `module.js.jinja` reads.
#[derive(Serialize)]
struct ModuleContext<'a> {
    strict: bool,
    free_exports: bool,
    helpers: Vec<&'a str>,
    functions: Vec<&'a str>,
    statics: Vec<Assignment<'a>>,
    mixin: bool,
    prototype: Vec<Assignment<'a>>,
    version: &'static str,
    exports: String,
}

struct Selected<'a> {
    entry: &'a FunctionEntry,
    source: &'a str,
}

/// Generates the module for `set` under `config`.
///
/// An empty exposed set produces an empty source and an
/// [`WarningKind::EmptySelection`] warning rather than a module with no
/// functions.
///
/// `set` should already be closed over dependencies. Members whose fragment
/// cannot be used are dropped with a warning, together with everything that
/// depends on them.
///
/// # Errors
///
/// - [`GenError::Template`] if the module template fails to render
/// - [`GenError::InvalidOutput`] if the wrapped module does not parse, which
///   in practice means a broken `iife=` template
///
/// # Example
///
/// ```rust
/// use carve_config::BuildConfig;
/// use carve_gen::generate;
/// use carve_registry::{Registry, ResolvedSet};
///
/// let registry = Registry::builtin().unwrap();
/// let set = ResolvedSet::new(vec!["identity".into()], vec!["identity".into()]);
/// let module = generate(&registry, &set, &BuildConfig::default()).unwrap();
///
/// assert!(module.exposes("identity"));
/// assert!(module.source.contains("lodash.VERSION = '1.0.0-rc.3';"));
/// ```
pub fn generate(
    registry: &Registry,
    set: &ResolvedSet,
    config: &BuildConfig,
) -> Result<GeneratedModule> {
    let mut warnings = Vec::new();

    if set.is_empty() {
        warnings.push(GenWarning::new(
            WarningKind::EmptySelection,
            "no functions selected, generated module is empty",
        ));
        return Ok(GeneratedModule {
            warnings,
            ..Default::default()
        });
    }

    let selected = select_fragments(registry, set, config, &mut warnings);
    let emitted: FxHashSet<&str> = selected.iter().map(|s| s.entry.name()).collect();

    let mut statics = Vec::new();
    let mut prototype = Vec::new();
    for name in set.exposed() {
        let Some(entry) = registry.lookup(name) else {
            continue;
        };
        if !emitted.contains(entry.name()) {
            continue;
        }
        if entry.is_static() {
            statics.push(Assignment {
                name: entry.name(),
                binding: entry.binding(),
            });
            for alias in entry.aliases() {
                statics.push(Assignment {
                    name: alias,
                    binding: entry.binding(),
                });
            }
        }
        if let Some(binding) = entry.prototype_binding() {
            prototype.push(Assignment {
                name: entry.name(),
                binding,
            });
        }
    }

    let context = ModuleContext {
        strict: config.is_strict(),
        free_exports: needs_free_exports(&config.exports),
        helpers: selected
            .iter()
            .filter(|s| s.entry.is_helper())
            .map(|s| s.source)
            .collect(),
        functions: selected
            .iter()
            .filter(|s| !s.entry.is_helper())
            .map(|s| s.source)
            .collect(),
        statics,
        mixin: emitted.contains("mixin"),
        prototype,
        version: LIBRARY_VERSION,
        exports: export_ladder(&config.exports),
    };

    let body = render(&context)?;
    let wrapped = match &config.wrapper {
        Some(wrapper) => wrapper.wrap(&body),
        None => WrapperTemplate::default_iife().wrap(&indent(&body, "  ")),
    };
    let source = format!("{}\n{}\n", banner(config), wrapped);

    let errors = syntax_errors(&source);
    if !errors.is_empty() {
        return Err(GenError::invalid_output(&errors));
    }

    for name in free_references(&source)? {
        if let Some(entry) = registry.entry_for_binding(&name) {
            warnings.push(GenWarning::new(
                WarningKind::DependencyGap,
                format!(
                    "'{name}' is read but never declared; it is provided by '{}'",
                    entry.name()
                ),
            ));
        }
    }

    tracing::debug!(
        members = set.len(),
        emitted = selected.len(),
        bytes = source.len(),
        "generated module"
    );

    Ok(GeneratedModule {
        source,
        emitted: selected.iter().map(|s| s.entry.name().to_string()).collect(),
        warnings,
    })
}

/// Picks one parsing fragment per member, in member order.
///
/// Members that cannot be emitted end up in no list at all; the warnings say
/// why.
fn select_fragments<'a>(
    registry: &'a Registry,
    set: &ResolvedSet,
    config: &BuildConfig,
    warnings: &mut Vec<GenWarning>,
) -> Vec<Selected<'a>> {
    let strict = config.is_strict();
    let mut selected = Vec::with_capacity(set.len());
    let mut dropped: BTreeSet<&str> = BTreeSet::new();

    for name in set.members() {
        let Some(entry) = registry.lookup(name) else {
            tracing::debug!("skipping '{name}', not in the registry");
            continue;
        };

        let variant = entry.select_variant(|tag| config.modes.is_active(tag));
        if fragment_parses(variant.source, strict) {
            selected.push(Selected {
                entry,
                source: variant.source,
            });
            continue;
        }

        let default = entry.default_source();
        if variant.tag != ModeTag::Default && fragment_parses(default, strict) {
            warnings.push(GenWarning::new(
                WarningKind::VariantFallback,
                format!(
                    "'{}' variant of '{name}' does not parse, using the default",
                    variant.tag
                ),
            ));
            selected.push(Selected {
                entry,
                source: default,
            });
        } else {
            warnings.push(GenWarning::new(
                WarningKind::Excluded,
                format!("'{name}' does not parse and was left out"),
            ));
            dropped.insert(entry.name());
        }
    }

    // members that depend on a dropped one cannot work either
    loop {
        let before = dropped.len();
        selected.retain(|s| {
            let missing = s
                .entry
                .dependencies()
                .iter()
                .find(|dependency| dropped.contains(dependency.as_str()));
            match missing {
                Some(dependency) => {
                    warnings.push(GenWarning::new(
                        WarningKind::ExcludedDependency,
                        format!(
                            "'{}' was left out because '{dependency}' was",
                            s.entry.name()
                        ),
                    ));
                    dropped.insert(s.entry.name());
                    false
                }
                None => true,
            }
        });
        if dropped.len() == before {
            break;
        }
    }

    selected
}

/// Renders the unwrapped body. Fragments are inserted as-is, no escaping.
fn render(context: &ModuleContext<'_>) -> Result<String> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template("module.js", MODULE_TEMPLATE)?;

    let rendered = env.get_template("module.js")?.render(context)?;
    Ok(rendered.trim_end().to_string())
}
