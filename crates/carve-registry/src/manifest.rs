//! Serde schema of the TOML library manifests.

use std::collections::BTreeMap;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::entry::{Category, EntryKind, FunctionEntry, ModeTag};
use crate::error::{RegistryError, Result};

/// A named manifest text, usually embedded with `include_str!`.
#[derive(Debug, Clone, Copy)]
pub struct ManifestSource<'a> {
    pub name: &'a str,
    pub contents: &'a str,
}

impl<'a> ManifestSource<'a> {
    pub const fn new(name: &'a str, contents: &'a str) -> Self {
        Self { name, contents }
    }

    pub(crate) fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        toml::from_str(self.contents)
            .map_err(|e| RegistryError::manifest_parse(self.name, e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct HelperManifest {
    #[serde(default)]
    pub helper: Vec<EntryDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CategoryManifest {
    pub category: Category,
    #[serde(default)]
    pub function: Vec<EntryDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BundleManifest {
    #[serde(default)]
    pub bundle: BTreeMap<String, BundleDef>,
}

/// Either an explicit member list or "everything except".
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BundleDef {
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct EntryDef {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub binding: Option<String>,
    pub provides: Option<Vec<String>>,
    #[serde(default = "default_true", rename = "static")]
    pub static_member: bool,
    pub prototype: Option<String>,
    pub precedence: Option<Vec<ModeTag>>,
    /// Shorthand for a lone `default` variant.
    pub source: Option<String>,
    #[serde(default)]
    pub variant: Vec<VariantDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct VariantDef {
    pub tags: Vec<ModeTag>,
    pub source: String,
}

fn default_true() -> bool {
    true
}

impl EntryDef {
    /// Converts the raw definition, checking its variant table.
    pub(crate) fn into_entry(self, kind: EntryKind) -> Result<FunctionEntry> {
        let mut default_source: Option<Arc<str>> = self.source.as_deref().map(normalize);
        let mut overrides: IndexMap<ModeTag, Arc<str>> = IndexMap::new();

        for variant in &self.variant {
            let source = normalize(&variant.source);
            for tag in &variant.tags {
                let taken = match tag {
                    ModeTag::Default => default_source.replace(source.clone()).is_some(),
                    other => overrides.insert(*other, source.clone()).is_some(),
                };
                if taken {
                    return Err(RegistryError::DuplicateVariant {
                        name: self.name.clone(),
                        tag: tag.to_string(),
                    });
                }
            }
        }

        let default_source = default_source.ok_or_else(|| RegistryError::MissingDefault {
            name: self.name.clone(),
        })?;

        let binding = self.binding.unwrap_or_else(|| self.name.clone());
        let provides = self.provides.unwrap_or_else(|| vec![binding.clone()]);

        Ok(FunctionEntry {
            name: self.name,
            kind,
            aliases: self.aliases,
            dependencies: self.dependencies,
            binding,
            provides,
            static_member: self.static_member,
            prototype: self.prototype,
            precedence: self.precedence,
            default_source,
            overrides,
        })
    }
}

fn normalize(source: &str) -> Arc<str> {
    Arc::from(source.trim())
}
