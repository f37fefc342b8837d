//! Registry entry types: categories, mode tags, and function entries.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;

/// Public function grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum Category {
    Arrays,
    Chaining,
    Collections,
    Functions,
    Objects,
    Utilities,
}

impl Category {
    /// All categories in canonical order.
    pub const ALL: [Category; 6] = [
        Category::Arrays,
        Category::Chaining,
        Category::Collections,
        Category::Functions,
        Category::Objects,
        Category::Utilities,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Arrays => "Arrays",
            Category::Chaining => "Chaining",
            Category::Collections => "Collections",
            Category::Functions => "Functions",
            Category::Objects => "Objects",
            Category::Utilities => "Utilities",
        }
    }

    /// Matches the exact capitalized name only.
    ///
    /// Name lists use this form so that `functions` keeps meaning the Objects
    /// function while `Functions` means the category.
    pub fn from_exact(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Case-insensitive match, used by the `category=` directive.
    pub fn from_loose(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build mode a fragment variant is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeTag {
    Default,
    Underscore,
    Mobile,
    Legacy,
    Csp,
    Strict,
}

impl ModeTag {
    /// Global variant precedence, highest first.
    pub const PRECEDENCE: [ModeTag; 6] = [
        ModeTag::Csp,
        ModeTag::Legacy,
        ModeTag::Mobile,
        ModeTag::Underscore,
        ModeTag::Strict,
        ModeTag::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeTag::Default => "default",
            ModeTag::Underscore => "underscore",
            ModeTag::Mobile => "mobile",
            ModeTag::Legacy => "legacy",
            ModeTag::Csp => "csp",
            ModeTag::Strict => "strict",
        }
    }
}

impl fmt::Display for ModeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModeTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(ModeTag::Default),
            "underscore" => Ok(ModeTag::Underscore),
            "mobile" => Ok(ModeTag::Mobile),
            "legacy" => Ok(ModeTag::Legacy),
            "csp" => Ok(ModeTag::Csp),
            "strict" => Ok(ModeTag::Strict),
            other => Err(format!("unknown mode '{other}'")),
        }
    }
}

/// Whether an entry is part of the public surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Public(Category),
    Helper,
}

/// A source fragment chosen for a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant<'a> {
    pub tag: ModeTag,
    pub source: &'a str,
}

/// One library function or private helper.
#[derive(Debug, Clone)]
pub struct FunctionEntry {
    pub(crate) name: String,
    pub(crate) kind: EntryKind,
    pub(crate) aliases: Vec<String>,
    pub(crate) dependencies: Vec<String>,
    pub(crate) binding: String,
    pub(crate) provides: Vec<String>,
    pub(crate) static_member: bool,
    pub(crate) prototype: Option<String>,
    pub(crate) precedence: Option<Vec<ModeTag>>,
    pub(crate) default_source: Arc<str>,
    pub(crate) overrides: IndexMap<ModeTag, Arc<str>>,
}

impl FunctionEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn category(&self) -> Option<Category> {
        match self.kind {
            EntryKind::Public(category) => Some(category),
            EntryKind::Helper => None,
        }
    }

    pub fn is_helper(&self) -> bool {
        self.kind == EntryKind::Helper
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// JavaScript identifier the fragment defines for this entry.
    pub fn binding(&self) -> &str {
        &self.binding
    }

    /// Every top-level identifier the fragment declares.
    pub fn provides(&self) -> &[String] {
        &self.provides
    }

    /// Whether the function is assigned onto `lodash` itself.
    pub fn is_static(&self) -> bool {
        self.static_member
    }

    /// Identifier assigned onto `lodash.prototype`, if any.
    pub fn prototype_binding(&self) -> Option<&str> {
        self.prototype.as_deref()
    }

    pub fn default_source(&self) -> &str {
        &self.default_source
    }

    /// Source for `tag`, if the entry carries that variant.
    pub fn variant(&self, tag: ModeTag) -> Option<&str> {
        match tag {
            ModeTag::Default => Some(&*self.default_source),
            other => self.overrides.get(&other).map(|source| &**source),
        }
    }

    /// Tags this entry has fragments for, `default` first.
    pub fn tags(&self) -> impl Iterator<Item = ModeTag> + '_ {
        std::iter::once(ModeTag::Default).chain(self.overrides.keys().copied())
    }

    /// Variant precedence for this entry, highest first.
    pub fn precedence(&self) -> &[ModeTag] {
        self.precedence
            .as_deref()
            .unwrap_or(&ModeTag::PRECEDENCE[..])
    }

    /// Picks the highest-precedence variant whose tag is active.
    ///
    /// `default` is always eligible, so this never fails.
    pub fn select_variant(&self, is_active: impl Fn(ModeTag) -> bool) -> Variant<'_> {
        self.precedence()
            .iter()
            .copied()
            .filter(|tag| *tag != ModeTag::Default && is_active(*tag))
            .find_map(|tag| self.variant(tag).map(|source| Variant { tag, source }))
            .unwrap_or(Variant {
                tag: ModeTag::Default,
                source: &*self.default_source,
            })
    }
}
