//! The parsed build command.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use carve_registry::{BundleKind, Category, ModeTag};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::wrapper::WrapperTemplate;

/// A module-exposure format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Amd,
    Commonjs,
    Global,
    Node,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Amd,
        ExportFormat::Commonjs,
        ExportFormat::Global,
        ExportFormat::Node,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Amd => "amd",
            ExportFormat::Commonjs => "commonjs",
            ExportFormat::Global => "global",
            ExportFormat::Node => "node",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| format!("unknown export format '{s}'"))
    }
}

/// Ordered, duplicate-free set of export formats. Empty means `none`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSet(IndexSet<ExportFormat>);

impl ExportSet {
    /// No exposure at all.
    pub fn none() -> Self {
        Self(IndexSet::new())
    }

    /// Parses names such as `amd`, `node` or `none`.
    ///
    /// Unrecognised names are dropped. `none` contributes nothing, so an
    /// all-`none` list is the empty set.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = IndexSet::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() || name == "none" {
                continue;
            }
            match name.parse::<ExportFormat>() {
                Ok(format) => {
                    set.insert(format);
                }
                Err(reason) => tracing::debug!("dropping export: {reason}"),
            }
        }
        Self(set)
    }

    pub fn contains(&self, format: ExportFormat) -> bool {
        self.0.contains(&format)
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ExportFormat> + '_ {
        self.0.iter().copied()
    }
}

impl Default for ExportSet {
    /// Every format.
    fn default() -> Self {
        Self(ExportFormat::ALL.into_iter().collect())
    }
}

impl fmt::Display for ExportSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.iter().map(|format| format.as_str()).collect();
        f.write_str(&names.join(","))
    }
}

/// Active build modes. `default` is implicitly always active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeFlags(BTreeSet<ModeTag>);

impl ModeFlags {
    pub fn insert(&mut self, tag: ModeTag) {
        if tag != ModeTag::Default {
            self.0.insert(tag);
        }
    }

    pub fn is_active(&self, tag: ModeTag) -> bool {
        tag == ModeTag::Default || self.0.contains(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ModeTag> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ModeTag> for ModeFlags {
    fn from_iter<T: IntoIterator<Item = ModeTag>>(iter: T) -> Self {
        let mut flags = ModeFlags::default();
        for tag in iter {
            flags.insert(tag);
        }
        flags
    }
}

/// Where the finished source goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Delivery {
    /// A file named after the build profile.
    #[default]
    DefaultFile,
    /// `-o <path>`.
    File(PathBuf),
    /// `-c`; no file is written.
    Stdout,
}

/// Whether the size-reducing pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Follow the `minify` setting.
    #[default]
    Default,
    /// `-d`: never reduce.
    Debug,
    /// `-m`: always reduce.
    Minify,
}

/// Everything a build command asked for. Built once by the parser and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildConfig {
    /// `include=`; `Some(vec![])` is an explicit empty selection.
    pub include: Option<Vec<String>>,
    pub categories: Vec<Category>,
    pub bundles: Vec<BundleKind>,
    pub plus: Vec<String>,
    pub minus: Vec<String>,
    pub exclude: Vec<String>,
    pub modes: ModeFlags,
    pub exports: ExportSet,
    pub wrapper: Option<WrapperTemplate>,
    pub delivery: Delivery,
    pub output_mode: OutputMode,
    pub silent: bool,
    /// Tokens that shape the module (everything except delivery and output
    /// flags), echoed into the banner.
    pub directives: Vec<String>,
}

impl BuildConfig {
    /// True when the command changes anything about the module itself.
    pub fn is_custom(&self) -> bool {
        !self.directives.is_empty()
    }

    /// The directive tokens as a single command line.
    pub fn command_line(&self) -> String {
        self.directives.join(" ")
    }

    pub fn is_strict(&self) -> bool {
        self.modes.is_active(ModeTag::Strict)
    }

    /// Single keyword naming the whole build, such as `underscore`.
    ///
    /// Used for default output file names.
    pub fn profile(&self) -> Option<&str> {
        match self.directives.as_slice() {
            [only] if BundleKind::from_keyword(only).is_some() => Some(only.as_str()),
            [only] if only.parse::<ModeTag>().is_ok_and(|tag| tag != ModeTag::Default) => {
                Some(only.as_str())
            }
            _ => None,
        }
    }
}
