//! Named selections shipped with the registry.

use std::fmt;

/// A bundle reachable through a bare command keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BundleKind {
    /// Functions the Backbone framework depends on.
    Backbone,
    /// The public surface of the sibling library.
    Underscore,
}

impl BundleKind {
    pub const ALL: [BundleKind; 2] = [BundleKind::Backbone, BundleKind::Underscore];

    pub fn as_str(&self) -> &'static str {
        match self {
            BundleKind::Backbone => "backbone",
            BundleKind::Underscore => "underscore",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == keyword)
    }
}

impl fmt::Display for BundleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
