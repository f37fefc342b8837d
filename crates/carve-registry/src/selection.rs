//! The resolved set of functions a build emits.

use rustc_hash::FxHashSet;

/// Outcome of selection resolution.
///
/// `members` is closed under dependencies, duplicate-free, and kept in
/// registry declaration order (helpers included). `exposed` is the subset of
/// public functions the command asked for; only those are attached to the
/// library object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSet {
    members: Vec<String>,
    exposed: Vec<String>,
    lookup: FxHashSet<String>,
}

impl ResolvedSet {
    pub fn new(members: Vec<String>, exposed: Vec<String>) -> Self {
        let lookup = members.iter().cloned().collect();
        Self {
            members,
            exposed,
            lookup,
        }
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn exposed(&self) -> &[String] {
        &self.exposed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(name)
    }

    pub fn is_exposed(&self, name: &str) -> bool {
        self.exposed.iter().any(|exposed| exposed == name)
    }

    /// True when nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.exposed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_and_exposure_differ() {
        let set = ResolvedSet::new(
            vec!["slice".into(), "first".into(), "last".into()],
            vec!["first".into()],
        );

        assert!(set.contains("last"));
        assert!(!set.is_exposed("last"));
        assert!(set.is_exposed("first"));
        assert!(!set.contains("map"));
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_default_is_empty() {
        let set = ResolvedSet::default();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
