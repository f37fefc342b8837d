//! Reference analysis over generated source.
//!
//! The analysis is scope-insensitive: a name counts as bound when any
//! declaration, parameter or catch clause in the source binds it. That is
//! enough to find identifiers a module reads without ever declaring, which
//! for a generated module means either a host global or a missing fragment.

use std::collections::BTreeSet;

use oxc_allocator::Allocator;
use oxc_ast::ast::{BindingIdentifier, IdentifierReference};
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_span::SourceType;
use rustc_hash::FxHashSet;

use crate::error::{GenError, Result};

/// Collects every identifier read and every identifier bound.
///
/// Property keys and member names are neither: oxc visits them as
/// `IdentifierName`, which this visitor leaves alone.
#[derive(Default)]
struct ReferenceCollector {
    referenced: FxHashSet<String>,
    bound: FxHashSet<String>,
}

impl<'a> Visit<'a> for ReferenceCollector {
    fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'a>) {
        self.referenced.insert(ident.name.as_str().to_string());
    }

    fn visit_binding_identifier(&mut self, ident: &BindingIdentifier<'a>) {
        self.bound.insert(ident.name.as_str().to_string());
    }
}

/// Identifiers read by `source` but bound nowhere in it, sorted.
///
/// Assignment targets count as reads, so `window._ = lodash` reports
/// `window` unless something declares it.
///
/// # Errors
///
/// Returns [`GenError::Unparsable`] with the first parser message when
/// `source` is not a valid script.
///
/// # Example
///
/// ```rust
/// use carve_gen::free_references;
///
/// let free = free_references("function max(a) { return nativeMax(a); }").unwrap();
/// assert_eq!(free.into_iter().collect::<Vec<_>>(), ["nativeMax"]);
/// ```
pub fn free_references(source: &str) -> Result<BTreeSet<String>> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::mjs().with_script(true)).parse();
    if let Some(err) = ret.errors.first() {
        return Err(GenError::Unparsable {
            reason: err.to_string(),
        });
    }

    let mut collector = ReferenceCollector::default();
    collector.visit_program(&ret.program);

    Ok(collector
        .referenced
        .into_iter()
        .filter(|name| !collector.bound.contains(name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free(source: &str) -> Vec<String> {
        free_references(source).unwrap().into_iter().collect()
    }

    #[test]
    fn test_declared_names_are_bound() {
        let source = r#"
var slice = Array.prototype.slice;
function first(array, n) {
  try {
    return slice.call(array, 0, n);
  } catch (e) {
    return e;
  }
}
"#;
        assert_eq!(free(source), vec!["Array"]);
    }

    #[test]
    fn test_missing_helper_is_free() {
        let source = "function max(array) { return nativeMax.apply(Math, array); }";
        assert_eq!(free(source), vec!["Math", "nativeMax"]);
    }

    #[test]
    fn test_property_names_are_not_references() {
        let source = "var o = { keys: 1 }; o.values = o.keys; lodash.map = o;";
        assert_eq!(free(source), vec!["lodash"]);
    }

    #[test]
    fn test_assignment_targets_count_as_reads() {
        assert_eq!(free("window._ = 1; undeclared = 2;"), vec!["undeclared", "window"]);
    }

    #[test]
    fn test_unparsable_source() {
        let err = free_references("function (").unwrap_err();
        assert!(matches!(err, GenError::Unparsable { .. }));
    }
}
