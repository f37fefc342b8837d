//! Parser checks for fragments and assembled modules.
//!
//! Both checks use oxc in script mode. They report, they never repair:
//! callers decide whether a failure is a warning or fatal.

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;

/// Parses `source` as a classic script and returns the parser's messages.
///
/// Generated modules are scripts, never ES modules, so `import`/`export`
/// are errors here.
pub fn syntax_errors(source: &str) -> Vec<String> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::mjs().with_script(true)).parse();
    ret.errors.iter().map(|err| err.to_string()).collect()
}

/// Whether a single fragment parses on its own.
///
/// Strict builds check the fragment under a `'use strict'` prologue so that
/// sloppy-only syntax is caught before assembly.
pub fn fragment_parses(source: &str, strict: bool) -> bool {
    if strict {
        syntax_errors(&format!("'use strict';\n{source}")).is_empty()
    } else {
        syntax_errors(source).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_script() {
        assert!(syntax_errors("function f(a) { return a; }").is_empty());
        assert!(syntax_errors("var o = { 'a': 1 }; o.a = typeof exports;").is_empty());
    }

    #[test]
    fn test_reports_errors() {
        assert!(!syntax_errors("function f( {").is_empty());
        assert!(!syntax_errors("export var a = 1;").is_empty());
    }

    #[test]
    fn test_fragments() {
        let fragment = "var slice = Array.prototype.slice;";
        assert!(fragment_parses(fragment, false));
        assert!(fragment_parses(fragment, true));
        assert!(!fragment_parses("function keys(object) {", true));
    }
}
