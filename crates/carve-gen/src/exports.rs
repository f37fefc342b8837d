//! The statements that expose `lodash` to its host.
//!
//! Every selected format becomes one branch of a single `if`/`else` ladder,
//! so exactly one of them runs in any host. With every format selected the
//! ladder reads:
//!
//! ```text
//! if (<define.amd check>) {
//!   window._ = lodash;
//!   define(function() { return lodash; });
//! }
//! else if (freeExports) {
//!   if (<module.exports check>) { (module.exports = lodash)._ = lodash; }
//!   else { freeExports._ = lodash; }
//! }
//! else {
//!   window._ = lodash;
//! }
//! ```
//!
//! `window` is the wrapper's parameter, bound to the host's `this`.

use carve_config::{ExportFormat, ExportSet};

const AMD_CHECK: &str = "typeof define == 'function' && typeof define.amd == 'object' && define.amd";
const MODULE_CHECK: &str = "typeof module == 'object' && module && module.exports == freeExports";

/// Whether the module needs the `freeExports` detection variable.
///
/// Only the CommonJS and Node branches read it; declaring it otherwise would
/// leave an unused `typeof exports` check in the output.
pub fn needs_free_exports(exports: &ExportSet) -> bool {
    exports.contains(ExportFormat::Commonjs) || exports.contains(ExportFormat::Node)
}

/// Builds the `if`/`else if`/`else` ladder for `exports`.
///
/// Branches are tried in host-preference order: an AMD loader first, then a
/// CommonJS `exports` object, then the global object. Empty for `none`.
///
/// # Example
///
/// ```rust
/// use carve_config::ExportSet;
/// use carve_gen::export_ladder;
///
/// let global = ExportSet::from_names(["global"]);
/// assert_eq!(export_ladder(&global), "window._ = lodash;");
/// assert!(export_ladder(&ExportSet::none()).is_empty());
/// ```
pub fn export_ladder(exports: &ExportSet) -> String {
    let amd = exports.contains(ExportFormat::Amd);
    let commonjs = exports.contains(ExportFormat::Commonjs);
    let node = exports.contains(ExportFormat::Node);
    let global = exports.contains(ExportFormat::Global);

    let mut branches: Vec<(&str, String)> = Vec::new();

    if amd {
        let mut body = String::new();
        if global {
            // loaders may have injected the script, keep `_` reachable anyway
            body.push_str("window._ = lodash;\n\n");
        }
        body.push_str("define(function() {\n  return lodash;\n});");
        branches.push((AMD_CHECK, body));
    }

    if commonjs || node {
        let body = match (node, commonjs) {
            (true, true) => format!(
                "if ({MODULE_CHECK}) {{\n  (module.exports = lodash)._ = lodash;\n}}\nelse {{\n  freeExports._ = lodash;\n}}"
            ),
            (true, false) => format!(
                "if ({MODULE_CHECK}) {{\n  (module.exports = lodash)._ = lodash;\n}}"
            ),
            _ => "freeExports._ = lodash;".to_string(),
        };
        branches.push(("freeExports", body));
    }

    if global && branches.is_empty() {
        return "window._ = lodash;".to_string();
    }

    let mut ladder = String::new();
    for (index, (condition, body)) in branches.iter().enumerate() {
        if index == 0 {
            ladder.push_str(&format!("if ({condition}) {{\n"));
        } else {
            ladder.push_str(&format!("\nelse if ({condition}) {{\n"));
        }
        ladder.push_str(&indent(body, "  "));
        ladder.push_str("\n}");
    }
    if global {
        ladder.push_str("\nelse {\n  window._ = lodash;\n}");
    }
    ladder
}

/// Prefixes every non-empty line of `text` with `prefix`.
pub(crate) fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
