//! Generated-module tests against the builtin registry

mod common;

use std::collections::BTreeSet;

use carve_config::{BuildConfig, ExportSet, WrapperTemplate};
use carve_gen::{WarningKind, free_references, generate, syntax_errors};
use carve_registry::{Registry, ResolvedSet};
use common::{closed_set, config, full_set};
use regex::Regex;

/// Globals a generated module may read from its host.
const HOST_GLOBALS: [&str; 18] = [
    "Array",
    "Date",
    "Function",
    "Infinity",
    "Math",
    "NaN",
    "Object",
    "RegExp",
    "String",
    "TypeError",
    "arguments",
    "clearTimeout",
    "define",
    "exports",
    "module",
    "parseFloat",
    "setTimeout",
    "undefined",
];

#[test]
fn test_full_build_is_valid() {
    let registry = Registry::builtin().unwrap();
    let module = generate(&registry, &full_set(&registry), &BuildConfig::default()).unwrap();

    assert!(syntax_errors(&module.source).is_empty());
    assert!(module.warnings.is_empty(), "{:?}", module.warnings);
    assert!(module.source.starts_with("/*!\n * Lo-Dash 1.0.0-rc.3 <http://lodash.com/>"));
    assert!(module.source.contains("lodash.VERSION = '1.0.0-rc.3';"));
    assert_eq!(module.emitted.len(), registry.len());

    for name in registry.all_names() {
        let entry = registry.lookup(name).unwrap();
        if entry.is_static() {
            assert!(module.exposes(name), "{name} is not assigned");
        }
        for alias in entry.aliases() {
            assert!(module.exposes(alias), "alias {alias} is not assigned");
        }
    }
    assert!(module.source.contains("mixin(lodash);"));
    assert!(module.source.contains("lodash.prototype.value = wrapperValue;"));
    assert!(module.source.contains("lodash.prototype.chain = wrapperChain;"));
}

#[test]
fn test_helpers_come_first_and_once() {
    let registry = Registry::builtin().unwrap();
    let module = generate(
        &registry,
        &closed_set(&registry, &["range", "shuffle"]),
        &config(&["include=range,shuffle"]),
    )
    .unwrap();

    assert_eq!(module.source.matches("nativeRandom = Math.random").count(), 1);
    let helper = module.source.find("var ceil = Math.ceil").unwrap();
    let constructor = module.source.find("function lodash(value)").unwrap();
    let range = module.source.find("function range(").unwrap();
    let shuffle = module.source.find("function shuffle(").unwrap();
    assert!(helper < constructor && constructor < range && range < shuffle);
}

fn setter_body(source: &str) -> &str {
    let start = source.find("function setProperty").unwrap();
    let len = source[start..].find("\n  }\n").unwrap();
    &source[start..start + len]
}

#[test]
fn test_strict_build_uses_direct_writes() {
    let registry = Registry::builtin().unwrap();
    let set = closed_set(&registry, &["extend"]);

    let strict = generate(&registry, &set, &config(&["include=extend", "strict"])).unwrap();
    assert!(strict.source.contains("  'use strict';\n"));
    assert!(!setter_body(&strict.source).contains("try"));

    let loose = generate(&registry, &set, &config(&["include=extend"])).unwrap();
    assert!(!loose.source.contains("'use strict'"));
    assert!(setter_body(&loose.source).contains("try {"));
}

#[test]
fn test_each_export_format_emits_its_branch() {
    let registry = Registry::builtin().unwrap();
    let set = closed_set(&registry, &["identity"]);
    let define = Regex::new(r"define\(function\(\) \{\s+return lodash;").unwrap();
    let module_exports = Regex::new(r"\(module\.exports = lodash\)\._ = lodash;").unwrap();
    let free_exports = Regex::new(r"freeExports\._ = lodash;").unwrap();
    let global = Regex::new(r"window\._ = lodash;").unwrap();

    let cases = [
        ("exports=amd", [1, 0, 0, 0]),
        ("exports=commonjs", [0, 0, 1, 0]),
        ("exports=node", [0, 1, 0, 0]),
        ("exports=global", [0, 0, 0, 1]),
        ("exports=none", [0, 0, 0, 0]),
        ("exports=amd,commonjs,global,node", [1, 1, 1, 2]),
    ];
    for (token, expected) in cases {
        let module = generate(&registry, &set, &config(&["include=identity", token])).unwrap();
        let found = [
            define.find_iter(&module.source).count(),
            module_exports.find_iter(&module.source).count(),
            free_exports.find_iter(&module.source).count(),
            global.find_iter(&module.source).count(),
        ];
        assert_eq!(found, expected, "{token}");
        assert_eq!(
            module.source.contains("var freeExports"),
            expected[1] + expected[2] > 0,
            "{token}"
        );
    }
}

#[test]
fn test_custom_wrapper() {
    let registry = Registry::builtin().unwrap();
    let mut config = config(&["include=identity", "exports=none"]);
    config.wrapper = Some(
        WrapperTemplate::new("var _ = (function() {\n%output%\nreturn lodash;\n}());").unwrap(),
    );

    let module = generate(&registry, &closed_set(&registry, &["identity"]), &config).unwrap();
    assert!(module.source.contains("var _ = (function() {\n/**"));
    assert!(module.source.contains("\nfunction lodash(value) {"));
    assert!(module.source.trim_end().ends_with("return lodash;\n}());"));
    assert!(!module.source.contains("(function(window, undefined)"));
}

#[test]
fn test_empty_selection_is_empty_source() {
    let registry = Registry::builtin().unwrap();
    let config = config(&["include=", "exports="]);
    assert_eq!(config.exports, ExportSet::none());
    let module = generate(&registry, &ResolvedSet::default(), &config).unwrap();
    assert_eq!(module.source, "");
    assert_eq!(module.warnings[0].kind, WarningKind::EmptySelection);
}

#[test]
fn test_every_single_function_build_is_self_contained() {
    let registry = Registry::builtin().unwrap();
    let allowed: BTreeSet<&str> = HOST_GLOBALS.into_iter().collect();

    for name in registry.all_names() {
        let set = closed_set(&registry, &[name.as_str()]);
        let token = format!("include={name}");
        let module = generate(&registry, &set, &config(&[token.as_str()])).unwrap();
        assert!(module.warnings.is_empty(), "{name}: {:?}", module.warnings);

        let free = free_references(&module.source).unwrap();
        let unexpected: Vec<&String> = free
            .iter()
            .filter(|reference| !allowed.contains(reference.as_str()))
            .collect();
        assert!(unexpected.is_empty(), "{name} reads {unexpected:?}");
    }
}

#[test]
fn test_mode_builds_parse() {
    let registry = Registry::builtin().unwrap();
    let set = full_set(&registry);
    for tokens in [
        vec!["legacy"],
        vec!["mobile"],
        vec!["csp"],
        vec!["underscore"],
        vec!["strict"],
        vec!["underscore", "legacy", "mobile", "csp", "strict"],
    ] {
        let module = generate(&registry, &set, &config(&tokens)).unwrap();
        assert!(module.warnings.is_empty(), "{tokens:?}: {:?}", module.warnings);
        assert!(module.source.contains("(Custom Build)"));
    }
}

#[test]
fn test_small_module_shape() {
    let registry = Registry::builtin().unwrap();
    let module = generate(
        &registry,
        &closed_set(&registry, &["identity"]),
        &config(&["include=identity", "exports=none"]),
    )
    .unwrap();

    insta::assert_snapshot!(module.source.trim_end(), @r###"
    /*!
     * Lo-Dash 1.0.0-rc.3 (Custom Build) <http://lodash.com/>
     * Build: `lodash include=identity exports=none`
     * Available under MIT license <http://lodash.com/license>
     */
    ;(function(window, undefined) {
      /**
       * Creates a `lodash` object, which wraps the given `value` to enable
       * method chaining.
       */
      function lodash(value) {
        if (value instanceof lodash) {
          return value;
        }
        if (!(this instanceof lodash)) {
          return new lodash(value);
        }
        this.__wrapped__ = value;
      }

      function identity(value) {
        return value;
      }

      lodash.identity = identity;

      lodash.VERSION = '1.0.0-rc.3';
    }(this));
    "###);
}
