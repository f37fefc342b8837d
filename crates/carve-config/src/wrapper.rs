//! Custom wrapper templates supplied with `iife=`.

use std::fmt;

use crate::error::{ConfigError, Result};

/// Placeholder replaced by the module body.
pub const OUTPUT_MARKER: &str = "%output%";

/// A wrapper with exactly one [`OUTPUT_MARKER`], checked on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperTemplate {
    prefix: String,
    suffix: String,
}

impl WrapperTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        let found = template.matches(OUTPUT_MARKER).count();
        match template.split_once(OUTPUT_MARKER) {
            Some((prefix, suffix)) if found == 1 => Ok(Self {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            }),
            _ => Err(ConfigError::InvalidWrapper { template, found }),
        }
    }

    /// The wrapper used when no `iife=` is given.
    pub fn default_iife() -> Self {
        Self {
            prefix: ";(function(window, undefined) {\n".to_string(),
            suffix: "\n}(this));".to_string(),
        }
    }

    /// Substitutes `body` at the marker.
    pub fn wrap(&self, body: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + body.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(body);
        out.push_str(&self.suffix);
        out
    }
}

impl fmt::Display for WrapperTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, OUTPUT_MARKER, self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_substitutes_marker() {
        let wrapper =
            WrapperTemplate::new(r#"this["lodash"]=(function(window,undefined){%output%;return lodash}(this))"#)
                .unwrap();
        assert_eq!(
            wrapper.wrap("var a = 1"),
            r#"this["lodash"]=(function(window,undefined){var a = 1;return lodash}(this))"#
        );
    }

    #[test]
    fn test_marker_count_is_checked() {
        let err = WrapperTemplate::new("(function(){}())").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWrapper { found: 0, .. }));

        let err = WrapperTemplate::new("%output%;%output%").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWrapper { found: 2, .. }));
    }

    #[test]
    fn test_display_restores_template() {
        let template = "define(function(){%output%})";
        assert_eq!(WrapperTemplate::new(template).unwrap().to_string(), template);
        assert!(WrapperTemplate::default_iife().to_string().contains(OUTPUT_MARKER));
    }
}
