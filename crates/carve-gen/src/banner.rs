//! The license banner at the top of every module.
//!
//! A full build gets the plain two-line banner. Any build that selects,
//! wraps or exports differently gets the `(Custom Build)` form with the
//! command echoed back:
//!
//! ```text
//! /*!
//!  * Lo-Dash 1.0.0-rc.3 (Custom Build) <http://lodash.com/>
//!  * Build: `lodash include=map exports=amd`
//!  * Available under MIT license <http://lodash.com/license>
//!  */
//! ```
//!
//! The `/*!` opener is what minifiers key on to keep the comment.

use carve_config::BuildConfig;
use carve_registry::LIBRARY_VERSION;

/// Banner for `config`.
///
/// Custom builds record the command that produced them on a `Build:` line.
pub fn banner(config: &BuildConfig) -> String {
    if !config.is_custom() {
        return format!(
            "/*!\n * Lo-Dash {LIBRARY_VERSION} <http://lodash.com/>\n * Available under MIT license <http://lodash.com/license>\n */"
        );
    }

    // a literal `*/` in the command would end the comment early
    let command = config.command_line().replace("*/", "*\\/");
    format!(
        "/*!\n * Lo-Dash {LIBRARY_VERSION} (Custom Build) <http://lodash.com/>\n * Build: `lodash {command}`\n * Available under MIT license <http://lodash.com/license>\n */"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_build_banner() {
        let text = banner(&BuildConfig::default());
        assert!(text.starts_with("/*!\n * Lo-Dash 1.0.0-rc.3 <"));
        assert!(!text.contains("Build:"));
    }

    #[test]
    fn test_custom_build_banner() {
        let config = BuildConfig {
            directives: vec!["include=map".into(), "iife=/*%output%*/".into()],
            ..Default::default()
        };
        let text = banner(&config);
        assert!(text.contains("(Custom Build)"));
        assert!(text.contains(" * Build: `lodash include=map iife=/*%output%*\\/`\n"));
        assert_eq!(text.matches("*/").count(), 1);
    }
}
