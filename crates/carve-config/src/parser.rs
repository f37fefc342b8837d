//! Token grammar for build commands.
//!
//! A command is an ordered list of tokens such as
//! `["backbone", "legacy", "plus=pick", "exports=amd", "-o", "out.js"]`.
//! Parsing is a single left-to-right pass; later tokens append to the lists
//! earlier ones started.

use carve_registry::{BundleKind, Category, ModeTag, Registry};
use serde::{Deserialize, Serialize};

use crate::command::{BuildConfig, Delivery, ExportSet, OutputMode};
use crate::error::{ConfigError, Result};
use crate::wrapper::WrapperTemplate;

const LIST_DIRECTIVES: [&str; 5] = ["include", "exclude", "plus", "minus", "category"];

/// What to do with names the registry does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamePolicy {
    /// Drop unknown names and build with what is left.
    #[default]
    Permissive,
    /// Reject the command on the first unknown name.
    Strict,
}

/// Settings-driven knobs for [`parse_tokens`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub names: NamePolicy,
    /// Used when the command has no `exports=` token.
    pub default_exports: ExportSet,
}

/// Parses a build command into a [`BuildConfig`].
///
/// The registry supplies the name vocabulary checked under
/// [`NamePolicy::Strict`].
pub fn parse_tokens<S: AsRef<str>>(
    tokens: &[S],
    registry: &Registry,
    options: &ParseOptions,
) -> Result<BuildConfig> {
    let mut config = BuildConfig {
        exports: options.default_exports.clone(),
        ..Default::default()
    };

    let mut tokens = tokens.iter().map(AsRef::as_ref);
    while let Some(token) = tokens.next() {
        if token.is_empty() {
            continue;
        }

        if token.starts_with('-') {
            match token {
                "-o" | "--output" => {
                    let path = tokens
                        .next()
                        .filter(|path| !path.is_empty() && !path.starts_with('-'))
                        .ok_or_else(|| ConfigError::missing_path(token))?;
                    config.delivery = Delivery::File(path.into());
                }
                "-c" | "--stdout" => config.delivery = Delivery::Stdout,
                "-s" | "--silent" => config.silent = true,
                "-d" | "--debug" => config.output_mode = OutputMode::Debug,
                "-m" | "--minify" => {
                    if config.output_mode != OutputMode::Debug {
                        config.output_mode = OutputMode::Minify;
                    }
                }
                _ => {
                    return Err(ConfigError::UnknownOption {
                        token: token.to_string(),
                    });
                }
            }
            continue;
        }

        match token.split_once('=') {
            Some((key, value)) => apply_directive(&mut config, token, key, value, registry, options)?,
            None => apply_keyword(&mut config, token)?,
        }
        config.directives.push(token.to_string());
    }

    tracing::debug!(
        directives = config.directives.len(),
        exports = %config.exports,
        "parsed build command"
    );
    Ok(config)
}

fn apply_directive(
    config: &mut BuildConfig,
    token: &str,
    key: &str,
    value: &str,
    registry: &Registry,
    options: &ParseOptions,
) -> Result<()> {
    match key {
        "include" | "plus" | "minus" | "exclude" => {
            let names = split_list(value);
            if options.names == NamePolicy::Strict {
                check_names(&names, key, registry)?;
            }
            let list = match key {
                "include" => config.include.get_or_insert_with(Vec::new),
                "plus" => &mut config.plus,
                "minus" => &mut config.minus,
                _ => &mut config.exclude,
            };
            list.extend(names);
        }
        "category" => {
            for name in split_list(value) {
                match Category::from_loose(&name) {
                    Some(category) if !config.categories.contains(&category) => {
                        config.categories.push(category);
                    }
                    Some(_) => {}
                    None if options.names == NamePolicy::Strict => {
                        return Err(ConfigError::UnknownCategory { name });
                    }
                    None => tracing::debug!("dropping unknown category '{name}'"),
                }
            }
        }
        "exports" => config.exports = ExportSet::from_names(value.split(',')),
        "iife" => config.wrapper = Some(WrapperTemplate::new(value)?),
        _ => {
            return Err(ConfigError::UnknownDirective {
                token: token.to_string(),
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

fn apply_keyword(config: &mut BuildConfig, token: &str) -> Result<()> {
    if LIST_DIRECTIVES.contains(&token) || matches!(token, "exports" | "iife") {
        return Err(ConfigError::missing_value(token));
    }

    if let Some(bundle) = BundleKind::from_keyword(token) {
        if !config.bundles.contains(&bundle) {
            config.bundles.push(bundle);
        }
        if bundle == BundleKind::Underscore {
            config.modes.insert(ModeTag::Underscore);
        }
        return Ok(());
    }

    match token.parse::<ModeTag>() {
        Ok(tag) if tag != ModeTag::Default => {
            config.modes.insert(tag);
            Ok(())
        }
        _ => Err(ConfigError::UnknownKeyword {
            token: token.to_string(),
        }),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn check_names(names: &[String], directive: &str, registry: &Registry) -> Result<()> {
    match names
        .iter()
        .find(|name| Category::from_exact(name).is_none() && !registry.is_public_name(name))
    {
        Some(name) => Err(ConfigError::UnknownName {
            name: name.clone(),
            directive: directive.to_string(),
        }),
        None => Ok(()),
    }
}
