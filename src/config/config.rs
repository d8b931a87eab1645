//! Config file handling

use std::path::Path;

use tracing::{debug, warn};

use crate::context::Environment;
use crate::errors::PlanError;

/// fetchplan's own settings, from `config.toml`
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Flags placed in front of the command-line directives
    pub default_options: Vec<String>,
    /// Most URLs a single operation may expand to
    pub max_urls: Option<usize>,
}

impl Config {
    /// Load configuration from the config file (TOML format)
    pub fn load(env: &Environment) -> Result<Self, PlanError> {
        let config_file = env.tool_config_dir().join("config.toml");

        if !config_file.exists() {
            debug!(path = %config_file.display(), "no tool config");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_file)
            .map_err(|e| PlanError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&content, &config_file)
    }

    /// Parse `config.toml` content; `origin` only labels errors
    pub fn parse(content: &str, origin: &Path) -> Result<Self, PlanError> {
        let toml_value: toml::Value = toml::from_str(content).map_err(|e| {
            PlanError::Config(format!("Invalid config TOML in {}: {}", origin.display(), e))
        })?;

        let default_options = toml_value
            .get("defaults")
            .and_then(|d| d.get("options"))
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        let max_urls = match toml_value.get("limits").and_then(|l| l.get("max_urls")) {
            None => None,
            Some(value) => {
                let limit = value
                    .as_integer()
                    .and_then(|n| usize::try_from(n).ok())
                    .filter(|n| *n > 0)
                    .ok_or_else(|| {
                        PlanError::Config(format!(
                            "limits.max_urls must be a positive integer, got {}",
                            value
                        ))
                    })?;
                Some(limit)
            }
        };

        Ok(Self {
            default_options,
            max_urls,
        })
    }
}

/// Put the configured default flags in front of `args`.
///
/// Only flags are taken; positional entries would become URLs and are
/// dropped with a warning.
pub fn merge_default_options(args: Vec<String>, config: &Config) -> Vec<String> {
    if config.default_options.is_empty() {
        return args;
    }

    let (flags, positional): (Vec<_>, Vec<_>) = config
        .default_options
        .iter()
        .partition(|opt| opt.starts_with('-'));

    if !positional.is_empty() {
        warn!(
            ignored = ?positional,
            "positional entries in defaults.options are ignored, only flags can be defaults"
        );
    }

    if flags.is_empty() {
        return args;
    }

    let mut merged = Vec::with_capacity(args.len() + flags.len());
    merged.extend(flags.into_iter().cloned());
    merged.extend(args);
    merged
}
