//! Configuration management for the model generator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (modelgen.toml)
//! - Environment variables (MODELGEN_*)
//!
//! ## Example config file (modelgen.toml):
//! ```toml
//! [catalog]
//! path = "./types"
//!
//! [gateway]
//! rest_api_id = "a1b2c3d4e5"
//!
//! [generator]
//! ordering = "reference-count"
//! memoize_inlines = false
//!
//! [output]
//! format = "pretty"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::plan::OrderingStrategy;
use crate::registry::GeneratorOptions;

/// Main configuration for the model generator
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneratorConfig {
    /// Catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Target gateway settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Generation settings
    #[serde(default)]
    pub generator: GenerationConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding the type declaration files
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

/// Target gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Base identifier used to build cross-reference URIs
    #[serde(default)]
    pub rest_api_id: String,
}

/// Generation configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenerationConfig {
    /// Registration order policy
    #[serde(default)]
    pub ordering: OrderingStrategy,

    /// Cache repeated inlines of the same unregistered type
    #[serde(default)]
    pub memoize_inlines: bool,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format (pretty or compact)
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("./types")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = ["modelgen.toml", ".modelgen.toml", "config/modelgen.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "gateway-models", "modelgen")
        {
            let xdg_config = config_dir.config_dir().join("modelgen.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (MODELGEN_*)
        builder = builder.add_source(
            Environment::with_prefix("MODELGEN")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Get the catalog path (resolves relative paths)
    pub fn catalog_path(&self) -> PathBuf {
        if self.catalog.path.is_absolute() {
            self.catalog.path.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&self.catalog.path)
        }
    }

    /// Project the configuration into run options
    pub fn options(&self) -> GeneratorOptions {
        GeneratorOptions::new(self.gateway.rest_api_id.clone())
            .with_ordering(self.generator.ordering)
            .with_memoized_inlines(self.generator.memoize_inlines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.catalog.path, PathBuf::from("./types"));
        assert_eq!(config.generator.ordering, OrderingStrategy::ReferenceCount);
        assert!(!config.generator.memoize_inlines);
        assert_eq!(config.output.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_serialize_config() {
        let config = GeneratorConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[catalog]"));
        assert!(toml_str.contains("[gateway]"));
        assert!(toml_str.contains("[generator]"));
    }

    #[test]
    fn test_options_projection() {
        let mut config = GeneratorConfig::default();
        config.gateway.rest_api_id = "abc123".to_string();
        config.generator.ordering = OrderingStrategy::Topological;
        let options = config.options();
        assert_eq!(options.rest_api_id, "abc123");
        assert_eq!(options.ordering, OrderingStrategy::Topological);
    }
}
