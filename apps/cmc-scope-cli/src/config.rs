//! Configuration for the `cmc-scope` binary.
//!
//! Layers, lowest priority first: built-in defaults, an optional YAML file,
//! then `CMC_SCOPE__*` environment variables (`__` separates nested keys,
//! e.g. `CMC_SCOPE__LOGGING__LEVEL=debug`).

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, ensure};
use cmc_scope::DistrictCatalog;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "CMC_SCOPE__";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive. `RUST_LOG` takes precedence.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

/// District catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Start from the built-in district table.
    pub builtin: bool,
    /// Extra or replacement `district id -> region` entries.
    pub districts: BTreeMap<String, String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            builtin: true,
            districts: BTreeMap::new(),
        }
    }
}

impl CatalogConfig {
    #[must_use]
    pub fn build(&self) -> DistrictCatalog {
        let base = if self.builtin {
            DistrictCatalog::builtin()
        } else {
            DistrictCatalog::empty()
        };
        base.with_overrides(
            self.districts
                .iter()
                .map(|(district, region)| (district.as_str(), region.as_str())),
        )
    }
}

impl AppConfig {
    /// Load configuration from defaults, `path` if given, and the environment.
    ///
    /// # Errors
    /// Returns an error if `path` does not exist, or if any layer fails to
    /// parse or contains unknown keys.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            ensure!(
                path.is_file(),
                "config file {} does not exist",
                path.display()
            );
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load configuration")
    }
}
