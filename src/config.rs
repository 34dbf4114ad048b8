//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/formtree/formtree.toml`
//! 3. Local config: an explicitly given file, e.g. next to a form definition
//! 4. Environment variables: `FORMTREE_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{BindingPolicy, DuplicateNamePolicy, NodeTree, UnknownKeyPolicy};
use crate::error::{FormtreeError, FormtreeResult};

/// Unified configuration for formtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Data binding and child replacement rules
    pub binding: BindingPolicy,
}

/// Raw binding section for intermediate parsing (`None` → not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawBindingConfig {
    pub unknown_keys: Option<UnknownKeyPolicy>,
    pub duplicate_names: Option<DuplicateNamePolicy>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub binding: RawBindingConfig,
}

/// Get the XDG config directory for formtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "formtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("formtree.toml"))
}

fn config_err(e: ConfigError) -> FormtreeError {
    FormtreeError::Config {
        message: e.to_string(),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> FormtreeResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| FormtreeError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| FormtreeError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            binding: BindingPolicy {
                unknown_keys: overlay
                    .binding
                    .unknown_keys
                    .unwrap_or(self.binding.unknown_keys),
                duplicate_names: overlay
                    .binding
                    .duplicate_names
                    .unwrap_or(self.binding.duplicate_names),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_file` - Optional config file applied on top of the global one
    ///
    /// A missing global file is skipped; a missing `local_file` is an error.
    #[instrument(level = "debug")]
    pub fn load(local_file: Option<&Path>) -> FormtreeResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
                debug!(path = %global_path.display(), "applied global config");
            }
        }

        if let Some(local) = local_file {
            current = current.merge_with(&Self::load_file(local)?);
            debug!(path = %local.display(), "applied local config");
        }

        current = Self::apply_env_overrides(current)?;
        Ok(current)
    }

    /// Load one config file without defaults merging.
    pub fn load_file(path: &Path) -> FormtreeResult<RawSettings> {
        load_raw_settings(path)
    }

    /// Parse settings from a TOML string on top of the defaults.
    pub fn from_toml_str(content: &str) -> FormtreeResult<Self> {
        let raw: RawSettings = toml::from_str(content).map_err(|e| FormtreeError::Config {
            message: format!("parse: {}", e),
        })?;
        Ok(Self::default().merge_with(&raw))
    }

    /// Apply FORMTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> FormtreeResult<Self> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FORMTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("binding.unknown_keys") {
            settings.binding.unknown_keys = val.parse().map_err(|e| FormtreeError::Config {
                message: format!("FORMTREE_BINDING__UNKNOWN_KEYS: {}", e),
            })?;
        }
        if let Ok(val) = config.get_string("binding.duplicate_names") {
            settings.binding.duplicate_names = val.parse().map_err(|e| FormtreeError::Config {
                message: format!("FORMTREE_BINDING__DUPLICATE_NAMES: {}", e),
            })?;
        }

        Ok(settings)
    }

    /// An empty tree using these settings.
    pub fn new_tree(&self) -> NodeTree {
        NodeTree::with_policy(self.binding)
    }
}
