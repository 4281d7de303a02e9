//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/groupnode/groupnode.toml`
//! 3. Local config: `<scene_dir>/.groupnode.toml` (next to the scene file)
//! 4. Environment variables: `GROUPNODE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::services::ClosureStrategy;
use crate::application::ApplicationError;
use crate::domain::{DisplayType, DEFAULT_ROOT_NAME};

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub root_name: Option<String>,
    pub anchor_display: Option<DisplayType>,
    pub closure: Option<ClosureStrategy>,
}

/// Unified configuration for groupnode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Name of the scene root collection when a scene file does not name it
    pub root_name: String,
    /// Display type given to empties created from collections
    pub anchor_display: DisplayType,
    /// How descendant subtrees are collected when grouping empties
    pub closure: ClosureStrategy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            anchor_display: DisplayType::PlainAxes,
            closure: ClosureStrategy::Scan,
        }
    }
}

/// Get the XDG config directory for groupnode.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "groupnode").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("groupnode.toml"))
}

/// Get the path to the local config file next to a scene.
pub fn local_config_path(scene_dir: &Path) -> PathBuf {
    scene_dir.join(".groupnode.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            root_name: overlay
                .root_name
                .clone()
                .unwrap_or_else(|| self.root_name.clone()),
            anchor_display: overlay.anchor_display.unwrap_or(self.anchor_display),
            closure: overlay.closure.unwrap_or(self.closure),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `scene_dir` - Optional directory of the scene file for local config
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/groupnode/groupnode.toml`
    /// 3. Local config: `<scene_dir>/.groupnode.toml`
    /// 4. Environment variables: `GROUPNODE_*` prefix
    pub fn load(scene_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = scene_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply GROUPNODE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("GROUPNODE")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("root_name") {
            settings.root_name = val;
        }
        if let Ok(val) = config.get_string("anchor_display") {
            settings.anchor_display = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Ok(val) = config.get_string("closure") {
            settings.closure = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }

        Ok(settings)
    }

    /// Load settings from a single TOML file on top of the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ApplicationError> {
        let raw = load_raw_settings(path)?;
        Ok(Self::default().merge_with(&raw))
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# groupnode configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/groupnode/groupnode.toml
#   Local:  <scene_dir>/.groupnode.toml
#   Env:    GROUPNODE_* environment variables

# Name of the scene root collection when a scene file does not name one
# root_name = "Scene Collection"

# Display type of empties created from collections
# (PLAIN_AXES, ARROWS, SINGLE_ARROW, CIRCLE, CUBE, SPHERE, CONE, IMAGE)
# anchor_display = "PLAIN_AXES"

# How an empty's descendants are collected when grouping ("scan" or "index")
# closure = "scan"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_uses_scene_collection_and_plain_axes() {
        let settings = Settings::default();
        assert_eq!(settings.root_name, "Scene Collection");
        assert_eq!(settings.anchor_display, DisplayType::PlainAxes);
        assert_eq!(settings.closure, ClosureStrategy::Scan);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_only_specified_fields_change() {
        let base = Settings::default();
        let overlay = RawSettings {
            root_name: None,
            anchor_display: Some(DisplayType::Cube),
            closure: None,
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.root_name, "Scene Collection");
        assert_eq!(merged.anchor_display, DisplayType::Cube);
        assert_eq!(merged.closure, ClosureStrategy::Scan);
    }

    #[test]
    fn given_settings_when_serialized_then_uses_host_spelling() {
        let settings = Settings {
            root_name: "World".into(),
            anchor_display: DisplayType::SingleArrow,
            closure: ClosureStrategy::Index,
        };

        let text = settings.to_toml().unwrap();

        assert!(text.contains("anchor_display = \"SINGLE_ARROW\""), "{text}");
        assert!(text.contains("closure = \"index\""), "{text}");
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), Settings::default());
    }
}
