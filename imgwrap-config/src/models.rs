use std::path::PathBuf;

use imgwrap_core::{ImageManager, ResourceCache};
use imgwrap_model::PresentationConfig;
use serde::{Deserialize, Serialize};

/// Source that produced the manager configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => f.write_str("built-in defaults"),
            ConfigSource::EnvPath(path) => {
                write!(f, "$IMGWRAP_CONFIG_PATH ({})", path.display())
            }
            ConfigSource::EnvInline => f.write_str("$IMGWRAP_CONFIG_JSON"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Settings shared by every consumer an [`ImageManager`] hands out.
///
/// ```toml
/// [presentation]
/// pending = "img-loading"
/// error = "img-error"
/// ready = "img-success"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Default presentation tag per resource status. Consumers may override
    /// individual entries; unset entries keep following these.
    pub presentation: PresentationConfig,
}

impl ManagerConfig {
    /// Build a manager over `cache` using these defaults.
    pub fn build_manager<C: ResourceCache>(&self, cache: C) -> ImageManager<C> {
        ImageManager::new(cache, self.presentation.clone())
    }
}
