//! Locating and parsing the manager configuration.

pub mod error;

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use error::ConfigLoadError;

use crate::models::{ConfigSource, ManagerConfig};

pub const CONFIG_PATH_ENV: &str = "IMGWRAP_CONFIG_PATH";
pub const CONFIG_JSON_ENV: &str = "IMGWRAP_CONFIG_JSON";

const DEFAULT_CANDIDATES: &[&str] = &[
    "imgwrap.toml",
    "imgwrap.json",
    "config/imgwrap.toml",
    "config/imgwrap.json",
];

impl ManagerConfig {
    /// Resolve the manager defaults for this process.
    ///
    /// An explicit file named by `IMGWRAP_CONFIG_PATH` takes precedence over
    /// a JSON document in `IMGWRAP_CONFIG_JSON`. Without either, the first of
    /// `imgwrap.{toml,json}` or `config/imgwrap.{toml,json}` found under the
    /// working directory is used, and built-in tags apply when none exists.
    /// The returned [`ConfigSource`] records which of these won.
    pub fn load_from_env() -> Result<(Self, ConfigSource), ConfigLoadError> {
        Self::load_from_env_in(Path::new("."))
    }

    /// Like [`ManagerConfig::load_from_env`], with default files looked up
    /// under `root` instead of the working directory.
    pub fn load_from_env_in(
        root: &Path,
    ) -> Result<(Self, ConfigSource), ConfigLoadError> {
        if let Ok(path_str) = env::var(CONFIG_PATH_ENV)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            tracing::info!(path = %path.display(), "loaded image manager config from env path");
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Ok(raw) = env::var(CONFIG_JSON_ENV)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw, CONFIG_JSON_ENV)?;
            tracing::info!("loaded image manager config from inline json");
            return Ok((parsed, ConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file(root) {
            let config = Self::load_from_file(&path)?;
            tracing::info!(path = %path.display(), "loaded image manager config");
            return Ok((config, ConfigSource::File(path)));
        }

        tracing::debug!("no image manager config found; using defaults");
        Ok((Self::default(), ConfigSource::Default))
    }

    /// Read one config file. `.json` parses as JSON and `.toml`/`.tml` as
    /// TOML; any other extension is sniffed.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let origin = path.display().to_string();

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents, &origin),
            Some("toml") | Some("tml") => Self::parse_toml(&contents, &origin),
            _ => Self::parse_from_str(&contents, &origin),
        }
    }

    /// Parse a document of unknown format. TOML is attempted before JSON and
    /// both errors are kept when neither accepts it.
    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> Result<Self, ConfigLoadError> {
        toml::from_str(contents).or_else(|toml| {
            serde_json::from_str(contents).map_err(|json| {
                ConfigLoadError::Unrecognized {
                    origin: origin.to_owned(),
                    toml,
                    json,
                }
            })
        })
    }

    pub fn parse_toml(
        contents: &str,
        origin: &str,
    ) -> Result<Self, ConfigLoadError> {
        toml::from_str(contents).map_err(|source| ConfigLoadError::Toml {
            origin: origin.to_owned(),
            source,
        })
    }

    pub fn parse_json(raw: &str, origin: &str) -> Result<Self, ConfigLoadError> {
        serde_json::from_str(raw).map_err(|source| ConfigLoadError::Json {
            origin: origin.to_owned(),
            source,
        })
    }

    fn find_default_file(root: &Path) -> Option<PathBuf> {
        DEFAULT_CANDIDATES
            .iter()
            .map(|candidate| root.join(candidate))
            .find(|path| path.exists())
    }
}
