use serde::Deserialize;
use simpledown_engine::{SchemeAllowList, parsing::DEFAULT_MAX_DEPTH};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config file at {config_path}: {reason}")]
    ConfigInvalid {
        config_path: PathBuf,
        reason: String,
    },
}

/// Parser defaults shared by every invocation. The trust mode is not a
/// config setting; it is given per document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Transliterate Cyrillic header titles when deriving anchors.
    pub translit_anchors: bool,
    /// Keep `[offline]` content and drop `[online]` content.
    pub export: bool,
    pub max_depth: usize,
    /// URL schemes untrusted documents may link to.
    pub allowed_schemes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translit_anchors: false,
            export: false,
            max_depth: DEFAULT_MAX_DEPTH,
            allowed_schemes: SchemeAllowList::DEFAULT_SCHEMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if config.max_depth == 0 {
            return Err(ConfigError::ConfigInvalid {
                config_path: config_path.to_path_buf(),
                reason: "max_depth must be at least 1".to_string(),
            });
        }
        for scheme in &mut config.allowed_schemes {
            *scheme = scheme.trim_end_matches(':').to_ascii_lowercase();
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loads from `$SIMPLEDOWN_CONFIG` if set (shell variables and `~`
    /// expanded), else from the default location.
    pub fn load_from_env() -> Result<Option<Self>, ConfigError> {
        match std::env::var("SIMPLEDOWN_CONFIG") {
            Ok(path) => {
                let path = Self::expand_path(Path::new(&path)).unwrap_or_else(|| path.into());
                Self::load_from_path(path)
            }
            Err(_) => Self::load(),
        }
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/simpledown");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
