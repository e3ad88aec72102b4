use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use url::Url;

use reel_client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use reel_types::ui::UiOptions;

const CONFIG_PATH_ENV: &str = "REEL_CONFIG";
const ENDPOINT_ENV: &str = "REEL_ENDPOINT_URL";

/// `~/.reel/config.toml`.
///
/// ```toml
/// [app]
/// ascii_only = false
/// high_contrast = false
/// reduced_motion = false
///
/// [endpoint]
/// url = "https://vernanbackend.ezlab.in/api/contact-us/"
/// timeout_secs = 30
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ReelConfig {
    pub app: Option<AppConfig>,
    pub endpoint: Option<EndpointConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for icons and spinners.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Freeze the submit spinner.
    #[serde(default)]
    pub reduced_motion: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct EndpointConfig {
    /// Supports `${VAR}` expansion.
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".reel").join("config.toml"))
}

/// Replace `${VAR}` with the variable's value; unset variables become empty.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(end_rel) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &rest[start + 2..start + 2 + end_rel];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &rest[start + 2 + end_rel + 1..];
    }

    out.push_str(rest);
    out
}

impl ReelConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Load from an explicit path. A missing file is `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid endpoint url `{url}`: {source}")]
    InvalidEndpoint {
        url: String,
        source: url::ParseError,
    },
    #[error("unsupported endpoint scheme `{0}` (expected http or https)")]
    UnsupportedScheme(String),
    #[error("endpoint timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    pub endpoint: Url,
    pub timeout: Duration,
    pub ui: UiOptions,
}

impl FormSettings {
    /// Resolve settings: `REEL_ENDPOINT_URL` wins over `[endpoint].url`, which
    /// wins over the built-in endpoint.
    pub fn resolve(config: Option<&ReelConfig>) -> Result<Self, SettingsError> {
        let env_url = env::var(ENDPOINT_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty());
        Self::resolve_with(config, env_url.as_deref())
    }

    fn resolve_with(
        config: Option<&ReelConfig>,
        env_url: Option<&str>,
    ) -> Result<Self, SettingsError> {
        let endpoint_cfg = config.and_then(|cfg| cfg.endpoint.as_ref());

        let raw_url = env_url
            .map(str::to_string)
            .or_else(|| {
                endpoint_cfg
                    .and_then(|endpoint| endpoint.url.as_deref())
                    .map(expand_env_vars)
                    .filter(|url| !url.trim().is_empty())
            })
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let endpoint = Self::parse_endpoint(raw_url.trim())?;

        let timeout_secs = endpoint_cfg
            .and_then(|endpoint| endpoint.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(SettingsError::ZeroTimeout);
        }

        let ui = config
            .and_then(|cfg| cfg.app.as_ref())
            .map(|app| UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
                reduced_motion: app.reduced_motion,
            })
            .unwrap_or_default();

        Ok(Self {
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
            ui,
        })
    }

    /// Settings for a specific endpoint with default timeout and UI options.
    pub fn for_endpoint(url: &str) -> Result<Self, SettingsError> {
        Ok(Self {
            endpoint: Self::parse_endpoint(url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            ui: UiOptions::default(),
        })
    }

    fn parse_endpoint(raw: &str) -> Result<Url, SettingsError> {
        let url = Url::parse(raw).map_err(|source| SettingsError::InvalidEndpoint {
            url: raw.to_string(),
            source,
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SettingsError::UnsupportedScheme(other.to_string())),
        }
    }
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid url"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            ui: UiOptions::default(),
        }
    }
}
