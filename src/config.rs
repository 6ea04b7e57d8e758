//! Startup configuration — the completion service credential.
//!
//! Looked up once, in order:
//!   1. `config.json` in the working directory, key `API_KEY`
//!   2. `OPENAI_API_KEY` from the environment (a `.env` file is loaded first
//!      if present)

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(rename = "API_KEY")]
    api_key: Option<String>,
}

pub struct Config {
    pub api_key: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &format_args!("<{} chars>", self.api_key.len()))
            .finish()
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with(path, |name| {
            if let Err(e) = dotenvy::dotenv() {
                if !e.not_found() {
                    log::warn!("[CONFIG] Ignoring unreadable .env file: {}", e);
                }
            }
            std::env::var(name).ok()
        })
    }

    /// Resolve the key from `path`, falling back to `lookup(API_KEY_ENV)`.
    /// `lookup` is only consulted when the file yields no key.
    pub fn load_with(
        path: &Path,
        lookup: impl FnOnce(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(api_key) = read_config_file(path)? {
            log::info!("[CONFIG] API key loaded from {}", path.display());
            return Ok(Self { api_key });
        }

        let api_key = key_from(lookup).ok_or(ConfigError::MissingApiKey)?;
        log::info!("[CONFIG] API key loaded from {}", API_KEY_ENV);
        Ok(Self { api_key })
    }
}

/// The trimmed, non-empty value of `API_KEY_ENV`.
fn key_from(lookup: impl FnOnce(&str) -> Option<String>) -> Option<String> {
    lookup(API_KEY_ENV)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

/// The key from `path`, or `None` when the file is absent or has no
/// non-empty `API_KEY`.
fn read_config_file(path: &Path) -> Result<Option<String>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ConfigFile = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(file
        .api_key
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty()))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("No API key configured — set API_KEY in config.json or OPENAI_API_KEY")]
    MissingApiKey,
}
