//! Configuration loading and root folder resolution

use std::path::PathBuf;

use crate::{Error, Result};

/// Environment variable carrying the upstream API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the upstream model name.
pub const MODEL_ENV: &str = "GEMINI_MODEL";

/// Environment variable overriding the content-filter threshold.
pub const SAFETY_THRESHOLD_ENV: &str = "TSAW_SAFETY_THRESHOLD";

/// Model used when no override is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Content-filter threshold applied to all four standard harm categories.
///
/// The most permissive setting is the shipped default, a deliberate
/// product policy for this tool; operators can tighten it via
/// `TSAW_SAFETY_THRESHOLD` without a code change.
pub const DEFAULT_SAFETY_THRESHOLD: &str = "BLOCK_NONE";

/// Runtime configuration, constructed once at startup and shared through
/// application state. Handlers never read the process environment
/// themselves.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream API credential. Absence is a reported, recoverable
    /// condition, not a startup failure.
    pub gemini_api_key: Option<String>,
    /// Upstream model name.
    pub gemini_model: String,
    /// Content-filter threshold for all four harm categories.
    pub safety_threshold: String,
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Self {
        let gemini_api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());

        let gemini_model = std::env::var(MODEL_ENV)
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let safety_threshold = std::env::var(SAFETY_THRESHOLD_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SAFETY_THRESHOLD.to_string());

        Self {
            gemini_api_key,
            gemini_model,
            safety_threshold,
        }
    }
}

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>, env_var_name: &str) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = load_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return Ok(PathBuf::from(root_folder));
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    Ok(get_default_root_folder())
}

/// Get default configuration file path for the platform
fn load_config_file() -> Result<PathBuf> {
    let config_path = dirs::config_dir()
        .map(|d| d.join("tsaw").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if config_path.exists() {
        Ok(config_path)
    } else {
        Err(Error::Config(format!(
            "Config file not found: {:?}",
            config_path
        )))
    }
}

/// Get OS-dependent default root folder path
fn get_default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("tsaw"))
        .unwrap_or_else(|| PathBuf::from("./tsaw_data"))
}
