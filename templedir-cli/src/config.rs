//! Tool configuration
//!
//! The gateway needs the Supabase project URL and its service-role key.
//! Environment variables win (a `.env` file is honored via dotenvy);
//! otherwise a TOML file at `<config dir>/templedir/config.toml` with
//! `supabase_url` and `service_key` keys is consulted.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

pub const ENV_URL: &str = "TEMPLEDIR_SUPABASE_URL";
pub const ENV_KEY: &str = "TEMPLEDIR_SERVICE_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub service_key: String,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    supabase_url: Option<String>,
    service_key: Option<String>,
}

impl Config {
    /// Resolve configuration from the environment, falling back per-field
    /// to the config file
    pub fn load() -> Result<Self> {
        let file = read_file_config()?;
        Self::from_sources(
            std::env::var(ENV_URL).ok(),
            std::env::var(ENV_KEY).ok(),
            file,
        )
    }

    fn from_sources(
        env_url: Option<String>,
        env_key: Option<String>,
        file: FileConfig,
    ) -> Result<Self> {
        let supabase_url = env_url.or(file.supabase_url);
        let service_key = env_key.or(file.service_key);

        match (supabase_url, service_key) {
            (Some(supabase_url), Some(service_key)) => Ok(Self {
                supabase_url,
                service_key,
            }),
            _ => bail!(
                "Missing database credentials: set {} and {}, or add supabase_url \
                 and service_key to {}",
                ENV_URL,
                ENV_KEY,
                config_file_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "the config file".to_string()),
            ),
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("templedir").join("config.toml"))
}

fn read_file_config() -> Result<FileConfig> {
    let Some(path) = config_file_path() else {
        return Ok(FileConfig::default());
    };
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_wins_over_file() {
        let file = FileConfig {
            supabase_url: Some("https://file.supabase.co".to_string()),
            service_key: Some("file-key".to_string()),
        };
        let config = Config::from_sources(
            Some("https://env.supabase.co".to_string()),
            None,
            file,
        )
        .unwrap();
        assert_eq!(config.supabase_url, "https://env.supabase.co");
        assert_eq!(config.service_key, "file-key");
    }

    #[test]
    fn test_missing_credentials_is_an_error() {
        let result = Config::from_sources(None, None, FileConfig::default());
        assert!(result.is_err());
    }
}
