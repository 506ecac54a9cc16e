/// Runtime configuration
///
/// Everything is read from the environment (optionally seeded from a `.env`
/// file). Only the API token is secret; the rest have working defaults so the
/// app launches with no setup at all.

use std::path::PathBuf;
use std::time::Duration;

/// Model queried when `TTI_MODEL` is unset
pub const DEFAULT_MODEL: &str = "ZB-Tech/Text-to-Image";

/// Hosted inference API base URL
pub const DEFAULT_API_BASE: &str = "https://router.huggingface.co/hf-inference/models";

/// Directory (relative to the working directory) that saved images land in
pub const DEFAULT_OUTPUT_DIR: &str = "generated_images";

/// Generation can take a while on a cold model
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Bounding box the preview is shrunk into
pub const DISPLAY_WIDTH: u32 = 800;
pub const DISPLAY_HEIGHT: u32 = 600;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Bearer token for the inference API (None = anonymous)
    pub api_token: Option<String>,
    /// Model id appended to the API base
    pub model: String,
    pub api_base: String,
    /// Where "Save Image" writes PNGs
    pub output_dir: PathBuf,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();

        let request_timeout = match get("TTI_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        name: "TTI_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            None => defaults.request_timeout,
        };

        Ok(Self {
            api_token: get("HF_TOKEN").or_else(|| get("HUGGINGFACE_API_TOKEN")),
            model: get("TTI_MODEL").unwrap_or(defaults.model),
            api_base: get("TTI_API_BASE").unwrap_or(defaults.api_base),
            output_dir: get("TTI_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            request_timeout,
        })
    }

    /// Full URL of the model's inference endpoint
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            self.model.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.endpoint(),
            "https://router.huggingface.co/hf-inference/models/ZB-Tech/Text-to-Image"
        );
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("HF_TOKEN", " hf_secret "),
            ("TTI_MODEL", "stabilityai/sdxl"),
            ("TTI_API_BASE", "http://localhost:9000/models/"),
            ("TTI_OUTPUT_DIR", "/tmp/out"),
            ("TTI_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();

        assert_eq!(config.api_token.as_deref(), Some("hf_secret"));
        assert_eq!(config.endpoint(), "http://localhost:9000/models/stabilityai/sdxl");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_token_alias_and_blank_values() {
        let config = Config::from_lookup(lookup(&[
            ("HF_TOKEN", "   "),
            ("HUGGINGFACE_API_TOKEN", "hf_alias"),
            ("TTI_MODEL", ""),
        ]))
        .unwrap();

        assert_eq!(config.api_token.as_deref(), Some("hf_alias"));
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_invalid_timeout() {
        for bad in ["soon", "0", "-5"] {
            let err = Config::from_lookup(lookup(&[("TTI_TIMEOUT_SECS", bad)])).unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidTimeout {
                    name: "TTI_TIMEOUT_SECS",
                    value: bad.to_string(),
                }
            );
        }
    }
}
