use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use providers::{DEFAULT_OPENWEATHER_BASE_URL, DEFAULT_WIKIPEDIA_API_URL};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HISTORY_SIZE, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_LISTEN_SECONDS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// OpenWeatherMap credential; weather turns report an outage without it
    pub openweather_api_key: Option<String>,

    pub openweather_base_url: String,

    pub wikipedia_api_url: String,

    pub http_timeout_secs: u64,

    /// Groq credential for transcription; voice input is disabled without it
    pub groq_api_key: Option<String>,

    /// How long the microphone records for one spoken command
    pub listen_seconds: u64,

    /// Log addresses instead of launching the viewer
    pub dry_run_open: bool,

    pub speech_enabled: bool,

    /// History entries shown on the display surface
    pub history_size: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            openweather_api_key: None,
            openweather_base_url: DEFAULT_OPENWEATHER_BASE_URL.to_string(),
            wikipedia_api_url: DEFAULT_WIKIPEDIA_API_URL.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            groq_api_key: None,
            listen_seconds: DEFAULT_LISTEN_SECONDS,
            dry_run_open: false,
            speech_enabled: speech::SYSTEM_VOICE_AVAILABLE,
            history_size: DEFAULT_HISTORY_SIZE,
        }
    }
}

impl AppSettings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; unset or blank variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Ok(Self {
            openweather_api_key: get("OPENWEATHER_API_KEY"),
            openweather_base_url: get("OPENWEATHER_BASE_URL").unwrap_or(defaults.openweather_base_url),
            wikipedia_api_url: get("WIKIPEDIA_API_URL").unwrap_or(defaults.wikipedia_api_url),
            http_timeout_secs: parse_or(get("HTTP_TIMEOUT_SECS"), "HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            groq_api_key: get("GROQ_API_KEY"),
            listen_seconds: parse_or(get("LISTEN_SECONDS"), "LISTEN_SECONDS", defaults.listen_seconds)?,
            dry_run_open: get("DESKMATE_DRY_RUN_OPEN").map(|v| is_truthy(&v)).unwrap_or(false),
            speech_enabled: defaults.speech_enabled,
            history_size: defaults.history_size,
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn listen_window(&self) -> Duration {
        Duration::from_secs(self.listen_seconds)
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value.parse().with_context(|| format!("Invalid {}", key)),
        None => Ok(default),
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
