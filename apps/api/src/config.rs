use anyhow::{Context, Result};

pub const DEFAULT_TEXTKERNEL_BASE_URL: &str = "https://api.eu.textkernel.com/tx/v10";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
///
/// Textkernel credentials are optional at startup. Without them the service
/// still serves health, export and editing; parse and score requests fail
/// with a configuration error before any external call.
#[derive(Debug, Clone)]
pub struct Config {
    pub textkernel: TextkernelConfig,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct TextkernelConfig {
    pub base_url: String,
    pub account_id: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for TextkernelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TEXTKERNEL_BASE_URL.to_string(),
            account_id: None,
            api_key: None,
            timeout_secs: 120,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            textkernel: TextkernelConfig::default(),
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            textkernel: TextkernelConfig {
                base_url: optional_env("TEXTKERNEL_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_TEXTKERNEL_BASE_URL.to_string()),
                account_id: optional_env("TEXTKERNEL_ACCOUNT_ID"),
                api_key: optional_env("TEXTKERNEL_API_KEY"),
                timeout_secs: parse_env("TEXTKERNEL_TIMEOUT_SECS", 120)?,
            },
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

/// Unset and blank variables both count as missing.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
