use crate::error::RelayError;
use dotenv::dotenv;
use std::env;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
pub const DEFAULT_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const DEFAULT_RELAY_PATH: &str = "/api/generate";
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub host: String,
    pub worker_threads: usize,
    pub relay_path: String,
    pub api_base: String,
    pub model: String,
    /// Name of the environment variable holding the Gemini key. The key itself
    /// is read on every request and is never stored here.
    pub api_key_var: String,
    /// Largest inbound body the relay will buffer.
    pub max_body_bytes: usize,
}

impl AppConfig {
    pub fn new() -> Result<Self, RelayError> {
        dotenv().ok();

        Ok(Self {
            port: parse_var("PORT", 3000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            worker_threads: parse_var("WORKER_THREADS", num_cpus::get())?,
            relay_path: env::var("RELAY_PATH")
                .unwrap_or_else(|_| DEFAULT_RELAY_PATH.to_string()),
            api_base: env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_key_var: env::var("API_KEY_VAR")
                .unwrap_or_else(|_| DEFAULT_API_KEY_VAR.to_string()),
            max_body_bytes: parse_var("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
            worker_threads: num_cpus::get(),
            relay_path: DEFAULT_RELAY_PATH.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_var: DEFAULT_API_KEY_VAR.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, RelayError> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| {
            RelayError::Configuration(format!("{} must be a number, got {:?}", name, raw))
        }),
        Err(_) => Ok(default),
    }
}
