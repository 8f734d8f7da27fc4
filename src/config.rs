use std::{env, fmt::Display, str::FromStr};

use log::info;
use thiserror::Error;

pub const GEMINI_OPENAI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub site_addr: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub google_api_key: String,
    pub llm_model: String,
    pub llm_api_base: String,
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Reads the process environment. Call `dotenv()` first to pick up `.env`.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            site_addr: try_load("SITE_ADDR", "127.0.0.1:8000")?,
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            token_ttl_minutes: try_load("ACCESS_TOKEN_EXPIRE_MINUTES", "30")?,
            google_api_key: required("GOOGLE_API_KEY")?,
            llm_model: try_load("LLM_MODEL", "gemini-1.5-flash")?,
            llm_api_base: try_load("LLM_API_BASE", GEMINI_OPENAI_BASE)?,
            cors_origins: parse_origins(&try_load::<String>(
                "CORS_ORIGINS",
                "http://localhost:3000,http://127.0.0.1:3000",
            )?),
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        })
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
