use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_API_URL;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Application configuration loaded from environment variables.
/// Nothing is required: without `GROQ_API_KEY` every online call falls back to
/// offline suggestions.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub groq_api_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: optional_env("GROQ_API_KEY"),
            groq_api_url: optional_env("GROQ_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            port: parse_port(optional_env("PORT"))?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_port(raw: Option<String>) -> Result<u16> {
    match raw {
        Some(value) => value
            .trim()
            .parse::<u16>()
            .with_context(|| format!("PORT must be a valid port number, got '{value}'")),
        None => Ok(DEFAULT_PORT),
    }
}
