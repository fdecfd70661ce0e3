use anyhow::{Context, Result};

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_GIPHY_API_URL: &str = "https://api.giphy.com/v1/gifs/search";

/// Application configuration loaded from environment variables.
///
/// Both service keys are optional at startup: a missing key is reported as
/// `MissingCredential` when a post is requested, before any service call.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub giphy_api_key: Option<String>,
    pub openai_api_url: String,
    pub giphy_api_url: String,
    pub giphy_rating: String,
    pub giphy_search_limit: u32,
    /// Segments enriched at once. 1 keeps enrichment strictly sequential.
    pub enrich_concurrency: usize,
    pub http_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            giphy_api_key: optional_env("GIPHY_API_KEY"),
            openai_api_url: optional_env("OPENAI_API_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_string()),
            giphy_api_url: optional_env("GIPHY_API_URL")
                .unwrap_or_else(|| DEFAULT_GIPHY_API_URL.to_string()),
            giphy_rating: optional_env("GIPHY_RATING").unwrap_or_else(|| "pg-13".to_string()),
            giphy_search_limit: parse_env("GIPHY_SEARCH_LIMIT", 5)?,
            enrich_concurrency: parse_env::<usize>("ENRICH_CONCURRENCY", 1)?.max(1),
            http_timeout_secs: parse_env("HTTP_TIMEOUT_SECS", 120)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.openai_api_key.is_some() && self.giphy_api_key.is_some()
    }
}

/// Reads an env var, treating unset and blank the same.
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
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Fully populated config for tests; never touches the process environment.
    pub fn for_tests() -> Self {
        Config {
            openai_api_key: Some("sk-test".to_string()),
            giphy_api_key: Some("giphy-test".to_string()),
            openai_api_url: DEFAULT_OPENAI_API_URL.to_string(),
            giphy_api_url: DEFAULT_GIPHY_API_URL.to_string(),
            giphy_rating: "pg-13".to_string(),
            giphy_search_limit: 5,
            enrich_concurrency: 1,
            http_timeout_secs: 5,
            port: 8080,
            rust_log: "debug".to_string(),
        }
    }
}
