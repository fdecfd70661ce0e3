use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::warn;

use crate::config::Config;
use crate::errors::AppError;
use crate::gif_search::{GifSearch, GiphyClient};
use crate::llm_client::{LlmClient, TextGenerator};

/// Shared application state injected into all route handlers via Axum extractors.
///
/// A service is `None` when its credential was not configured. Credentials are
/// fixed at startup and only ever read by the two service clients.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: Option<Arc<dyn TextGenerator>>,
    pub gifs: Option<Arc<dyn GifSearch>>,
}

impl AppState {
    /// Builds the service clients for whichever credentials are present.
    pub fn from_config(config: Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.http_timeout_secs);

        let llm: Option<Arc<dyn TextGenerator>> = match &config.openai_api_key {
            Some(key) => Some(Arc::new(LlmClient::new(
                key.clone(),
                config.openai_api_url.clone(),
                timeout,
            )?)),
            None => {
                warn!("OPENAI_API_KEY is not set; generation requests will be refused");
                None
            }
        };

        let gifs: Option<Arc<dyn GifSearch>> = match &config.giphy_api_key {
            Some(key) => Some(Arc::new(GiphyClient::new(
                key.clone(),
                config.giphy_api_url.clone(),
                config.giphy_rating.clone(),
                config.giphy_search_limit,
                timeout,
            )?)),
            None => {
                warn!("GIPHY_API_KEY is not set; generation requests will be refused");
                None
            }
        };

        Ok(Self { config, llm, gifs })
    }

    /// Both services, or `MissingCredential` for the first one not configured.
    pub fn services(&self) -> Result<(&dyn TextGenerator, &dyn GifSearch), AppError> {
        let llm = self
            .llm
            .as_deref()
            .ok_or(AppError::MissingCredential("OpenAI API key"))?;
        let gifs = self
            .gifs
            .as_deref()
            .ok_or(AppError::MissingCredential("GIPHY API key"))?;
        Ok((llm, gifs))
    }
}
