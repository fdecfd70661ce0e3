//! GIF search: the single point of entry for image-search calls.
//!
//! Wraps the GIPHY search endpoint. Like the LLM client, no other module may
//! talk to GIPHY directly; the pipeline only sees the `GifSearch` trait.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GifSearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GIF search rejected the API key (status {status})")]
    Unauthorized { status: u16 },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One search hit, reduced to what the pipeline needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GifResult {
    pub id: String,
    pub title: String,
    /// Direct, embeddable URL of the animation.
    pub url: String,
}

/// Image-search boundary. Returns hits in the service's relevance order.
///
/// Carried in `AppState` as `Arc<dyn GifSearch>`.
#[async_trait]
pub trait GifSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<GifResult>, GifSearchError>;
}

#[derive(Debug, Deserialize)]
struct GiphySearchResponse {
    #[serde(default)]
    data: Vec<GiphyGif>,
}

#[derive(Debug, Deserialize)]
struct GiphyGif {
    id: String,
    #[serde(default)]
    title: String,
    /// Page URL on giphy.com, used when no rendition is present.
    #[serde(default)]
    url: String,
    images: Option<GiphyImages>,
}

#[derive(Debug, Deserialize)]
struct GiphyImages {
    original: Option<GiphyRendition>,
}

#[derive(Debug, Deserialize)]
struct GiphyRendition {
    url: Option<String>,
}

impl GiphyGif {
    fn into_result(self) -> GifResult {
        let direct = self
            .images
            .and_then(|i| i.original)
            .and_then(|o| o.url)
            .filter(|u| !u.is_empty());
        GifResult {
            id: self.id,
            title: self.title,
            url: direct.unwrap_or(self.url),
        }
    }
}

/// GIPHY search client.
#[derive(Clone)]
pub struct GiphyClient {
    client: Client,
    api_key: String,
    api_url: String,
    rating: String,
    limit: u32,
}

impl GiphyClient {
    pub fn new(
        api_key: String,
        api_url: String,
        rating: String,
        limit: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for GIF search")?;
        Ok(Self {
            client,
            api_key,
            api_url,
            rating,
            limit: limit.max(1),
        })
    }
}

#[async_trait]
impl GifSearch for GiphyClient {
    async fn search(&self, query: &str) -> Result<Vec<GifResult>, GifSearchError> {
        let limit = self.limit.to_string();
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("q", query),
                ("limit", limit.as_str()),
                ("rating", self.rating.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(GifSearchError::Unauthorized {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(GifSearchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: GiphySearchResponse = serde_json::from_str(&body)?;
        let results: Vec<GifResult> = parsed.data.into_iter().map(GiphyGif::into_result).collect();

        debug!("GIF search for {:?} returned {} hits", query, results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GiphyClient {
        GiphyClient::new(
            "giphy-test".to_string(),
            format!("{}/v1/gifs/search", server.uri()),
            "pg-13".to_string(),
            3,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_search_sends_query_and_prefers_original_rendition() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/gifs/search"))
            .and(query_param("api_key", "giphy-test"))
            .and(query_param("q", "why am I like this"))
            .and(query_param("limit", "3"))
            .and(query_param("rating", "pg-13"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {
                        "id": "abc",
                        "title": "facepalm",
                        "url": "https://giphy.com/gifs/abc",
                        "images": { "original": { "url": "https://media.giphy.com/media/abc/giphy.gif" } }
                    },
                    {
                        "id": "def",
                        "title": "no rendition",
                        "url": "https://giphy.com/gifs/def"
                    }
                ],
                "meta": { "status": 200, "msg": "OK" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let hits = client_for(&server).search("why am I like this").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "https://media.giphy.com/media/abc/giphy.gif");
        assert_eq!(hits[1].url, "https://giphy.com/gifs/def");
    }

    #[tokio::test]
    async fn test_empty_data_is_empty_vec_not_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let hits = client_for(&server).search("nothing").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_forbidden_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "meta": { "status": 403, "msg": "Forbidden" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).search("x").await.unwrap_err();
        assert!(matches!(err, GifSearchError::Unauthorized { status: 403 }));
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let err = client_for(&server).search("x").await.unwrap_err();
        assert!(matches!(err, GifSearchError::Api { status: 500, .. }));
    }
}
