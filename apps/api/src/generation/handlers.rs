//! Axum route handlers for the Generation API.

use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::generation::generator::{generate_blog_post, GeneratedPost};
use crate::generation::preferences::{
    options_for, BlogLength, BlogPreferences, ChoiceOption, EndingStyle, GifFrequency, GifType,
    HumorStyle, PreferencesForm, TitleStyle,
};
use crate::state::AppState;

/// File name offered when the post is downloaded.
pub const DOWNLOAD_FILE_NAME: &str = "humorous_blog_post.md";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub humor_styles: Vec<ChoiceOption>,
    pub gif_type: Vec<ChoiceOption>,
    pub gif_frequency: Vec<ChoiceOption>,
    pub blog_length: Vec<ChoiceOption>,
    pub title_style: Vec<ChoiceOption>,
    pub ending_style: Vec<ChoiceOption>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/options
///
/// Every legal value of every enumerated preference, for rendering the form.
pub async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        humor_styles: options_for::<HumorStyle>(),
        gif_type: options_for::<GifType>(),
        gif_frequency: options_for::<GifFrequency>(),
        blog_length: options_for::<BlogLength>(),
        title_style: options_for::<TitleStyle>(),
        ending_style: options_for::<EndingStyle>(),
    })
}

/// POST /api/v1/posts/generate
///
/// Full pipeline: draft → segment → quote + GIF per segment → assemble.
/// Returns the markdown post with the per-segment quotes and GIF URLs.
pub async fn handle_generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GeneratedPost>, AppError> {
    let post = run_generation(&state, &body).await?;
    Ok(Json(post))
}

/// POST /api/v1/posts/generate/download
///
/// Same pipeline, answered as a markdown file attachment.
pub async fn handle_generate_download(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let post = run_generation(&state, &body).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\""),
            ),
        ],
        post.markdown,
    ))
}

/// Credentials are checked before the body is parsed, and both before any
/// service call.
async fn run_generation(state: &AppState, body: &[u8]) -> Result<GeneratedPost, AppError> {
    let (llm, gifs) = state.services()?;
    let form: PreferencesForm = serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("request body is not a preferences form: {e}")))?;
    let preferences = BlogPreferences::from_form(form)?;

    generate_blog_post(llm, gifs, state.config.enrich_concurrency, &preferences).await
}
