//! Blog post generation: orchestrates the full pipeline.
//!
//! Flow: generate_draft → split_title → segment → enrich_all → assemble.
//!
//! Each stage waits for the previous one to finish. Any stage failure aborts
//! the request; there is no partial post and nothing is retried.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::assembler::assemble;
use crate::generation::drafter::{generate_draft, plain_title, split_title};
use crate::generation::enricher::{enrich_all, EnrichedSegment};
use crate::generation::preferences::BlogPreferences;
use crate::generation::segmenter::segment;
use crate::gif_search::GifSearch;
use crate::llm_client::TextGenerator;

/// The assembled post plus the per-segment detail that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPost {
    pub post_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Title text without the heading marker.
    pub title: String,
    /// The final markdown document. Never modified after assembly.
    pub markdown: String,
    pub segments: Vec<EnrichedSegment>,
}

/// Runs the whole pipeline for one set of preferences.
///
/// Steps:
/// 1. generate_draft() → markdown draft
/// 2. split_title() → title line + body
/// 3. segment() → validated segments of the body
/// 4. enrich_all() → one quote + GIF per segment, in segment order
/// 5. assemble() → final markdown
pub async fn generate_blog_post(
    llm: &dyn TextGenerator,
    gifs: &dyn GifSearch,
    enrich_concurrency: usize,
    preferences: &BlogPreferences,
) -> Result<GeneratedPost, AppError> {
    let post_id = Uuid::new_v4();
    let span = info_span!("generate_post", %post_id);

    run_pipeline(post_id, llm, gifs, enrich_concurrency, preferences)
        .instrument(span)
        .await
}

async fn run_pipeline(
    post_id: Uuid,
    llm: &dyn TextGenerator,
    gifs: &dyn GifSearch,
    enrich_concurrency: usize,
    preferences: &BlogPreferences,
) -> Result<GeneratedPost, AppError> {
    // Step 1: Draft
    info!("Generating draft for topic {:?}", preferences.topic);
    let draft = generate_draft(llm, preferences).await?;

    // Step 2: Title
    let parts = split_title(&draft)?;
    if parts.body.is_empty() {
        return Err(AppError::EmptyResponse(
            "draft has a title but no body".to_string(),
        ));
    }

    // Step 3: Segments
    let segments = segment(llm, parts.body, preferences.gif_frequency).await?;

    // Step 4: Enrichment
    let humor_styles = preferences.humor_styles_text();
    let gif_types = preferences.gif_types_text();
    let enriched = enrich_all(
        llm,
        gifs,
        segments,
        &humor_styles,
        &gif_types,
        enrich_concurrency,
    )
    .await?;

    // Step 5: Assembly
    let markdown = assemble(parts.title, &enriched);
    let title = plain_title(parts.title).to_string();

    info!("Generated post {:?} with {} GIFs", title, enriched.len());

    Ok(GeneratedPost {
        post_id,
        generated_at: Utc::now(),
        title,
        markdown,
        segments: enriched,
    })
}
