//! Draft generation: one free-form LLM call that writes the whole post.
//!
//! The draft's first line is its title. Extracting it is the caller's job and
//! lives in `split_title`, so format drift upstream fails a unit test here
//! rather than leaking into the assembled post.

use tracing::info;

use crate::errors::AppError;
use crate::generation::preferences::{BlogPreferences, Choice};
use crate::generation::prompts::{DRAFT_PROMPT_TEMPLATE, WRITER_PERSONA};
use crate::llm_client::prompts::render_template;
use crate::llm_client::TextGenerator;

/// A draft split into its title line and the remaining body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftParts<'a> {
    /// First non-blank line, verbatim (heading marker included).
    pub title: &'a str,
    /// Everything after the title line, trimmed. May be empty.
    pub body: &'a str,
}

/// Asks the writer persona for a full markdown draft.
///
/// Forwards every preference as-is; a blank topic is not rejected here.
pub async fn generate_draft(
    llm: &dyn TextGenerator,
    preferences: &BlogPreferences,
) -> Result<String, AppError> {
    let prompt = build_draft_prompt(preferences);
    let system = WRITER_PERSONA.system_prompt();

    let draft = llm.generate(&system, &prompt).await?;

    if draft.trim().is_empty() {
        return Err(AppError::EmptyResponse(
            "draft generation returned blank text".to_string(),
        ));
    }

    info!("Draft generated: {} words", draft.split_whitespace().count());
    Ok(draft)
}

/// Splits a draft into title and body.
///
/// Precondition: at least one non-blank line. A blank draft is `EmptyResponse`.
pub fn split_title(draft: &str) -> Result<DraftParts<'_>, AppError> {
    let trimmed = draft.trim();
    if trimmed.is_empty() {
        return Err(AppError::EmptyResponse(
            "draft has no title line".to_string(),
        ));
    }

    let (title, body) = match trimmed.split_once('\n') {
        Some((first, rest)) => (first.trim_end(), rest.trim()),
        None => (trimmed, ""),
    };

    Ok(DraftParts { title, body })
}

/// Title text without its markdown heading marker, e.g. for file names.
pub fn plain_title(title: &str) -> &str {
    title.trim_start_matches('#').trim()
}

fn build_draft_prompt(preferences: &BlogPreferences) -> String {
    let humor_styles = preferences.humor_styles_text();
    render_template(
        DRAFT_PROMPT_TEMPLATE,
        &[
            ("topic", preferences.topic.as_str()),
            ("narrator", preferences.narrator.as_str()),
            ("audience", preferences.audience.as_str()),
            ("humor_styles", humor_styles.as_str()),
            ("blog_length", preferences.blog_length.label()),
            (
                "funny_incident",
                preferences.funny_incident.as_deref().unwrap_or("N/A"),
            ),
            ("title_style", preferences.title_style.label()),
            ("ending_style", preferences.ending_style.label()),
            (
                "sensitive_topics",
                preferences.sensitive_topics.as_deref().unwrap_or("None"),
            ),
        ],
    )
}
