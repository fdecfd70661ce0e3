//! Segmenter: splits the draft body into GIF-insertion segments.
//!
//! The split itself is delegated to the LLM in structured mode. The model is
//! told not to alter the text but nothing guarantees it, so the result is
//! reconstructed and compared against the body before anything downstream
//! sees it.

use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::preferences::{Choice, GifFrequency};
use crate::generation::prompts::{SEGMENTS_SCHEMA_NAME, SPLITTER_PERSONA, SPLIT_PROMPT_TEMPLATE};
use crate::llm_client::prompts::render_template;
use crate::llm_client::{strip_json_fences, OutputSchema, TextGenerator};

/// Separator re-inserted between segments when they are joined back together.
pub const SEGMENT_SEPARATOR: &str = "\n\n";

/// Structured output contract for the splitter call.
#[derive(Debug, Deserialize)]
struct SegmentedOutput {
    segments: Vec<String>,
}

pub fn segments_schema() -> OutputSchema {
    OutputSchema {
        name: SEGMENTS_SCHEMA_NAME,
        schema: json!({
            "type": "object",
            "properties": {
                "segments": {
                    "type": "array",
                    "description": "Blog post broken into naturally flowing segments where GIFs can be inserted",
                    "items": { "type": "string" }
                }
            },
            "required": ["segments"],
            "additionalProperties": false
        }),
    }
}

/// Splits `body` into ordered, non-overlapping segments per `gif_frequency`.
///
/// Fails with `MalformedResponse` when the output does not parse, is empty,
/// contains a blank segment, or does not reconstruct the body.
pub async fn segment(
    llm: &dyn TextGenerator,
    body: &str,
    gif_frequency: GifFrequency,
) -> Result<Vec<String>, AppError> {
    let prompt = render_template(
        SPLIT_PROMPT_TEMPLATE,
        &[
            ("gif_frequency", gif_frequency.label()),
            ("blog_content", body),
        ],
    );
    let system = SPLITTER_PERSONA.system_prompt();

    let raw = llm
        .generate_structured(&system, &prompt, &segments_schema())
        .await?;

    let output: SegmentedOutput = serde_json::from_str(strip_json_fences(&raw)).map_err(|e| {
        AppError::MalformedResponse(format!("segmenter output is not a segment list: {e}"))
    })?;

    let segments: Vec<String> = output
        .segments
        .into_iter()
        .map(|s| s.trim().to_string())
        .collect();

    validate_reconstruction(body, &segments)?;

    let segments = enforce_frequency(segments, gif_frequency);
    info!(
        "Draft split into {} segments ({})",
        segments.len(),
        gif_frequency.slug()
    );
    Ok(segments)
}

/// Checks that `segments` joined back together are exactly `body`.
///
/// Each trimmed segment must match the next slice of the body byte for byte.
/// Only the whitespace at a split point may differ, since the assembler
/// re-inserts its own separator there. A split point must fall on whitespace.
pub fn validate_reconstruction(body: &str, segments: &[String]) -> Result<(), AppError> {
    if segments.is_empty() {
        return Err(AppError::MalformedResponse(
            "segmenter returned no segments".to_string(),
        ));
    }

    let total = segments.len();
    if let Some(idx) = segments.iter().position(|s| s.trim().is_empty()) {
        return Err(AppError::MalformedResponse(format!(
            "segment {} of {} is blank",
            idx + 1,
            total
        )));
    }

    let mut rest = body.trim();
    for (idx, segment) in segments.iter().enumerate() {
        if idx > 0 {
            let after_break = rest.trim_start();
            if after_break.len() == rest.len() {
                return Err(altered(idx, total, rest));
            }
            rest = after_break;
        }

        rest = rest
            .strip_prefix(segment.trim())
            .ok_or_else(|| altered(idx, total, rest))?;
    }

    if !rest.is_empty() {
        return Err(altered(total, total, rest.trim_start()));
    }

    Ok(())
}

fn altered(idx: usize, total: usize, remaining: &str) -> AppError {
    warn!(
        "Segmenter altered the draft at segment {}/{} ({} chars of body left)",
        (idx + 1).min(total),
        total,
        remaining.chars().count()
    );
    AppError::MalformedResponse(format!(
        "segments do not reconstruct the draft (draft continues: {:?})",
        snippet(remaining)
    ))
}

/// Brings the segment count inside the policy's bounds without touching text.
///
/// Too many segments are merged into evenly sized contiguous groups. Too few
/// are re-split at the paragraph breaks already in the text. A one-paragraph
/// draft has no break to use and is kept as it is.
pub fn enforce_frequency(segments: Vec<String>, gif_frequency: GifFrequency) -> Vec<String> {
    let Some((min, max)) = gif_frequency.segment_bounds() else {
        return segments;
    };

    if segments.len() < min {
        let pieces: Vec<String> = segments.iter().flat_map(|s| paragraphs(s)).collect();
        if pieces.len() < min {
            warn!(
                "Draft has {} paragraph(s), cannot reach {} segments for '{}'",
                pieces.len(),
                min,
                gif_frequency.slug()
            );
            return segments;
        }

        let groups = pieces.len().min(max);
        info!(
            "Re-splitting {} segments into {} at paragraph breaks for '{}'",
            segments.len(),
            groups,
            gif_frequency.slug()
        );
        return merge_contiguous(pieces, groups);
    }

    if segments.len() <= max {
        return segments;
    }

    info!(
        "Merging {} segments down to {} for '{}'",
        segments.len(),
        max,
        gif_frequency.slug()
    );
    merge_contiguous(segments, max)
}

/// Joins `segments` into exactly `groups` contiguous groups, earlier groups
/// taking the remainder.
fn merge_contiguous(segments: Vec<String>, groups: usize) -> Vec<String> {
    let base = segments.len() / groups;
    let extra = segments.len() % groups;

    let mut iter = segments.into_iter();
    (0..groups)
        .map(|g| {
            let size = base + usize::from(g < extra);
            iter.by_ref()
                .take(size)
                .collect::<Vec<_>>()
                .join(SEGMENT_SEPARATOR)
        })
        .collect()
}

/// Non-blank paragraphs of `text`, split at blank-line breaks.
fn paragraphs(text: &str) -> Vec<String> {
    text.split(SEGMENT_SEPARATOR)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn snippet(text: &str) -> String {
    text.chars().take(40).collect()
}
