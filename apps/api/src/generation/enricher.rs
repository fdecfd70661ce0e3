//! Segment enrichment: attaches exactly one mood-matched GIF to each segment.
//!
//! Per segment: quote (LLM) → GIF search with the quote → append image
//! directive. The two calls are causally ordered; segments may be enriched
//! concurrently but output order always follows the input order.

use futures::{StreamExt, TryStreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{QUOTE_PERSONA, QUOTE_PROMPT_TEMPLATE};
use crate::gif_search::GifSearch;
use crate::llm_client::prompts::render_template;
use crate::llm_client::TextGenerator;

/// A segment plus the single GIF chosen for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedSegment {
    pub text: String,
    /// The search query the GIF was found with.
    pub quote: String,
    pub gif_url: String,
}

impl EnrichedSegment {
    /// Segment text, a blank line, then the image directive.
    pub fn to_markdown(&self) -> String {
        format!("{}\n\n{}", self.text, image_directive(&self.gif_url))
    }
}

/// Markdown image directive used for every GIF.
pub fn image_directive(url: &str) -> String {
    format!("![gif]({url})")
}

/// Writes a short (≤8 words, by instruction only) reaction quote for a segment.
pub async fn generate_quote(
    llm: &dyn TextGenerator,
    segment: &str,
    humor_styles: &str,
    gif_types: &str,
) -> Result<String, AppError> {
    let prompt = render_template(
        QUOTE_PROMPT_TEMPLATE,
        &[
            ("segment", segment),
            ("humor_styles", humor_styles),
            ("gif_types", gif_types),
        ],
    );
    let system = QUOTE_PERSONA.system_prompt();

    let raw = llm.generate(&system, &prompt).await?;
    let quote = clean_quote(&raw);

    if quote.is_empty() {
        return Err(AppError::EmptyResponse(
            "quote generation returned blank text".to_string(),
        ));
    }

    Ok(quote.to_string())
}

/// Searches with `quote` and picks exactly one GIF: the first hit with a URL.
///
/// No usable hit is `NoResultsFound`; a segment is never left without an image.
pub async fn find_gif(gifs: &dyn GifSearch, quote: &str) -> Result<String, AppError> {
    let hits = gifs.search(quote).await?;
    let total = hits.len();

    let hit = hits
        .into_iter()
        .find(|hit| !hit.url.trim().is_empty())
        .ok_or_else(|| AppError::NoResultsFound(format!("no GIF found for {quote:?}")))?;

    debug!("Picked GIF {} {:?} out of {} hits", hit.id, hit.title, total);
    Ok(hit.url)
}

/// Enriches one segment: quote first, then the GIF lookup that depends on it.
pub async fn enrich(
    llm: &dyn TextGenerator,
    gifs: &dyn GifSearch,
    segment: String,
    humor_styles: &str,
    gif_types: &str,
) -> Result<EnrichedSegment, AppError> {
    let quote = generate_quote(llm, &segment, humor_styles, gif_types).await?;
    let gif_url = find_gif(gifs, &quote).await?;
    debug!("Segment enriched: quote={:?} gif={}", quote, gif_url);

    Ok(EnrichedSegment {
        text: segment,
        quote,
        gif_url,
    })
}

/// Enriches every segment with at most `concurrency` in flight.
///
/// Output order matches input order regardless of completion order. The first
/// failure aborts the rest and is returned.
pub async fn enrich_all(
    llm: &dyn TextGenerator,
    gifs: &dyn GifSearch,
    segments: Vec<String>,
    humor_styles: &str,
    gif_types: &str,
    concurrency: usize,
) -> Result<Vec<EnrichedSegment>, AppError> {
    let total = segments.len();

    let enriched: Vec<EnrichedSegment> = futures::stream::iter(segments.into_iter().enumerate())
        .map(|(idx, segment)| async move {
            enrich(llm, gifs, segment, humor_styles, gif_types)
                .await
                .map_err(|e| {
                    warn!("Enrichment failed at segment {}/{}: {}", idx + 1, total, e);
                    e
                })
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    info!("Enriched {} segments", enriched.len());
    Ok(enriched)
}

/// Trims the model output and drops wrapping quotation marks.
fn clean_quote(raw: &str) -> &str {
    raw.trim()
        .trim_matches(|c: char| matches!(c, '"' | '“' | '”'))
        .trim()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::generation::test_support::{gif, ScriptedGifSearch, ScriptedTextGenerator};

    #[test]
    fn test_image_directive_format() {
        assert_eq!(
            image_directive("https://media.giphy.com/a.gif"),
            "![gif](https://media.giphy.com/a.gif)"
        );
    }

    #[test]
    fn test_markdown_puts_image_after_text() {
        let seg = EnrichedSegment {
            text: "So that happened.".to_string(),
            quote: "why me".to_string(),
            gif_url: "https://g/1.gif".to_string(),
        };
        let md = seg.to_markdown();
        assert_eq!(md, "So that happened.\n\n![gif](https://g/1.gif)");
        assert_eq!(md.matches("![gif](").count(), 1);
        assert!(md.find("So that happened.").unwrap() < md.find("![gif](").unwrap());
    }

    #[test]
    fn test_clean_quote_strips_wrapping_quotes() {
        assert_eq!(clean_quote("  \"I regret everything\"\n"), "I regret everything");
        assert_eq!(clean_quote("“not again”"), "not again");
        assert_eq!(clean_quote("it's fine"), "it's fine");
    }

    #[tokio::test]
    async fn test_generate_quote_prompt_carries_styles() {
        let llm = ScriptedTextGenerator::new(vec!["ugh, legs".to_string()]);
        let quote = generate_quote(&llm, "Leg day.", "Sarcastic", "Meme reactions")
            .await
            .unwrap();
        assert_eq!(quote, "ugh, legs");

        let call = &llm.calls()[0];
        assert!(call.system.contains("GIF Quote Generator Agent"));
        assert!(call.prompt.contains("Leg day."));
        assert!(call.prompt.contains("Humor Styles: Sarcastic"));
        assert!(call.prompt.contains("GIF Types: Meme reactions"));
    }

    #[tokio::test]
    async fn test_blank_quote_is_empty_response() {
        let llm = ScriptedTextGenerator::new(vec!["\"\"".to_string()]);
        let err = generate_quote(&llm, "x", "", "").await.unwrap_err();
        assert!(matches!(err, AppError::EmptyResponse(_)));
    }

    #[tokio::test]
    async fn test_find_gif_takes_first_usable_hit() {
        let gifs = ScriptedGifSearch::new(Vec::<(String, String)>::new()).with_hits(
            "ugh",
            vec![gif(""), gif("https://g/2.gif"), gif("https://g/3.gif")],
        );
        let url = find_gif(&gifs, "ugh").await.unwrap();
        assert_eq!(url, "https://g/2.gif");
    }

    #[tokio::test]
    async fn test_find_gif_without_hits_is_no_results() {
        let gifs = ScriptedGifSearch::new(Vec::<(String, String)>::new());
        let err = find_gif(&gifs, "nothing matches").await.unwrap_err();
        assert!(matches!(err, AppError::NoResultsFound(_)));
    }

    #[tokio::test]
    async fn test_find_gif_bad_key_is_authentication_failed() {
        let gifs = ScriptedGifSearch::unauthorized();
        let err = find_gif(&gifs, "x").await.unwrap_err();
        assert!(matches!(err, AppError::AuthenticationFailed(_)));
    }

    #[tokio::test]
    async fn test_enrich_searches_with_generated_quote() {
        let llm = ScriptedTextGenerator::new(vec!["my legs filed a complaint".to_string()]);
        let gifs = ScriptedGifSearch::new([("my legs filed a complaint", "https://g/legs.gif")]);

        let seg = enrich(&llm, &gifs, "Leg day.".to_string(), "Sarcastic", "")
            .await
            .unwrap();
        assert_eq!(seg.text, "Leg day.");
        assert_eq!(seg.quote, "my legs filed a complaint");
        assert_eq!(seg.gif_url, "https://g/legs.gif");
        assert_eq!(gifs.queries(), vec!["my legs filed a complaint"]);
    }

    #[tokio::test]
    async fn test_enrich_all_preserves_order_under_concurrency() {
        // Quote derives from the segment, so the answer is order independent.
        let llm = ScriptedTextGenerator::responding(|call| {
            let n = ["one", "two", "three"]
                .iter()
                .position(|w| call.prompt.contains(&format!("Segment {w}.")))
                .expect("unknown segment");
            Ok(format!("q{}", n + 1))
        });
        // Earlier segments answer slower, so completion order is reversed.
        let gifs = ScriptedGifSearch::new([
            ("q1", "https://g/1.gif"),
            ("q2", "https://g/2.gif"),
            ("q3", "https://g/3.gif"),
        ])
        .with_delay("q1", Duration::from_millis(60))
        .with_delay("q2", Duration::from_millis(30));

        let segments = vec![
            "Segment one.".to_string(),
            "Segment two.".to_string(),
            "Segment three.".to_string(),
        ];
        let enriched = enrich_all(&llm, &gifs, segments.clone(), "", "", 3)
            .await
            .unwrap();

        let texts: Vec<_> = enriched.iter().map(|s| s.text.clone()).collect();
        assert_eq!(texts, segments);
        let urls: Vec<_> = enriched.iter().map(|s| s.gif_url.as_str()).collect();
        assert_eq!(urls, vec!["https://g/1.gif", "https://g/2.gif", "https://g/3.gif"]);
    }

    #[tokio::test]
    async fn test_enrich_all_sequential_stops_at_first_failure() {
        let llm = ScriptedTextGenerator::new(vec!["q1".to_string(), "q2".to_string()]);
        let gifs = ScriptedGifSearch::new([("q1", "https://g/1.gif")]);

        let segments = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let err = enrich_all(&llm, &gifs, segments, "", "", 1)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NoResultsFound(_)));
        // Segment 3 never started.
        assert_eq!(llm.calls().len(), 2);
        assert_eq!(gifs.queries(), vec!["q1", "q2"]);
    }
}
