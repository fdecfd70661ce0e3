//! Final document assembly. Pure and deterministic.

use crate::generation::enricher::EnrichedSegment;
use crate::generation::segmenter::SEGMENT_SEPARATOR;

/// Title line, then each enriched segment, separated by blank lines and trimmed.
pub fn assemble(title: &str, segments: &[EnrichedSegment]) -> String {
    std::iter::once(title.to_string())
        .chain(segments.iter().map(EnrichedSegment::to_markdown))
        .collect::<Vec<_>>()
        .join(SEGMENT_SEPARATOR)
        .trim()
        .to_string()
}
