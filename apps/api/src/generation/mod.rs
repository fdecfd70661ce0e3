// Blog generation pipeline.
// Implements: preference collection, drafting, segmenting, GIF enrichment, assembly.
// All LLM calls go through llm_client and all GIF lookups through gif_search.

pub mod assembler;
pub mod drafter;
pub mod enricher;
pub mod generator;
pub mod handlers;
pub mod preferences;
pub mod prompts;
pub mod segmenter;

#[cfg(test)]
pub mod test_support;
