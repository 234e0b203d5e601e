// Bullet assessment engine.
// Implements: anonymization, heuristic critique, suggestion generation,
// numeric policy, feedback validation, variant scoring and the HTTP handler.
// All completion calls go through llm_client via the SuggestionGenerator trait.

pub mod critic;
pub mod handlers;
pub mod metrics;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;
pub mod scoring;
pub mod styles;
pub mod suggestions;
pub mod validation;
