// Content pipeline: eligibility, prompt assembly, model call, field recovery, merge.
// All model calls go through llm_client::ModelClient; nothing here talks HTTP directly.

pub mod extractor;
pub mod handlers;
pub mod orchestrator;
pub mod prompt_builder;
pub mod prompts;
pub mod team_context;
