pub mod coverage;
pub mod handlers;
pub mod jd_terms;
pub mod model_builder;
pub mod orchestrator;
pub mod prompts;
pub mod rewriter;
