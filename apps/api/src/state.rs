use std::sync::Arc;

use crate::config::Config;
use crate::lexicon::Lexicon;
use crate::render::DocumentRenderer;
use crate::tailoring::rewriter::BulletRewriter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only lookup tables shared by every request.
    pub lexicon: Arc<Lexicon>,
    /// Boosts known skills during JD keyword seeding.
    pub seed_skills: Arc<Vec<String>>,
    /// Pluggable rewriter. `LlmRewriter` with an API key, `UnavailableRewriter` without.
    pub rewriter: Arc<dyn BulletRewriter>,
    pub renderer: Arc<dyn DocumentRenderer>,
}
