mod config;
mod errors;
mod extraction;
mod lexicon;
mod llm_client;
mod models;
mod parsing;
mod render;
mod routes;
mod state;
mod tailoring;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::render::MarkdownRenderer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::tailoring::rewriter::{BulletRewriter, LlmRewriter, UnavailableRewriter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparsable values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tailor API v{}", env!("CARGO_PKG_VERSION"));

    let lexicon = Arc::new(config.load_lexicon()?);
    let seed_skills = Arc::new(config.load_seed_skills()?);
    info!("Loaded {} seed skills", seed_skills.len());

    // Initialize rewriter (LLM-backed when a key is present)
    let rewriter: Arc<dyn BulletRewriter> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM rewriter initialized (model: {})", llm_client::MODEL);
            Arc::new(LlmRewriter::new(llm))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; bullets and summary will not be rewritten");
            Arc::new(UnavailableRewriter)
        }
    };

    let state = AppState {
        config: config.clone(),
        lexicon,
        seed_skills,
        rewriter,
        renderer: Arc::new(MarkdownRenderer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
