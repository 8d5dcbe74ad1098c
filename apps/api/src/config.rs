use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::lexicon::Lexicon;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SKILLS_SEED_PATH: &str = "skills_seed.txt";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; startup fails only on unparsable values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Without a key, bullets and summary are left un-rewritten.
    pub anthropic_api_key: Option<String>,
    pub skills_seed_path: PathBuf,
    pub lexicon_path: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: match get("PORT") {
                Some(v) => v.parse::<u16>().context("PORT must be a valid port number")?,
                None => DEFAULT_PORT,
            },
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            skills_seed_path: get("SKILLS_SEED_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SKILLS_SEED_PATH)),
            lexicon_path: get("LEXICON_PATH").map(PathBuf::from),
            max_upload_bytes: match get("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }

    /// Lookup tables: defaults, or the JSON override file when configured.
    pub fn load_lexicon(&self) -> Result<Lexicon> {
        match &self.lexicon_path {
            Some(path) => {
                info!("Loading lexicon overrides from {}", path.display());
                Lexicon::from_json_file(path)
            }
            None => Ok(Lexicon::default()),
        }
    }

    pub fn load_seed_skills(&self) -> Result<Vec<String>> {
        read_seed_skills(&self.skills_seed_path)
    }
}

/// One skill per non-blank line. A missing file is an empty list.
pub fn read_seed_skills(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        info!("No seed skill list at {}", path.display());
        return Ok(Vec::new());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed skills '{}'", path.display()))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}
