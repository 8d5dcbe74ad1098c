//! Bullet and summary rewriting behind a pluggable trait.
//!
//! `AppState` holds an `Arc<dyn BulletRewriter>`: `LlmRewriter` when an API
//! key is configured, `UnavailableRewriter` otherwise. Callers treat every
//! error as "keep the original text".

use async_trait::async_trait;
use thiserror::Error;

use crate::llm_client::{CallOptions, LlmClient, LlmError};
use crate::models::resume::Domain;
use crate::parsing::patterns::strip_bullet_marker;
use crate::tailoring::prompts::{
    domain_hint, LOW_COVERAGE_SUFFIX, MAX_PROMPT_CRITICAL_TERMS, MAX_PROMPT_OTHER_TERMS,
    MAX_SUMMARY_TERMS, REWRITE_PROMPT_TEMPLATE, REWRITE_SYSTEM, SUMMARY_OPENER,
    SUMMARY_PROMPT_TEMPLATE, SUMMARY_SYSTEM,
};

/// Rewritten lines this short (in characters) are discarded.
const MIN_OUTPUT_LINE_CHARS_EXCLUSIVE: usize = 4;

const REWRITE_OPTIONS: CallOptions = CallOptions {
    max_tokens: 900,
    temperature: 0.25,
};
const SUMMARY_OPTIONS: CallOptions = CallOptions {
    max_tokens: 200,
    temperature: 0.3,
};

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("rewriting capability is not configured")]
    Unavailable,

    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("rewrite produced no usable output")]
    EmptyOutput,
}

/// One entry's bullets plus everything the rewriter may weave in.
#[derive(Debug, Clone)]
pub struct RewriteRequest<'a> {
    /// Human label of the résumé section, e.g. "Work Experience".
    pub section_label: &'a str,
    pub bullets: &'a [String],
    pub jd_text: &'a str,
    pub all_terms: &'a [String],
    pub critical_terms: &'a [String],
    pub domain: Domain,
    /// Set on the single retry after a low-coverage first attempt.
    pub low_coverage_retry: bool,
}

#[derive(Debug, Clone)]
pub struct SummaryRequest<'a> {
    pub jd_text: &'a str,
    pub terms: &'a [String],
    pub domain: Domain,
}

#[async_trait]
pub trait BulletRewriter: Send + Sync {
    /// Returns rewritten bullets. An empty list is reported as `EmptyOutput`.
    async fn rewrite(&self, request: &RewriteRequest<'_>) -> Result<Vec<String>, RewriteError>;

    /// Returns a short third-person summary. The opener is enforced by the caller.
    async fn summarize(&self, request: &SummaryRequest<'_>) -> Result<String, RewriteError>;
}

// ────────────────────────────────────────────────────────────────────────────
// UnavailableRewriter: no API key configured
// ────────────────────────────────────────────────────────────────────────────

pub struct UnavailableRewriter;

#[async_trait]
impl BulletRewriter for UnavailableRewriter {
    async fn rewrite(&self, _request: &RewriteRequest<'_>) -> Result<Vec<String>, RewriteError> {
        Err(RewriteError::Unavailable)
    }

    async fn summarize(&self, _request: &SummaryRequest<'_>) -> Result<String, RewriteError> {
        Err(RewriteError::Unavailable)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmRewriter: hosted model via LlmClient
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmRewriter {
    llm: LlmClient,
}

impl LlmRewriter {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl BulletRewriter for LlmRewriter {
    async fn rewrite(&self, request: &RewriteRequest<'_>) -> Result<Vec<String>, RewriteError> {
        let prompt = build_rewrite_prompt(request);
        let text = self
            .llm
            .call_text(&prompt, REWRITE_SYSTEM, REWRITE_OPTIONS)
            .await?;
        let bullets = parse_bullet_lines(&text);
        if bullets.is_empty() {
            return Err(RewriteError::EmptyOutput);
        }
        Ok(bullets)
    }

    async fn summarize(&self, request: &SummaryRequest<'_>) -> Result<String, RewriteError> {
        let prompt = build_summary_prompt(request);
        let text = self
            .llm
            .call_text(&prompt, SUMMARY_SYSTEM, SUMMARY_OPTIONS)
            .await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(RewriteError::EmptyOutput);
        }
        Ok(text.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt building and output parsing
// ────────────────────────────────────────────────────────────────────────────

fn join_capped(terms: &[String], cap: usize) -> String {
    terms
        .iter()
        .take(cap)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn build_rewrite_prompt(request: &RewriteRequest<'_>) -> String {
    let bullets = request
        .bullets
        .iter()
        .map(|b| format!("- {b}"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut prompt = REWRITE_PROMPT_TEMPLATE
        .replace("{section}", request.section_label)
        .replace("{domain_hint}", domain_hint(request.domain))
        .replace(
            "{critical_terms}",
            &join_capped(request.critical_terms, MAX_PROMPT_CRITICAL_TERMS),
        )
        .replace(
            "{other_terms}",
            &join_capped(request.all_terms, MAX_PROMPT_OTHER_TERMS),
        )
        .replace("{bullets}", &bullets)
        // last: the job description is free text and may contain braces
        .replace("{jd_text}", request.jd_text);

    if request.low_coverage_retry {
        prompt.push_str(LOW_COVERAGE_SUFFIX);
    }
    prompt
}

pub fn build_summary_prompt(request: &SummaryRequest<'_>) -> String {
    SUMMARY_PROMPT_TEMPLATE
        .replace("{opener}", SUMMARY_OPENER)
        .replace("{domain_hint}", domain_hint(request.domain))
        .replace("{terms}", &join_capped(request.terms, MAX_SUMMARY_TERMS))
        .replace("{jd_text}", request.jd_text)
}

/// One bullet per line; leading `-`/`•` markers stripped, near-empty lines dropped.
pub fn parse_bullet_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| line.trim().chars().count() > MIN_OUTPUT_LINE_CHARS_EXCLUSIVE)
        .map(|line| {
            let line = line.trim();
            let stripped = strip_bullet_marker(line);
            stripped
                .strip_prefix(|c: char| c == '-' || c == '•')
                .unwrap_or(stripped)
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_bullet_lines() {
        let text = "- Built REST APIs in Rust\n•Scaled Kafka consumers\n\n- ok\n  Plain line kept  ";
        assert_eq!(
            parse_bullet_lines(text),
            strings(&["Built REST APIs in Rust", "Scaled Kafka consumers", "Plain line kept"])
        );
    }

    #[test]
    fn test_rewrite_prompt_caps_terms_and_appends_retry() {
        let bullets = strings(&["Built APIs"]);
        let critical: Vec<String> = (0..20).map(|i| format!("crit{i}")).collect();
        let all: Vec<String> = (0..60).map(|i| format!("term{i}")).collect();
        let mut request = RewriteRequest {
            section_label: "Work Experience",
            bullets: &bullets,
            jd_text: "Backend role {with braces}",
            all_terms: &all,
            critical_terms: &critical,
            domain: Domain::Tech,
            low_coverage_retry: false,
        };

        let prompt = build_rewrite_prompt(&request);
        assert!(prompt.contains("Rewrite the following Work Experience bullet points"));
        assert!(prompt.contains("crit13") && !prompt.contains("crit14"));
        assert!(prompt.contains("term39") && !prompt.contains("term40"));
        assert!(prompt.contains("- Built APIs"));
        assert!(prompt.contains("{with braces}"));
        assert!(prompt.contains(domain_hint(Domain::Tech)));
        assert!(!prompt.contains("Coverage was low"));

        request.low_coverage_retry = true;
        assert!(build_rewrite_prompt(&request).ends_with(LOW_COVERAGE_SUFFIX));
    }

    #[test]
    fn test_summary_prompt() {
        let terms: Vec<String> = (0..30).map(|i| format!("t{i}")).collect();
        let prompt = build_summary_prompt(&SummaryRequest {
            jd_text: "Nurse informatics role",
            terms: &terms,
            domain: Domain::Healthcare,
        });
        assert!(prompt.contains("STARTS with \"Highly motivated CS candidate with\""));
        assert!(prompt.contains("t19") && !prompt.contains("t20"));
        assert!(prompt.contains("Nurse informatics role"));
    }

    #[tokio::test]
    async fn test_unavailable_rewriter_always_errors() {
        let bullets = strings(&["Built APIs"]);
        let request = RewriteRequest {
            section_label: "Projects",
            bullets: &bullets,
            jd_text: "",
            all_terms: &[],
            critical_terms: &[],
            domain: Domain::General,
            low_coverage_retry: false,
        };
        assert!(matches!(
            UnavailableRewriter.rewrite(&request).await,
            Err(RewriteError::Unavailable)
        ));
        let summary = SummaryRequest {
            jd_text: "",
            terms: &[],
            domain: Domain::General,
        };
        assert!(matches!(
            UnavailableRewriter.summarize(&summary).await,
            Err(RewriteError::Unavailable)
        ));
    }
}
