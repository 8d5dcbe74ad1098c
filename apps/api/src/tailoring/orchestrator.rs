//! Tailoring Orchestrator: runs the full résumé tailoring pipeline.
//!
//! Flow: normalize sections → analyze JD (terms, domain, critical terms) →
//!       categorize skills → parse entries → rewrite bullets per entry
//!       (one coverage-triggered retry) → summary → assemble model.
//!
//! The rewriter is advisory: any `RewriteError` keeps the original text.

use tracing::{debug, info, warn};

use crate::lexicon::Lexicon;
use crate::models::resume::{Domain, Section, SectionMap, TailoredModel};
use crate::parsing::entries::parse_entries;
use crate::parsing::sections::normalize_sections;
use crate::parsing::skills::{categorize_skills, tokenize_skills};
use crate::tailoring::coverage::{coverage, needs_coverage_retry};
use crate::tailoring::jd_terms::{
    detect_domain, extract_critical_terms, extract_jd_terms, merge_terms, JD_TOP_TERMS,
};
use crate::tailoring::model_builder::{build_model, ModelParts};
use crate::tailoring::prompts::{fallback_summary, SUMMARY_OPENER};
use crate::tailoring::rewriter::{BulletRewriter, RewriteRequest, SummaryRequest};

const EXPERIENCE_LABEL: &str = "Work Experience";
const PROJECTS_LABEL: &str = "Projects";

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// Extracted request texts plus the caller's seed skills/keywords.
#[derive(Debug, Clone, Copy)]
pub struct TailorInput<'a> {
    pub resume_text: &'a str,
    pub jd_text: &'a str,
    pub jd_skills: &'a [String],
    pub jd_keywords: &'a [String],
}

/// What the pipeline learned about the job description.
#[derive(Debug, Clone, PartialEq)]
pub struct JobProfile {
    pub domain: Domain,
    pub critical_terms: Vec<String>,
    /// Caller terms, mined terms and critical terms merged and capped.
    pub all_terms: Vec<String>,
}

pub fn analyze_job(
    jd_text: &str,
    jd_skills: &[String],
    jd_keywords: &[String],
    lexicon: &Lexicon,
) -> JobProfile {
    let domain = detect_domain(jd_text, lexicon);
    let auto_terms = extract_jd_terms(jd_text, JD_TOP_TERMS, lexicon);
    let critical_terms = extract_critical_terms(jd_text, lexicon);
    let all_terms = merge_terms(jd_skills, jd_keywords, &auto_terms, &critical_terms);
    JobProfile {
        domain,
        critical_terms,
        all_terms,
    }
}

fn section_lines(sections: &SectionMap, section: Section) -> &[String] {
    sections.get(&section).map(Vec::as_slice).unwrap_or(&[])
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

pub async fn build_tailored_model(
    input: TailorInput<'_>,
    lexicon: &Lexicon,
    rewriter: &dyn BulletRewriter,
) -> TailoredModel {
    let sections = normalize_sections(input.resume_text, lexicon);
    info!(
        "Normalized résumé into sections: {:?}",
        sections.keys().map(Section::as_str).collect::<Vec<_>>()
    );

    let job = analyze_job(input.jd_text, input.jd_skills, input.jd_keywords, lexicon);
    info!(
        "JD analyzed: domain={}, {} terms, {} critical",
        job.domain,
        job.all_terms.len(),
        job.critical_terms.len()
    );

    let skill_tokens = tokenize_skills(section_lines(&sections, Section::Skills), lexicon);
    let skills = categorize_skills(skill_tokens, &job.all_terms, lexicon);

    let mut experience = parse_entries(section_lines(&sections, Section::Experience));
    let mut projects = parse_entries(section_lines(&sections, Section::Projects));
    info!(
        "Parsed {} experience and {} project entries",
        experience.len(),
        projects.len()
    );

    for entry in experience.iter_mut() {
        let bullets = std::mem::take(&mut entry.bullets);
        entry.bullets =
            rewrite_entry_bullets(EXPERIENCE_LABEL, bullets, input.jd_text, &job, rewriter).await;
    }
    for entry in projects.iter_mut() {
        let bullets = std::mem::take(&mut entry.bullets);
        entry.bullets =
            rewrite_entry_bullets(PROJECTS_LABEL, bullets, input.jd_text, &job, rewriter).await;
    }

    let summary = tailor_summary(input.jd_text, &job, rewriter).await;

    build_model(ModelParts {
        resume_text: input.resume_text,
        sections: &sections,
        summary,
        skills,
        experience,
        projects,
    })
}

/// Rewrites one entry's bullets, retrying once when the first attempt
/// under-covers the job terms. Falls back to the input on any error.
pub async fn rewrite_entry_bullets(
    section_label: &str,
    bullets: Vec<String>,
    jd_text: &str,
    job: &JobProfile,
    rewriter: &dyn BulletRewriter,
) -> Vec<String> {
    if bullets.is_empty() {
        return bullets;
    }

    let mut request = RewriteRequest {
        section_label,
        bullets: &bullets,
        jd_text,
        all_terms: &job.all_terms,
        critical_terms: &job.critical_terms,
        domain: job.domain,
        low_coverage_retry: false,
    };

    let first = match rewriter.rewrite(&request).await {
        Ok(rewritten) => rewritten,
        Err(e) => {
            warn!("{section_label} rewrite failed, keeping original bullets: {e}");
            return bullets;
        }
    };

    let joined = first.join(" ");
    debug!(
        "{section_label} coverage: all={:.2} critical={:.2}",
        coverage(&joined, &job.all_terms),
        coverage(&joined, &job.critical_terms)
    );
    if !needs_coverage_retry(&joined, &job.all_terms, &job.critical_terms) {
        return first;
    }

    request.low_coverage_retry = true;
    match rewriter.rewrite(&request).await {
        Ok(second) => second,
        Err(e) => {
            warn!("{section_label} coverage retry failed, keeping first rewrite: {e}");
            first
        }
    }
}

/// Third-person summary starting with the required opener.
pub async fn tailor_summary(jd_text: &str, job: &JobProfile, rewriter: &dyn BulletRewriter) -> String {
    let request = SummaryRequest {
        jd_text,
        terms: &job.all_terms,
        domain: job.domain,
    };
    match rewriter.summarize(&request).await {
        Ok(text) => enforce_opener(&text),
        Err(e) => {
            warn!("Summary rewrite unavailable, using template: {e}");
            fallback_summary(job.domain)
        }
    }
}

/// Prepends `"<opener> with "` unless the text already starts with the opener.
pub fn enforce_opener(text: &str) -> String {
    let text = text.trim();
    if text.to_lowercase().starts_with(&SUMMARY_OPENER.to_lowercase()) {
        return text.to_string();
    }
    let mut chars = text.chars();
    let lowered_first = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!("{SUMMARY_OPENER} with {lowered_first}")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::tailoring::rewriter::{RewriteError, UnavailableRewriter};

    /// Returns scripted outputs per call, counting rewrite calls.
    struct ScriptedRewriter {
        outputs: Vec<Result<Vec<String>, ()>>,
        summary: Option<String>,
        calls: AtomicUsize,
        retry_flags: Mutex<Vec<bool>>,
    }

    impl ScriptedRewriter {
        fn new(outputs: Vec<Result<Vec<String>, ()>>) -> Self {
            Self {
                outputs,
                summary: None,
                calls: AtomicUsize::new(0),
                retry_flags: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BulletRewriter for ScriptedRewriter {
        async fn rewrite(&self, request: &RewriteRequest<'_>) -> Result<Vec<String>, RewriteError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            self.retry_flags.lock().unwrap().push(request.low_coverage_retry);
            match self.outputs.get(n).or(self.outputs.last()) {
                Some(Ok(lines)) => Ok(lines.clone()),
                _ => Err(RewriteError::EmptyOutput),
            }
        }

        async fn summarize(&self, _request: &SummaryRequest<'_>) -> Result<String, RewriteError> {
            self.summary.clone().ok_or(RewriteError::Unavailable)
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn job(all: &[&str], critical: &[&str]) -> JobProfile {
        JobProfile {
            domain: Domain::Tech,
            critical_terms: strings(critical),
            all_terms: strings(all),
        }
    }

    #[tokio::test]
    async fn test_half_critical_coverage_triggers_exactly_one_retry() {
        let rewriter = ScriptedRewriter::new(vec![
            Ok(strings(&["Built secure services"])),
            Ok(strings(&["Built secure, scalable services"])),
        ]);
        let job = job(&[], &["secure", "scalable"]);

        let out = rewrite_entry_bullets(
            EXPERIENCE_LABEL,
            strings(&["Built services"]),
            "jd",
            &job,
            &rewriter,
        )
        .await;

        assert_eq!(rewriter.calls(), 2);
        assert_eq!(*rewriter.retry_flags.lock().unwrap(), vec![false, true]);
        assert_eq!(out, strings(&["Built secure, scalable services"]));
    }

    #[tokio::test]
    async fn test_good_coverage_calls_once() {
        let rewriter = ScriptedRewriter::new(vec![Ok(strings(&["Built secure, scalable services"]))]);
        let job = job(&["services"], &["secure", "scalable"]);
        rewrite_entry_bullets(PROJECTS_LABEL, strings(&["Built services"]), "jd", &job, &rewriter)
            .await;
        assert_eq!(rewriter.calls(), 1);
    }

    #[tokio::test]
    async fn test_failures_fall_back() {
        let original = strings(&["Built services"]);
        let job = job(&[], &["secure"]);

        let out =
            rewrite_entry_bullets(EXPERIENCE_LABEL, original.clone(), "jd", &job, &UnavailableRewriter)
                .await;
        assert_eq!(out, original);

        // retry error keeps the first rewrite
        let rewriter = ScriptedRewriter::new(vec![Ok(strings(&["Built fast services"])), Err(())]);
        let out = rewrite_entry_bullets(EXPERIENCE_LABEL, original, "jd", &job, &rewriter).await;
        assert_eq!(out, strings(&["Built fast services"]));
        assert_eq!(rewriter.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_bullets_are_not_sent() {
        let rewriter = ScriptedRewriter::new(vec![Ok(strings(&["never used here"]))]);
        let out = rewrite_entry_bullets(EXPERIENCE_LABEL, vec![], "jd", &job(&[], &[]), &rewriter).await;
        assert!(out.is_empty());
        assert_eq!(rewriter.calls(), 0);
    }

    #[test]
    fn test_enforce_opener() {
        assert_eq!(
            enforce_opener("Experienced engineer who ships."),
            "Highly motivated CS candidate with experienced engineer who ships."
        );
        let already = "highly motivated CS candidate with a love of Rust.";
        assert_eq!(enforce_opener(already), already);
    }

    #[tokio::test]
    async fn test_summary_fallback_and_enforcement() {
        let job = job(&[], &[]);
        let s = tailor_summary("jd", &job, &UnavailableRewriter).await;
        assert_eq!(s, fallback_summary(Domain::Tech));

        let mut rewriter = ScriptedRewriter::new(vec![]);
        rewriter.summary = Some("A builder of reliable systems.".to_string());
        let s = tailor_summary("jd", &job, &rewriter).await;
        assert_eq!(s, "Highly motivated CS candidate with a builder of reliable systems.");
    }

    #[tokio::test]
    async fn test_end_to_end_without_rewriter() {
        let resume = "Jane Doe\njane@x.com\nSKILLS\nLanguages: Python, C++ (STL, Boost)\nEXPERIENCE\n\
            Software Engineer — Acme Corp\nJan 2020 - Present\n- Built APIs\n- Led a team of 3";
        let jd = "Backend engineer for patient-facing clinical APIs. Python, secure and scalable.";
        let seed_skills = strings(&["python"]);
        let model = build_tailored_model(
            TailorInput {
                resume_text: resume,
                jd_text: jd,
                jd_skills: &seed_skills,
                jd_keywords: &[],
            },
            &Lexicon::default(),
            &UnavailableRewriter,
        )
        .await;

        assert_eq!(model.name, "Jane Doe");
        assert_eq!(model.contact, "jane@x.com");
        assert_eq!(model.experience_entries.len(), 1);
        assert_eq!(model.experience_entries[0].header, "Software Engineer — Acme Corp");
        assert_eq!(model.experience_entries[0].dates, "Jan 2020 - Present");
        assert_eq!(
            model.experience_entries[0].bullets,
            strings(&["Built APIs", "Led a team of 3"])
        );
        assert!(model.project_entries.is_empty());
        assert_eq!(model.summary, vec![fallback_summary(Domain::Tech)]);
        assert_eq!(model.skills.flat[..2], strings(&["Python", "C++"])[..]);
        assert_eq!(model.education, vec!["University, Degree — YYYY"]);
    }

    #[tokio::test]
    async fn test_degenerate_input_still_produces_model() {
        let model = build_tailored_model(
            TailorInput {
                resume_text: "just some words",
                jd_text: "x",
                jd_skills: &[],
                jd_keywords: &[],
            },
            &Lexicon::default(),
            &UnavailableRewriter,
        )
        .await;
        assert_eq!(model.name, "just some words");
        assert!(model.experience_entries.is_empty());
        assert_eq!(model.summary.len(), 1);
    }

    #[test]
    fn test_analyze_job_merges_caller_terms_first() {
        let lex = Lexicon::default();
        let job = analyze_job(
            "Secure cloud APIs",
            &strings(&["Rust"]),
            &strings(&["teams"]),
            &lex,
        );
        assert_eq!(job.domain, Domain::Tech);
        assert_eq!(&job.all_terms[..2], &["Rust", "teams"]);
        assert_eq!(job.critical_terms, strings(&["secure", "cloud"]));
    }
}
