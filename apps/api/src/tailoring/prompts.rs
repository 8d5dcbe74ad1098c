// Prompt constants for bullet and summary rewriting.
// Templates use `{placeholder}` markers filled with `str::replace`.

use crate::models::resume::Domain;

/// Every summary must start with this phrase.
pub const SUMMARY_OPENER: &str = "Highly motivated CS candidate";

pub const MAX_PROMPT_CRITICAL_TERMS: usize = 14;
pub const MAX_PROMPT_OTHER_TERMS: usize = 40;
pub const MAX_SUMMARY_TERMS: usize = 20;

pub const REWRITE_SYSTEM: &str = "You are an expert resume writer. \
    You rewrite resume bullet points without inventing facts. \
    Respond with the bullet list only: no preamble, no headings, no explanations.";

/// Bullet rewrite prompt. Replace `{section}`, `{domain_hint}`, `{jd_text}`,
/// `{critical_terms}`, `{other_terms}` and `{bullets}` before sending.
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"Rewrite the following {section} bullet points for an ATS-optimized, human-readable resume.

Rules:
- Keep every fact true; do NOT invent roles, employers or numbers.
- Start with strong action verbs; keep each bullet under 28 words.
- Weave job-description keywords naturally, inline, with no parentheses or keyword dumps.
- {domain_hint}
Return each bullet on its own line beginning with "- ".

Job Description:
{jd_text}

Critical keywords to include when relevant: {critical_terms}
Additional keywords to consider: {other_terms}

Original bullets:
{bullets}"#;

/// Appended to the rewrite prompt when the first attempt under-covered the terms.
pub const LOW_COVERAGE_SUFFIX: &str = "\n\nCoverage was low. Re-inject missing relevant terms \
    organically while keeping clarity and truth. Avoid repetitive phrasing.";

pub const SUMMARY_SYSTEM: &str = "You are an expert resume writer. \
    Respond with the summary text only.";

/// Summary prompt. Replace `{opener}`, `{domain_hint}`, `{terms}` and `{jd_text}`.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Write a concise, 2-sentence, third-person summary that STARTS with "{opener} with".
Make it natural and recruiter-friendly, not keyword-stuffed. Blend several relevant job-description terms.

Domain emphasis: {domain_hint}

JD terms: {terms}

Job Description:
{jd_text}"#;

/// Used when no rewritten summary is available.
pub fn fallback_summary(domain: Domain) -> String {
    format!(
        "{SUMMARY_OPENER} with hands-on experience and interest in {domain} problems; \
        collaborates well across teams and focuses on scalable, reliable results."
    )
}

/// Emphasis line injected into both prompts.
pub fn domain_hint(domain: Domain) -> &'static str {
    match domain {
        Domain::Tech => "Emphasize scalability, security, design patterns, distributed systems, code quality, and collaboration with QA.",
        Domain::Business => "Emphasize stakeholder communication, measurable outcomes, process improvements, and cross-functional collaboration.",
        Domain::Healthcare => "Emphasize compliance, patient/user outcomes, data privacy/security, and interdisciplinary collaboration.",
        Domain::Research => "Emphasize experimental design, analysis, reproducibility, and insightful results.",
        Domain::General => "Emphasize reliability, teamwork, initiative, and measurable impact.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_summary_names_domain_and_opener() {
        let s = fallback_summary(Domain::Healthcare);
        assert!(s.starts_with(SUMMARY_OPENER));
        assert!(s.contains("interest in healthcare problems"));
    }

    #[test]
    fn test_templates_carry_all_placeholders() {
        for key in ["{section}", "{domain_hint}", "{jd_text}", "{critical_terms}", "{other_terms}", "{bullets}"] {
            assert!(REWRITE_PROMPT_TEMPLATE.contains(key), "missing {key}");
        }
        for key in ["{opener}", "{domain_hint}", "{terms}", "{jd_text}"] {
            assert!(SUMMARY_PROMPT_TEMPLATE.contains(key), "missing {key}");
        }
    }
}
