//! Job-description analysis: term mining, domain detection, critical terms.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::Lexicon;
use crate::models::resume::Domain;
use crate::parsing::dedupe_case_insensitive;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

pub const JD_TOP_TERMS: usize = 100;
pub const MAX_MERGED_TERMS: usize = 120;

/// Frequency-ranked unigrams and bigrams over stopword-filtered text.
/// Bigrams are formed after stopword removal; ties sort alphabetically.
pub fn extract_jd_terms(jd_text: &str, top_n: usize, lexicon: &Lexicon) -> Vec<String> {
    let lower = jd_text.to_lowercase();
    let words: Vec<&str> = WORD_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|w| !lexicon.english_stopwords.contains(*w))
        .collect();

    let mut counts: HashMap<String, u32> = HashMap::new();
    for word in &words {
        *counts.entry(word.to_string()).or_default() += 1;
    }
    for pair in words.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_default() += 1;
    }

    let mut ranked: Vec<(String, u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(top_n).map(|(term, _)| term).collect()
}

/// First domain (in lexicon priority order) with any keyword substring hit.
pub fn detect_domain(jd_text: &str, lexicon: &Lexicon) -> Domain {
    let lower = jd_text.to_lowercase();
    lexicon
        .domains
        .iter()
        .find(|d| d.keywords.iter().any(|k| lower.contains(k.as_str())))
        .map(|d| d.domain)
        .unwrap_or(Domain::General)
}

/// Checklist terms that literally occur in the job description.
pub fn extract_critical_terms(jd_text: &str, lexicon: &Lexicon) -> Vec<String> {
    let lower = jd_text.to_lowercase();
    dedupe_case_insensitive(
        lexicon
            .critical_terms
            .iter()
            .filter(|t| lower.contains(t.as_str()))
            .cloned(),
    )
}

/// Caller-supplied skills and keywords, mined terms, then critical terms;
/// deduplicated and capped.
pub fn merge_terms(
    jd_skills: &[String],
    jd_keywords: &[String],
    auto_terms: &[String],
    critical_terms: &[String],
) -> Vec<String> {
    let mut merged = dedupe_case_insensitive(
        jd_skills
            .iter()
            .chain(jd_keywords)
            .chain(auto_terms)
            .chain(critical_terms)
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(String::from),
    );
    merged.truncate(MAX_MERGED_TERMS);
    merged
}
