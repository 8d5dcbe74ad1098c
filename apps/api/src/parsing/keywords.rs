//! Frequency-based term extraction used to seed skills/keywords from a job
//! description.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::Lexicon;
use crate::parsing::dedupe_case_insensitive;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}+\-/.#]+").unwrap());

/// Tokens of this many characters or fewer are ignored.
const MIN_TOKEN_CHARS_EXCLUSIVE: usize = 2;
/// Added to a token's count when it appears in the seed-skill list.
pub const SEED_BOOST: u32 = 3;
/// Candidate pool considered for seed extraction.
pub const SEED_TOP_TERMS: usize = 80;

/// Skills (technical-marker hits) and general keywords, each capped at `k`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSets {
    pub skills: Vec<String>,
    pub keywords: Vec<String>,
}

/// Lowercased tokens longer than two characters, in text order.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| t.chars().count() > MIN_TOKEN_CHARS_EXCLUSIVE)
        .map(String::from)
        .collect()
}

/// Top `top_n` tokens by count. Equal counts keep first-seen order.
pub fn rank_terms(text: &str, seed_skills: &[String], top_n: usize) -> Vec<(String, u32)> {
    let mut order: Vec<(String, u32)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in tokenize(text) {
        match index.get(&token) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(token.clone(), order.len());
                order.push((token, 1));
            }
        }
    }

    for seed in seed_skills {
        if let Some(&i) = index.get(&seed.trim().to_lowercase()) {
            order[i].1 += SEED_BOOST;
        }
    }

    // stable: ties stay in first-seen order
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.truncate(top_n);
    order
}

/// Splits the top terms into skills and keywords, `k` of each at most.
pub fn extract_keywords(
    text: &str,
    seed_skills: &[String],
    k: usize,
    lexicon: &Lexicon,
) -> KeywordSets {
    let mut skills = Vec::new();
    let mut keywords = Vec::new();

    for (term, _) in rank_terms(text, seed_skills, SEED_TOP_TERMS) {
        if lexicon
            .technical_markers
            .iter()
            .any(|marker| term.contains(marker.as_str()))
        {
            skills.push(term);
        } else if !lexicon.keyword_stopwords.contains(&term) {
            keywords.push(term);
        }
    }

    let mut skills = dedupe_case_insensitive(skills);
    let mut keywords = dedupe_case_insensitive(keywords);
    skills.truncate(k);
    keywords.truncate(k);

    KeywordSets { skills, keywords }
}
