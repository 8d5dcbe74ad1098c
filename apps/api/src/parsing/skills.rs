//! Skill categorizer: free-text skill lines → flat list + fixed-category groups.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::Lexicon;
use crate::models::resume::{SkillCategory, SkillSet};
use crate::parsing::dedupe_case_insensitive;

static CATEGORY_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(programming|languages?|frameworks?|librar(?:y|ies)|tooling|tools|ai|ml|data|devops)\s*:\s*",
    )
    .unwrap()
});

static JD_SKILL_CHARSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9#.+\- ]+$").unwrap());

const MAX_SKILL_CHARS: usize = 40;
const JD_TERM_MIN_CHARS: usize = 2;
const JD_TERM_MAX_CHARS: usize = 24;
pub const MAX_PER_CATEGORY: usize = 10;
pub const MAX_FLAT_SKILLS: usize = 30;

/// Splits on `,`, `|`, `;` and newlines that are not inside parentheses.
fn split_outside_parens(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' | '|' | ';' | '\n' if depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + ch.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// `"Cloud (AWS, GCP)"` → `["Cloud", "AWS", "GCP"]`; other tokens pass through.
fn expand_parenthetical(token: &str) -> Vec<String> {
    let (Some(open), Some(close)) = (token.find('('), token.rfind(')')) else {
        return vec![token.trim().to_string()];
    };
    if close < open {
        return vec![token.trim().to_string()];
    }

    let mut out = Vec::new();
    let head = token[..open].trim();
    if !head.is_empty() {
        out.push(head.to_string());
    }
    out.extend(
        token[open + 1..close]
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
    );
    out
}

/// Tokenizes the raw skills section into distinct skill strings.
pub fn tokenize_skills(skill_lines: &[String], lexicon: &Lexicon) -> Vec<String> {
    let joined = skill_lines.join(" | ");
    let text = CATEGORY_LABEL_RE.replace_all(&joined, "");

    let tokens = split_outside_parens(&text)
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .flat_map(expand_parenthetical)
        .filter(|t| {
            !t.is_empty()
                && !lexicon.noise_skills.contains(&t.to_lowercase())
                && t.chars().count() <= MAX_SKILL_CHARS
        });

    dedupe_case_insensitive(tokens)
}

/// Appends job-description terms that look like skills and are not present yet.
pub fn augment_with_jd_terms(tokens: &mut Vec<String>, jd_terms: &[String]) {
    for term in jd_terms {
        let term = term.trim();
        let len = term.chars().count();
        if !(JD_TERM_MIN_CHARS..=JD_TERM_MAX_CHARS).contains(&len)
            || !JD_SKILL_CHARSET_RE.is_match(term)
        {
            continue;
        }
        let lower = term.to_lowercase();
        if !tokens.iter().any(|t| t.to_lowercase() == lower) {
            tokens.push(term.to_string());
        }
    }
}

/// Uppercases the first letter of every alphabetic run, lowercases the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Looks up the bucket for one token. Unknown tokens land in `Other`.
pub fn category_of(token: &str, lexicon: &Lexicon) -> SkillCategory {
    let lower = token.to_lowercase();
    lexicon
        .skill_categories
        .iter()
        .find(|table| table.skills.contains(&lower))
        .map(|table| table.category)
        .unwrap_or(SkillCategory::Other)
}

/// Buckets every token into exactly one category, uncapped.
pub fn categorize(tokens: &[String], lexicon: &Lexicon) -> BTreeMap<SkillCategory, Vec<String>> {
    let mut buckets: BTreeMap<SkillCategory, Vec<String>> = BTreeMap::new();
    for token in tokens {
        let category = category_of(token, lexicon);
        let display = if category == SkillCategory::SoftSkills {
            title_case(token)
        } else {
            token.clone()
        };
        buckets.entry(category).or_default().push(display);
    }
    buckets
        .into_iter()
        .map(|(category, skills)| (category, dedupe_case_insensitive(skills)))
        .filter(|(_, skills)| !skills.is_empty())
        .collect()
}

/// Applies the per-category and flat caps.
pub fn build_skill_set(buckets: BTreeMap<SkillCategory, Vec<String>>) -> SkillSet {
    let grouped: BTreeMap<SkillCategory, Vec<String>> = buckets
        .into_iter()
        .map(|(category, mut skills)| {
            skills.truncate(MAX_PER_CATEGORY);
            (category, skills)
        })
        .filter(|(_, skills)| !skills.is_empty())
        .collect();

    let mut flat = dedupe_case_insensitive(
        SkillCategory::ORDERED
            .iter()
            .filter_map(|c| grouped.get(c))
            .flatten()
            .cloned(),
    );
    flat.truncate(MAX_FLAT_SKILLS);

    SkillSet { flat, grouped }
}

/// Full categorization: résumé tokens plus job-description terms → `SkillSet`.
pub fn categorize_skills(mut tokens: Vec<String>, jd_terms: &[String], lexicon: &Lexicon) -> SkillSet {
    augment_with_jd_terms(&mut tokens, jd_terms);
    build_skill_set(categorize(&tokens, lexicon))
}
