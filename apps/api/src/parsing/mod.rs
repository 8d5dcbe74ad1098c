// Résumé text heuristics: line predicates, section normalization, entry
// parsing, skill categorization and keyword extraction.
// Everything here is pure and infallible; degenerate input yields empty output.

use std::collections::HashSet;

pub mod entries;
pub mod keywords;
pub mod patterns;
pub mod sections;
pub mod skills;

/// Drops case-insensitive repeats, keeping the first spelling seen.
pub fn dedupe_case_insensitive<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}
