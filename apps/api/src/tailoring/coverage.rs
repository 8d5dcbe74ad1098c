use crate::parsing::dedupe_case_insensitive;

/// Minimum share of all merged terms expected in a rewrite.
pub const MIN_TERM_COVERAGE: f64 = 0.85;
/// Minimum share of critical terms expected in a rewrite.
pub const MIN_CRITICAL_COVERAGE: f64 = 0.7;

/// Fraction of unique terms (case-insensitive) found as substrings of `text`.
/// An empty term list is fully covered.
pub fn coverage(text: &str, terms: &[String]) -> f64 {
    let unique = dedupe_case_insensitive(terms.iter().map(|t| t.to_lowercase()));
    if unique.is_empty() {
        return 1.0;
    }
    let haystack = text.to_lowercase();
    let found = unique.iter().filter(|t| haystack.contains(t.as_str())).count();
    found as f64 / unique.len() as f64
}

/// Whether a rewrite should be retried with the coverage reminder.
pub fn needs_coverage_retry(text: &str, all_terms: &[String], critical_terms: &[String]) -> bool {
    coverage(text, all_terms) < MIN_TERM_COVERAGE
        || coverage(text, critical_terms) < MIN_CRITICAL_COVERAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_terms_are_fully_covered() {
        assert_eq!(coverage("anything", &[]), 1.0);
    }

    #[test]
    fn test_coverage_is_case_insensitive_and_unique() {
        let t = terms(&["Rust", "rust", "Kafka", "Go"]);
        let c = coverage("Built Rust services on kafka", &t);
        assert!((c - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_retry_trigger() {
        let critical = terms(&["security", "cloud"]);
        assert!(needs_coverage_retry("secure cloud apps", &[], &critical));
        assert!(!needs_coverage_retry("security in the cloud", &[], &critical));
        assert!(needs_coverage_retry("security in the cloud", &terms(&["rust"]), &critical));
    }
}
