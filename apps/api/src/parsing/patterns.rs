//! Line-level predicates shared by the section normalizer and the entry parser.
//!
//! Each heuristic is a named function so the scan loops stay readable and the
//! rules can be tested one at a time.

use once_cell::sync::Lazy;
use regex::{Match, Regex};

static BULLET_MARK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[•\-–]\s+").unwrap());

static SECTION_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z &/\-]{2,}$").unwrap());

// Month + year with an optional range tail, or a bare year range.
static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    let month = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?";
    let marker = r"(?:–|—|-|to)";
    let end = format!(r"(?:present|current|now|(?:{month}\s+)?\d{{4}})");
    Regex::new(&format!(
        r"(?i)\b{month}\s+\d{{4}}(?:\s*{marker}\s*{end})?\b|\b\d{{4}}\s*{marker}\s*(?:present|current|now|\d{{4}})\b"
    ))
    .unwrap()
});

const LINK_LABELS: &[&str] = &["github:", "link:", "demo:", "repo:", "website:"];

const HEADER_SEPARATORS: &[&str] = &[" — ", " - ", " | ", ":", " · "];

/// Maximum words in a section header line.
const SECTION_HEADER_MAX_WORDS: usize = 6;
/// Title-cased lines longer than this are treated as prose.
const HEADERISH_MAX_CHARS: usize = 120;
const HEADERISH_MIN_TITLE_RATIO: f64 = 0.5;

/// `•`, `-` or `–` followed by whitespace at the start of the line.
pub fn is_bullet_line(line: &str) -> bool {
    BULLET_MARK_RE.is_match(line)
}

/// Removes a leading bullet marker, if any, and trims the remainder.
pub fn strip_bullet_marker(line: &str) -> &str {
    match BULLET_MARK_RE.find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line.trim(),
    }
}

/// A short, capitalised, punctuation-free line such as `WORK EXPERIENCE`.
pub fn is_section_header(line: &str) -> bool {
    !is_bullet_line(line)
        && SECTION_HEADER_RE.is_match(line.trim())
        && line.split_whitespace().count() <= SECTION_HEADER_MAX_WORDS
}

/// `github:`, `repo:` and friends, case-insensitive.
pub fn starts_with_link_label(line: &str) -> bool {
    let lower = line.trim().to_lowercase();
    LINK_LABELS.iter().any(|label| lower.starts_with(label))
}

/// First date range in the line, e.g. `Jan 2020 - Present` or `2018–2021`.
pub fn find_date_range(line: &str) -> Option<Match<'_>> {
    DATE_RANGE_RE.find(line)
}

/// Fraction of whitespace tokens that start uppercase and contain a
/// lowercase character after the first.
pub fn title_case_ratio(line: &str) -> f64 {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return 0.0;
    }
    let titled = tokens
        .iter()
        .filter(|t| {
            let mut chars = t.chars();
            chars.next().is_some_and(char::is_uppercase) && chars.any(char::is_lowercase)
        })
        .count();
    titled as f64 / tokens.len() as f64
}

pub fn ends_with_sentence_punctuation(line: &str) -> bool {
    line.trim_end().ends_with(['.', '!', '?'])
}

pub fn has_header_separator(line: &str) -> bool {
    HEADER_SEPARATORS.iter().any(|sep| line.contains(sep))
}

/// Whether a line inside experience/projects likely opens a new entry.
///
/// Ambiguous lines resolve towards the header interpretation.
pub fn is_headerish(line: &str) -> bool {
    if is_bullet_line(line) || starts_with_link_label(line) {
        return false;
    }
    let looks_titled = title_case_ratio(line) >= HEADERISH_MIN_TITLE_RATIO
        && line.chars().count() <= HEADERISH_MAX_CHARS;
    (has_header_separator(line) || looks_titled) && !ends_with_sentence_punctuation(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_markers() {
        assert!(is_bullet_line("- Built APIs"));
        assert!(is_bullet_line("• Led a team"));
        assert!(is_bullet_line("  – Shipped v2"));
        assert!(!is_bullet_line("-Built"));
        assert!(!is_bullet_line("Built APIs"));
    }

    #[test]
    fn test_strip_bullet_marker() {
        assert_eq!(strip_bullet_marker("- Built APIs "), "Built APIs");
        assert_eq!(strip_bullet_marker("• Led a team of 3"), "Led a team of 3");
        assert_eq!(strip_bullet_marker("  plain text "), "plain text");
    }

    #[test]
    fn test_section_header_detection() {
        assert!(is_section_header("EXPERIENCE"));
        assert!(is_section_header("Work Experience"));
        assert!(is_section_header("Skills & Tools"));
        assert!(is_section_header("  Projects  "));
        assert!(!is_section_header("Software Engineer — Acme Corp"));
        assert!(!is_section_header("Jan 2020 - Present"));
        assert!(!is_section_header("- Skills"));
        assert!(!is_section_header("Go"));
        assert!(!is_section_header("education"));
        assert!(!is_section_header("One Two Three Four Five Six Seven"));
    }

    #[test]
    fn test_link_labels() {
        assert!(starts_with_link_label("GitHub: github.com/jane/app"));
        assert!(starts_with_link_label("  demo: https://x.io"));
        assert!(!starts_with_link_label("Built a GitHub: integration"));
    }

    #[test]
    fn test_date_range_month_year_to_present() {
        let m = find_date_range("Jan 2020 - Present").unwrap();
        assert_eq!(m.as_str(), "Jan 2020 - Present");
    }

    #[test]
    fn test_date_range_month_to_month() {
        let m = find_date_range("Engineer | Acme | Sept 2019 – Mar 2021").unwrap();
        assert_eq!(m.as_str(), "Sept 2019 – Mar 2021");
    }

    #[test]
    fn test_date_range_bare_years() {
        assert_eq!(find_date_range("Acme 2018-2021").unwrap().as_str(), "2018-2021");
        assert_eq!(
            find_date_range("2019 to present").unwrap().as_str(),
            "2019 to present"
        );
    }

    #[test]
    fn test_date_range_single_month_year() {
        assert_eq!(find_date_range("May 2023").unwrap().as_str(), "May 2023");
    }

    #[test]
    fn test_no_date_range() {
        assert!(find_date_range("Led a team of 3").is_none());
        assert!(find_date_range("Reduced latency by 2000 ms").is_none());
    }

    #[test]
    fn test_title_case_ratio() {
        assert_eq!(title_case_ratio(""), 0.0);
        assert_eq!(title_case_ratio("Software Engineer"), 1.0);
        assert_eq!(title_case_ratio("built the API"), 0.0);
        // "AWS" has no lowercase tail, so it does not count.
        assert_eq!(title_case_ratio("Cloud AWS"), 0.5);
    }

    #[test]
    fn test_headerish_with_separator() {
        assert!(is_headerish("Software Engineer — Acme Corp"));
        assert!(is_headerish("backend engineer | startup"));
    }

    #[test]
    fn test_headerish_title_case() {
        assert!(is_headerish("Realtime Chat Application"));
    }

    #[test]
    fn test_not_headerish() {
        assert!(!is_headerish("- Built APIs"));
        assert!(!is_headerish("github: github.com/jane"));
        assert!(!is_headerish("Reduced Latency By Caching Responses."));
        assert!(!is_headerish("wrote integration tests for the billing service"));
    }
}
