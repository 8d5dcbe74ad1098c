//! Section normalizer: raw résumé text → canonical `SectionMap`.

use tracing::debug;

use crate::lexicon::Lexicon;
use crate::models::resume::{Section, SectionMap};
use crate::parsing::patterns::is_section_header;

/// A run of lines under one raw header, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSegment {
    /// Lowercased, trimmed header text; `"misc"` for lines before any header.
    pub name: String,
    pub lines: Vec<String>,
}

/// Splits text into raw segments keyed by header name, in first-seen order.
/// Blank lines are dropped. A header seen again starts its line list over.
pub fn segment_lines(text: &str) -> Vec<RawSegment> {
    let mut segments = vec![RawSegment {
        name: Section::Misc.as_str().to_string(),
        lines: Vec::new(),
    }];
    let mut current = 0;

    for line in text.lines().map(str::trim_end).filter(|l| !l.trim().is_empty()) {
        if is_section_header(line) {
            let name = line.trim().to_lowercase();
            current = match segments.iter().position(|s| s.name == name) {
                Some(existing) => {
                    segments[existing].lines.clear();
                    existing
                }
                None => {
                    segments.push(RawSegment {
                        name,
                        lines: Vec::new(),
                    });
                    segments.len() - 1
                }
            };
        } else {
            segments[current].lines.push(line.to_string());
        }
    }
    segments.retain(|s| s.name != Section::Misc.as_str() || !s.lines.is_empty());
    segments
}

/// Maps a raw header name to its canonical section: exact name first, then
/// alias substring match in lexicon order.
pub fn canonical_section(raw: &str, lexicon: &Lexicon) -> Option<Section> {
    lexicon
        .section_aliases
        .iter()
        .find(|entry| {
            raw == entry.section.as_str() || entry.aliases.iter().any(|a| raw.contains(a.as_str()))
        })
        .map(|entry| entry.section)
}

/// Normalizes raw text into canonical sections. Content under unrecognised
/// headers (and before the first header) is discarded.
pub fn normalize_sections(text: &str, lexicon: &Lexicon) -> SectionMap {
    let mut sections = SectionMap::new();

    for segment in segment_lines(text) {
        match canonical_section(&segment.name, lexicon) {
            Some(section) => sections
                .entry(section)
                .or_default()
                .extend(segment.lines.into_iter().filter(|l| !l.trim().is_empty())),
            None => debug!(
                "Dropping {} lines under unrecognised section '{}'",
                segment.lines.len(),
                segment.name
            ),
        }
    }

    sections.retain(|_, lines| !lines.is_empty());
    sections
}
