//! Entry parser: experience/projects lines → ordered `Entry` records.
//!
//! Single forward scan with one line of lookahead. A header-ish line closes
//! the open entry and starts a new one; a date range on the header line or
//! on the line right after it becomes `dates`; everything else is buffered
//! as raw bullet lines and folded when the entry closes.

use crate::models::resume::Entry;
use crate::parsing::patterns::{
    find_date_range, is_bullet_line, is_headerish, starts_with_link_label, strip_bullet_marker,
};

/// Characters trimmed from the header where a date range was cut out.
const HEADER_TRIM_CHARS: &[char] = &['|', '—', '–', '-', ',', '·', ':', '(', ')'];

/// Explicitly marked bullets survive with this many words.
const MIN_MARKED_BULLET_WORDS: usize = 2;
/// Unmarked fragments need at least this many words.
const MIN_FRAGMENT_WORDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BulletKind {
    Marked,
    Unmarked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LogicalBullet {
    kind: BulletKind,
    text: String,
}

impl LogicalBullet {
    fn is_kept(&self) -> bool {
        let words = self.text.split_whitespace().count();
        match self.kind {
            BulletKind::Marked => words >= MIN_MARKED_BULLET_WORDS,
            BulletKind::Unmarked => words >= MIN_FRAGMENT_WORDS,
        }
    }
}

/// Rebuilds line-wrapped bullets: a marked line starts a new bullet, an
/// unmarked line continues the previous one.
fn fold_wrapped_bullets(lines: &[String]) -> Vec<LogicalBullet> {
    let mut out: Vec<LogicalBullet> = Vec::new();

    for line in lines {
        if is_bullet_line(line) {
            out.push(LogicalBullet {
                kind: BulletKind::Marked,
                text: strip_bullet_marker(line).to_string(),
            });
        } else {
            let line = line.trim();
            match out.last_mut() {
                Some(last) => {
                    if !last.text.is_empty() {
                        last.text.push(' ');
                    }
                    last.text.push_str(line);
                }
                _ => out.push(LogicalBullet {
                    kind: BulletKind::Unmarked,
                    text: line.to_string(),
                }),
            }
        }
    }

    out.retain(|b| !b.text.is_empty());
    out
}

/// Removes the matched date range from a header line. The header is the
/// text before the dates, or the text after them when nothing precedes, so
/// it stays a contiguous slice of the source line.
fn strip_dates(line: &str, start: usize, end: usize) -> String {
    let is_trim = |c: char| c.is_whitespace() || HEADER_TRIM_CHARS.contains(&c);
    let left = line[..start].trim_end_matches(is_trim).trim_start();
    if !left.is_empty() {
        return left.to_string();
    }
    line[end..].trim_start_matches(is_trim).trim_end().to_string()
}

#[derive(Default)]
struct PendingEntry {
    header: String,
    dates: String,
    raw_bullets: Vec<String>,
}

impl PendingEntry {
    fn finish(self) -> Option<Entry> {
        let bullets: Vec<String> = fold_wrapped_bullets(&self.raw_bullets)
            .into_iter()
            .filter(LogicalBullet::is_kept)
            .map(|b| b.text)
            .collect();
        let entry = Entry {
            header: self.header,
            dates: self.dates,
            bullets,
        };
        (!entry.is_empty()).then_some(entry)
    }
}

/// Parses the lines of one experience or projects section into entries.
pub fn parse_entries(section_lines: &[String]) -> Vec<Entry> {
    let lines: Vec<&str> = section_lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut entries = Vec::new();
    let mut current: Option<PendingEntry> = None;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if is_headerish(line) {
            if let Some(done) = current.take().and_then(PendingEntry::finish) {
                entries.push(done);
            }

            let mut pending = PendingEntry {
                header: line.to_string(),
                ..PendingEntry::default()
            };

            if let Some(m) = find_date_range(line) {
                pending.dates = m.as_str().trim().to_string();
                pending.header = strip_dates(line, m.start(), m.end());
            } else if let Some(m) = lines.get(i + 1).and_then(|next| find_date_range(next)) {
                pending.dates = m.as_str().trim().to_string();
                i += 1;
            }

            if let Some(next) = lines.get(i + 1).filter(|next| starts_with_link_label(next)) {
                pending.raw_bullets.push(next.to_string());
                i += 1;
            }

            current = Some(pending);
        } else {
            current
                .get_or_insert_with(PendingEntry::default)
                .raw_bullets
                .push(line.to_string());
        }

        i += 1;
    }

    if let Some(done) = current.and_then(PendingEntry::finish) {
        entries.push(done);
    }
    entries
}
