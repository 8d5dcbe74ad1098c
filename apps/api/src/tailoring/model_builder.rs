//! Rendering model builder: assembles the final `TailoredModel` from the
//! pipeline's pieces, applying display defaults and bullet caps.

use crate::models::resume::{Entry, Section, SectionMap, SkillSet, TailoredModel};

pub const MAX_EXPERIENCE_BULLETS: usize = 5;
pub const MAX_PROJECT_BULLETS: usize = 3;

pub const DEFAULT_NAME: &str = "Your Name";
pub const DEFAULT_CONTACT: &str = "email@example.com | (000) 000-0000 | City, ST";
pub const DEFAULT_EDUCATION: &str = "University, Degree — YYYY";

/// Everything the pipeline produced for one request.
#[derive(Debug, Clone)]
pub struct ModelParts<'a> {
    pub resume_text: &'a str,
    pub sections: &'a SectionMap,
    pub summary: String,
    pub skills: SkillSet,
    pub experience: Vec<Entry>,
    pub projects: Vec<Entry>,
}

/// First non-blank line is the name, the second the contact line.
pub fn derive_name_and_contact(resume_text: &str) -> (String, String) {
    let mut lines = resume_text.lines().map(str::trim).filter(|l| !l.is_empty());
    let name = lines.next().unwrap_or(DEFAULT_NAME).to_string();
    let contact = lines.next().unwrap_or(DEFAULT_CONTACT).to_string();
    (name, contact)
}

/// Caps bullets per entry. Entries themselves are never dropped.
pub fn trim_bullets(entries: Vec<Entry>, max_bullets: usize) -> Vec<Entry> {
    entries
        .into_iter()
        .map(|mut entry| {
            entry.header = entry.header.trim().to_string();
            entry.dates = entry.dates.trim().to_string();
            entry.bullets.truncate(max_bullets);
            entry
        })
        .collect()
}

pub fn education_lines(sections: &SectionMap) -> Vec<String> {
    match sections.get(&Section::Education) {
        Some(lines) if !lines.is_empty() => lines.iter().map(|l| l.trim().to_string()).collect(),
        _ => vec![DEFAULT_EDUCATION.to_string()],
    }
}

pub fn build_model(parts: ModelParts<'_>) -> TailoredModel {
    let (name, contact) = derive_name_and_contact(parts.resume_text);
    TailoredModel {
        name,
        contact,
        summary: vec![parts.summary],
        skills: parts.skills,
        experience_entries: trim_bullets(parts.experience, MAX_EXPERIENCE_BULLETS),
        project_entries: trim_bullets(parts.projects, MAX_PROJECT_BULLETS),
        education: education_lines(parts.sections),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(bullets: usize) -> Entry {
        Entry {
            header: "  Engineer — Acme ".to_string(),
            dates: "2020 - 2021 ".to_string(),
            bullets: (0..bullets).map(|i| format!("bullet number {i}")).collect(),
        }
    }

    #[test]
    fn test_name_and_contact_skip_blank_lines() {
        let (name, contact) = derive_name_and_contact("\n  Jane Doe \n\njane@x.com\nEXPERIENCE");
        assert_eq!(name, "Jane Doe");
        assert_eq!(contact, "jane@x.com");
    }

    #[test]
    fn test_name_and_contact_defaults() {
        assert_eq!(
            derive_name_and_contact(""),
            (DEFAULT_NAME.to_string(), DEFAULT_CONTACT.to_string())
        );
        let (name, contact) = derive_name_and_contact("Solo Line");
        assert_eq!(name, "Solo Line");
        assert_eq!(contact, DEFAULT_CONTACT);
    }

    #[test]
    fn test_trim_bullets_keeps_every_entry() {
        let trimmed = trim_bullets(vec![entry(8), entry(0), entry(2)], MAX_PROJECT_BULLETS);
        assert_eq!(trimmed.len(), 3);
        assert_eq!(trimmed[0].bullets.len(), 3);
        assert!(trimmed[1].bullets.is_empty());
        assert_eq!(trimmed[2].bullets.len(), 2);
        assert_eq!(trimmed[0].header, "Engineer — Acme");
        assert_eq!(trimmed[0].dates, "2020 - 2021");
    }

    #[test]
    fn test_education_default_and_passthrough() {
        let mut sections = SectionMap::new();
        assert_eq!(education_lines(&sections), vec![DEFAULT_EDUCATION]);
        sections.insert(Section::Education, vec!["State University, BSc — 2020".to_string()]);
        assert_eq!(education_lines(&sections), vec!["State University, BSc — 2020"]);
    }

    #[test]
    fn test_build_model_applies_caps() {
        let sections = SectionMap::new();
        let model = build_model(ModelParts {
            resume_text: "Jane Doe\njane@x.com",
            sections: &sections,
            summary: "Highly motivated CS candidate with drive.".to_string(),
            skills: SkillSet::default(),
            experience: vec![entry(7)],
            projects: vec![entry(7)],
        });
        assert_eq!(model.name, "Jane Doe");
        assert_eq!(model.summary.len(), 1);
        assert_eq!(model.experience_entries[0].bullets.len(), MAX_EXPERIENCE_BULLETS);
        assert_eq!(model.project_entries[0].bullets.len(), MAX_PROJECT_BULLETS);
    }
}
