use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Résumé section buckets. Raw section headers are folded into one of the
/// canonical variants; `Misc` collects everything before the first header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Summary,
    Skills,
    Experience,
    Projects,
    Education,
    Misc,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Projects => "projects",
            Section::Education => "education",
            Section::Misc => "misc",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical section → non-blank lines, in document order.
/// Never contains `Section::Misc` once normalized.
pub type SectionMap = BTreeMap<Section, Vec<String>>;

/// One job or project record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub header: String,
    /// Free-text date range, empty when none was found.
    pub dates: String,
    pub bullets: Vec<String>,
}

impl Entry {
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.bullets.is_empty()
    }
}

/// Fixed skill buckets. Declaration order is the rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    #[serde(rename = "Languages")]
    Languages,
    #[serde(rename = "Frameworks & Libraries")]
    FrameworksLibraries,
    #[serde(rename = "Data & Cloud")]
    DataCloud,
    #[serde(rename = "DevOps")]
    DevOps,
    #[serde(rename = "Design & Tools")]
    DesignTools,
    #[serde(rename = "Soft Skills")]
    SoftSkills,
    #[serde(rename = "Other")]
    Other,
}

impl SkillCategory {
    pub const ORDERED: [SkillCategory; 7] = [
        SkillCategory::Languages,
        SkillCategory::FrameworksLibraries,
        SkillCategory::DataCloud,
        SkillCategory::DevOps,
        SkillCategory::DesignTools,
        SkillCategory::SoftSkills,
        SkillCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::Languages => "Languages",
            SkillCategory::FrameworksLibraries => "Frameworks & Libraries",
            SkillCategory::DataCloud => "Data & Cloud",
            SkillCategory::DevOps => "DevOps",
            SkillCategory::DesignTools => "Design & Tools",
            SkillCategory::SoftSkills => "Soft Skills",
            SkillCategory::Other => "Other",
        }
    }
}

/// Skills as a flat preview list plus the grouped mapping used for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    #[serde(rename = "skills")]
    pub flat: Vec<String>,
    #[serde(rename = "skills_grouped")]
    pub grouped: BTreeMap<SkillCategory, Vec<String>>,
}

/// Single-label classification of a job description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Tech,
    Healthcare,
    Business,
    Research,
    #[default]
    General,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Tech => "tech",
            Domain::Healthcare => "healthcare",
            Domain::Business => "business",
            Domain::Research => "research",
            Domain::General => "general",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final per-request aggregate handed to the renderer or returned as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailoredModel {
    pub name: String,
    pub contact: String,
    pub summary: Vec<String>,
    #[serde(flatten)]
    pub skills: SkillSet,
    pub experience_entries: Vec<Entry>,
    pub project_entries: Vec<Entry>,
    pub education: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_category_order_matches_render_order() {
        let mut sorted = SkillCategory::ORDERED.to_vec();
        sorted.sort();
        assert_eq!(sorted, SkillCategory::ORDERED.to_vec());
        assert_eq!(SkillCategory::ORDERED[0].label(), "Languages");
        assert_eq!(SkillCategory::ORDERED[6].label(), "Other");
    }

    #[test]
    fn test_tailored_model_serializes_wire_field_names() {
        let mut grouped = BTreeMap::new();
        grouped.insert(SkillCategory::FrameworksLibraries, vec!["React".to_string()]);
        let model = TailoredModel {
            name: "Jane Doe".to_string(),
            contact: "jane@x.com".to_string(),
            summary: vec!["Highly motivated CS candidate with grit.".to_string()],
            skills: SkillSet {
                flat: vec!["React".to_string()],
                grouped,
            },
            experience_entries: vec![Entry {
                header: "Engineer — Acme".to_string(),
                ..Entry::default()
            }],
            project_entries: vec![],
            education: vec!["State University, BSc — 2020".to_string()],
        };

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["skills"][0], "React");
        assert_eq!(value["skills_grouped"]["Frameworks & Libraries"][0], "React");
        assert_eq!(value["experience_entries"][0]["header"], "Engineer — Acme");
        assert_eq!(value["experience_entries"][0]["dates"], "");
    }

    #[test]
    fn test_domain_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Domain::Healthcare).unwrap(), "\"healthcare\"");
        assert_eq!(Domain::default(), Domain::General);
    }

    #[test]
    fn test_entry_is_empty() {
        assert!(Entry::default().is_empty());
        assert!(!Entry {
            header: "Acme".to_string(),
            ..Entry::default()
        }
        .is_empty());
    }
}
