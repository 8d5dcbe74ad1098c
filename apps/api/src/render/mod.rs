//! Document rendering of a `TailoredModel`.
//!
//! Fixed section order: header (name + contact), SUMMARY, SKILLS, WORK
//! EXPERIENCE, PROJECTS, EDUCATION. Empty sections are omitted.
//!
//! Output is a single flowing document with no page layout; pagination is
//! left to whatever later converts it (a PDF renderer would slot in behind
//! `DocumentRenderer`).

use std::fmt::Write;

use anyhow::Result;

use crate::models::resume::{Entry, SkillCategory, TailoredModel};

/// Pluggable output format. Carried in `AppState` as `Arc<dyn DocumentRenderer>`.
pub trait DocumentRenderer: Send + Sync {
    fn content_type(&self) -> &'static str;
    /// Suggested attachment name.
    fn file_name(&self) -> &'static str;
    fn render(&self, model: &TailoredModel) -> Result<Vec<u8>>;
}

/// Markdown output; entry header/date lines are two-column tables.
pub struct MarkdownRenderer;

impl DocumentRenderer for MarkdownRenderer {
    fn content_type(&self) -> &'static str {
        "text/markdown; charset=utf-8"
    }

    fn file_name(&self) -> &'static str {
        "tailored_resume.md"
    }

    fn render(&self, model: &TailoredModel) -> Result<Vec<u8>> {
        Ok(render_markdown(model)?.into_bytes())
    }
}

fn non_blank(items: &[String]) -> impl Iterator<Item = &str> {
    items.iter().map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn table_cell(text: &str) -> String {
    text.trim().replace('|', "\\|")
}

fn write_bullets(out: &mut String, items: &[String]) -> std::fmt::Result {
    for item in non_blank(items) {
        writeln!(out, "- {item}")?;
    }
    writeln!(out)
}

fn write_entries(out: &mut String, title: &str, entries: &[Entry]) -> std::fmt::Result {
    if entries.is_empty() {
        return Ok(());
    }
    writeln!(out, "## {title}\n")?;
    for entry in entries {
        writeln!(out, "| **{}** | {} |", table_cell(&entry.header), table_cell(&entry.dates))?;
        writeln!(out, "|:---|---:|\n")?;
        write_bullets(out, &entry.bullets)?;
    }
    Ok(())
}

pub fn render_markdown(model: &TailoredModel) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    writeln!(out, "# {}\n", model.name.trim())?;
    if !model.contact.trim().is_empty() {
        writeln!(out, "{}\n", model.contact.trim())?;
    }
    writeln!(out, "---\n")?;

    if non_blank(&model.summary).next().is_some() {
        writeln!(out, "## SUMMARY\n")?;
        write_bullets(&mut out, &model.summary)?;
    }

    let grouped = &model.skills.grouped;
    if grouped.values().any(|v| !v.is_empty()) {
        writeln!(out, "## SKILLS\n")?;
        for category in SkillCategory::ORDERED {
            match grouped.get(&category) {
                Some(skills) if !skills.is_empty() => {
                    writeln!(out, "**{}:** {}  ", category.label(), skills.join(", "))?
                }
                _ => {}
            }
        }
        writeln!(out)?;
    } else if !model.skills.flat.is_empty() {
        writeln!(out, "## SKILLS\n")?;
        writeln!(out, "{}\n", model.skills.flat.join(", "))?;
    }

    write_entries(&mut out, "WORK EXPERIENCE", &model.experience_entries)?;
    write_entries(&mut out, "PROJECTS", &model.project_entries)?;

    if non_blank(&model.education).next().is_some() {
        writeln!(out, "## EDUCATION\n")?;
        write_bullets(&mut out, &model.education)?;
    }

    Ok(out.trim_end().to_string() + "\n")
}
