use serde::{Deserialize, Serialize};

/// One recovered experience entry: a combined company/role/date title
/// line plus up to three highlight lines, in source order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeExperienceEntry {
    pub title_line: String,
    pub highlights: Vec<String>,
}

/// One skill bucket: canonical category name plus unique items in
/// first-seen order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillCategory {
    pub name: String,
    pub items: Vec<String>,
}

/// Structured data recovered from unstructured resume text.
///
/// Skill categories are ordered: the fixed priority categories first
/// (Languages, Tools, Platforms, Frameworks, Databases), then any other
/// discovered category in first-discovery order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResumeSnapshot {
    pub experiences: Vec<ResumeExperienceEntry>,
    pub skills: Vec<SkillCategory>,
}

impl ResumeSnapshot {
    pub fn is_empty(&self) -> bool {
        self.experiences.is_empty() && self.skills.is_empty()
    }
}
