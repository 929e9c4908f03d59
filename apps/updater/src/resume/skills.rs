//! Categorized skills extraction from `"category: items"` lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::SkillCategory;
use crate::resume::lines::{
    extract_combined_sections, SKILLS_END_HEADINGS, SKILLS_START_HEADINGS,
};

static SKILL_CATEGORY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(languages?|programming languages?|tools?|platforms?|frameworks?|databases?|project management)\s*[:\-]\s*(.+)$",
    )
    .expect("static pattern")
});

/// Singular/plural category spellings mapped to canonical labels.
/// "project management" has no bucket of its own and lands in Platforms.
const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("language", "Languages"),
    ("languages", "Languages"),
    ("programming language", "Languages"),
    ("programming languages", "Languages"),
    ("tool", "Tools"),
    ("tools", "Tools"),
    ("platform", "Platforms"),
    ("platforms", "Platforms"),
    ("framework", "Frameworks"),
    ("frameworks", "Frameworks"),
    ("database", "Databases"),
    ("databases", "Databases"),
    ("project management", "Platforms"),
];

/// Fixed ordering for the canonical categories; anything else follows
/// in first-discovery order.
const PRIORITY_ORDER: &[&str] = &["Languages", "Tools", "Platforms", "Frameworks", "Databases"];

fn canonical_label(category: &str) -> String {
    let lowered = category.trim().to_lowercase();
    CATEGORY_LABELS
        .iter()
        .find(|(spelling, _)| *spelling == lowered)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| title_case(&lowered))
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_items(raw_items: &str) -> Vec<String> {
    raw_items
        .split(|c| matches!(c, ',' | '|' | ';' | '/'))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extracts categorized skills from normalized resume lines.
///
/// Operates on the skills section, or the whole document when no
/// section is found. Items are deduplicated per (category, item)
/// case-insensitively, preserving first-seen order; categories come out
/// priority-ordered, then by discovery.
pub fn extract_skills(all_lines: &[String]) -> Vec<SkillCategory> {
    let section =
        extract_combined_sections(all_lines, SKILLS_START_HEADINGS, SKILLS_END_HEADINGS);
    let source: &[String] = if section.is_empty() { all_lines } else { &section };

    let mut found: Vec<SkillCategory> = Vec::new();
    let mut seen: Vec<(String, String)> = Vec::new();

    for line in source {
        let Some(captures) = SKILL_CATEGORY_RE.captures(line) else {
            continue;
        };
        let category = canonical_label(&captures[1]);
        let items = split_items(&captures[2]);
        if items.is_empty() {
            continue;
        }

        let bucket = match found.iter().position(|c| c.name == category) {
            Some(index) => index,
            None => {
                found.push(SkillCategory {
                    name: category.clone(),
                    items: Vec::new(),
                });
                found.len() - 1
            }
        };
        for item in items {
            let key = (category.to_lowercase(), item.to_lowercase());
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            found[bucket].items.push(item);
        }
    }

    let mut ordered: Vec<SkillCategory> = Vec::new();
    for priority in PRIORITY_ORDER {
        if let Some(index) = found.iter().position(|c| c.name == *priority) {
            ordered.push(found.remove(index));
        }
    }
    ordered.extend(found);
    ordered
}
