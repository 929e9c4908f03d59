//! Line normalization, heading detection, and section slicing for
//! resume text.

use std::sync::LazyLock;

use regex::Regex;

/// Month names, abbreviated or full, for date-range detection.
pub const MONTH_PATTERN: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)";

/// `Month YYYY (– | - | two+ spaces) (Month YYYY | Present)`.
pub static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i){MONTH_PATTERN}\s+\d{{4}}(?:\s*[-–]\s*|\s{{2,}})(?:{MONTH_PATTERN}\s+\d{{4}}|Present)"
    ))
    .expect("static pattern")
});

static HEADING_LIKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z\s/&]{2,}$").expect("static pattern"));
static PUNCT_SPACING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,.;:])").expect("static pattern"));
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Section names recognized as headings regardless of casing.
pub const KNOWN_HEADINGS: &[&str] = &[
    "professional experience",
    "experience",
    "work experience",
    "employment",
    "technical skills",
    "technical experience",
    "skills",
    "education",
    "projects",
    "activities",
    "leadership",
    "certifications",
    "awards",
];

pub const EXPERIENCE_START_HEADINGS: &[&str] = &[
    "technical experience",
    "professional experience",
    "work experience",
    "employment",
];

pub const EXPERIENCE_END_HEADINGS: &[&str] = &[
    "education",
    "skills",
    "technical skills",
    "projects",
    "activities",
    "leadership",
    "honors and activities",
    "honors",
    "certifications",
    "awards",
];

pub const SKILLS_START_HEADINGS: &[&str] = &["technical skills", "skills"];

pub const SKILLS_END_HEADINGS: &[&str] = &[
    "experience",
    "professional experience",
    "work experience",
    "employment",
    "education",
    "projects",
    "activities",
    "leadership",
    "certifications",
    "awards",
];

/// Normalizes one raw line: bullet glyph variants become `-`,
/// decorative glyphs are stripped, spacing before punctuation is fixed,
/// and whitespace runs collapse to a single space.
pub fn normalize_line(raw: &str) -> String {
    let value = raw.replace('\u{2022}', "-").replace(['◼', '■'], "");
    let value = value.trim();
    let value = PUNCT_SPACING_RE.replace_all(value, "$1");
    let value = value.replace(" -level", "-level");
    WHITESPACE_RE.replace_all(&value, " ").trim().to_string()
}

/// True when the trimmed line exactly matches the known-heading
/// vocabulary, or is a short (≤4 words) all-caps-with-separators line.
pub fn is_heading(line: &str) -> bool {
    let trimmed = line.trim();
    let lowered = trimmed.to_lowercase();
    if KNOWN_HEADINGS.contains(&lowered.as_str()) {
        return true;
    }
    lowered.split_whitespace().count() <= 4 && HEADING_LIKE_RE.is_match(trimmed)
}

/// Index of the first line whose lowercase form equals one of the
/// headings or starts with `"{heading}:"`.
pub fn find_heading_index(lines: &[String], headings: &[&str]) -> Option<usize> {
    lines.iter().position(|line| {
        let lowered = line.to_lowercase();
        headings
            .iter()
            .any(|heading| lowered == *heading || lowered.starts_with(&format!("{heading}:")))
    })
}

/// Lines strictly between the start heading and the first subsequent
/// line that is both a heading and named in `end_headings`. Empty when
/// the start heading is not found.
pub fn extract_section(
    lines: &[String],
    start_heading: &str,
    end_headings: &[&str],
) -> Vec<String> {
    let Some(start_index) = find_heading_index(lines, &[start_heading]) else {
        return Vec::new();
    };

    let mut section = Vec::new();
    for candidate in &lines[start_index + 1..] {
        let lowered = candidate.to_lowercase();
        if end_headings.contains(&lowered.as_str()) && is_heading(candidate) {
            break;
        }
        section.push(candidate.clone());
    }
    section
}

/// Concatenated `extract_section` results for each start heading, in
/// order. Supports resumes that label the same section differently.
pub fn extract_combined_sections(
    lines: &[String],
    start_headings: &[&str],
    end_headings: &[&str],
) -> Vec<String> {
    let mut combined = Vec::new();
    for heading in start_headings {
        combined.extend(extract_section(lines, heading, end_headings));
    }
    combined
}
