//! Resume snapshot assembly: PDF text in, structured snapshot out.

use std::path::Path;

use tracing::warn;

use crate::models::resume::ResumeSnapshot;
use crate::resume::experience::extract_experience_entries;
use crate::resume::lines::normalize_line;
use crate::resume::skills::extract_skills;

/// Builds a snapshot from already-extracted plain text. Total: garbage
/// or empty text produces an empty snapshot.
pub fn snapshot_from_text(text: &str) -> ResumeSnapshot {
    let lines: Vec<String> = text
        .lines()
        .map(normalize_line)
        .filter(|line| !line.is_empty())
        .collect();

    ResumeSnapshot {
        experiences: extract_experience_entries(&lines),
        skills: extract_skills(&lines),
    }
}

/// Loads and extracts the resume PDF at `path`.
///
/// Any failure (missing file, unreadable PDF, text extraction error)
/// degrades to an empty snapshot with a warning; resume trouble must
/// never abort the README update.
pub fn load_resume_snapshot(path: &Path) -> ResumeSnapshot {
    if !path.exists() {
        warn!("Resume not found at {}; skipping resume sections", path.display());
        return ResumeSnapshot::default();
    }

    match pdf_extract::extract_text(path) {
        Ok(text) => {
            let snapshot = snapshot_from_text(&text);
            if snapshot.is_empty() {
                warn!(
                    "Resume at {} yielded no recognizable structure",
                    path.display()
                );
            }
            snapshot
        }
        Err(error) => {
            warn!("Failed to extract resume text: {error}");
            ResumeSnapshot::default()
        }
    }
}
