//! Repository summary selection: overrides first, then the repo's own
//! description, then the best README sentence, then a fallback template.

use std::collections::HashMap;

use crate::curation::cleaner::{clamp_sentence, clean_text, split_sentences, DEFAULT_MAX_WORDS};
use crate::curation::scoring::quality_score;
use crate::models::repo::RepoRecord;

/// Word limit applied to a repo's own description field, which tends to
/// run longer than a curated sentence.
const OWN_DESCRIPTION_MAX_WORDS: usize = 18;

/// Cleans and splits all inputs into one candidate pool, ranks by
/// quality score descending, and returns the clamped best candidate.
/// Returns an empty string when nothing scores non-negatively.
pub fn choose_best_sentence(texts: &[&str]) -> String {
    let mut candidates: Vec<String> = Vec::new();
    for text in texts {
        let cleaned = clean_text(text);
        candidates.extend(split_sentences(&cleaned));
    }

    if candidates.is_empty() {
        return String::new();
    }

    // Stable sort: ties keep candidate pool order.
    candidates.sort_by_key(|candidate| -quality_score(candidate));
    let best = &candidates[0];
    if quality_score(best) < 0 {
        return String::new();
    }
    clamp_sentence(best, DEFAULT_MAX_WORDS)
}

/// Template description used when no usable sentence exists anywhere.
pub fn fallback_description(repo: &RepoRecord) -> String {
    let primary = repo.language.as_deref().unwrap_or("software");
    format!(
        "{} is a {} project with clear goals and practical implementation details.",
        repo.name, primary
    )
}

/// Selects the final repository summary. Always returns non-empty text.
///
/// Priority: manual override (case-insensitive name key), then the
/// repo's own description when it scores non-negatively, then the best
/// sentence from `context_text`, then the fallback template.
pub fn select_description(
    repo: &RepoRecord,
    context_text: &str,
    overrides: &HashMap<String, String>,
) -> String {
    if let Some(override_text) = overrides.get(&repo.name.trim().to_lowercase()) {
        let clamped = clamp_sentence(override_text, DEFAULT_MAX_WORDS);
        if !clamped.is_empty() {
            return clamped;
        }
    }

    let about = clean_text(repo.description.as_deref().unwrap_or_default());
    if !about.is_empty() && quality_score(&about) >= 0 {
        return clamp_sentence(&about, OWN_DESCRIPTION_MAX_WORDS);
    }

    let best = choose_best_sentence(&[context_text]);
    if !best.is_empty() {
        return best;
    }
    fallback_description(repo)
}
