//! Sentence quality scoring: rewards informative wording, penalizes
//! boilerplate, and prefers sentences near an ideal length.

use crate::curation::cleaner::WORD_RE;

/// Sentences with fewer tokens than this are rejected outright.
const MIN_TOKENS: usize = 7;

/// Token count that earns the maximum closeness bonus.
const IDEAL_TOKENS: i64 = 14;

/// Phrases that mark a sentence as README boilerplate rather than a
/// description of what the project does.
const BOILERPLATE_PATTERNS: &[&str] = &[
    "installation",
    "contributing",
    "license",
    "make sure to sign in",
    "before starting this assignment",
    "assignment",
    "setup",
    "contributors list",
    "username",
    "please go through this link",
    "------------",
    "focuses on software engineering",
    "development workflows",
    "contains implementation details",
    "table of contents",
    "badge",
];

/// Substrings that signal a sentence actually describes the project.
/// "analy" covers analyze/analysis/analytics.
const INFORMATIVE_KEYWORDS: &[&str] = &[
    "is",
    "builds",
    "provides",
    "implements",
    "allows",
    "application",
    "tool",
    "platform",
    "simulator",
    "game",
    "analy",
];

/// Score awarded per informative keyword found.
const KEYWORD_BONUS: i64 = 8;

/// Scores a candidate sentence. Deterministic, pure, and total.
///
/// Returns -100 below the minimum token count, -50 on any boilerplate
/// hit, otherwise keyword bonuses plus a closeness-to-ideal-length
/// bonus of `max(0, 20 - |14 - tokens|)`.
pub fn quality_score(sentence: &str) -> i64 {
    let token_count = WORD_RE.find_iter(sentence).count();
    if token_count < MIN_TOKENS {
        return -100;
    }

    let lowered = sentence.to_lowercase();
    if BOILERPLATE_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
    {
        return -50;
    }

    let mut score = 0;
    for keyword in INFORMATIVE_KEYWORDS {
        if lowered.contains(keyword) {
            score += KEYWORD_BONUS;
        }
    }

    score + (20 - (IDEAL_TOKENS - token_count as i64).abs()).max(0)
}
