//! Markdown/HTML cleanup, sentence splitting, and sentence clamping.

use std::sync::LazyLock;

use regex::Regex;

/// Word-like token: letters, digits, and the punctuation that appears
/// inside technology names (C++, C#, Node.js, scikit-learn).
pub static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9+#.\-]+").expect("static pattern"));

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("static pattern"));
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").expect("static pattern"));
static BACKTICK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`+").expect("static pattern"));
static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("static pattern"));
static LEADING_MARKDOWN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[#>*\-\s]+").expect("static pattern"));
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));
static SENTENCE_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("static pattern"));

/// Strips markdown and HTML artifacts and collapses whitespace.
///
/// Image syntax is dropped, links collapse to their label text,
/// backticks and tags are removed, and leading markdown punctuation is
/// stripped per line. Total: empty input yields an empty string.
pub fn clean_text(text: &str) -> String {
    let cleaned = IMAGE_RE.replace_all(text, " ");
    let cleaned = LINK_RE.replace_all(&cleaned, "$1");
    let cleaned = BACKTICK_RE.replace_all(&cleaned, "");
    let cleaned = HTML_TAG_RE.replace_all(&cleaned, " ");
    let cleaned = LEADING_MARKDOWN_RE.replace_all(&cleaned, "");
    WHITESPACE_RE.replace_all(&cleaned, " ").trim().to_string()
}

/// Splits text into sentence candidates on sentence-ending punctuation
/// followed by whitespace, dropping empty fragments.
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut last = 0;
    for m in SENTENCE_SPLIT_RE.find_iter(text) {
        // Keep the punctuation with the sentence, drop the whitespace.
        let fragment = text[last..m.start() + 1].trim();
        if !fragment.is_empty() {
            parts.push(fragment.to_string());
        }
        last = m.end();
    }
    let tail = text[last..].trim();
    if !tail.is_empty() {
        parts.push(tail.to_string());
    }
    parts
}

/// Trims a sentence to word-like tokens, collapses an immediately
/// repeated leading block of 2-6 words (a copy-paste artifact),
/// truncates to `max_words`, and ensures a trailing period.
///
/// Returns an empty string when no tokens remain.
pub fn clamp_sentence(sentence: &str, max_words: usize) -> String {
    let mut words: Vec<&str> = WORD_RE.find_iter(sentence).map(|m| m.as_str()).collect();

    for size in (2..=6).rev() {
        if words.len() >= size * 2 && words[..size] == words[size..size * 2] {
            words.drain(size..size * 2);
            break;
        }
    }

    words.truncate(max_words);
    if words.is_empty() {
        return String::new();
    }

    let mut clamped = words.join(" ");
    if !clamped.ends_with('.') {
        clamped.push('.');
    }
    clamped
}

/// Default word limit for clamped sentences.
pub const DEFAULT_MAX_WORDS: usize = 24;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_removes_images() {
        assert_eq!(
            clean_text("before ![badge](https://img.shields.io/x) after"),
            "before after"
        );
    }

    #[test]
    fn test_clean_text_collapses_links_to_labels() {
        assert_eq!(
            clean_text("see [the docs](https://example.com) here"),
            "see the docs here"
        );
    }

    #[test]
    fn test_clean_text_strips_backticks_and_tags() {
        assert_eq!(
            clean_text("run `cargo build` inside <b>release</b> mode"),
            "run cargo build inside release mode"
        );
    }

    #[test]
    fn test_clean_text_strips_leading_markdown_punctuation() {
        assert_eq!(
            clean_text("# Title\n> quote line\n- bullet item"),
            "Title quote line bullet item"
        );
    }

    #[test]
    fn test_clean_text_empty_input() {
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_split_sentences_on_terminal_punctuation() {
        let parts = split_sentences("First one. Second one! Third one?");
        assert_eq!(parts, vec!["First one.", "Second one!", "Third one?"]);
    }

    #[test]
    fn test_split_sentences_keeps_unterminated_tail() {
        let parts = split_sentences("Done. trailing fragment");
        assert_eq!(parts, vec!["Done.", "trailing fragment"]);
    }

    #[test]
    fn test_split_sentences_empty() {
        assert!(split_sentences("").is_empty());
    }

    #[test]
    fn test_clamp_appends_period() {
        assert_eq!(
            clamp_sentence("a solid tool for parsing logs", DEFAULT_MAX_WORDS),
            "a solid tool for parsing logs."
        );
    }

    #[test]
    fn test_clamp_truncates_to_max_words() {
        let clamped = clamp_sentence("one two three four five six", 4);
        assert_eq!(clamped, "one two three four.");
    }

    #[test]
    fn test_clamp_collapses_repeated_leading_block() {
        // "my cool project my cool project" is a copy-paste artifact
        let clamped = clamp_sentence(
            "my cool project my cool project does useful things",
            DEFAULT_MAX_WORDS,
        );
        assert_eq!(clamped, "my cool project does useful things.");
    }

    #[test]
    fn test_clamp_collapses_two_word_repeat() {
        assert_eq!(
            clamp_sentence("hello world hello world again", DEFAULT_MAX_WORDS),
            "hello world again."
        );
    }

    #[test]
    fn test_clamp_empty_input() {
        assert_eq!(clamp_sentence("", DEFAULT_MAX_WORDS), "");
        assert_eq!(clamp_sentence("!!! ???", DEFAULT_MAX_WORDS), "");
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let inputs = [
            "A fast log parser for structured events",
            "my cool project my cool project does useful things",
            "one two three four five six seven eight nine ten eleven twelve",
            "Short.",
        ];
        for input in inputs {
            let once = clamp_sentence(input, DEFAULT_MAX_WORDS);
            let twice = clamp_sentence(&once, DEFAULT_MAX_WORDS);
            assert_eq!(once, twice, "clamp not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_clamp_keeps_tech_tokens_intact() {
        assert_eq!(
            clamp_sentence("built with C++ and Node.js for speed", DEFAULT_MAX_WORDS),
            "built with C++ and Node.js for speed."
        );
    }
}
