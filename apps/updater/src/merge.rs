//! Idempotent marker-based document merging.
//!
//! Generated regions live between paired sentinel lines inside an
//! otherwise hand-edited document. Replacement touches only the text
//! between the markers; missing or duplicated marker pairs are
//! recoverable conditions, warned about and resolved without failing.

use regex::Regex;
use tracing::warn;

/// Replaces the interior of the marker-delimited span with `new_body`,
/// leaving the marker lines themselves untouched.
///
/// The span is the shortest stretch from `start_marker` to the next
/// `end_marker`, across any number of lines. Extra spans after the
/// first are deleted entirely (collapsing to a single generated
/// region). A document without the marker pair is returned unchanged.
/// Idempotent for a fixed `new_body`.
pub fn replace_section(
    document: &str,
    start_marker: &str,
    end_marker: &str,
    new_body: &str,
) -> String {
    let pattern = format!(
        "(?s){}\n.*?{}",
        regex::escape(start_marker),
        regex::escape(end_marker)
    );
    let Ok(span_re) = Regex::new(&pattern) else {
        // Markers are escaped literals; this cannot fail in practice.
        return document.to_string();
    };

    let spans: Vec<(usize, usize)> = span_re
        .find_iter(document)
        .map(|m| (m.start(), m.end()))
        .collect();

    if spans.is_empty() {
        warn!("Marker pair not found: {start_marker}");
        return document.to_string();
    }
    if spans.len() > 1 {
        warn!(
            "Found {} spans for marker {start_marker}; collapsing to the first",
            spans.len()
        );
    }

    let mut result = String::with_capacity(document.len() + new_body.len());
    result.push_str(&document[..spans[0].0]);
    result.push_str(start_marker);
    result.push('\n');
    result.push_str(new_body);
    result.push('\n');
    result.push_str(end_marker);

    // Everything between/after spans survives; extra spans vanish
    // along with the newline that followed them, so no blank line is
    // left where a span used to be.
    let mut cursor = spans[0].1;
    for &(extra_start, extra_end) in &spans[1..] {
        result.push_str(&document[cursor..extra_start]);
        cursor = extra_end;
        if document[cursor..].starts_with('\n') {
            cursor += 1;
        }
    }
    result.push_str(&document[cursor..]);
    result
}

/// Deletes duplicated generated sections that accumulated above the
/// markers from earlier buggy runs.
///
/// For each start marker: find the nearest second-level heading above
/// it; if that heading occurs more than once in the document, delete
/// every later occurrence's block (heading up to the next second-level
/// heading or end of document), absorbing an immediately preceding
/// horizontal-rule-plus-blank-line separator. Finally, runs of three or
/// more blank lines collapse to a single blank line.
pub fn remove_duplicate_sections(document: &str, start_markers: &[&str]) -> String {
    let had_trailing_newline = document.ends_with('\n');
    let mut lines: Vec<String> = document.lines().map(str::to_string).collect();

    for marker in start_markers {
        let Some(marker_index) = lines.iter().position(|line| line.contains(marker)) else {
            continue;
        };
        let Some(heading_index) = (0..marker_index)
            .rev()
            .find(|&i| lines[i].starts_with("## "))
        else {
            continue;
        };
        let heading = lines[heading_index].clone();

        loop {
            let Some(duplicate_index) = lines
                .iter()
                .enumerate()
                .skip(heading_index + 1)
                .find(|(_, line)| **line == heading)
                .map(|(i, _)| i)
            else {
                break;
            };

            let block_end = (duplicate_index + 1..lines.len())
                .find(|&i| lines[i].starts_with("## "))
                .unwrap_or(lines.len());

            let mut block_start = duplicate_index;
            if block_start >= 2
                && lines[block_start - 1].trim().is_empty()
                && lines[block_start - 2].trim() == "---"
            {
                block_start -= 2;
            } else if block_start >= 1 && lines[block_start - 1].trim() == "---" {
                block_start -= 1;
            }

            warn!("Removing duplicated section: {}", heading.trim_start_matches('#').trim());
            lines.drain(block_start..block_end);
        }
    }

    let mut result = collapse_blank_runs(&lines);
    if had_trailing_newline && !result.ends_with('\n') {
        result.push('\n');
    }
    result
}

/// Collapses runs of 3+ blank lines to exactly one blank line.
fn collapse_blank_runs(lines: &[String]) -> String {
    let mut output: Vec<&str> = Vec::with_capacity(lines.len());
    let mut index = 0;
    while index < lines.len() {
        if lines[index].trim().is_empty() {
            let run_end = (index..lines.len())
                .find(|&i| !lines[i].trim().is_empty())
                .unwrap_or(lines.len());
            let run_length = run_end - index;
            if run_length >= 3 {
                output.push("");
            } else {
                for line in &lines[index..run_end] {
                    output.push(line);
                }
            }
            index = run_end;
        } else {
            output.push(&lines[index]);
            index += 1;
        }
    }
    output.join("\n")
}
