//! Turns a free-form generation reply into a [`ParsedPoll`].
//!
//! Parsing is total. Anything that cannot be read degrades to
//! [`ParsedPoll::fallback`] instead of surfacing an error.

use std::ops::Range;

use serde_json::Value;

use super::types::{DisplayOption, ParsedPoll, FALLBACK_QUESTION};

const HEADING_MARKER: &str = "###";
const OPTION_LABELS: [&str; 2] = ["**Options:**", "Options:"];

pub fn parse(raw: &str) -> ParsedPoll {
    let Some((span, options)) = find_options(raw) else {
        return ParsedPoll::fallback();
    };

    let mut remainder = String::with_capacity(raw.len());
    remainder.push_str(&raw[..span.start]);
    remainder.push_str(&raw[span.end..]);

    let question = clean_question(strip_trailing_sections(&remainder));
    let question = if question.is_empty() {
        FALLBACK_QUESTION.to_string()
    } else {
        question.to_string()
    };

    ParsedPoll { question, options }
}

/// Decorates options positionally. Markers cycle every 8 entries.
pub fn decorate(options: &[String]) -> Vec<DisplayOption> {
    options
        .iter()
        .enumerate()
        .map(|(i, opt)| DisplayOption::decorate(i, opt))
        .collect()
}

/// First `[` that opens a syntactically valid JSON array, decoded in one pass.
/// Later brackets are only tried when an earlier `[` does not start valid JSON.
/// The winning array must hold only strings, otherwise nothing is found.
fn find_options(raw: &str) -> Option<(Range<usize>, Vec<String>)> {
    for (start, _) in raw.match_indices('[') {
        let mut stream = serde_json::Deserializer::from_str(&raw[start..]).into_iter::<Value>();
        let Some(Ok(Value::Array(items))) = stream.next() else {
            continue;
        };
        let end = start + stream.byte_offset();

        let options = items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;
        return Some((start..end, options));
    }
    None
}

/// Cuts at the first `###` that follows question text. A heading that opens
/// the reply only loses its own line.
fn strip_trailing_sections(text: &str) -> &str {
    let mut body = text;
    while let Some(pos) = body.find(HEADING_MARKER) {
        if !body[..pos].trim().is_empty() {
            body = &body[..pos];
            break;
        }
        body = match body[pos..].find('\n') {
            Some(nl) => &body[pos + nl + 1..],
            None => "",
        };
    }

    for label in OPTION_LABELS {
        if let Some(pos) = body.find(label) {
            return &body[..pos];
        }
    }
    body
}

/// Drops a leading list number ("1." / "1)") and a bold wrapper the model may add anyway.
fn clean_question(text: &str) -> &str {
    let mut q = text.trim();

    let digits = q.len() - q.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        let rest = &q[digits..];
        if let Some(after) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            if after.starts_with(char::is_whitespace) {
                q = after.trim_start();
            }
        }
    }

    if let Some(inner) = q.strip_prefix("**").and_then(|s| s.strip_suffix("**")) {
        q = inner.trim();
    }
    q
}
