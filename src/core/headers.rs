//! Header normalization: duplicate renaming and XML-name sanitization

use crate::types::HeaderMode;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Characters that may not appear in an XML element name
const INVALID_MARKUP_CHARS: &[char] = &[
    '(', ')', '<', '>', '/', '\\', '?', '!', '"', '\'', '@', '#', '$', '%', '^', '&', '*', '+',
    '=', '~', '`', '|', '[', ']', '{', '}', ';', ':', ',', '.',
];

/// Normalize a header row.
///
/// Duplicates are renamed on the raw text first (`Name`, `Name_2`, ...). In
/// [`HeaderMode::Markup`] every resulting name is then sanitized into a usable
/// element name. Headers that occurred more than once are reported at `info`.
///
/// The output always has the same length as the input and contains no
/// duplicates. A row without duplicates comes back unchanged in `Plain` mode.
pub fn normalize_headers(headers: Vec<String>, mode: HeaderMode) -> Vec<String> {
    for (header, count) in duplicate_counts(&headers) {
        info!(header = %header, count, "Header was present more than once");
    }

    let renamed = rename_duplicates(headers);

    match mode {
        HeaderMode::Plain => renamed,
        HeaderMode::Markup => {
            let sanitized: Vec<String> = renamed.iter().map(|h| sanitize_for_markup(h)).collect();
            if has_duplicates(&sanitized) {
                // e.g. "a b" and "A.B" both sanitize to "AB"
                debug!("Sanitizing produced duplicate names, renaming again");
                rename_duplicates(sanitized)
            } else {
                sanitized
            }
        }
    }
}

/// Rename every repeated header by appending `_<n>`, where `n` is the running
/// occurrence count of that header. The first occurrence keeps its text.
///
/// A generated name never reuses a name that is already in the row; the
/// suffix is bumped until it is free.
pub fn rename_duplicates(headers: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = headers.iter().cloned().collect();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut result = Vec::with_capacity(headers.len());

    for header in headers {
        let count = counts.entry(header.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            result.push(header);
            continue;
        }

        let mut suffix = *count;
        let mut candidate = format!("{header}_{suffix}");
        while taken.contains(&candidate) {
            suffix += 1;
            candidate = format!("{header}_{suffix}");
        }
        taken.insert(candidate.clone());
        result.push(candidate);
    }

    result
}

/// Headers that occur more than once, with their occurrence count, in order
/// of first appearance.
pub fn duplicate_counts(headers: &[String]) -> Vec<(String, usize)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for header in headers {
        let count = counts.entry(header.as_str()).or_insert(0);
        if *count == 0 {
            order.push(header.as_str());
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter_map(|h| {
            let count = counts[h];
            (count > 1).then(|| (h.to_string(), count))
        })
        .collect()
}

/// Turn a header into a usable XML element name.
///
/// Names containing a space are title-cased first ("first name" →
/// "FirstName"). Then whitespace of any kind and every character from the
/// invalid set is stripped. A name that would start with something other
/// than a letter or `_` gets a leading `_` ("1st Place" → "_1stPlace").
pub fn sanitize_for_markup(header: &str) -> String {
    let cased = if header.contains(' ') {
        title_case(header)
    } else {
        header.to_string()
    };

    let name: String = cased
        .chars()
        .filter(|c| !c.is_whitespace() && !INVALID_MARKUP_CHARS.contains(c))
        .collect();

    match name.chars().next() {
        Some(first) if !is_name_start(first) => format!("_{name}"),
        _ => name,
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Uppercase the first letter of every word and lowercase the rest.
/// An apostrophe does not start a new word ("don't" → "Don't").
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = c != '\'';
        }
    }

    out
}

fn has_duplicates(names: &[String]) -> bool {
    let mut seen = HashSet::with_capacity(names.len());
    !names.iter().all(|n| seen.insert(n.as_str()))
}
