//! Header block splitting and parsing

use crate::types::HeaderMap;
use regex::Regex;
use std::sync::LazyLock;

static BOUNDARY_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)boundary\s*=\s*(?:"([^"]*)"|([^\s;]+))"#).unwrap()
});

static CHARSET_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*(?:"([^"]*)"|([^\s;]+))"#).unwrap()
});

/// Split one entity's raw text into its header block and its body at the
/// first blank line (`\r\n\r\n`, falling back to `\n\n`).
///
/// Without a blank line the whole input is body and the header block is
/// empty. Always succeeds.
#[must_use]
pub fn split_entity(raw: &str) -> (&str, &str) {
    if let Some(idx) = raw.find("\r\n\r\n") {
        (&raw[..idx], &raw[idx + 4..])
    } else if let Some(idx) = raw.find("\n\n") {
        (&raw[..idx], &raw[idx + 2..])
    } else {
        ("", raw)
    }
}

/// Parse a header block into a [`HeaderMap`].
///
/// A line starting with whitespace continues the previous header and is
/// space-joined onto its value. `name: value` lines start a new header with
/// the name lower-cased. Lines that are neither are skipped.
#[must_use]
pub fn parse_headers(block: &str) -> HeaderMap {
    let mut headers = HeaderMap::default();
    // Name of the last header that was actually stored; continuations of a
    // skipped duplicate are dropped with it.
    let mut current: Option<String> = None;

    for line in block.lines() {
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some(name) = &current {
                headers.append_continuation(name, line.trim());
            }
            continue;
        }

        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim().to_lowercase();
            let stored = headers.insert_first(name.clone(), value.trim().to_string());
            current = stored.then_some(name);
        } else {
            current = None;
        }
    }

    headers
}

/// Extract the `boundary` parameter from a Content-Type value, quoted or
/// bare. `None` when absent.
#[must_use]
pub fn boundary_param(content_type: &str) -> Option<String> {
    extract_param(&BOUNDARY_PARAM, content_type)
}

/// Extract the `charset` parameter from a Content-Type value.
#[must_use]
pub fn charset_param(content_type: &str) -> Option<String> {
    extract_param(&CHARSET_PARAM, content_type)
}

fn extract_param(pattern: &Regex, value: &str) -> Option<String> {
    let caps = pattern.captures(value)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty())
}
