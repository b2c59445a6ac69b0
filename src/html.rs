//! HTML stripping and escaping
//!
//! The stripper produces search input for code extraction, not display text;
//! display-time sanitization is the renderer's concern.

use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());

static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap());

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

static NUMERIC_ENTITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&#(\d+);").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Reduce HTML to a plain-text approximation: script and style blocks go
/// with their contents, remaining tags are stripped, `&nbsp;`, numeric
/// character references and the basic named entities are decoded, and
/// whitespace runs collapse to a single space.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let text = SCRIPT_BLOCK.replace_all(html, " ");
    let text = STYLE_BLOCK.replace_all(&text, " ");
    let text = TAG.replace_all(&text, " ");

    let text = NUMERIC_ENTITY.replace_all(&text, |caps: &regex::Captures| {
        caps[1]
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map_or_else(|| caps[0].to_string(), String::from)
    });

    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}

/// Escape text for embedding in an HTML shell.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
