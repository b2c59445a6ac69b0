//! Entity resolution: from raw message text to a `{text, html}` pair

use crate::decode::{decode_charset, decode_transfer};
use crate::headers::{boundary_param, charset_param, parse_headers, split_entity};
use crate::types::{HeaderMap, ParsedBody};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Recursion cap for nested multiparts. Past it the resolver returns what
/// has been accumulated instead of descending further.
const MAX_DEPTH: usize = 20;

static HTML_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!doctype\s+html|<html").unwrap());

static HTML_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</html\s*>").unwrap());

static TAG_DOCUMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<\w+[^>]*>.*</\w+\s*>").unwrap());

/// Parse one raw RFC 822 / MIME message into its normalized body pair.
///
/// Never fails: malformed structure degrades to partial or empty fields,
/// and any decode ambiguity falls back to the undecoded content.
#[must_use]
pub fn parse_body(raw: &str) -> ParsedBody {
    let body = parse_entity(raw, 0);
    debug!(
        text_len = body.text.len(),
        html_len = body.html.len(),
        "parsed message body"
    );
    body
}

/// Treat `raw` as a standalone message: split off its headers and resolve.
/// Also the re-entry point for embedded `message/rfc822` parts.
fn parse_entity(raw: &str, depth: usize) -> ParsedBody {
    let (header_block, body) = split_entity(raw);
    let headers = parse_headers(header_block);
    resolve_entity(&headers, body, depth)
}

/// Resolve one MIME entity to its `{text, html}` contribution.
fn resolve_entity(headers: &HeaderMap, body: &str, depth: usize) -> ParsedBody {
    if depth >= MAX_DEPTH {
        trace!(depth, "recursion cap hit, returning empty entity");
        return ParsedBody::default();
    }

    let content_type = headers.get_normalized("content-type");
    if !content_type.starts_with("multipart/") {
        return resolve_leaf(headers, body, &content_type);
    }

    let mut result = ParsedBody::default();
    // Boundary tokens are case-sensitive, so read them from the raw header
    // value rather than the normalized one
    let parts = headers
        .get("content-type")
        .and_then(boundary_param)
        .map(|b| split_multipart(body, &b))
        .unwrap_or_default();
    trace!(depth, parts = parts.len(), %content_type, "descending into multipart");

    for part in &parts {
        let (part_headers, part_body) = split_entity(part);
        let part_headers = parse_headers(part_headers);
        let part_type = part_headers.get_normalized("content-type");

        let contribution = if part_type.starts_with("multipart/") {
            resolve_entity(&part_headers, part_body, depth + 1)
        } else if part_type.contains("message/rfc822") {
            parse_entity(part_body, depth + 1)
        } else if part_type.contains("rfc822-headers") {
            // Metadata-only part, nothing displayable
            continue;
        } else {
            resolve_leaf(&part_headers, part_body, &part_type)
        };

        result.merge_first_found(contribution);
        if result.is_complete() {
            break;
        }
    }

    if result.html.is_empty() {
        if let Some(fragment) = sniff_html(body) {
            result.html = fragment.to_string();
        } else if TAG_DOCUMENT.is_match(body) {
            result.html = body.to_string();
        }
    }
    if result.html.is_empty() && !result.text.is_empty() {
        result.html = synthesize_html(&result.text);
    }

    result
}

/// Non-multipart entity: transfer-decode, charset-decode, classify.
fn resolve_leaf(headers: &HeaderMap, body: &str, content_type: &str) -> ParsedBody {
    let encoding = headers.get_normalized("content-transfer-encoding");
    let bytes = decode_transfer(body, &encoding);
    let charset = charset_param(content_type);
    let decoded = decode_charset(&bytes, charset.as_deref());

    if content_type.contains("text/html") {
        return ParsedBody {
            text: String::new(),
            html: decoded,
        };
    }

    // Undeclared type that looks like a full HTML document is HTML, not text
    if content_type.is_empty()
        && let Some(fragment) = sniff_html(&decoded)
    {
        return ParsedBody {
            text: String::new(),
            html: fragment.to_string(),
        };
    }

    ParsedBody {
        text: decoded,
        html: String::new(),
    }
}

/// Split a multipart body on its boundary into raw part strings.
///
/// `--boundary` opens a part and flushes the previous one; `--boundary--`
/// flushes and stops, ignoring any epilogue. Preamble lines before the
/// first delimiter are discarded. Output parts use `\n` line endings.
#[must_use]
pub fn split_multipart(body: &str, boundary: &str) -> Vec<String> {
    let open = format!("--{boundary}");
    let close = format!("--{boundary}--");

    let mut parts = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in body.lines() {
        if line == close {
            if let Some(lines) = current.take() {
                parts.push(lines.join("\n"));
            }
            break;
        }
        if line == open {
            if let Some(lines) = current.take() {
                parts.push(lines.join("\n"));
            }
            current = Some(Vec::new());
        } else if let Some(lines) = &mut current {
            lines.push(line);
        }
    }

    // Truncated multipart: flush the trailing unterminated part
    if let Some(lines) = current {
        parts.push(lines.join("\n"));
    }

    parts
}

/// Locate an `<html>`/`<!doctype html>` … `</html>` span inside raw text,
/// case-insensitively, preserving the original casing of the span.
fn sniff_html(raw: &str) -> Option<&str> {
    let start = HTML_OPEN.find(raw)?.start();
    let end = HTML_CLOSE.find_iter(raw).last()?.end();
    (start < end).then(|| &raw[start..end])
}

/// Wrap escaped plain text in a minimal HTML shell that preserves line
/// structure.
fn synthesize_html(text: &str) -> String {
    format!(
        "<div style=\"white-space: pre-wrap;\">{}</div>",
        crate::html::escape_html(text)
    )
}
