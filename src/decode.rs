//! Transfer-encoding reversal and charset normalization
//!
//! The pipeline is bytes end-to-end: transfer decoding yields a byte buffer,
//! charset normalization turns that buffer into text. Both stages fall back
//! rather than fail — the caller always gets something displayable.

use crate::error::{DecodeError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use encoding_rs::Encoding;

/// Reverse a Content-Transfer-Encoding, producing the raw part bytes.
///
/// `encoding` is matched case-insensitively after trimming. `base64` and
/// `quoted-printable` are decoded; any other value (including an absent
/// header's empty string) passes the body through unchanged. A malformed
/// base64 payload also passes through: the decode error is swallowed here
/// because the §7-style policy is to never fail the caller.
#[must_use]
pub fn decode_transfer(body: &str, encoding: &str) -> Vec<u8> {
    match encoding.trim().to_lowercase().as_str() {
        "base64" => decode_base64(body).unwrap_or_else(|_| body.as_bytes().to_vec()),
        "quoted-printable" => decode_quoted_printable(body),
        _ => body.as_bytes().to_vec(),
    }
}

fn decode_base64(body: &str) -> Result<Vec<u8>> {
    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64
        .decode(compact)
        .map_err(|e| DecodeError::Base64(e.to_string()))
}

/// Quoted-printable decode on bytes. Soft line breaks (`=` before a line
/// ending) vanish; `=XX` hex escapes become their byte; malformed escapes
/// are kept literally.
#[must_use]
pub fn decode_quoted_printable(body: &str) -> Vec<u8> {
    let bytes = body.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'=' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        // Soft break: "=\r\n" or "=\n"
        if bytes.get(i + 1) == Some(&b'\r') && bytes.get(i + 2) == Some(&b'\n') {
            i += 3;
            continue;
        }
        if bytes.get(i + 1) == Some(&b'\n') {
            i += 2;
            continue;
        }
        match (
            bytes.get(i + 1).copied().and_then(hex_value),
            bytes.get(i + 2).copied().and_then(hex_value),
        ) {
            (Some(hi), Some(lo)) => {
                out.push((hi << 4) | lo);
                i += 3;
            }
            _ => {
                out.push(b'=');
                i += 1;
            }
        }
    }

    out
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decode transfer-decoded bytes under the declared charset.
///
/// UTF-8-family labels (and an absent parameter) use lossy UTF-8. Other
/// labels are resolved through `encoding_rs`; an unknown label falls back to
/// lossy UTF-8 rather than erroring. Replacement characters stand in for
/// undecodable sequences, so this never fails.
#[must_use]
pub fn decode_charset(bytes: &[u8], charset: Option<&str>) -> String {
    match lookup_charset(charset) {
        Ok(Some(encoding)) => {
            let (text, _, _) = encoding.decode(bytes);
            text.into_owned()
        }
        Ok(None) | Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// `Ok(None)` means "treat as UTF-8"; `Err` means the label names no known
/// encoding.
fn lookup_charset(charset: Option<&str>) -> Result<Option<&'static Encoding>> {
    let Some(label) = charset else {
        return Ok(None);
    };
    let label = label.trim().to_lowercase();
    if matches!(label.as_str(), "" | "utf-8" | "utf8" | "us-ascii") {
        return Ok(None);
    }
    Encoding::for_label(label.as_bytes())
        .map(Some)
        .ok_or(DecodeError::UnknownCharset(label))
}
