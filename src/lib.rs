// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! MIME Body Extraction
//!
//! Turns a raw RFC 822 / MIME message into a normalized `{text, html}` body
//! pair and heuristically locates a one-time verification code in a
//! message's subject and body.
//!
//! # Features
//!
//! - Header folding and case-insensitive header lookup
//! - Multipart boundary splitting with bounded recursive entity descent
//! - base64 / quoted-printable transfer decoding, charset normalization
//! - HTML sniffing and text→HTML synthesis fallbacks
//! - Keyword-anchored verification-code cascade with false-positive filtering
//!
//! Both entry points are pure and infallible: malformed input degrades to
//! partial or empty output, never an error.
//!
//! # Example
//!
//! ```rust
//! use mimebody::{ExtractionContext, extract_verification_code, parse_body};
//!
//! let raw = "Content-Type: text/plain\r\n\r\nYour OTP is 482910";
//! let body = parse_body(raw);
//! assert_eq!(body.text, "Your OTP is 482910");
//!
//! let ctx = ExtractionContext {
//!     subject: String::new(),
//!     text: body.text.clone(),
//!     html: body.html.clone(),
//! };
//! assert_eq!(extract_verification_code(&ctx).as_deref(), Some("482910"));
//! ```

mod body;
mod decode;
mod error;
mod extract;
mod headers;
mod html;
mod types;

pub use body::{parse_body, split_multipart};
pub use decode::{decode_charset, decode_quoted_printable, decode_transfer};
pub use error::{DecodeError, Result};
pub use extract::extract_verification_code;
pub use headers::{boundary_param, charset_param, parse_headers, split_entity};
pub use html::{escape_html, strip_html};
pub use types::{ExtractionContext, HeaderMap, ParsedBody};
