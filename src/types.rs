//! Core types for parsed message bodies

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The normalized body of one message: a plain-text rendering and an HTML
/// rendering.
///
/// At most one of the two fields is synthesized from the other (an HTML
/// shell wrapped around escaped text, or HTML sniffed out of an undeclared
/// part); once a field is populated during entity resolution it is never
/// overwritten by a later part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedBody {
    /// Plain-text body, empty if the message carried none
    pub text: String,

    /// HTML body, possibly synthesized from `text`
    pub html: String,
}

impl ParsedBody {
    /// Both renderings present; entity resolution can stop early.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.text.is_empty() && !self.html.is_empty()
    }

    /// Fill still-empty fields from another entity's result. First-found
    /// wins: populated fields are left alone.
    pub fn merge_first_found(&mut self, other: Self) {
        if self.text.is_empty() && !other.text.is_empty() {
            self.text = other.text;
        }
        if self.html.is_empty() && !other.html.is_empty() {
            self.html = other.html;
        }
    }
}

/// Read-only input to verification-code extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionContext {
    /// Message subject line
    pub subject: String,

    /// Plain-text body
    pub text: String,

    /// HTML body; stripped to text before searching
    pub html: String,
}

/// Case-insensitive header map for one MIME entity.
///
/// Keys are lower-cased header names; values have their continuation lines
/// folded in space-joined. The first occurrence of a duplicate name wins.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    entries: HashMap<String, String>,
}

impl HeaderMap {
    /// Insert unless the name is already present. Returns whether the value
    /// was stored, so the parser knows if continuation lines should attach.
    pub(crate) fn insert_first(&mut self, name: String, value: String) -> bool {
        match self.entries.entry(name) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub(crate) fn append_continuation(&mut self, name: &str, fragment: &str) {
        if let Some(value) = self.entries.get_mut(name) {
            value.push(' ');
            value.push_str(fragment);
        }
    }

    /// Look up a header by name, case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Header value lower-cased and trimmed, or empty if absent. The form
    /// content-type and transfer-encoding comparisons want.
    #[must_use]
    pub fn get_normalized(&self, name: &str) -> String {
        self.get(name)
            .map(|v| v.trim().to_lowercase())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
