//! Verification-code extraction
//!
//! An ordered cascade of keyword-anchored patterns over the subject and the
//! stripped body text. Tighter windows run first; the loose body tier runs
//! its candidates through a false-positive filter before accepting. The
//! first accepted candidate wins. There is deliberately no keyword-free
//! global digit scan.

use crate::html::strip_html;
use crate::types::ExtractionContext;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

const MIN_DIGITS: usize = 4;
const MAX_DIGITS: usize = 8;

/// English and CJK vocabulary that marks a nearby number as a code. The
/// Latin alternatives take word boundaries; the CJK ones cannot (their
/// neighbors are word characters too).
const KEYWORD: &str = "(?:\\b(?:verification|verificaci[oó]n|verify|one[-\\s]?time|otp|\
passcode|pass\\s?code|security|login|sign[-\\s]?in|auth(?:entication)?|\
confirm(?:ation)?|2fa|two[-\\s]?factor|pin|c[oó]digo|code)\\b|\
验证码|校验码|驗證碼|动态码|认证|認証|確認コード|인증(?:번호)?)";

/// A digit run allowing spaces, dots, hyphens, dashes and middle dots as
/// separators. Greedy, so a longer run is never silently truncated into an
/// acceptable shorter candidate.
const DIGITS: &str = "([0-9](?:[0-9 \t.·\\-–—]{0,14}[0-9])?)";

#[derive(Clone, Copy)]
enum Scope {
    Subject,
    Body,
}

struct Rule {
    pattern: Regex,
    scope: Scope,
    check_false_positive: bool,
}

impl Rule {
    fn new(pattern: &str, scope: Scope, check_false_positive: bool) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            scope,
            check_false_positive,
        }
    }
}

// The `is`/`:`/`为`/`是` connectors between keyword and digits fall inside
// the non-digit gap, so they need no explicit alternation.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            &format!("(?i){KEYWORD}[^0-9\\n]{{0,20}}{DIGITS}"),
            Scope::Subject,
            false,
        ),
        Rule::new(
            &format!("(?i){DIGITS}[^0-9\\n]{{0,20}}{KEYWORD}"),
            Scope::Subject,
            false,
        ),
        Rule::new(
            &format!("(?i){KEYWORD}[^0-9]{{0,30}}{DIGITS}"),
            Scope::Body,
            false,
        ),
        Rule::new(
            &format!("(?i){DIGITS}[^0-9]{{0,30}}{KEYWORD}"),
            Scope::Body,
            false,
        ),
        Rule::new(
            &format!("(?i){KEYWORD}[^0-9]{{0,80}}{DIGITS}"),
            Scope::Body,
            true,
        ),
        Rule::new(
            &format!("(?i){DIGITS}[^0-9]{{0,80}}{KEYWORD}"),
            Scope::Body,
            true,
        ),
    ]
});

static ADDRESS_WORD_BEFORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]{2,}[ \t]+$").unwrap());

static CAPITALIZED_AFTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]+[A-Z][a-z]+").unwrap());

const ADDRESS_VOCABULARY: [&str; 6] = ["address", "street", "zip", "postal", "suite", "apt"];

/// Locate a one-time verification code in a message's subject and body.
///
/// Returns the code with separators stripped, or `None` when no candidate
/// within the 4–8 digit bounds survives the cascade. Never fails, including
/// on a fully empty context.
#[must_use]
pub fn extract_verification_code(ctx: &ExtractionContext) -> Option<String> {
    let body_corpus = format!("{} {}", strip_html(&ctx.html), ctx.text)
        .trim()
        .to_string();

    for rule in RULES.iter() {
        let corpus: &str = match rule.scope {
            Scope::Subject => &ctx.subject,
            Scope::Body => &body_corpus,
        };
        for caps in rule.pattern.captures_iter(corpus) {
            let Some(run) = caps.get(1) else { continue };
            let digits: String = run.as_str().chars().filter(char::is_ascii_digit).collect();
            if digits.len() < MIN_DIGITS || digits.len() > MAX_DIGITS {
                continue;
            }
            if rule.check_false_positive
                && is_false_positive(&digits, corpus, run.start(), run.end())
            {
                trace!(candidate = %digits, "rejected by false-positive filter");
                continue;
            }
            return Some(digits);
        }
    }

    None
}

/// Heuristics that keep years and street addresses out of the loose tier.
///
/// The address heuristics are ASCII/English-scoped; CJK contexts never match
/// them and fall through to acceptance. The year check is digits-only and
/// locale-independent.
fn is_false_positive(digits: &str, corpus: &str, start: usize, end: usize) -> bool {
    if digits.len() == 4
        && let Ok(year) = digits.parse::<u32>()
        && (2000..=2099).contains(&year)
    {
        return true;
    }

    let before = &corpus[snap_to_char_boundary(corpus, start.saturating_sub(40))..start];
    let after = &corpus[end..snap_to_char_boundary(corpus, (end + 40).min(corpus.len()))];

    if digits.len() == 5 {
        let window = format!("{before} {after}").to_lowercase();
        if ADDRESS_VOCABULARY.iter().any(|w| window.contains(w))
            || ADDRESS_WORD_BEFORE.is_match(before)
        {
            return true;
        }
    }

    // "1600 Pennsylvania"-shaped street numbers
    CAPITALIZED_AFTER.is_match(after)
}

/// Snap a byte index to the nearest valid UTF-8 char boundary (backwards)
const fn snap_to_char_boundary(s: &str, idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    let mut i = idx;
    while !s.is_char_boundary(i) && i > 0 {
        i -= 1;
    }
    i
}
