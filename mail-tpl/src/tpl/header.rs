//! Module dedicated to the header line classifier.
//!
//! A rendered template can embed addressing directives in its
//! leading lines. This module decides, line by line, whether a line
//! is such a directive and under which key it belongs.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Regex used to match a header directive line.
///
/// A directive is optional leading whitespace, a recognized key, a
/// colon, optional whitespace then a non-empty value. The key is
/// matched case-insensitively.
static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[ \t]*(to|from|cc|bcc|subject|reply-to|X-\w+):[ \t]*(.+)\r*\n?$").unwrap()
});

/// The header directive key.
///
/// Keys are a fixed set of addressing and subject headers, plus
/// arbitrary custom headers prefixed by `x-`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum HeaderKey {
    To,
    Cc,
    Bcc,
    From,
    Subject,
    ReplyTo,

    /// Key used for `x-` prefixed headers, stored lowercased.
    Custom(String),
}

impl HeaderKey {
    /// Creates a custom header key.
    pub fn custom(key: impl ToString) -> Self {
        Self::Custom(key.to_string())
    }
}

/// Parse a header key from a string. If the string does not match
/// any of the fixed keys, it is considered as custom and lowercased.
impl From<&str> for HeaderKey {
    fn from(key: &str) -> Self {
        match key {
            key if key.eq_ignore_ascii_case("to") => Self::To,
            key if key.eq_ignore_ascii_case("cc") => Self::Cc,
            key if key.eq_ignore_ascii_case("bcc") => Self::Bcc,
            key if key.eq_ignore_ascii_case("from") => Self::From,
            key if key.eq_ignore_ascii_case("subject") => Self::Subject,
            key if key.eq_ignore_ascii_case("reply-to") => Self::ReplyTo,
            key => Self::Custom(key.to_lowercase()),
        }
    }
}

impl fmt::Display for HeaderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            Self::To => "to",
            Self::Cc => "cc",
            Self::Bcc => "bcc",
            Self::From => "from",
            Self::Subject => "subject",
            Self::ReplyTo => "reply-to",
            Self::Custom(key) => key,
        };
        write!(f, "{key}")
    }
}

/// Classify the given line.
///
/// Returns the key and the value of the matching header directive,
/// or `None` for blank lines, lines without a colon, lines whose key
/// is not recognized and lines whose value is empty. Trailing line
/// terminators are stripped from the value. Pure function: no state,
/// no side effect.
pub fn classify(line: &str) -> Option<(HeaderKey, String)> {
    let caps = HEADER.captures(line)?;
    let value = caps[2].trim_end_matches('\r');

    if value.is_empty() {
        return None;
    }

    Some((HeaderKey::from(&caps[1]), value.to_owned()))
}
