//! Output patterns built from user-supplied strings.
//!
//! A pattern input comes in one of two shapes:
//!
//! - a bare body, such as `connection reset|ETIMEDOUT`, used as-is with no flags
//! - a delimited literal, such as `/connection reset/i`, where the text between
//!   the first and the last `/` is the body and the trailing run of characters
//!   from `gimsuy` is the flag set
//!
//! The body is kept verbatim, so escapes such as `\/` survive, and formatting a
//! [`Pattern`] produces the delimited form again. The one rewrite is a raw line
//! terminator in the body, which is stored as its escape (`\n`, `\r`,
//! `\u{2028}`, `\u{2029}`) so the delimited form stays on one line.
//!
//! # Examples
//!
//! ```rust
//! use retry_step::{regex_from_string, Flags};
//!
//! let pattern = regex_from_string(r"/hello\s{0,1}[-_.]{0,1}world|ls\b/gim").unwrap();
//! assert_eq!(pattern.source(), r"hello\s{0,1}[-_.]{0,1}world|ls\b");
//! assert!(pattern.flags().contains(Flags::IGNORE_CASE));
//! assert!(pattern.is_match("HELLO-world"));
//!
//! let again = regex_from_string(&pattern.to_string()).unwrap();
//! assert_eq!(again, pattern);
//! ```

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use regex::{Regex, RegexBuilder};

use crate::error::PatternError;

/// The set of flags attached to a delimited pattern literal.
///
/// Flags are parsed order-insensitively and duplicates collapse. They always
/// format in the canonical order `gimsuy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u8);

impl Flags {
    /// `g`: match globally. Recorded only; matching already scans the whole haystack.
    pub const GLOBAL: Flags = Flags(1 << 0);
    /// `i`: case-insensitive matching.
    pub const IGNORE_CASE: Flags = Flags(1 << 1);
    /// `m`: `^` and `$` match at line boundaries.
    pub const MULTILINE: Flags = Flags(1 << 2);
    /// `s`: `.` also matches `\n`.
    pub const DOT_ALL: Flags = Flags(1 << 3);
    /// `u`: Unicode mode. Recorded only; matching is always Unicode-aware.
    pub const UNICODE: Flags = Flags(1 << 4);
    /// `y`: the match must start at the beginning of the haystack.
    pub const STICKY: Flags = Flags(1 << 5);

    const TABLE: [(char, Flags); 6] = [
        ('g', Flags::GLOBAL),
        ('i', Flags::IGNORE_CASE),
        ('m', Flags::MULTILINE),
        ('s', Flags::DOT_ALL),
        ('u', Flags::UNICODE),
        ('y', Flags::STICKY),
    ];

    /// No flags.
    pub const fn empty() -> Self {
        Flags(0)
    }

    /// Returns true if no flag is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every flag in `other` is also set in `self`.
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Look up the flag for a single character.
    pub fn from_char(c: char) -> Option<Flags> {
        Self::TABLE
            .iter()
            .find(|(ch, _)| *ch == c)
            .map(|(_, flag)| *flag)
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl FromStr for Flags {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars().try_fold(Flags::empty(), |acc, c| {
            Flags::from_char(c)
                .map(|flag| acc | flag)
                .ok_or(PatternError::UnknownFlag(c))
        })
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (c, flag) in Self::TABLE {
            if self.contains(flag) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// A compiled output pattern that remembers the body and flags it was built from.
///
/// Two patterns are equal when their bodies and flag sets are equal.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    flags: Flags,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern from a body and a flag set.
    ///
    /// An empty body matches only the empty string. Raw line terminators in
    /// the body are rewritten as escapes that match the same text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retry_step::{Flags, Pattern};
    ///
    /// let pattern = Pattern::new("^error:", Flags::IGNORE_CASE | Flags::MULTILINE).unwrap();
    /// assert!(pattern.is_match("ok\nERROR: disk full"));
    ///
    /// assert!(Pattern::new("(", Flags::empty()).is_err());
    /// ```
    pub fn new(source: impl Into<String>, flags: Flags) -> Result<Self, PatternError> {
        let source = escape_line_terminators(source.into());
        let regex = compile(&source, flags)?;
        Ok(Self {
            source,
            flags,
            regex,
        })
    }

    /// The body as supplied, with raw line terminators written as escapes.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The flag set.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// The compiled regex, with the flags applied.
    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns true if the pattern matches somewhere in `haystack`
    /// (at its start when the `y` flag is set).
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

fn compile(source: &str, flags: Flags) -> Result<Regex, regex::Error> {
    let expr = if source.is_empty() {
        r"\A\z".to_string()
    } else if flags.contains(Flags::STICKY) {
        format!(r"\A(?:{})", source)
    } else {
        source.to_string()
    };

    RegexBuilder::new(&expr)
        .case_insensitive(flags.contains(Flags::IGNORE_CASE))
        .multi_line(flags.contains(Flags::MULTILINE))
        .dot_matches_new_line(flags.contains(Flags::DOT_ALL))
        .build()
}

// A terminator already preceded by an unescaped `\` only needs its letter.
fn escape_line_terminators(body: String) -> String {
    if !body.contains(is_line_terminator) {
        return body;
    }

    let mut out = String::with_capacity(body.len() + 8);
    let mut escaped = false;
    for c in body.chars() {
        let replacement = match c {
            '\n' => "n",
            '\r' => "r",
            '\u{2028}' => "u{2028}",
            '\u{2029}' => "u{2029}",
            _ => {
                escaped = c == '\\' && !escaped;
                out.push(c);
                continue;
            }
        };
        if !escaped {
            out.push('\\');
        }
        out.push_str(replacement);
        escaped = false;
    }
    out
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        regex_from_string(s)
    }
}

/// Build a [`Pattern`] from a bare body or a `/body/flags` literal.
///
/// A string that starts with `/` but is not a well-formed literal (no closing
/// `/`, characters other than `gimsuy` after it, or a line break inside) yields
/// the empty pattern rather than an error. A literal with an empty body, such
/// as `//i`, drops its flags. Errors come only from a body the regex engine
/// rejects.
///
/// # Examples
///
/// ```rust
/// use retry_step::{regex_from_string, Flags};
///
/// let bare = regex_from_string(r"foo\/bar").unwrap();
/// assert_eq!(bare.source(), r"foo\/bar");
/// assert!(bare.flags().is_empty());
///
/// let literal = regex_from_string(r"/foo\/bar/gi").unwrap();
/// assert_eq!(literal.source(), r"foo\/bar");
/// assert_eq!(literal.flags(), Flags::GLOBAL | Flags::IGNORE_CASE);
///
/// let malformed = regex_from_string("/unterminated").unwrap();
/// assert_eq!(malformed.source(), "");
/// assert!(malformed.is_match(""));
/// assert!(!malformed.is_match("unterminated"));
/// ```
pub fn regex_from_string(input: &str) -> Result<Pattern, PatternError> {
    let Some(literal) = input.strip_prefix('/') else {
        return Pattern::new(input, Flags::empty());
    };

    match split_literal(literal) {
        Some((body, flags)) => Pattern::new(body, flags),
        None => Pattern::new("", Flags::empty()),
    }
}

// `literal` is the input with its leading `/` removed.
fn split_literal(literal: &str) -> Option<(&str, Flags)> {
    let end = literal.rfind('/')?;
    let body = &literal[..end];
    if body.contains(is_line_terminator) {
        return None;
    }
    let flags = literal[end + 1..].parse::<Flags>().ok()?;
    if body.is_empty() {
        return Some((body, Flags::empty()));
    }
    Some((body, flags))
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{regex_from_string, Pattern};

    impl Serialize for Pattern {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Pattern {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(deserializer)?;
            regex_from_string(&raw).map_err(serde::de::Error::custom)
        }
    }
}
