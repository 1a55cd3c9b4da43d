//! Which side of a command's output a retry pattern is matched against.

use std::fmt;
use std::str::FromStr;

use crate::error::InputError;

/// One side of a command's captured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputStream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

impl OutputStream {
    /// The lowercase name used in inputs and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The configured `retry_pattern_source`.
///
/// Defaults to [`PatternSource::Both`].
///
/// # Examples
///
/// ```rust
/// use retry_step::{OutputStream, PatternSource};
///
/// let source: PatternSource = "stdout".parse().unwrap();
/// assert!(source.applies_to(OutputStream::Stdout));
/// assert!(!source.applies_to(OutputStream::Stderr));
///
/// assert!("stdin".parse::<PatternSource>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PatternSource {
    /// Match against both stdout and stderr.
    #[default]
    Both,
    /// Match against stdout only.
    Stdout,
    /// Match against stderr only.
    Stderr,
}

impl PatternSource {
    /// Returns true if this source covers `stream`.
    pub fn applies_to(self, stream: OutputStream) -> bool {
        match self {
            Self::Both => true,
            Self::Stdout => stream == OutputStream::Stdout,
            Self::Stderr => stream == OutputStream::Stderr,
        }
    }

    /// The lowercase name used in inputs and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Both => "both",
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

impl fmt::Display for PatternSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Matching is exact: the accepted values are lowercase only.
impl FromStr for PatternSource {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "both" => Ok(Self::Both),
            "stdout" => Ok(Self::Stdout),
            "stderr" => Ok(Self::Stderr),
            _ => Err(InputError::InvalidPatternSource {
                received: s.to_string(),
            }),
        }
    }
}
