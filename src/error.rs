//! Error types for input resolution and pattern construction.
//!
//! Resolution errors are fatal: the first invalid input stops
//! [`Config::from_inputs`](crate::Config::from_inputs) and nothing is returned.
//! Pattern errors are never fatal to resolution; the resolver downgrades them
//! to an absent pattern.

use std::fmt;

/// Error returned when a raw input cannot be turned into its typed field.
///
/// Every variant names the offending input so the failing run can report
/// exactly which setting was wrong and what was received.
///
/// # Examples
///
/// ```rust
/// use retry_step::{Config, InputError, MapInputs};
///
/// let inputs = MapInputs::new()
///     .with("command", "make test")
///     .with("continue_on_error", "false")
///     .with("max_attempts", "abc");
///
/// match Config::from_inputs(&inputs) {
///     Err(InputError::InvalidNumber { name, received }) => {
///         assert_eq!(name, "max_attempts");
///         assert_eq!(received, "abc");
///     }
///     other => panic!("Expected InvalidNumber, got {:?}", other),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A required input was not supplied or was empty.
    MissingRequired {
        /// Name of the input.
        name: String,
    },
    /// A numeric input was not a base-10 integer.
    InvalidNumber {
        /// Name of the input.
        name: String,
        /// The raw value received.
        received: String,
    },
    /// A numeric input was an integer that does not fit its field.
    OutOfRange {
        /// Name of the input.
        name: String,
        /// The raw value received.
        received: String,
    },
    /// A boolean input was neither `true` nor `false`.
    InvalidBoolean {
        /// Name of the input.
        name: String,
        /// The raw value received.
        received: String,
    },
    /// `retry_pattern_source` was outside `both`, `stdout`, `stderr`.
    InvalidPatternSource {
        /// The raw value received.
        received: String,
    },
}

impl InputError {
    /// Name of the input that failed.
    pub fn input_name(&self) -> &str {
        match self {
            Self::MissingRequired { name }
            | Self::InvalidNumber { name, .. }
            | Self::OutOfRange { name, .. }
            | Self::InvalidBoolean { name, .. } => name,
            Self::InvalidPatternSource { .. } => "retry_pattern_source",
        }
    }

    /// The raw value that was rejected, if one was received.
    pub fn received(&self) -> Option<&str> {
        match self {
            Self::MissingRequired { .. } => None,
            Self::InvalidNumber { received, .. }
            | Self::OutOfRange { received, .. }
            | Self::InvalidBoolean { received, .. }
            | Self::InvalidPatternSource { received } => Some(received),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired { name } => {
                write!(f, "Input required and not supplied: {}", name)
            }
            Self::InvalidNumber { name, received } => write!(
                f,
                "Input {} only accepts numbers.  Received {}",
                name, received
            ),
            Self::OutOfRange { name, received } => write!(
                f,
                "Input {} is out of range.  Received {}",
                name, received
            ),
            Self::InvalidBoolean { name, received } => write!(
                f,
                "Input {} only accepts boolean values.  Received {}",
                name, received
            ),
            Self::InvalidPatternSource { received } => write!(
                f,
                "Input retry_pattern_source only accepts 'both', 'stdout', or 'stderr'. Received {}",
                received
            ),
        }
    }
}

impl std::error::Error for InputError {}

/// Error returned when a string cannot be compiled into a [`Pattern`](crate::Pattern).
#[derive(Debug, Clone)]
pub enum PatternError {
    /// The regex engine rejected the pattern body.
    Compile(regex::Error),
    /// A flag outside `g`, `i`, `m`, `s`, `u`, `y`.
    UnknownFlag(char),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compile(e) => write!(f, "invalid pattern: {}", e),
            Self::UnknownFlag(c) => write!(f, "unknown pattern flag '{}'", c),
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Compile(e) => Some(e),
            Self::UnknownFlag(_) => None,
        }
    }
}

impl From<regex::Error> for PatternError {
    fn from(e: regex::Error) -> Self {
        Self::Compile(e)
    }
}
