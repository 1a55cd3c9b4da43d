//! Raw input sources and the typed readers built on them.
//!
//! The host hands a step its settings as named strings. [`InputSource`] is the
//! single seam to that host: one raw lookup by name. Everything else in this
//! module is pure coercion on top of it.
//!
//! # Empty means absent
//!
//! An optional input that is empty (after trimming) is *absent*, and absent is
//! what lets a default apply. An explicit `"0"` is present and is never
//! replaced by a default.
//!
//! # Examples
//!
//! ```rust
//! use retry_step::input::{input_boolean, input_number, MapInputs};
//!
//! let inputs = MapInputs::new()
//!     .with("max_attempts", " 5 ")
//!     .with("continue_on_error", "TRUE");
//!
//! assert_eq!(input_number::<u32, _>(&inputs, "max_attempts", false), Ok(Some(5)));
//! assert_eq!(input_number::<u32, _>(&inputs, "timeout_seconds", false), Ok(None));
//! assert_eq!(input_boolean(&inputs, "continue_on_error"), Ok(true));
//! ```

use std::collections::HashMap;
use std::num::IntErrorKind;

use crate::error::InputError;

/// How a single input is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputOptions {
    /// An empty value is an error instead of absent.
    pub required: bool,
    /// Strip leading and trailing whitespace from the value.
    pub trim_whitespace: bool,
}

impl InputOptions {
    /// Optional, trimmed.
    pub const fn optional() -> Self {
        Self {
            required: false,
            trim_whitespace: true,
        }
    }

    /// Required, trimmed.
    pub const fn required() -> Self {
        Self {
            required: true,
            trim_whitespace: true,
        }
    }

    /// Keep surrounding whitespace.
    pub const fn untrimmed(mut self) -> Self {
        self.trim_whitespace = false;
        self
    }
}

impl Default for InputOptions {
    fn default() -> Self {
        Self::optional()
    }
}

/// A read-only source of named string inputs.
///
/// Implementors provide [`lookup`](InputSource::lookup); the trimming and
/// required-input rules live in [`get_input`](InputSource::get_input) so every
/// source applies them the same way.
pub trait InputSource {
    /// The raw value for `name`, or `None` if the source has no such input.
    fn lookup(&self, name: &str) -> Option<String>;

    /// Read `name` as a string, applying `options`.
    ///
    /// A missing input reads as the empty string unless it is required.
    fn get_input(&self, name: &str, options: InputOptions) -> Result<String, InputError> {
        let raw = self.lookup(name).unwrap_or_default();
        let value = if options.trim_whitespace {
            raw.trim().to_string()
        } else {
            raw
        };
        if options.required && value.is_empty() {
            return Err(InputError::MissingRequired {
                name: name.to_string(),
            });
        }
        Ok(value)
    }
}

impl<S: InputSource + ?Sized> InputSource for &S {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

/// Inputs read from the process environment.
///
/// The host exposes an input named `retry wait` as `INPUT_RETRY_WAIT`: spaces
/// become underscores and the name is upper-cased.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvInputs;

impl EnvInputs {
    /// Create an environment-backed source.
    pub fn new() -> Self {
        Self
    }

    /// The environment variable that carries input `name`.
    ///
    /// ```rust
    /// use retry_step::input::EnvInputs;
    ///
    /// assert_eq!(EnvInputs::variable_name("max_attempts"), "INPUT_MAX_ATTEMPTS");
    /// assert_eq!(EnvInputs::variable_name("retry wait"), "INPUT_RETRY_WAIT");
    /// ```
    pub fn variable_name(name: &str) -> String {
        format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
    }
}

impl InputSource for EnvInputs {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(Self::variable_name(name)).ok()
    }
}

/// Inputs held in memory.
///
/// # Example
///
/// ```rust
/// use retry_step::input::{InputOptions, InputSource, MapInputs};
///
/// let inputs = MapInputs::new().with("command", "npm test");
/// assert_eq!(
///     inputs.get_input("command", InputOptions::required()).unwrap(),
///     "npm test"
/// );
/// assert!(inputs.get_input("shell", InputOptions::required()).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapInputs {
    values: HashMap<String, String>,
}

impl MapInputs {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input, replacing any previous value for `name`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Drop an input.
    pub fn without(mut self, name: &str) -> Self {
        self.values.remove(name);
        self
    }
}

impl InputSource for MapInputs {
    fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapInputs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Read an integer input.
///
/// Returns `Ok(None)` when the input is optional and empty. Otherwise the value
/// must be a base-10 integer that fits `T`.
///
/// # Errors
///
/// - [`InputError::MissingRequired`] if `required` and the input is empty
/// - [`InputError::InvalidNumber`] if the value is not an integer
/// - [`InputError::OutOfRange`] if it is an integer `T` cannot hold
pub fn input_number<T, S>(source: &S, name: &str, required: bool) -> Result<Option<T>, InputError>
where
    T: TryFrom<i128>,
    S: InputSource + ?Sized,
{
    let options = if required {
        InputOptions::required()
    } else {
        InputOptions::optional()
    };
    let raw = source.get_input(name, options)?;
    if raw.is_empty() && !required {
        return Ok(None);
    }

    let wide = match raw.parse::<i128>() {
        Ok(wide) => wide,
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            return Err(InputError::OutOfRange {
                name: name.to_string(),
                received: raw,
            });
        }
        Err(_) => {
            return Err(InputError::InvalidNumber {
                name: name.to_string(),
                received: raw,
            });
        }
    };

    T::try_from(wide).map(Some).map_err(|_| InputError::OutOfRange {
        name: name.to_string(),
        received: raw,
    })
}

/// Read a boolean input: `true` or `false`, in any letter case.
///
/// An empty value is not a boolean; use [`input_boolean_or`] for inputs that
/// have a default.
pub fn input_boolean<S>(source: &S, name: &str) -> Result<bool, InputError>
where
    S: InputSource + ?Sized,
{
    let raw = source.get_input(name, InputOptions::optional())?;
    parse_boolean(name, &raw)
}

/// Read a boolean input, falling back to `default` when it is empty.
pub fn input_boolean_or<S>(source: &S, name: &str, default: bool) -> Result<bool, InputError>
where
    S: InputSource + ?Sized,
{
    let raw = source.get_input(name, InputOptions::optional())?;
    if raw.is_empty() {
        return Ok(default);
    }
    parse_boolean(name, &raw)
}

/// Read an optional string input. Empty is `None`.
pub fn input_string<S>(source: &S, name: &str) -> Result<Option<String>, InputError>
where
    S: InputSource + ?Sized,
{
    let raw = source.get_input(name, InputOptions::optional())?;
    Ok(Some(raw).filter(|s| !s.is_empty()))
}

fn parse_boolean(name: &str, raw: &str) -> Result<bool, InputError> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(InputError::InvalidBoolean {
            name: name.to_string(),
            received: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_input_trims_by_default() {
        let inputs = MapInputs::new().with("shell", "  bash \n");
        assert_eq!(
            inputs.get_input("shell", InputOptions::default()).unwrap(),
            "bash"
        );
        assert_eq!(
            inputs
                .get_input("shell", InputOptions::optional().untrimmed())
                .unwrap(),
            "  bash \n"
        );
    }

    #[test]
    fn test_get_input_missing_optional_is_empty() {
        let inputs = MapInputs::new();
        assert_eq!(inputs.get_input("shell", InputOptions::optional()), Ok(String::new()));
    }

    #[test]
    fn test_get_input_missing_required_errors() {
        let inputs = MapInputs::new().with("command", "   ");
        assert_eq!(
            inputs.get_input("command", InputOptions::required()),
            Err(InputError::MissingRequired {
                name: "command".to_string()
            })
        );
    }

    #[test]
    fn test_input_number_empty_optional_is_none() {
        let inputs = MapInputs::new().with("timeout_minutes", "");
        assert_eq!(input_number::<u64, _>(&inputs, "timeout_minutes", false), Ok(None));
    }

    #[test]
    fn test_input_number_zero_is_present() {
        let inputs = MapInputs::new().with("max_attempts", "0");
        assert_eq!(input_number::<u32, _>(&inputs, "max_attempts", false), Ok(Some(0)));
    }

    #[test]
    fn test_input_number_rejects_non_integers() {
        for raw in ["abc", "5abc", "1.5", "0x10", "--1"] {
            let inputs = MapInputs::new().with("retry_wait_seconds", raw);
            assert_eq!(
                input_number::<u64, _>(&inputs, "retry_wait_seconds", false),
                Err(InputError::InvalidNumber {
                    name: "retry_wait_seconds".to_string(),
                    received: raw.to_string(),
                }),
                "raw {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_input_number_required_empty_errors() {
        let inputs = MapInputs::new();
        assert!(matches!(
            input_number::<i32, _>(&inputs, "retry_on_exit_code", true),
            Err(InputError::MissingRequired { .. })
        ));
    }

    #[test]
    fn test_input_number_out_of_range() {
        let inputs = MapInputs::new().with("max_attempts", "-2");
        assert_eq!(
            input_number::<u32, _>(&inputs, "max_attempts", false),
            Err(InputError::OutOfRange {
                name: "max_attempts".to_string(),
                received: "-2".to_string(),
            })
        );
        assert_eq!(input_number::<i32, _>(&inputs, "max_attempts", false), Ok(Some(-2)));
    }

    #[test]
    fn test_input_number_beyond_i64() {
        let inputs = MapInputs::new()
            .with("timeout_seconds", "18446744073709551615")
            .with("max_attempts", "9223372036854775808");
        assert_eq!(
            input_number::<u64, _>(&inputs, "timeout_seconds", false),
            Ok(Some(u64::MAX))
        );
        assert_eq!(
            input_number::<u32, _>(&inputs, "max_attempts", false),
            Err(InputError::OutOfRange {
                name: "max_attempts".to_string(),
                received: "9223372036854775808".to_string(),
            })
        );

        for raw in ["99999999999999999999", "-99999999999999999999999999999999999999999"] {
            let inputs = MapInputs::new().with("timeout_seconds", raw);
            assert_eq!(
                input_number::<u64, _>(&inputs, "timeout_seconds", false),
                Err(InputError::OutOfRange {
                    name: "timeout_seconds".to_string(),
                    received: raw.to_string(),
                }),
                "raw {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_input_boolean_accepts_any_case() {
        let cases = [
            ("true", true),
            ("TRUE", true),
            ("False", false),
            ("false", false),
        ];
        for (raw, expected) in cases {
            let inputs = MapInputs::new().with("continue_on_error", raw);
            assert_eq!(input_boolean(&inputs, "continue_on_error"), Ok(expected));
        }
    }

    #[test]
    fn test_input_boolean_rejects_other_values() {
        for raw in ["Maybe", "yes", "1", ""] {
            let inputs = MapInputs::new().with("continue_on_error", raw);
            assert_eq!(
                input_boolean(&inputs, "continue_on_error"),
                Err(InputError::InvalidBoolean {
                    name: "continue_on_error".to_string(),
                    received: raw.to_string(),
                })
            );
        }
    }

    #[test]
    fn test_input_boolean_or_defaults_only_when_empty() {
        let inputs = MapInputs::new();
        assert_eq!(input_boolean_or(&inputs, "warning_on_retry", false), Ok(false));

        let inputs = MapInputs::new().with("warning_on_retry", "nope");
        assert!(input_boolean_or(&inputs, "warning_on_retry", false).is_err());
    }

    #[test]
    fn test_input_string_empty_is_none() {
        let inputs = MapInputs::new().with("shell", " ").with("on_retry_command", "echo hi");
        assert_eq!(input_string(&inputs, "shell"), Ok(None));
        assert_eq!(
            input_string(&inputs, "on_retry_command"),
            Ok(Some("echo hi".to_string()))
        );
    }

    #[test]
    fn test_map_inputs_from_iter_and_without() {
        let inputs: MapInputs = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(inputs.lookup("a"), Some("1".to_string()));
        let inputs = inputs.without("a");
        assert_eq!(inputs.lookup("a"), None);
        assert_eq!(inputs.lookup("b"), Some("2".to_string()));
    }

    #[test]
    fn test_env_variable_name() {
        assert_eq!(EnvInputs::variable_name("command"), "INPUT_COMMAND");
        assert_eq!(
            EnvInputs::variable_name("retry pattern-source"),
            "INPUT_RETRY_PATTERN-SOURCE"
        );
    }

    #[test]
    fn test_source_by_reference() {
        let inputs = MapInputs::new().with("shell", "sh");
        let by_ref: &dyn InputSource = &inputs;
        assert_eq!(input_string(&by_ref, "shell"), Ok(Some("sh".to_string())));
    }
}
