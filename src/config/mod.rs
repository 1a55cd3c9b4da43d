//! The resolved step configuration.
//!
//! [`Config::from_inputs`] reads every recognized input once, validates it and
//! returns an immutable [`Config`]. Resolution stops at the first invalid input
//! and returns only that error.
//!
//! # Quick Start
//!
//! ```rust
//! use retry_step::{Config, MapInputs, OutputStream};
//! use std::time::Duration;
//!
//! let inputs = MapInputs::new()
//!     .with("command", "cargo test")
//!     .with("continue_on_error", "false")
//!     .with("timeout_minutes", "5")
//!     .with("retry_on_pattern", "/connection reset/i")
//!     .with("retry_pattern_source", "stderr");
//!
//! let config = Config::from_inputs(&inputs).unwrap();
//!
//! assert_eq!(config.timeout(), Some(Duration::from_secs(300)));
//! assert_eq!(config.max_attempts(), 3);
//! assert!(config.has_pattern_source(OutputStream::Stderr));
//! assert!(!config.has_pattern_source(OutputStream::Stdout));
//! ```
//!
//! # Defaults
//!
//! | input | default |
//! |---|---|
//! | `max_attempts` | 3 |
//! | `retry_wait_seconds` | 10 |
//! | `polling_interval_seconds` | 1 |
//! | `retry_on` | `any` |
//! | `warning_on_retry` | false |
//! | `retry_pattern_source` | `both` |
//!
//! A default applies only when the input is empty; `"0"` is kept as zero.

use std::time::Duration;

use crate::error::InputError;
use crate::input::{
    input_boolean, input_boolean_or, input_number, input_string, EnvInputs, InputOptions,
    InputSource,
};
use crate::pattern::{regex_from_string, Pattern};
use crate::retry::RetryPolicy;
use crate::source::{OutputStream, PatternSource};

/// Names of the recognized inputs.
pub mod keys {
    /// Timeout in minutes. Takes priority over [`TIMEOUT_SECONDS`].
    pub const TIMEOUT_MINUTES: &str = "timeout_minutes";
    /// Timeout in seconds.
    pub const TIMEOUT_SECONDS: &str = "timeout_seconds";
    /// Total attempts, including the first.
    pub const MAX_ATTEMPTS: &str = "max_attempts";
    /// The command to run.
    pub const COMMAND: &str = "command";
    /// Seconds to wait between attempts.
    pub const RETRY_WAIT_SECONDS: &str = "retry_wait_seconds";
    /// Shell override.
    pub const SHELL: &str = "shell";
    /// Seconds between checks on a running attempt.
    pub const POLLING_INTERVAL_SECONDS: &str = "polling_interval_seconds";
    /// Which failures are retried.
    pub const RETRY_ON: &str = "retry_on";
    /// Emit a warning on each retry.
    pub const WARNING_ON_RETRY: &str = "warning_on_retry";
    /// Command run before each retry.
    pub const ON_RETRY_COMMAND: &str = "on_retry_command";
    /// Treat a final failure as success.
    pub const CONTINUE_ON_ERROR: &str = "continue_on_error";
    /// Command run instead of [`COMMAND`] on retries.
    pub const NEW_COMMAND_ON_RETRY: &str = "new_command_on_retry";
    /// Retry only on this exit code.
    pub const RETRY_ON_EXIT_CODE: &str = "retry_on_exit_code";
    /// Retry only when output matches this pattern.
    pub const RETRY_ON_PATTERN: &str = "retry_on_pattern";
    /// Which output stream the pattern is matched against.
    pub const RETRY_PATTERN_SOURCE: &str = "retry_pattern_source";
}

/// Attempts made when `max_attempts` is empty.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Seconds between attempts when `retry_wait_seconds` is empty.
pub const DEFAULT_RETRY_WAIT_SECONDS: u64 = 10;
/// Seconds between polls when `polling_interval_seconds` is empty.
pub const DEFAULT_POLLING_INTERVAL_SECONDS: u64 = 1;
/// `retry_on` when empty.
pub const DEFAULT_RETRY_ON: &str = "any";

/// Validated configuration for one run of the step.
///
/// Built once by [`Config::from_inputs`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Config {
    timeout_minutes: Option<u64>,
    timeout_seconds: Option<u64>,
    timeout: Option<Duration>,
    max_attempts: u32,
    command: String,
    retry_wait: Duration,
    shell: Option<String>,
    polling_interval: Duration,
    retry_on: String,
    warning_on_retry: bool,
    on_retry_command: Option<String>,
    continue_on_error: bool,
    new_command_on_retry: Option<String>,
    retry_on_exit_code: Option<i32>,
    retry_on_pattern: Option<Pattern>,
    retry_pattern_source: PatternSource,
}

impl Config {
    /// Resolve a configuration from `source`.
    ///
    /// A `retry_on_pattern` that fails to compile is dropped and the
    /// configuration carries no pattern. Every other invalid input is an error.
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] encountered; no configuration is
    /// produced in that case.
    pub fn from_inputs<S>(source: &S) -> Result<Self, InputError>
    where
        S: InputSource + ?Sized,
    {
        let timeout_minutes = input_number::<u64, _>(source, keys::TIMEOUT_MINUTES, false)?;
        let timeout_seconds = input_number::<u64, _>(source, keys::TIMEOUT_SECONDS, false)?;
        let max_attempts = input_number::<u32, _>(source, keys::MAX_ATTEMPTS, false)?
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);
        let command = source.get_input(keys::COMMAND, InputOptions::required())?;
        let retry_wait_seconds = input_number::<u64, _>(source, keys::RETRY_WAIT_SECONDS, false)?
            .unwrap_or(DEFAULT_RETRY_WAIT_SECONDS);
        let shell = input_string(source, keys::SHELL)?;
        let polling_interval_seconds =
            input_number::<u64, _>(source, keys::POLLING_INTERVAL_SECONDS, false)?
                .unwrap_or(DEFAULT_POLLING_INTERVAL_SECONDS);
        let retry_on = input_string(source, keys::RETRY_ON)?
            .unwrap_or_else(|| DEFAULT_RETRY_ON.to_string());
        let warning_on_retry = input_boolean_or(source, keys::WARNING_ON_RETRY, false)?;
        let on_retry_command = input_string(source, keys::ON_RETRY_COMMAND)?;
        let continue_on_error = input_boolean(source, keys::CONTINUE_ON_ERROR)?;
        let new_command_on_retry = input_string(source, keys::NEW_COMMAND_ON_RETRY)?;
        let retry_on_exit_code = input_number::<i32, _>(source, keys::RETRY_ON_EXIT_CODE, false)?;
        let retry_on_pattern = input_string(source, keys::RETRY_ON_PATTERN)?
            .and_then(|raw| compile_or_drop(&raw));
        let retry_pattern_source = match input_string(source, keys::RETRY_PATTERN_SOURCE)? {
            Some(raw) => raw.parse::<PatternSource>()?,
            None => PatternSource::default(),
        };

        let timeout = derive_timeout(timeout_minutes, timeout_seconds);

        tracing::debug!(
            max_attempts,
            timeout_secs = timeout.map(|t| t.as_secs()),
            retry_wait_seconds,
            polling_interval_seconds,
            retry_on = %retry_on,
            retry_pattern_source = %retry_pattern_source,
            has_pattern = retry_on_pattern.is_some(),
            "resolved step inputs"
        );

        Ok(Self {
            timeout_minutes,
            timeout_seconds,
            timeout,
            max_attempts,
            command,
            retry_wait: Duration::from_secs(retry_wait_seconds),
            shell,
            polling_interval: Duration::from_secs(polling_interval_seconds),
            retry_on,
            warning_on_retry,
            on_retry_command,
            continue_on_error,
            new_command_on_retry,
            retry_on_exit_code,
            retry_on_pattern,
            retry_pattern_source,
        })
    }

    /// The effective timeout for one attempt, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The raw `timeout_minutes` input.
    pub fn timeout_minutes(&self) -> Option<u64> {
        self.timeout_minutes
    }

    /// The raw `timeout_seconds` input.
    pub fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    /// Total attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The command to run.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Wait between attempts.
    pub fn retry_wait(&self) -> Duration {
        self.retry_wait
    }

    /// Shell override.
    pub fn shell(&self) -> Option<&str> {
        self.shell.as_deref()
    }

    /// Interval between checks on a running attempt.
    pub fn polling_interval(&self) -> Duration {
        self.polling_interval
    }

    /// Which failures are retried. The vocabulary is the consumer's to enforce.
    pub fn retry_on(&self) -> &str {
        &self.retry_on
    }

    /// Emit a warning on each retry.
    pub fn warning_on_retry(&self) -> bool {
        self.warning_on_retry
    }

    /// Command run before each retry.
    pub fn on_retry_command(&self) -> Option<&str> {
        self.on_retry_command.as_deref()
    }

    /// Treat a final failure as success.
    pub fn continue_on_error(&self) -> bool {
        self.continue_on_error
    }

    /// Command run instead of [`command`](Config::command) on retries.
    pub fn new_command_on_retry(&self) -> Option<&str> {
        self.new_command_on_retry.as_deref()
    }

    /// Retry only on this exit code.
    pub fn retry_on_exit_code(&self) -> Option<i32> {
        self.retry_on_exit_code
    }

    /// Retry only when output matches this pattern.
    pub fn retry_on_pattern(&self) -> Option<&Pattern> {
        self.retry_on_pattern.as_ref()
    }

    /// Which output stream the pattern is matched against.
    pub fn retry_pattern_source(&self) -> PatternSource {
        self.retry_pattern_source
    }

    /// Returns true if the retry pattern should be matched against `stream`.
    pub fn has_pattern_source(&self, stream: OutputStream) -> bool {
        self.retry_pattern_source.applies_to(stream)
    }

    /// The constant-delay policy described by `retry_wait_seconds` and
    /// `max_attempts`.
    ///
    /// ```rust
    /// use retry_step::{Config, MapInputs};
    /// use std::time::Duration;
    ///
    /// let inputs = MapInputs::new()
    ///     .with("command", "make")
    ///     .with("continue_on_error", "false")
    ///     .with("retry_wait_seconds", "2");
    ///
    /// let policy = Config::from_inputs(&inputs).unwrap().retry_policy();
    /// assert_eq!(policy.delay_for_attempt(1), Some(Duration::from_secs(2)));
    /// assert_eq!(policy.delay_for_attempt(3), None);
    /// ```
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::constant(self.retry_wait).with_max_attempts(self.max_attempts)
    }
}

/// Resolve a configuration from the process environment.
///
/// See [`EnvInputs`] for how input names map to variables.
pub fn get_inputs() -> Result<Config, InputError> {
    Config::from_inputs(&EnvInputs::new())
}

/// The effective timeout of `config`, if any.
pub fn get_timeout(config: &Config) -> Option<Duration> {
    config.timeout()
}

/// Returns true if `config`'s pattern source covers `stream`.
pub fn has_pattern_source(config: &Config, stream: OutputStream) -> bool {
    config.has_pattern_source(stream)
}

/// Pick the effective timeout from the two raw inputs.
///
/// A non-zero minute count wins; otherwise a non-zero second count; otherwise
/// there is no timeout.
///
/// ```rust
/// use retry_step::config::derive_timeout;
/// use std::time::Duration;
///
/// assert_eq!(derive_timeout(Some(5), Some(30)), Some(Duration::from_secs(300)));
/// assert_eq!(derive_timeout(Some(0), Some(30)), Some(Duration::from_secs(30)));
/// assert_eq!(derive_timeout(None, None), None);
/// ```
pub fn derive_timeout(minutes: Option<u64>, seconds: Option<u64>) -> Option<Duration> {
    match (minutes, seconds) {
        (Some(m), _) if m != 0 => Some(Duration::from_secs(m.saturating_mul(60))),
        (_, Some(s)) if s != 0 => Some(Duration::from_secs(s)),
        _ => None,
    }
}

fn compile_or_drop(raw: &str) -> Option<Pattern> {
    match regex_from_string(raw) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::debug!(input = keys::RETRY_ON_PATTERN, error = %e, "ignoring retry pattern");
            None
        }
    }
}
