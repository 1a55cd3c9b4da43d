//! # retry-step
//!
//! Input resolution and retry-condition primitives for a command-retrying
//! automation step.
//!
//! The step receives its settings as named strings from the host. This crate
//! turns them into a validated, immutable [`Config`] and supplies the small
//! decisions a retry loop makes around each attempt:
//!
//! - the effective timeout ([`get_timeout`])
//! - the output pattern that marks a failure as retryable ([`regex_from_string`])
//! - whether that pattern applies to stdout or stderr ([`has_pattern_source`])
//! - the wait between attempts ([`retry::retry_wait`])
//!
//! ## Quick Example
//!
//! ```rust
//! use retry_step::{Config, MapInputs, OutputStream};
//! use std::time::Duration;
//!
//! let inputs = MapInputs::new()
//!     .with("command", "npm test")
//!     .with("continue_on_error", "false")
//!     .with("timeout_seconds", "90")
//!     .with("retry_on_pattern", r"/ECONNRESET|socket hang up/i");
//!
//! let config = Config::from_inputs(&inputs).unwrap();
//!
//! assert_eq!(config.timeout(), Some(Duration::from_secs(90)));
//! assert_eq!(config.retry_wait(), Duration::from_secs(10));
//!
//! let pattern = config.retry_on_pattern().unwrap();
//! if config.has_pattern_source(OutputStream::Stderr) {
//!     assert!(pattern.is_match("Error: Socket hang up"));
//! }
//! ```
//!
//! Invalid inputs fail resolution with an error naming the input:
//!
//! ```rust
//! use retry_step::{Config, MapInputs};
//!
//! let inputs = MapInputs::new()
//!     .with("command", "npm test")
//!     .with("continue_on_error", "Maybe");
//!
//! let err = Config::from_inputs(&inputs).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Input continue_on_error only accepts boolean values.  Received Maybe"
//! );
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod input;
pub mod pattern;
pub mod retry;
pub mod source;
pub mod testing;

// Re-exports
pub use config::{get_inputs, get_timeout, has_pattern_source, Config};
pub use error::{InputError, PatternError};
pub use input::{EnvInputs, InputOptions, InputSource, MapInputs};
pub use pattern::{regex_from_string, Flags, Pattern};
pub use retry::RetryPolicy;
pub use source::{OutputStream, PatternSource};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{get_inputs, get_timeout, has_pattern_source, Config};
    pub use crate::error::{InputError, PatternError};
    pub use crate::input::{InputSource, MapInputs};
    pub use crate::pattern::{regex_from_string, Pattern};
    #[cfg(feature = "async")]
    pub use crate::retry::{retry_wait, wait};
    pub use crate::retry::RetryPolicy;
    pub use crate::source::{OutputStream, PatternSource};
}
