//! Testing utilities for code that resolves step inputs.
//!
//! This module provides assertion macros for resolution results and, behind the
//! `proptest` feature, `Arbitrary` implementations for the public value types.
//!
//! # Examples
//!
//! ```rust
//! use retry_step::{assert_input_error, assert_resolves, Config, InputError, MapInputs};
//!
//! let inputs = MapInputs::new()
//!     .with("command", "make")
//!     .with("continue_on_error", "false");
//! let config = assert_resolves!(Config::from_inputs(&inputs));
//! assert_eq!(config.max_attempts(), 3);
//!
//! let inputs = inputs.with("max_attempts", "lots");
//! assert_input_error!(
//!     Config::from_inputs(&inputs),
//!     InputError::InvalidNumber { name, .. } if name == "max_attempts"
//! );
//! ```

/// Assert that resolution succeeded and evaluate to the resolved value.
///
/// Panics with the error's message otherwise.
///
/// # Example
///
/// ```rust
/// use retry_step::{assert_resolves, Config, MapInputs};
///
/// let inputs = MapInputs::new()
///     .with("command", "make")
///     .with("continue_on_error", "true");
/// let config = assert_resolves!(Config::from_inputs(&inputs));
/// assert!(config.continue_on_error());
/// ```
#[macro_export]
macro_rules! assert_resolves {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => {
                panic!("Expected inputs to resolve, got error: {}", e);
            }
        }
    };
}

/// Assert that resolution failed with an error matching a pattern.
///
/// An optional `if` guard can inspect the bound fields.
///
/// # Example
///
/// ```rust
/// use retry_step::{assert_input_error, Config, InputError, MapInputs};
///
/// let inputs = MapInputs::new().with("continue_on_error", "false");
/// assert_input_error!(Config::from_inputs(&inputs), InputError::MissingRequired { .. });
/// ```
#[macro_export]
macro_rules! assert_input_error {
    ($result:expr, $pattern:pat $(if $guard:expr)? $(,)?) => {
        match $result {
            Err(error) => match error {
                $pattern $(if $guard)? => {}
                other => {
                    panic!(
                        "Expected error matching {}, got: {:?}",
                        stringify!($pattern),
                        other
                    );
                }
            },
            Ok(value) => {
                panic!("Expected Err, got Ok: {:?}", value);
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
use crate::{Flags, OutputStream, PatternSource};

#[cfg(feature = "proptest")]
impl Arbitrary for PatternSource {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            Just(PatternSource::Both),
            Just(PatternSource::Stdout),
            Just(PatternSource::Stderr),
        ]
        .boxed()
    }
}

#[cfg(feature = "proptest")]
impl Arbitrary for OutputStream {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![Just(OutputStream::Stdout), Just(OutputStream::Stderr)].boxed()
    }
}

#[cfg(feature = "proptest")]
impl Arbitrary for Flags {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        "[gimsuy]{0,8}"
            .prop_map(|s| s.parse::<Flags>().unwrap_or_default())
            .boxed()
    }
}
