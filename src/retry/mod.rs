//! Retry primitives consumed by the step's execution loop.
//!
//! - [`RetryPolicy`]: pure data answering "how long until the next attempt, if any"
//! - [`wait`] and [`retry_wait`]: the suspension between attempts (requires the
//!   default `async` feature)
//!
//! # Quick Start
//!
//! ```rust
//! use retry_step::retry::{retry_wait, RetryPolicy};
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let policy = RetryPolicy::constant(Duration::from_millis(5)).with_max_attempts(3);
//!
//! let mut attempt = 1;
//! while let Some(delay) = policy.delay_for_attempt(attempt) {
//!     retry_wait(delay).await;
//!     attempt += 1;
//! }
//! assert_eq!(attempt, 3);
//! # });
//! ```

mod policy;
#[cfg(feature = "async")]
mod wait;

pub use policy::RetryPolicy;
#[cfg(feature = "async")]
pub use wait::{retry_wait, wait};
