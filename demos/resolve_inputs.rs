//! Resolves step inputs and walks through a simulated retry sequence
//!
//! Run with: cargo run --example resolve_inputs
//!
//! Inputs come from `INPUT_*` environment variables when `INPUT_COMMAND` is
//! set, otherwise from a built-in sample.

use retry_step::prelude::*;
use retry_step::EnvInputs;

#[tokio::main]
async fn main() {
    // Set up tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let resolved = if std::env::var("INPUT_COMMAND").is_ok() {
        Config::from_inputs(&EnvInputs::new())
    } else {
        Config::from_inputs(&sample_inputs())
    };

    let config = match resolved {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        command = config.command(),
        timeout = ?get_timeout(&config),
        "configuration resolved"
    );

    // Pretend every attempt prints the same failure on stderr.
    let stderr = "npm ERR! network socket hang up";
    let retryable = config.retry_on_pattern().map_or(true, |pattern| {
        has_pattern_source(&config, OutputStream::Stderr) && pattern.is_match(stderr)
    });

    if !retryable {
        tracing::info!("failure output does not match retry pattern; not retrying");
        return;
    }

    let policy = config.retry_policy();
    let mut attempt = 1;
    while let Some(delay) = policy.delay_for_attempt(attempt) {
        tracing::info!(
            attempt,
            remaining = policy.attempts_remaining(attempt),
            "attempt failed, retrying"
        );
        retry_wait(delay).await;
        attempt += 1;
    }
    tracing::info!(attempts = attempt, "giving up");
}

fn sample_inputs() -> MapInputs {
    MapInputs::new()
        .with("command", "npm ci")
        .with("continue_on_error", "false")
        .with("max_attempts", "3")
        .with("retry_wait_seconds", "0")
        .with("timeout_seconds", "120")
        .with("retry_on_pattern", "/socket hang up|ETIMEDOUT/i")
        .with("retry_pattern_source", "stderr")
}
