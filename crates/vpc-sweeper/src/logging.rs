//! Tracing subscriber setup for the CLI and the Lambda handlers

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// AWS SDK targets that are too chatty below WARN
const QUIET_TARGETS: &[&str] = &["aws_config", "aws_sdk", "aws_smithy"];

/// `RUST_LOG` filter with INFO as the floor and the SDK capped at WARN
pub fn env_filter() -> EnvFilter {
    let filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());

    QUIET_TARGETS
        .iter()
        .filter_map(|target| format!("{target}=warn").parse().ok())
        .fold(filter, |filter, directive| filter.add_directive(directive))
}

/// Human-readable logs on stderr for interactive runs
pub fn init_cli() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// JSON logs for Lambda; CloudWatch stamps each line itself
pub fn init_lambda() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .init();
}
