//! Shared helpers for the grantline walkthrough binaries.

pub mod display;
pub mod prompt;

/// Install the tracing subscriber for a walkthrough binary.
///
/// Diagnostics go to stderr so stdout stays operator-facing; set
/// `RUST_LOG` to see them.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
