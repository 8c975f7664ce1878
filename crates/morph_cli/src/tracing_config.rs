//! Logging setup for the `morphgen` binary.
//!
//! ```bash
//! # Phase timings and per-file parse results
//! RUST_LOG=debug morphgen --project .
//!
//! # Only the inspector
//! RUST_LOG=morph_inspector=trace morphgen --check
//! ```
//!
//! Without `RUST_LOG` only warnings are shown, such as files skipped for
//! syntax errors. `--verbose` raises the level to `debug`.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "warn";

fn build_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::new(DEFAULT_DIRECTIVE),
    }
}

/// Install the global subscriber. Output goes to stderr so `--dry-run` can
/// print the generated file on stdout.
pub fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}
