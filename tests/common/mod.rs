#![allow(dead_code)]
//! Shared integration test utilities.

use proptest::prelude::ProptestConfig;
use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Install a tracing subscriber once per test binary.
///
/// Honors `RUST_LOG`; defaults to `trace` so buffer mutation events show up
/// in captured output when a test fails.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trace")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Proptest configuration with an explicit case count.
#[must_use]
pub fn test_proptest_config(cases: u32) -> ProptestConfig {
    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}
