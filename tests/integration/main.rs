//! Integration tests for the mirror reflection library.

use std::sync::Once;

mod construction;
mod properties;
mod registry;

static INIT_TRACING: Once = Once::new();

/// Route tracing events to the test output, honoring `RUST_LOG`.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
