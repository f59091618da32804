use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a tracing subscriber for tests and diagnostic runs.
///
/// Filter level comes from `RUST_LOG`; defaults to warnings only.
/// Safe to call from multiple tests, only the first call installs.
pub fn setup_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
