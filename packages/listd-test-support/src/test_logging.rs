//! Unified test logging initialization

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize structured logging for tests.
///
/// Idempotent; safe to call from every test binary and every test. The
/// level is taken from `TEST_LOG`, then `RUST_LOG`, then defaults to
/// `"warn"`.
///
/// The subscriber writes through `with_test_writer()` so cargo captures
/// output per test, and omits timestamps for stable output.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok(); // something else may already own the global subscriber
    });
}
