//! Tracing/logging setup shared by stockplan binaries.

/// Tracing configuration (filters, formatters).
pub mod tracing;

/// Initialize process-wide logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize logging for tests (captured by the test harness).
pub fn init_test() {
    tracing::init_test();
}
