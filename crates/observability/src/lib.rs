//! Tracing/logging setup shared by the binaries and the black-box tests.

/// Initialize process-wide tracing with the default `info` filter.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    self::tracing::init("info");
}

/// Tracing subscriber configuration (filters, formatting).
pub mod tracing;
