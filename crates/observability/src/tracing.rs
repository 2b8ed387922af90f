//! Tracing subscriber initialization.

use tracing_subscriber::EnvFilter;

/// Install a JSON fmt subscriber.
///
/// `RUST_LOG` wins over `default_directive` when it is set and parses.
/// Returns `false` if a global subscriber was already installed.
pub fn init(default_directive: &str) -> bool {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = resolve_filter(rust_log.as_deref(), default_directive);
    let directives = filter.to_string();

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        ::tracing::info!(filter = %directives, "tracing initialized");
    }
    installed
}

fn resolve_filter(rust_log: Option<&str>, default_directive: &str) -> EnvFilter {
    rust_log
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive))
}
