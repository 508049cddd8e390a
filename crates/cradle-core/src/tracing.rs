use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter applied when `RUST_LOG` is unset: service logs at info, the
/// HTTP plumbing at warn.
const DEFAULT_FILTER: &str = "cradle_api=info,tower_http=warn";

/// Install the global JSON log subscriber.
///
/// Honors `RUST_LOG` when present, otherwise falls back to
/// [`DEFAULT_FILTER`]. Repeated calls are no-ops, so test binaries may
/// call this freely.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .try_init();
}
