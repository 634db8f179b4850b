// src/telemetry.rs
// =============================================================================
// Logging setup.
//
// Progress and absorbed failures are tracing events. They go to stderr so that
// `--json` output on stdout stays machine-readable. The filter comes from
// RUST_LOG when it is set.
// =============================================================================

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,script_census=info";

pub fn init_telemetry() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
