//! Opt-in `tracing` setup for the `render_heatmap` binary and embedding hosts.
//!
//! The library only emits events. Installing a subscriber is left to the
//! caller, either through the helpers here or a subscriber of its own.

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_DIRECTIVE: &str = "heatmap_rs=info";

/// Installs a compact stderr subscriber filtered by `RUST_LOG`, falling back
/// to `default_directive`.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_tracing(default_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_directive;
        false
    }
}

#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_LOG_DIRECTIVE)
}
