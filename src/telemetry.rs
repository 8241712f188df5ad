//! Opt-in tracing setup.
//!
//! The library only emits `tracing` events. Hosts either install their own
//! subscriber or call [`init_default_tracing`] with the `telemetry` feature.

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "trellis_viz=info";

/// Install a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_FILTER)
}

/// Like [`init_default_tracing`] with an explicit fallback filter, e.g.
/// `"trellis_viz=trace"` to see every resolved layer.
#[must_use]
pub fn init_tracing(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
