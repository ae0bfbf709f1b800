//! Environment configuration shared by the binaries.
//!
//! Reads `YACHT_LOG` and `RAYON_NUM_THREADS` (fallback `OMP_NUM_THREADS`).

use std::sync::OnceLock;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default tracing directive when `YACHT_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default rayon pool size.
pub const DEFAULT_RAYON_THREADS: usize = 4;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Install the global tracing subscriber (stderr, filter from `YACHT_LOG`).
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env("YACHT_LOG")
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()
            .ok();
    });
}

/// Read `RAYON_NUM_THREADS` (fallback `OMP_NUM_THREADS`, default 4).
pub fn rayon_thread_count() -> usize {
    std::env::var("RAYON_NUM_THREADS")
        .or_else(|_| std::env::var("OMP_NUM_THREADS"))
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&n: &usize| n > 0)
        .unwrap_or(DEFAULT_RAYON_THREADS)
}

/// Build the rayon global pool, tolerating one that is already initialized.
/// Returns the requested thread count.
pub fn init_rayon_threads_lenient() -> usize {
    let num_threads = rayon_thread_count();
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok(); // May fail if already initialized
    tracing::debug!(num_threads, "rayon pool");
    num_threads
}
