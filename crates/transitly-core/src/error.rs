// ── Core error types ──
//
// The simulation itself cannot fail: ticks, status changes, and refreshes
// are infallible. Errors only arise at the session boundary.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("No async runtime available to drive simulation timers: {reason}")]
    RuntimeUnavailable { reason: String },

    #[error("Simulation session already running for city '{city}'")]
    AlreadyRunning { city: String },

    #[error("Invalid simulator configuration: {message}")]
    InvalidConfig { message: String },
}
