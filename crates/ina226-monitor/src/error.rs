//! Failures surfaced on the `error` channel.

use thiserror::Error;

/// Failure cause delivered to `error` listeners.
///
/// The two variants distinguish where in the lifecycle the failure happened;
/// the underlying hardware cause stays inspectable through `source()`.
/// Failures are never raised back to the constructing caller.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Bus open, register write, or register read failed during the connect
    /// handshake. Polling never started; call `connect()` again to retry.
    #[error("sensor connect failed: {0}")]
    Connect(#[source] ina226_hw::Error),

    /// A read or calculation failed during a poll iteration. The loop keeps
    /// running at the slowed cadence.
    #[error("sensor poll failed: {0}")]
    Poll(#[source] ina226_hw::Error),
}
