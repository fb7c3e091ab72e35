//! Execution failures.

use thiserror::Error;

use crate::buffer::PixelBufferError;

/// Error types for dispatched jobs.
///
/// Only genuine execution faults end up here; edge-case input (degenerate
/// outlines, zero scales, out-of-range sampling) never fails. The caller's
/// canvas is untouched whenever a dispatch resolves to an error.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The job could not allocate its output buffer.
    #[error("Job ran out of memory: {0}")]
    Allocation(#[from] PixelBufferError),

    /// The job panicked while running.
    #[error("Background job panicked: {0}")]
    Panicked(String),

    /// The OS refused to start a worker thread.
    #[error("Failed to spawn background worker: {0}")]
    Spawn(#[from] std::io::Error),

    /// The worker went away without sending a result.
    #[error("Background worker exited without delivering a result")]
    Disconnected,
}
