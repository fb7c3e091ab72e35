//! Inline or background execution of masking and transform jobs.
//!
//! Every job owns its input buffer. Dispatching moves the job into a freshly
//! spawned worker thread, which runs it, sends back exactly one result and
//! exits. Where threads are unavailable (`wasm32`, or a host that refuses to
//! report any parallelism) the job runs inline and the returned [`Dispatch`]
//! is already resolved. Both paths run the same pure function, so their
//! output is byte-identical.
//!
//! # Architecture
//!
//! - Capability detection happens once per process ([`ExecutionMode::detect`])
//! - No worker pool: one thread per dispatch, torn down after one result
//! - No cancellation: dropping a [`Dispatch`] discards the result, the worker
//!   still runs to completion
//! - Results arrive in completion order; overlapping dispatches for the same
//!   operation are the caller's responsibility to avoid
//!
//! # Example
//!
//! ```ignore
//! use marquee_core::{ExecutionBridge, BridgeConfig, MaskParams};
//!
//! let bridge = ExecutionBridge::new(BridgeConfig::default());
//! let masked = bridge.dispatch(MaskParams::new(buffer, outline)).wait()?;
//! ```

mod config;
mod dispatch;
mod error;

pub use config::{BridgeConfig, ExecutionMode, ExecutionPreference};
pub use dispatch::Dispatch;
pub use error::ExecutionError;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use log::{debug, warn};
use tokio::sync::oneshot;

use crate::buffer::PixelBuffer;
use crate::mask::{apply_mask, MaskParams};
use crate::transform::{TransformJob, TransformOutput};

/// A self-contained unit of pixel work that can cross a thread boundary.
pub trait Job: Send + 'static {
    /// What the job produces.
    type Output: Send + 'static;

    /// Short label used in thread names and logs.
    fn name(&self) -> &'static str;

    /// Run the job to completion on the current thread.
    fn run(self) -> Result<Self::Output, ExecutionError>;
}

impl Job for MaskParams {
    type Output = PixelBuffer;

    fn name(&self) -> &'static str {
        "mask"
    }

    fn run(self) -> Result<PixelBuffer, ExecutionError> {
        Ok(apply_mask(self))
    }
}

impl Job for TransformJob {
    type Output = TransformOutput;

    fn name(&self) -> &'static str {
        "transform"
    }

    fn run(self) -> Result<TransformOutput, ExecutionError> {
        Ok(TransformJob::run(self)?)
    }
}

/// Dispatches jobs inline or to a per-request background thread.
#[derive(Debug, Clone)]
pub struct ExecutionBridge {
    mode: ExecutionMode,
    config: BridgeConfig,
}

impl Default for ExecutionBridge {
    fn default() -> Self {
        Self::new(BridgeConfig::default())
    }
}

impl ExecutionBridge {
    /// Create a bridge, resolving the configured preference against what the
    /// platform supports.
    pub fn new(config: BridgeConfig) -> Self {
        let mode = config.preference.resolve();
        Self { mode, config }
    }

    /// Create a bridge that always runs jobs on the calling thread.
    pub fn inline() -> Self {
        Self {
            mode: ExecutionMode::Inline,
            config: BridgeConfig::default(),
        }
    }

    /// Where jobs dispatched through this bridge run.
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Run `job`, inline or in the background depending on the bridge mode.
    ///
    /// Ownership of the job (and the buffer inside it) passes to the bridge
    /// for the duration of the call; the result hands a new buffer back.
    pub fn dispatch<J: Job>(&self, job: J) -> Dispatch<J::Output> {
        match self.mode {
            ExecutionMode::Inline => {
                debug!("Running {} job inline", job.name());
                Dispatch::ready(run_guarded(job))
            }
            ExecutionMode::Background => self.spawn_worker(job),
        }
    }

    fn spawn_worker<J: Job>(&self, job: J) -> Dispatch<J::Output> {
        let name = job.name();
        let (tx, rx) = oneshot::channel();

        let thread_name = format!("{}-{}", self.config.thread_name, name);
        let mut builder = thread::Builder::new().name(thread_name);
        if let Some(size) = self.config.stack_size {
            builder = builder.stack_size(size);
        }

        debug!("Dispatching {} job to a background worker", name);

        let spawned = builder.spawn(move || {
            let result = run_guarded(job);
            if tx.send(result).is_err() {
                debug!("Discarding {} result: dispatch was dropped", name);
            }
        });

        match spawned {
            // The handle is dropped: the worker exits on its own after sending
            Ok(_) => Dispatch::pending(rx),
            Err(e) => {
                warn!("Could not spawn worker for {} job: {}", name, e);
                Dispatch::ready(Err(ExecutionError::Spawn(e)))
            }
        }
    }
}

/// Run a job, turning a panic into an [`ExecutionError`].
fn run_guarded<J: Job>(job: J) -> Result<J::Output, ExecutionError> {
    let name = job.name();
    let result = panic::catch_unwind(AssertUnwindSafe(move || job.run()))
        .unwrap_or_else(|payload| Err(ExecutionError::Panicked(panic_message(payload.as_ref()))));

    if let Err(e) = &result {
        warn!("{} job failed: {}", name, e);
    }
    result
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelBufferError;
    use crate::transform::{AffineTransform, ResampleMethod, Scale};
    use crate::{Bounds, Point};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn background_bridge() -> ExecutionBridge {
        ExecutionBridge {
            mode: ExecutionMode::Background,
            config: BridgeConfig::default(),
        }
    }

    fn test_buffer(width: u32, height: u32) -> PixelBuffer {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 17) as u8, (y * 23) as u8, ((x + y) * 5) as u8, 255]);
            }
        }
        PixelBuffer::from_raw(width, height, data).unwrap()
    }

    fn triangle() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(12.0, 1.0),
            Point::new(3.0, 9.0),
        ]
    }

    /// A job that always panics, standing in for an execution fault.
    struct Exploding;

    impl Job for Exploding {
        type Output = ();

        fn name(&self) -> &'static str {
            "exploding"
        }

        fn run(self) -> Result<(), ExecutionError> {
            panic!("worker fault");
        }
    }

    #[test]
    fn test_inline_mask_resolves_immediately() {
        init_logger();
        let bridge = ExecutionBridge::inline();
        let params = MaskParams::new(test_buffer(10, 10), triangle());
        let expected = apply_mask(params.clone());

        let result = bridge.dispatch(params).wait().unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_background_mask_matches_inline() {
        init_logger();
        let params = MaskParams::new(test_buffer(16, 12), triangle()).with_origin(-1.0, 0.5);

        let inline = ExecutionBridge::inline().dispatch(params.clone()).wait().unwrap();
        let background = background_bridge().dispatch(params).wait().unwrap();
        assert_eq!(inline, background);
    }

    #[test]
    fn test_background_transform_matches_inline() {
        init_logger();
        let bounds = Bounds::new(4, 4, 12, 9);
        let job = TransformJob {
            source: test_buffer(12, 9),
            transform: AffineTransform::new(bounds.center(), Scale::new(1.7, 0.6), 0.9),
            original_bounds: bounds,
            method: ResampleMethod::Bicubic,
        };

        let inline = ExecutionBridge::inline().dispatch(job.clone()).wait().unwrap();
        let background = pollster::block_on(background_bridge().dispatch(job)).unwrap();
        assert_eq!(inline, background);
    }

    fn oversized_job() -> TransformJob {
        let bounds = Bounds::new(0, 0, 100, 100);
        TransformJob {
            source: test_buffer(100, 100),
            transform: AffineTransform::new(bounds.center(), Scale::uniform(1e5), 0.0),
            original_bounds: bounds,
            method: ResampleMethod::Bilinear,
        }
    }

    #[test]
    fn test_oversized_transform_fails_inline() {
        init_logger();
        let err = ExecutionBridge::inline().dispatch(oversized_job()).wait().unwrap_err();
        assert!(matches!(
            err,
            ExecutionError::Allocation(PixelBufferError::AllocationFailed { .. })
        ));
    }

    #[test]
    fn test_oversized_transform_fails_background() {
        init_logger();
        let bridge = background_bridge();
        let err = bridge.dispatch(oversized_job()).wait().unwrap_err();
        assert!(matches!(err, ExecutionError::Allocation(_)));

        // The bridge keeps serving after the failed job
        let ok = bridge.dispatch(MaskParams::new(test_buffer(2, 2), Vec::new())).wait();
        assert_eq!(ok.unwrap(), test_buffer(2, 2));
    }

    #[test]
    fn test_panic_surfaces_as_error_inline() {
        init_logger();
        let err = ExecutionBridge::inline().dispatch(Exploding).wait().unwrap_err();
        assert!(matches!(err, ExecutionError::Panicked(ref msg) if msg == "worker fault"));
    }

    #[test]
    fn test_panic_surfaces_as_error_background() {
        init_logger();
        let err = background_bridge().dispatch(Exploding).wait().unwrap_err();
        assert!(matches!(err, ExecutionError::Panicked(ref msg) if msg == "worker fault"));
        assert_eq!(err.to_string(), "Background job panicked: worker fault");
    }

    #[test]
    fn test_dropped_dispatch_is_silent() {
        init_logger();
        let bridge = background_bridge();
        drop(bridge.dispatch(MaskParams::new(test_buffer(64, 64), triangle())));

        // The bridge keeps working after a discarded request
        let result = bridge.dispatch(MaskParams::new(test_buffer(2, 2), Vec::new())).wait();
        assert_eq!(result.unwrap(), test_buffer(2, 2));
    }

    #[test]
    fn test_independent_dispatches() {
        init_logger();
        let bridge = background_bridge();
        let pending: Vec<_> = (1..=4)
            .map(|n| bridge.dispatch(MaskParams::new(test_buffer(n * 3, n * 2), triangle())))
            .collect();

        for (i, dispatch) in pending.into_iter().enumerate() {
            let n = i as u32 + 1;
            let buf = dispatch.wait().unwrap();
            assert_eq!(buf.width(), n * 3);
            assert_eq!(buf.height(), n * 2);
        }
    }

    #[test]
    fn test_inline_preference_forces_inline() {
        let bridge = ExecutionBridge::new(BridgeConfig {
            preference: ExecutionPreference::Inline,
            ..Default::default()
        });
        assert_eq!(bridge.mode(), ExecutionMode::Inline);
    }

    #[test]
    fn test_panic_message_fallback() {
        let payload: Box<dyn Any + Send> = Box::new(42u32);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
