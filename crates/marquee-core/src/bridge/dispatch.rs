//! The pending result of a dispatched job.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use super::error::ExecutionError;

/// A job result that may not have arrived yet.
///
/// Inline dispatches return an already-resolved `Dispatch`; background
/// dispatches resolve when the worker sends its result. Dropping a `Dispatch`
/// discards the result.
#[derive(Debug)]
#[must_use = "dropping a Dispatch discards the job's result"]
pub struct Dispatch<T> {
    rx: oneshot::Receiver<Result<T, ExecutionError>>,
}

impl<T> Dispatch<T> {
    pub(crate) fn pending(rx: oneshot::Receiver<Result<T, ExecutionError>>) -> Self {
        Self { rx }
    }

    pub(crate) fn ready(result: Result<T, ExecutionError>) -> Self {
        let (tx, rx) = oneshot::channel();
        // The receiver is alive, so this cannot fail
        let _ = tx.send(result);
        Self { rx }
    }

    /// Block the current thread until the result arrives.
    pub fn wait(self) -> Result<T, ExecutionError> {
        pollster::block_on(self)
    }
}

impl<T> Future for Dispatch<T> {
    type Output = Result<T, ExecutionError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(ExecutionError::Disconnected)),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_resolves() {
        let d = Dispatch::ready(Ok(7));
        assert_eq!(d.wait().unwrap(), 7);
    }

    #[test]
    fn test_dropped_sender_disconnects() {
        let (tx, rx) = oneshot::channel::<Result<u8, ExecutionError>>();
        drop(tx);
        let err = Dispatch::pending(rx).wait().unwrap_err();
        assert!(matches!(err, ExecutionError::Disconnected));
    }

    #[test]
    fn test_pending_resolves_from_other_thread() {
        let (tx, rx) = oneshot::channel();
        let handle = std::thread::spawn(move || {
            let _ = tx.send(Ok::<_, ExecutionError>("done"));
        });
        assert_eq!(Dispatch::pending(rx).wait().unwrap(), "done");
        handle.join().unwrap();
    }
}
