//! In-flight request handles.
//!
//! Requests run as tasks on the app's tokio runtime and report back over a
//! oneshot channel, so the UI loop can poll for completion between frames
//! without blocking on the network.

use anyhow::Result;
use std::future::Future;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;

/// Handle for polling a spawned request
pub struct RequestHandle<T> {
    receiver: oneshot::Receiver<Result<T>>,
}

impl<T: Send + 'static> RequestHandle<T> {
    /// Spawn `request` on `runtime` and return a handle to its result
    pub fn spawn<F>(runtime: &Runtime, request: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();

        runtime.spawn(async move {
            let result = request.await;
            // Receiver is gone if the app quit; nothing left to update
            let _ = sender.send(result);
        });

        Self { receiver }
    }

    /// Try to receive the result without blocking
    pub fn try_recv(&mut self) -> Option<Result<T>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                Some(Err(anyhow::anyhow!("Request task ended without a result")))
            }
        }
    }

    /// Block the current thread until the request resolves
    pub fn wait(self, runtime: &Runtime) -> Result<T> {
        match runtime.block_on(self.receiver) {
            Ok(result) => result,
            Err(_) => Err(anyhow::anyhow!("Request task ended without a result")),
        }
    }
}
