//! Dedicated engine thread processing requests strictly in arrival order
//!
//! Requests travel over an unbounded channel to one consumer thread that
//! owns the [`Session`]. There is no cancellation and no timeout: a new
//! request simply queues behind the one in flight.

use crate::engine::protocol::{Request, Response};
use crate::engine::session::Session;
use crate::io::error::{EngineError, Result};
use crate::io::source::DataSource;
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use std::thread::{self, JoinHandle};
use tracing::debug;

struct Job {
    request: Request,
    reply: Sender<Response>,
}

/// Handle returned by [`EngineWorker::submit`]
pub struct PendingResponse {
    rx: Receiver<Response>,
}

impl PendingResponse {
    /// Wait for the worker to answer
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::WorkerUnavailable`] if the worker stopped
    /// before answering
    pub fn wait(self) -> Result<Response> {
        self.rx.recv().map_err(|e| EngineError::WorkerUnavailable {
            reason: format!("worker stopped before answering: {e}"),
        })
    }
}

/// Owner of the engine thread
///
/// Dropping the worker closes the queue; already queued requests are still
/// answered before the thread exits.
pub struct EngineWorker {
    tx: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl EngineWorker {
    /// Move a session onto a new engine thread
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::WorkerUnavailable`] if the thread cannot be spawned
    pub fn spawn<S>(mut session: Session<S>) -> Result<Self>
    where
        S: DataSource + Send + 'static,
    {
        let (tx, rx) = unbounded::<Job>();

        let handle = thread::Builder::new()
            .name("regionsleuth-engine".to_string())
            .spawn(move || {
                while let Ok(Job { request, reply }) = rx.recv() {
                    let response = session.handle(request);
                    // The requester may have given up waiting
                    let _ = reply.send(response);
                }
                debug!("engine queue closed");
            })
            .map_err(|e| EngineError::WorkerUnavailable {
                reason: format!("failed to spawn engine thread: {e}"),
            })?;

        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
        })
    }

    /// Queue a request without waiting for its answer
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::WorkerUnavailable`] if the worker has stopped
    pub fn submit(&self, request: Request) -> Result<PendingResponse> {
        let tx = self.tx.as_ref().ok_or_else(|| EngineError::WorkerUnavailable {
            reason: "worker has been shut down".to_string(),
        })?;
        let (reply, rx) = bounded(1);
        tx.send(Job { request, reply })
            .map_err(|e| EngineError::WorkerUnavailable {
                reason: format!("engine thread has exited: {e}"),
            })?;
        Ok(PendingResponse { rx })
    }

    /// Queue a request and wait for its answer
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::WorkerUnavailable`] if the worker has stopped
    pub fn request(&self, request: Request) -> Result<Response> {
        self.submit(request)?.wait()
    }

    /// Close the queue and wait for the engine thread to drain it
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        drop(self.tx.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for EngineWorker {
    fn drop(&mut self) {
        self.stop();
    }
}
