//! Background chunked encryption with caller-chosen completion delivery.
//!
//! [`smart_encrypt_async`] runs [`smart_encrypt`] on its own named thread.
//! When it finishes, the result is wrapped in a job and handed to a
//! [`CompletionContext`], which decides where `on_complete` runs:
//! [`WorkerThread`] runs it right there on the worker, while a
//! [`CallerQueue`] holds it until the owning thread drains the queue.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use log::{debug, warn};
use rand_core::CryptoRngCore;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::chunked::smart_encrypt;
use crate::config::Configuration;
use crate::errors::{Error, Result};
use crate::traits::KeyHandle;

/// Name given to encryption worker threads.
pub const WORKER_THREAD_NAME: &str = "rsa-encrypt";

/// A deferred completion callback.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Where completion callbacks are executed.
pub trait CompletionContext: Send {
    /// Arrange for `job` to run exactly once.
    fn schedule(&self, job: Job);
}

/// Runs completions on the worker thread that produced them.
#[derive(Clone, Copy, Debug, Default)]
pub struct WorkerThread;

impl CompletionContext for WorkerThread {
    fn schedule(&self, job: Job) {
        job()
    }
}

/// A queue of completions drained by the thread that owns it.
///
/// Hand [`CallerQueue::context`] to [`smart_encrypt_async`], then call
/// [`CallerQueue::run_pending`] or [`CallerQueue::wait_one`] to run the
/// callbacks on this thread.
pub struct CallerQueue {
    sender: Sender<Job>,
    receiver: Receiver<Job>,
}

/// The sending half of a [`CallerQueue`].
///
/// Jobs scheduled after the queue has been dropped are discarded.
#[derive(Clone)]
pub struct QueueContext {
    sender: Sender<Job>,
}

impl CompletionContext for QueueContext {
    fn schedule(&self, job: Job) {
        if self.sender.send(job).is_err() {
            warn!("completion queue dropped, discarding callback");
        }
    }
}

impl CallerQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// A context that delivers completions into this queue.
    pub fn context(&self) -> QueueContext {
        QueueContext {
            sender: self.sender.clone(),
        }
    }

    /// Runs every completion already queued, returning how many ran.
    pub fn run_pending(&self) -> usize {
        let mut count = 0;
        while let Ok(job) = self.receiver.try_recv() {
            job();
            count += 1;
        }
        count
    }

    /// Blocks until one completion arrives and runs it.
    ///
    /// The queue keeps a sender of its own, so this only returns once a job
    /// has been scheduled.
    pub fn wait_one(&self) {
        if let Ok(job) = self.receiver.recv() {
            job();
        }
    }
}

impl Default for CallerQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// A running background encryption.
///
/// Dropping the task detaches the worker; the callback still fires.
#[derive(Debug)]
pub struct EncryptTask {
    handle: JoinHandle<()>,
}

impl EncryptTask {
    /// Waits for the worker to finish.
    ///
    /// With [`WorkerThread`] the callback has run by the time this returns;
    /// with a [`QueueContext`] it has been queued.
    pub fn join(self) -> Result<()> {
        self.handle.join().map_err(|_| Error::Internal)
    }

    /// Whether the worker has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Encrypts `plaintext` with [`smart_encrypt`] on a new thread and passes
/// the result to `on_complete` through `context`.
///
/// `on_complete` runs exactly once per spawned worker. A key handle that
/// panics while encrypting is reported to it as [`Error::Internal`].
///
/// There is no cancellation. If the thread cannot be spawned this returns
/// [`Error::Internal`] and `on_complete` is never called.
pub fn smart_encrypt_async<R, K, C, F>(
    mut rng: R,
    plaintext: Vec<u8>,
    key: Arc<K>,
    config: Configuration,
    context: C,
    on_complete: F,
) -> Result<EncryptTask>
where
    R: CryptoRngCore + Send + 'static,
    K: KeyHandle + Send + Sync + ?Sized + 'static,
    C: CompletionContext + 'static,
    F: FnOnce(Result<Vec<u8>>) + Send + 'static,
{
    debug!(
        "spawning background encryption of {} bytes",
        plaintext.len()
    );

    let handle = thread::Builder::new()
        .name(WORKER_THREAD_NAME.into())
        .spawn(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                smart_encrypt(&mut rng, &plaintext, &*key, &config)
            }))
            .unwrap_or_else(|_| {
                warn!("encryption worker panicked");
                Err(Error::Internal)
            });
            context.schedule(Box::new(move || on_complete(result)));
        })
        .map_err(|err| {
            warn!("failed to spawn encryption worker: {err}");
            Error::Internal
        })?;

    Ok(EncryptTask { handle })
}
