use std::{
    fmt::Debug,
    future::Future,
    panic::AssertUnwindSafe,
    sync::{Mutex, MutexGuard, PoisonError},
};

use futures::{lock::Mutex as AsyncMutex, FutureExt};

use crate::types::OnShutdown;

/// Ordered registry of shutdown callbacks
///
/// Callbacks are run in the reverse order of their registration, so the last acquired
/// resource is released first. Every callback runs exactly once - calling
/// [ShutdownHandler::shutdown] again after it completed does nothing.
///
/// Registration and shutdown may be called from any thread.
#[derive(Default)]
pub struct ShutdownHandler {
    pending: Mutex<Vec<OnShutdown>>,
    /// Held for the whole teardown, concurrent shutdowns wait for the running one
    running: AsyncMutex<()>,
}
impl Debug for ShutdownHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShutdownHandler")
            .field("pending", &self.len())
            .finish()
    }
}

impl ShutdownHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback which is run once the handler shuts down
    ///
    /// Callbacks must not fail - errors while releasing a resource are to be discarded
    /// by the callback itself, so the remaining callbacks still run.
    pub fn register_on_shutdown<F, Fut>(&self, callback: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let callback: OnShutdown = Box::new(move || callback().boxed());

        let mut pending = self.lock_pending();
        pending.push(callback);
        tracing::trace!("Registered shutdown callback #{}", pending.len());
    }

    /// Runs all registered callbacks in reverse order
    pub async fn shutdown(&self) {
        let _running = self.running.lock().await;

        let callbacks = std::mem::take(&mut *self.lock_pending());
        if callbacks.is_empty() {
            tracing::debug!("Shutdown requested, no callbacks registered");
            return;
        }

        tracing::debug!("Shutting down {} services", callbacks.len());

        for (index, callback) in callbacks.into_iter().enumerate().rev() {
            let result = AssertUnwindSafe(async move { callback().await })
                .catch_unwind()
                .await;

            if result.is_err() {
                tracing::error!("Shutdown callback #{} panicked", index + 1);
            }
        }

        tracing::debug!("Shutdown complete");
    }

    /// Number of callbacks waiting for shutdown
    pub fn len(&self) -> usize {
        self.lock_pending().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_pending(&self) -> MutexGuard<'_, Vec<OnShutdown>> {
        // Callbacks never run while the lock is held, a poisoned list is still consistent
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ShutdownHandler {
    fn drop(&mut self) {
        let pending = match self.pending.get_mut() {
            Ok(pending) => pending.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        };

        if pending > 0 {
            tracing::warn!("Shutdown handler dropped with {pending} callbacks that never ran");
        }
    }
}
