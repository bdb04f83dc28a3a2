use std::future::Future;

use crate::shutdown::ShutdownHandler;

/// A service container
///
/// Concrete containers hold their services in [crate::Slot]s and own one [ShutdownHandler].
/// Providers are written against narrower traits extending this one, naming only the
/// services they read or set.
///
/// Once [Container::shutdown] has been called, the container services are unusable.
pub trait Container: Send + Sync + 'static {
    fn shutdown_handler(&self) -> &ShutdownHandler;

    /// Registers a function which is executed when the container shuts down
    fn register_on_shutdown<F, Fut>(&self, callback: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.shutdown_handler().register_on_shutdown(callback)
    }

    /// Gracefully shuts down container services
    ///
    /// Must be awaited before the application exits. Registered functions run sequentially
    /// in the reverse order of their registration.
    fn shutdown(&self) -> impl Future<Output = ()> + Send + '_ {
        self.shutdown_handler().shutdown()
    }
}
