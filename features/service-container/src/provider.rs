use std::{fmt::Debug, future::Future};

use futures::{future::BoxFuture, FutureExt};

use crate::{
    container::Container,
    errors::InvariantViolation,
    types::DynError,
};

/// A service provider, constructing a service and setting it to the container
///
/// Providers are run once, in the order they were handed to [wire]. They may read services
/// set by earlier providers and register shutdown functions with the container.
pub struct Provider(Box<dyn FnOnce() -> BoxFuture<'static, Result<(), DynError>> + Send>);
impl Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Provider")
    }
}

impl Provider {
    pub fn new<F, Fut, E>(provider: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<DynError>,
    {
        Provider(Box::new(move || {
            async move { provider().await.map_err(Into::<DynError>::into) }.boxed()
        }))
    }

    async fn run(self) -> Result<(), DynError> {
        (self.0)().await
    }
}

/// Executes the given providers one after another
///
/// If a provider fails, the container is shut down - releasing everything that was built so
/// far - and the provider's error is returned. The remaining providers are never run.
///
/// # Panics
///
/// With an [InvariantViolation] payload if an entry is `None`. The container is shut down
/// before panicking. This is a wiring bug, silently skipping the entry would leave the
/// container partially built.
pub async fn wire<C, I>(cnt: &C, providers: I) -> Result<(), DynError>
where
    C: Container,
    I: IntoIterator,
    I::Item: Into<Option<Provider>>,
{
    let mut completed = 0;
    for (position, provider) in providers.into_iter().enumerate() {
        let provider: Option<Provider> = provider.into();
        let Some(provider) = provider else {
            cnt.shutdown().await;

            let violation = InvariantViolation::MissingProvider { position };
            tracing::error!("{violation}");
            std::panic::panic_any(violation);
        };

        tracing::debug!("Running provider #{position}");
        if let Err(error) = provider.run().await {
            tracing::warn!("Provider #{position} failed, shutting down container - error: {error}");
            cnt.shutdown().await;
            return Err(error);
        }

        completed += 1;
    }

    tracing::debug!("Container wired by {completed} providers");
    Ok(())
}
