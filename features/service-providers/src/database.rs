use std::sync::Arc;

use ::mongodb::{options::ClientOptions, Client};
use service_container::{Container, Provider, SlotError};

use crate::errors::ProviderError;

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";

/// MongoDB connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoDbOptions {
    /// Connection string
    pub uri: String,
    /// Reported to the server, unless the connection string sets `appName` itself
    pub app_name: Option<String>,
}
impl Default for MongoDbOptions {
    fn default() -> Self {
        Self {
            uri: DEFAULT_MONGODB_URI.to_string(),
            app_name: None,
        }
    }
}
impl MongoDbOptions {
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Parses the connection string into driver options
    pub async fn client_options(&self) -> ::mongodb::error::Result<ClientOptions> {
        let mut options = ClientOptions::parse(self.uri.as_str()).await?;
        if options.app_name.is_none() {
            options.app_name = self.app_name.clone();
        }
        Ok(options)
    }
}

/// A container which provides a MongoDB client
pub trait MongoDbAwareContainer: Container {
    fn set_mongodb(&self, client: Client) -> Result<(), SlotError>;
    fn mongodb(&self) -> Result<Client, SlotError>;
}

/// Returns a pre-configured MongoDB client provider
///
/// The client connects lazily on first use and is shut down with the container.
pub fn mongodb<C: MongoDbAwareContainer>(cnt: Arc<C>, options: MongoDbOptions) -> Provider {
    Provider::new(move || async move {
        let client_options = options
            .client_options()
            .await
            .map_err(ProviderError::MongoDb)?;
        let client = Client::with_options(client_options).map_err(ProviderError::MongoDb)?;

        cnt.set_mongodb(client.clone())?;
        cnt.register_on_shutdown(move || async move {
            client.shutdown().await;
            tracing::debug!("MongoDB client shut down");
        });
        Ok::<_, ProviderError>(())
    })
}
