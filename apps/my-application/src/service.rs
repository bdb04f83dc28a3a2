use std::{fmt::Debug, sync::Arc};

use mongodb::Client;
use object_store::ObjectStore;
use service_container::Provider;
use service_providers::{Logger, LoggerAwareContainer, MongoDbAwareContainer, ProviderError};

use crate::{config::AppConfig, container::AppContainer};

/// Application specific internal services
pub struct MyService {
    mongodb: Client,
    logger: Logger,
    bucket: Arc<dyn ObjectStore>,
}
impl Debug for MyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MyService")
            .field("bucket", &self.bucket.to_string())
            .finish_non_exhaustive()
    }
}

impl MyService {
    pub fn mongodb(&self) -> &Client {
        &self.mongodb
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn bucket(&self) -> &Arc<dyn ObjectStore> {
        &self.bucket
    }
}

/// Returns a pre-configured [MyService] provider
pub fn my_service(cnt: Arc<AppContainer>, cfg: Arc<AppConfig>) -> Provider {
    Provider::new(move || async move {
        if cfg.bucket.is_empty() {
            return Err(ProviderError::BucketRequired);
        }

        cnt.set_my_service(Arc::new(MyService {
            mongodb: cnt.mongodb()?,
            logger: cnt.logger()?,
            bucket: cnt.bucket(&cfg.bucket)?,
        }))?;
        Ok(())
    })
}
