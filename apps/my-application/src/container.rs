use std::sync::Arc;

use mongodb::Client;
use object_store::ObjectStore;
use service_container::{wire, Container, DynError, ShutdownHandler, Slot, SlotError};
use service_providers::{
    custom_service, database, logger, storage, CloudStorage, CloudStorageAwareContainer,
    CustomService, CustomServiceAwareContainer, Logger, LoggerAwareContainer,
    MongoDbAwareContainer, ProviderError,
};

use crate::{
    config::AppConfig,
    service::{my_service, MyService},
};

/// The application's service container
#[derive(Debug)]
pub struct AppContainer {
    handler: ShutdownHandler,
    cfg: Arc<AppConfig>,
    logger: Slot<Logger>,
    mongodb: Slot<Client>,
    storage: Slot<CloudStorage>,
    custom_service: Slot<Arc<CustomService>>,
    my_service: Slot<Arc<MyService>>,
}

impl AppContainer {
    /// Builds all application services, using Google Cloud Storage for buckets
    pub async fn new(cfg: AppConfig) -> Result<Arc<Self>, DynError> {
        Self::with_storage(cfg, CloudStorage::gcs_from_env()).await
    }

    /// Builds all application services on top of the given object storage
    ///
    /// On failure everything built so far has already been shut down.
    pub async fn with_storage(
        cfg: AppConfig,
        backend: CloudStorage,
    ) -> Result<Arc<Self>, DynError> {
        let cfg = Arc::new(cfg);
        let cnt = Arc::new(Self::empty(cfg.clone()));

        let providers = [
            logger::logger(cnt.clone(), cfg.logger_options()),
            storage::cloud_storage(cnt.clone(), backend),
            database::mongodb(cnt.clone(), cfg.mongodb.clone()),
            custom_service::custom_service(cnt.clone(), cfg.bucket.clone()),
            my_service(cnt.clone(), cfg.clone()),
        ];
        wire(&*cnt, providers).await?;

        Ok(cnt)
    }

    fn empty(cfg: Arc<AppConfig>) -> Self {
        Self {
            handler: ShutdownHandler::new(),
            cfg,
            logger: Slot::new("logger"),
            mongodb: Slot::new("mongodb"),
            storage: Slot::new("cloud storage"),
            custom_service: Slot::new("custom service"),
            my_service: Slot::new("my service"),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.cfg
    }

    /// Returns a handle to the named bucket
    pub fn bucket(&self, name: &str) -> Result<Arc<dyn ObjectStore>, ProviderError> {
        self.cloud_storage()?
            .bucket(name)
            .map_err(ProviderError::CloudStorage)
    }

    pub fn set_my_service(&self, service: Arc<MyService>) -> Result<(), SlotError> {
        self.my_service.set(service)
    }

    pub fn my_service(&self) -> Result<Arc<MyService>, SlotError> {
        self.my_service.require().cloned()
    }
}

impl Container for AppContainer {
    fn shutdown_handler(&self) -> &ShutdownHandler {
        &self.handler
    }
}
impl LoggerAwareContainer for AppContainer {
    fn set_logger(&self, logger: Logger) -> Result<(), SlotError> {
        self.logger.set(logger)
    }

    fn logger(&self) -> Result<Logger, SlotError> {
        self.logger.require().cloned()
    }
}
impl MongoDbAwareContainer for AppContainer {
    fn set_mongodb(&self, client: Client) -> Result<(), SlotError> {
        self.mongodb.set(client)
    }

    fn mongodb(&self) -> Result<Client, SlotError> {
        self.mongodb.require().cloned()
    }
}
impl CloudStorageAwareContainer for AppContainer {
    fn set_cloud_storage(&self, storage: CloudStorage) -> Result<(), SlotError> {
        self.storage.set(storage)
    }

    fn cloud_storage(&self) -> Result<CloudStorage, SlotError> {
        self.storage.require().cloned()
    }
}
impl CustomServiceAwareContainer for AppContainer {
    fn set_custom_service(&self, service: Arc<CustomService>) -> Result<(), SlotError> {
        self.custom_service.set(service)
    }

    fn custom_service(&self) -> Result<Arc<CustomService>, SlotError> {
        self.custom_service.require().cloned()
    }
}
