use std::{fmt::Debug, sync::Arc};

use mongodb::Client;
use object_store::ObjectStore;
use service_container::{Provider, SlotError};

use crate::{
    database::MongoDbAwareContainer,
    errors::ProviderError,
    logger::{Logger, LoggerAwareContainer},
    storage::CloudStorageAwareContainer,
};

/// An example of a service which depends on other services
pub struct CustomService {
    mongodb: Client,
    logger: Logger,
    bucket: Arc<dyn ObjectStore>,
}
impl Debug for CustomService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomService")
            .field("logger", &self.logger)
            .field("bucket", &self.bucket.to_string())
            .finish_non_exhaustive()
    }
}
impl CustomService {
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

/// A container which provides [CustomService]
pub trait CustomServiceAwareContainer:
    MongoDbAwareContainer + LoggerAwareContainer + CloudStorageAwareContainer
{
    fn set_custom_service(&self, service: Arc<CustomService>) -> Result<(), SlotError>;
    fn custom_service(&self) -> Result<Arc<CustomService>, SlotError>;
}

/// Returns a pre-configured [CustomService] provider
///
/// Must be wired after the logger, MongoDB and cloud storage providers.
pub fn custom_service<C: CustomServiceAwareContainer>(
    cnt: Arc<C>,
    bucket: impl Into<String>,
) -> Provider {
    let bucket = bucket.into();
    Provider::new(move || async move {
        if bucket.is_empty() {
            return Err(ProviderError::BucketRequired);
        }

        let bucket = cnt
            .cloud_storage()?
            .bucket(&bucket)
            .map_err(ProviderError::CloudStorage)?;

        cnt.set_custom_service(Arc::new(CustomService {
            mongodb: cnt.mongodb()?,
            logger: cnt.logger()?,
            bucket,
        }))?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use futures::executor::block_on;
    use service_container::{wire, Container};

    use super::*;
    use crate::{
        database::{mongodb, MongoDbOptions},
        logger::{logger, LoggerOptions},
        storage::{cloud_storage, CloudStorage},
        test_support::TestContainer,
    };

    fn quiet_logger(cnt: &Arc<TestContainer>) -> Provider {
        logger(cnt.clone(), LoggerOptions::new().with_output(io::sink()))
    }

    #[test]
    fn empty_bucket_unwinds_earlier_services() {
        let cnt = Arc::new(TestContainer::new());
        let torn_down = Arc::new(Mutex::new(false));

        let marker = {
            let cnt = cnt.clone();
            let torn_down = torn_down.clone();
            Provider::new(move || async move {
                cnt.register_on_shutdown(move || async move { *torn_down.lock().unwrap() = true });
                Ok::<_, ProviderError>(())
            })
        };
        let providers = [
            quiet_logger(&cnt),
            cloud_storage(cnt.clone(), CloudStorage::in_memory()),
            marker,
            custom_service(cnt.clone(), ""),
        ];

        let err = block_on(wire(&*cnt, providers)).unwrap_err();

        assert_eq!(err.to_string(), "cloud storage bucket name is required");
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::BucketRequired)
        ));
        assert!(*torn_down.lock().unwrap());
        assert!(cnt.logger().unwrap().is_synced());
        assert!(cnt.shutdown_handler().is_empty());
        assert!(cnt.custom_service().is_err());
    }

    #[test]
    fn missing_dependency_fails() {
        let cnt = Arc::new(TestContainer::new());
        let providers = [
            quiet_logger(&cnt),
            cloud_storage(cnt.clone(), CloudStorage::in_memory()),
            custom_service(cnt.clone(), "assets"),
        ];

        let err = block_on(wire(&*cnt, providers)).unwrap_err();

        assert_eq!(err.to_string(), "service 'mongodb' is not provided");
        assert!(cnt.logger().unwrap().is_synced());
    }

    #[tokio::test]
    async fn reads_services_provided_earlier() {
        let cnt = Arc::new(TestContainer::new());
        let storage = CloudStorage::in_memory();
        let providers = [
            quiet_logger(&cnt),
            cloud_storage(cnt.clone(), storage.clone()),
            mongodb(cnt.clone(), MongoDbOptions::default()),
            custom_service(cnt.clone(), "assets"),
        ];

        wire(&*cnt, providers).await.unwrap();

        let service = cnt.custom_service().unwrap();
        assert!(Arc::ptr_eq(service.bucket(), &storage.bucket("assets").unwrap()));
        assert!(!service.logger().is_synced());
        assert_eq!(cnt.shutdown_handler().len(), 2);

        cnt.shutdown().await;
        assert!(service.logger().is_synced());
    }
}
