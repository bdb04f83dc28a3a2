use std::{
    collections::HashMap,
    fmt::Debug,
    sync::{Arc, Mutex, PoisonError},
};

use object_store::{gcp::GoogleCloudStorageBuilder, memory::InMemory, ObjectStore};
use service_container::{Provider, SlotError};

use crate::errors::ProviderError;

/// Object storage client, handing out per-bucket [ObjectStore] handles
#[derive(Clone)]
pub struct CloudStorage(Backend);

#[derive(Clone)]
enum Backend {
    /// Google Cloud Storage, every bucket is built from the same settings
    Gcs(GoogleCloudStorageBuilder),
    /// Buckets living in process memory, created on first access
    Memory(Arc<Mutex<HashMap<String, Arc<InMemory>>>>),
}
impl Debug for CloudStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let backend = match &self.0 {
            Backend::Gcs(_) => "gcs",
            Backend::Memory(_) => "memory",
        };
        f.debug_tuple("CloudStorage").field(&backend).finish()
    }
}

impl CloudStorage {
    pub fn gcs(builder: GoogleCloudStorageBuilder) -> Self {
        CloudStorage(Backend::Gcs(builder))
    }

    /// Google Cloud Storage configured from the `GOOGLE_*` environment variables
    pub fn gcs_from_env() -> Self {
        Self::gcs(GoogleCloudStorageBuilder::from_env())
    }

    pub fn in_memory() -> Self {
        CloudStorage(Backend::Memory(Default::default()))
    }

    /// Returns a handle to the bucket with the given name
    pub fn bucket(&self, name: &str) -> Result<Arc<dyn ObjectStore>, object_store::Error> {
        match &self.0 {
            Backend::Gcs(builder) => {
                let store = builder.clone().with_bucket_name(name).build()?;
                Ok(Arc::new(store))
            }
            Backend::Memory(buckets) => {
                let mut buckets = buckets.lock().unwrap_or_else(PoisonError::into_inner);
                let store: Arc<dyn ObjectStore> = buckets
                    .entry(name.to_string())
                    .or_insert_with(|| Arc::new(InMemory::new()))
                    .clone();
                Ok(store)
            }
        }
    }
}

/// A container which provides an object storage client
pub trait CloudStorageAwareContainer: Send + Sync + 'static {
    fn set_cloud_storage(&self, storage: CloudStorage) -> Result<(), SlotError>;
    fn cloud_storage(&self) -> Result<CloudStorage, SlotError>;
}

/// Returns a cloud storage provider
///
/// The client holds no connections, nothing is registered for shutdown.
pub fn cloud_storage<C: CloudStorageAwareContainer>(
    cnt: Arc<C>,
    storage: CloudStorage,
) -> Provider {
    Provider::new(move || async move {
        tracing::debug!("Using {storage:?}");
        cnt.set_cloud_storage(storage)?;
        Ok::<_, ProviderError>(())
    })
}
