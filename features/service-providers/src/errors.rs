use service_container::SlotError;
use thiserror::Error;

/// Errors while constructing a service
#[derive(Error, Debug)]
pub enum ProviderError {
    /// A service needing a bucket was configured without one
    #[error("cloud storage bucket name is required")]
    BucketRequired,
    /// The MongoDB client could not be constructed
    #[error("mongodb service: {0}")]
    MongoDb(#[source] mongodb::error::Error),
    /// The object storage client or a bucket handle could not be constructed
    #[error("cloud storage service: {0}")]
    CloudStorage(#[source] object_store::Error),
    /// Reading a dependency or storing the service failed
    #[error(transparent)]
    Slot(#[from] SlotError),
}

/// The given log format is neither `text` nor `json`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("log format \"{0}\" is not supported")]
pub struct ParseLogFormatError(pub String);
