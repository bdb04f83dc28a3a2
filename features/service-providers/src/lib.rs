//! Service providers for common external services
//!
//! Every provider factory is written against a narrow container trait naming only the services
//! it reads or sets, so any container implementing those traits can be wired with it:
//!
//! 1. [logger] - application [Logger], flushed on shutdown
//! 2. [database] - MongoDB client, shut down with the container
//! 3. [storage] - object storage client handing out bucket handles
//! 4. [custom_service] - a service composed of the three above

pub mod custom_service;
pub mod database;
pub mod errors;
pub mod logger;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use custom_service::{CustomService, CustomServiceAwareContainer};
pub use database::{MongoDbAwareContainer, MongoDbOptions};
pub use errors::{ParseLogFormatError, ProviderError};
pub use logger::{LogFormat, Logger, LoggerAwareContainer, LoggerOptions};
pub use storage::{CloudStorage, CloudStorageAwareContainer};
