use std::{
    io::{self, Write},
    sync::{Arc, Mutex},
};

use mongodb::Client;
use service_container::{Container, ShutdownHandler, Slot, SlotError};

use crate::{
    custom_service::{CustomService, CustomServiceAwareContainer},
    database::MongoDbAwareContainer,
    logger::{Logger, LoggerAwareContainer},
    storage::{CloudStorage, CloudStorageAwareContainer},
};

/// Log output which can be inspected after the logger was flushed
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);
impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub(crate) struct TestContainer {
    handler: ShutdownHandler,
    logger: Slot<Logger>,
    mongodb: Slot<Client>,
    storage: Slot<CloudStorage>,
    custom: Slot<Arc<CustomService>>,
}
impl TestContainer {
    pub(crate) fn new() -> Self {
        Self {
            handler: ShutdownHandler::new(),
            logger: Slot::new("logger"),
            mongodb: Slot::new("mongodb"),
            storage: Slot::new("cloud storage"),
            custom: Slot::new("custom service"),
        }
    }
}

impl Container for TestContainer {
    fn shutdown_handler(&self) -> &ShutdownHandler {
        &self.handler
    }
}
impl LoggerAwareContainer for TestContainer {
    fn set_logger(&self, logger: Logger) -> Result<(), SlotError> {
        self.logger.set(logger)
    }

    fn logger(&self) -> Result<Logger, SlotError> {
        self.logger.require().cloned()
    }
}
impl MongoDbAwareContainer for TestContainer {
    fn set_mongodb(&self, client: Client) -> Result<(), SlotError> {
        self.mongodb.set(client)
    }

    fn mongodb(&self) -> Result<Client, SlotError> {
        self.mongodb.require().cloned()
    }
}
impl CloudStorageAwareContainer for TestContainer {
    fn set_cloud_storage(&self, storage: CloudStorage) -> Result<(), SlotError> {
        self.storage.set(storage)
    }

    fn cloud_storage(&self) -> Result<CloudStorage, SlotError> {
        self.storage.require().cloned()
    }
}
impl CustomServiceAwareContainer for TestContainer {
    fn set_custom_service(&self, service: Arc<CustomService>) -> Result<(), SlotError> {
        self.custom.set(service)
    }

    fn custom_service(&self) -> Result<Arc<CustomService>, SlotError> {
        self.custom.require().cloned()
    }
}
