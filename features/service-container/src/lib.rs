//! Service container lifecycle
//!
//! A container is populated by an ordered list of [Provider]s and torn down in reverse order.
//!
//! 1. [ShutdownHandler] - ordered registry of shutdown callbacks, run last-in first-out
//! 2. [wire] - runs providers one after another, unwinding the container on the first failure
//! 3. [Container] - the contract concrete containers implement, holding services in [Slot]s
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use service_container::{wire, Container, Provider, ShutdownHandler, Slot, SlotError};
//!
//! struct App {
//!     handler: ShutdownHandler,
//!     name: Slot<String>,
//! }
//! impl Container for App {
//!     fn shutdown_handler(&self) -> &ShutdownHandler {
//!         &self.handler
//!     }
//! }
//!
//! let app = Arc::new(App {
//!     handler: ShutdownHandler::new(),
//!     name: Slot::new("name"),
//! });
//!
//! let cnt = app.clone();
//! let name = Provider::new(move || async move {
//!     cnt.name.set("my-application".to_string())?;
//!     cnt.register_on_shutdown(|| async { println!("bye") });
//!     Ok::<_, SlotError>(())
//! });
//!
//! futures::executor::block_on(async {
//!     wire(&*app, [name]).await.unwrap();
//!     assert_eq!(app.name.get().unwrap(), "my-application");
//!     app.shutdown().await;
//! });
//! ```

pub mod container;
pub mod errors;
pub mod provider;
pub mod shutdown;
pub mod types;

pub use container::Container;
pub use errors::{InvariantViolation, SlotError};
pub use provider::{wire, Provider};
pub use shutdown::ShutdownHandler;
pub use types::{DynError, OnShutdown, Slot};
