use std::{fmt::Debug, sync::OnceLock};

use futures::future::BoxFuture;

use crate::errors::SlotError;

/// Boxed error returned by providers
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// A registered shutdown callback - called at most once
pub type OnShutdown = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

/// A named cell of a container holding one service
///
/// Slots are filled once while the container is wired and are only read afterwards.
pub struct Slot<T> {
    name: &'static str,
    cell: OnceLock<T>,
}
impl<T: Debug> Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state: &dyn Debug = match self.cell.get() {
            Some(value) => value,
            None => &"empty",
        };
        f.debug_tuple(self.name).field(state).finish()
    }
}

impl<T> Slot<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fills the slot
    ///
    /// Returns [SlotError::Occupied] if a value has already been set,
    /// the slot keeps the first value.
    pub fn set(&self, value: T) -> Result<(), SlotError> {
        self.cell
            .set(value)
            .map_err(|_| SlotError::Occupied(self.name))
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Attempts to get the stored value
    pub fn require(&self) -> Result<&T, SlotError> {
        self.cell.get().ok_or(SlotError::Empty(self.name))
    }

    pub fn is_set(&self) -> bool {
        self.cell.get().is_some()
    }
}
