use thiserror::Error;

/// Errors when accessing a container slot
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// The slot was read before a provider filled it
    #[error("service '{0}' is not provided")]
    Empty(&'static str),
    /// A provider tried to fill an already filled slot
    #[error("service '{0}' is already provided")]
    Occupied(&'static str),
}

/// Wiring bugs which abort the process instead of being returned
///
/// Raised as panic payload through [std::panic::panic_any], so it is never handled by `?`.
/// Use [std::panic::catch_unwind] and downcast the payload to tell it apart from other panics.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The provider list contained an empty entry
    #[error("provider function cannot be missing (position {position})")]
    MissingProvider { position: usize },
}
