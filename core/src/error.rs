//! Error taxonomy for seat allocation.
//!
//! The engine never swallows or logs-and-continues on an error: every failure
//! reaches the caller, who owns the lock, the reservation write and any retry.

use crate::request::SeatAssignment;
use crate::seat::SeatCodecError;
use thiserror::Error;

/// Convenience alias used across the engine.
pub type Result<T> = std::result::Result<T, AllocationError>;

/// Errors raised by an [`InventoryProvider`](crate::environment::InventoryProvider).
///
/// The engine forwards these unchanged and never retries them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The inventory backend could not be reached.
    #[error("Inventory backend unavailable: {0}")]
    Unavailable(String),

    /// The train is not known to the inventory.
    #[error("Unknown train: {0}")]
    UnknownTrain(String),

    /// The carriage is not part of the train.
    #[error("Unknown carriage {carriage} on train {train_id}")]
    UnknownCarriage {
        /// Train that was queried
        train_id: String,
        /// Carriage that was not found
        carriage: String,
    },

    /// Any other backend failure (query error, inconsistent result).
    #[error("Inventory backend error: {0}")]
    Backend(String),
}

/// Errors returned by an allocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// The request is malformed: no passengers, a bad chosen seat, an empty
    /// segment field.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The segment does not have enough free seats for the party.
    #[error("Insufficient inventory: requested {requested}, available {available}")]
    InsufficientInventory {
        /// Passengers in the request
        requested: usize,
        /// Free seats reported across all usable carriages
        available: usize,
    },

    /// The inventory provider failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Every fallback tier ran and still left passengers without a seat.
    ///
    /// Only possible when the provider's remaining counts disagree with its
    /// free-seat lists. `partial` holds the seats that were found so the
    /// caller can release them before retrying on a fresh snapshot.
    #[error("Partial allocation: seated {} of {requested} passengers", .partial.len())]
    PartialAllocation {
        /// Passengers in the request
        requested: usize,
        /// Seats that were assigned before the ladder ran out
        partial: Vec<SeatAssignment>,
    },

    /// No purchase handler is registered for the class key.
    #[error("No seat allocation handler registered for '{0}'")]
    UnknownSeatClass(String),

    /// The named-lock service failed.
    #[error("Lock error: {0}")]
    Lock(String),
}

impl AllocationError {
    /// Whether retrying under a fresh inventory snapshot may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::PartialAllocation { .. } | Self::Lock(_))
    }
}

impl From<SeatCodecError> for AllocationError {
    fn from(error: SeatCodecError) -> Self {
        Self::InvalidRequest(error.to_string())
    }
}
