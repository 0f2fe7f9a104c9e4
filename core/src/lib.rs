//! # Railseat Core
//!
//! Domain types, errors and injected collaborators for the Railseat
//! seat-allocation engine.
//!
//! This crate holds no allocation logic. It defines the vocabulary shared by
//! the engine, the inventory backends that feed it, and the ticket service
//! that calls it.
//!
//! ## Core Concepts
//!
//! - **Seat class**: business, first or second class, each with its own
//!   carriage grid ([`seat::SeatLayout`])
//! - **Wire-form seat**: `"0" + row + column letter`, e.g. `"01A"`
//! - **Allocation request**: train segment, seat class, ordered passengers,
//!   optional preferred seats
//! - **Allocation response**: one `(passenger, carriage, seat)` per passenger,
//!   in passenger order
//! - **Environment**: the inventory provider and the named-lock service,
//!   injected via traits
//!
//! ## Architecture Principles
//!
//! - Functional core: allocation is a pure function of the request and one
//!   inventory snapshot
//! - Explicit errors: every failure is a typed [`AllocationError`]
//! - Dependency injection via environment traits
//!
//! ## Example
//!
//! ```
//! use railseat_core::{AllocationRequest, PassengerDetail, SeatClass, TravelSegment};
//!
//! let request = AllocationRequest::new(
//!     TravelSegment::new("G1234", "BJP", "SHH"),
//!     SeatClass::Business,
//!     vec![PassengerDetail::new("p-1", SeatClass::Business)],
//! )
//! .with_chosen_seats(["02F"]);
//!
//! assert_eq!(request.passenger_count(), 1);
//! ```

pub mod error;
pub mod request;
pub mod seat;

// Re-export commonly used types
pub use error::{AllocationError, ProviderError, Result};
pub use request::{
    AllocationRequest, AllocationResponse, PassengerDetail, SeatAssignment, TravelSegment,
};
pub use seat::{Coordinate, SeatClass, SeatCodecError, SeatLayout};

/// Environment module - Dependency injection traits
///
/// All external collaborators of the engine are abstracted behind traits and
/// injected by the caller:
///
/// - [`InventoryProvider`](environment::InventoryProvider): free-seat queries
///   over a travel segment
/// - [`NamedLock`](environment::NamedLock): cross-process mutual exclusion,
///   held by the caller around an allocation
pub mod environment {
    use crate::error::ProviderError;
    use crate::seat::SeatClass;
    use std::collections::HashSet;
    use std::future::Future;
    use std::pin::Pin;

    /// Free-seat queries over one travel segment.
    ///
    /// Implementations must answer from a single point-in-time snapshot for
    /// the duration of one allocation. Callers usually get this by holding a
    /// [`NamedLock`] keyed by train, class and segment around the call.
    ///
    /// The trait is synchronous: the engine has no suspension points, and a
    /// backend that needs I/O should load its snapshot before the engine runs.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - answers from a relational seat table
    /// struct SqlInventory { snapshot: SeatSnapshot }
    ///
    /// // Test - fixed in-memory carriages
    /// let inventory = InMemoryInventory::builder()
    ///     .carriage("01", ["01A", "01C"])
    ///     .build();
    /// ```
    pub trait InventoryProvider: Send + Sync {
        /// Carriages usable for this class and segment, in traversal order.
        ///
        /// # Errors
        ///
        /// Returns [`ProviderError`] if the backend fails.
        fn list_usable_carriages(
            &self,
            train_id: &str,
            seat_class: SeatClass,
            departure: &str,
            arrival: &str,
        ) -> Result<Vec<String>, ProviderError>;

        /// Free-seat count per carriage, aligned 1:1 with `carriages`.
        ///
        /// # Errors
        ///
        /// Returns [`ProviderError`] if the backend fails.
        fn list_remaining_count(
            &self,
            train_id: &str,
            departure: &str,
            arrival: &str,
            carriages: &[String],
        ) -> Result<Vec<usize>, ProviderError>;

        /// Wire-form seats currently free in one carriage on this segment.
        ///
        /// # Errors
        ///
        /// Returns [`ProviderError`] if the backend fails.
        fn list_available_seats(
            &self,
            train_id: &str,
            carriage: &str,
            seat_class: SeatClass,
            departure: &str,
            arrival: &str,
        ) -> Result<HashSet<String>, ProviderError>;
    }

    /// Boxed future returned by [`NamedLock`] operations.
    pub type LockFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

    /// Mutual exclusion by name across processes.
    ///
    /// Returns boxed futures instead of `async fn` to stay dyn-compatible.
    pub trait NamedLock: Send + Sync {
        /// Block until the lock called `name` is held by this caller.
        fn lock<'a>(&'a self, name: &'a str) -> LockFuture<'a>;

        /// Release the lock called `name`.
        fn unlock<'a>(&'a self, name: &'a str) -> LockFuture<'a>;
    }
}
