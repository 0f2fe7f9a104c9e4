//! # Railseat Testing
//!
//! Testing utilities and helpers for the Railseat seat-allocation engine.
//!
//! This crate provides:
//! - Mock implementations of environment traits
//! - Request and passenger builders
//! - Property-based testing strategies
//!
//! ## Example
//!
//! ```ignore
//! use railseat_testing::{InMemoryInventory, helpers};
//! use railseat_engine::Allocator;
//!
//! #[test]
//! fn seats_a_couple_together() {
//!     let inventory = InMemoryInventory::builder().full_carriage("01").build();
//!     let request = helpers::request(SeatClass::Business, 2);
//!
//!     let response = Allocator::for_class(SeatClass::Business)
//!         .allocate(&inventory, &request)
//!         .unwrap();
//!
//!     assert_eq!(response.seats(), vec![("01", "01A"), ("01", "01C")]);
//! }
//! ```

pub mod inventory_mocks;

use railseat_core::environment::{LockFuture, NamedLock};

/// Mock implementations of environment traits.
pub mod mocks {
    use super::{LockFuture, NamedLock};
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    pub use crate::inventory_mocks::{InMemoryInventory, InventoryBuilder, TEST_TRAIN};

    /// In-process named lock.
    ///
    /// Waiters for a held name park until it is released, mirroring a
    /// distributed lock. Counters let tests assert that every acquisition is
    /// paired with a release.
    ///
    /// # Example
    ///
    /// ```
    /// use railseat_testing::mocks::InMemoryLock;
    /// use railseat_core::environment::NamedLock;
    ///
    /// # tokio_test::block_on(async {
    /// let lock = InMemoryLock::new();
    /// lock.lock("seat").await.unwrap();
    /// assert!(lock.is_held("seat"));
    /// lock.unlock("seat").await.unwrap();
    /// assert!(!lock.is_held("seat"));
    /// # });
    /// ```
    #[derive(Clone, Debug, Default)]
    pub struct InMemoryLock {
        held: Arc<Mutex<HashSet<String>>>,
        released: Arc<Notify>,
        acquisitions: Arc<AtomicUsize>,
        releases: Arc<AtomicUsize>,
        refuse: bool,
    }

    impl InMemoryLock {
        /// Create a lock service with nothing held.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// A lock service whose `lock` always fails.
        #[must_use]
        pub fn refusing() -> Self {
            Self {
                refuse: true,
                ..Self::default()
            }
        }

        /// Whether `name` is currently held.
        ///
        /// # Panics
        ///
        /// Panics if the internal mutex is poisoned.
        #[must_use]
        #[allow(clippy::unwrap_used)]
        pub fn is_held(&self, name: &str) -> bool {
            self.held.lock().unwrap().contains(name)
        }

        /// Successful acquisitions so far.
        #[must_use]
        pub fn acquisitions(&self) -> usize {
            self.acquisitions.load(Ordering::SeqCst)
        }

        /// Releases so far.
        #[must_use]
        pub fn releases(&self) -> usize {
            self.releases.load(Ordering::SeqCst)
        }
    }

    impl NamedLock for InMemoryLock {
        #[allow(clippy::unwrap_used)]
        fn lock<'a>(&'a self, name: &'a str) -> LockFuture<'a> {
            Box::pin(async move {
                if self.refuse {
                    return Err(format!("lock service refused '{name}'"));
                }
                loop {
                    let released = self.released.notified();
                    let acquired = self.held.lock().unwrap().insert(name.to_string());
                    if acquired {
                        self.acquisitions.fetch_add(1, Ordering::SeqCst);
                        return Ok(());
                    }
                    released.await;
                }
            })
        }

        #[allow(clippy::unwrap_used)]
        fn unlock<'a>(&'a self, name: &'a str) -> LockFuture<'a> {
            Box::pin(async move {
                let was_held = self.held.lock().unwrap().remove(name);
                if !was_held {
                    return Err(format!("lock '{name}' is not held"));
                }
                self.releases.fetch_add(1, Ordering::SeqCst);
                self.released.notify_waiters();
                Ok(())
            })
        }
    }
}

/// Request and passenger builders.
pub mod helpers {
    use crate::inventory_mocks::TEST_TRAIN;
    use railseat_core::{AllocationRequest, PassengerDetail, SeatClass, TravelSegment};

    /// Departure station used by [`request`].
    pub const TEST_DEPARTURE: &str = "BJP";
    /// Arrival station used by [`request`].
    pub const TEST_ARRIVAL: &str = "SHH";

    /// `count` passengers named `p1..=pcount`.
    #[must_use]
    pub fn passengers(count: usize, seat_class: SeatClass) -> Vec<PassengerDetail> {
        (1..=count)
            .map(|n| PassengerDetail::new(format!("p{n}"), seat_class))
            .collect()
    }

    /// A request for `count` passengers on the test train and segment.
    #[must_use]
    pub fn request(seat_class: SeatClass, count: usize) -> AllocationRequest {
        AllocationRequest::new(
            TravelSegment::new(TEST_TRAIN, TEST_DEPARTURE, TEST_ARRIVAL),
            seat_class,
            passengers(count, seat_class),
        )
    }

    /// Install a test-friendly tracing subscriber once per process.
    ///
    /// Honors `RUST_LOG`; later calls are no-ops.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing strategies using proptest.
pub mod properties {
    use proptest::prelude::*;
    use proptest::sample::subsequence;
    use railseat_core::SeatLayout;
    use std::collections::HashSet;

    /// Any subset of a carriage's seats, as the free-seat set of that carriage.
    pub fn free_seats(layout: SeatLayout) -> impl Strategy<Value = HashSet<String>> {
        let seats = layout.all_seats();
        let capacity = seats.len();
        subsequence(seats, 0..=capacity).prop_map(|seats| seats.into_iter().collect())
    }

    /// Between 1 and `max_carriages` carriages, each with a random free set.
    pub fn train(
        layout: SeatLayout,
        max_carriages: usize,
    ) -> impl Strategy<Value = Vec<HashSet<String>>> {
        prop::collection::vec(free_seats(layout), 1..=max_carriages.max(1))
    }

    /// A party size between 1 and `max`.
    pub fn party_size(max: usize) -> impl Strategy<Value = usize> {
        1..=max.max(1)
    }
}

// Re-export commonly used items
pub use mocks::{InMemoryInventory, InMemoryLock, InventoryBuilder, TEST_TRAIN};

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use railseat_core::SeatClass;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn passengers_are_numbered_from_one() {
        let passengers = helpers::passengers(3, SeatClass::Business);
        let ids: Vec<_> = passengers.iter().map(|p| p.passenger_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[tokio::test]
    async fn second_holder_waits_for_release() {
        let lock = Arc::new(InMemoryLock::new());
        lock.lock("segment").await.unwrap();

        let contender = {
            let lock = Arc::clone(&lock);
            tokio::spawn(async move { lock.lock("segment").await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        lock.unlock("segment").await.unwrap();
        contender.await.unwrap().unwrap();
        assert_eq!(lock.acquisitions(), 2);
        assert!(lock.is_held("segment"));
    }

    #[tokio::test]
    async fn unlocking_a_free_name_fails() {
        let lock = InMemoryLock::new();
        assert!(lock.unlock("nothing").await.is_err());
        assert!(InMemoryLock::refusing().lock("x").await.is_err());
    }
}
