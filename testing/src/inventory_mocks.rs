//! In-memory inventory for fast, deterministic allocation tests.
//!
//! - [`InMemoryInventory`]: an [`InventoryProvider`] over fixed carriages
//! - [`InventoryBuilder`]: fluent construction of a train snapshot

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Test utilities document panics where critical

use railseat_core::environment::InventoryProvider;
use railseat_core::{ProviderError, SeatClass};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Train used when the builder is not given one.
pub const TEST_TRAIN: &str = "G1234";

#[derive(Clone, Debug)]
struct CarriageStock {
    number: String,
    seat_class: SeatClass,
    available: HashSet<String>,
}

/// In-memory inventory snapshot for one train.
///
/// Carriages are returned in insertion order. Remaining counts are derived
/// from the free-seat sets unless overridden, which lets a test simulate a
/// provider whose counts race its seat lists.
///
/// # Example
///
/// ```
/// use railseat_testing::InMemoryInventory;
/// use railseat_core::environment::InventoryProvider;
/// use railseat_core::SeatClass;
///
/// let inventory = InMemoryInventory::builder()
///     .carriage("01", ["01A", "01C"])
///     .full_carriage("02")
///     .build();
///
/// let carriages = inventory
///     .list_usable_carriages("G1234", SeatClass::Business, "BJP", "SHH")
///     .unwrap();
/// assert_eq!(carriages, vec!["01", "02"]);
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryInventory {
    train_id: String,
    carriages: Vec<CarriageStock>,
    remaining_override: Option<Vec<usize>>,
    failure: Option<ProviderError>,
    seat_queries: Arc<AtomicUsize>,
}

impl InMemoryInventory {
    /// Start building a snapshot for [`TEST_TRAIN`] in business class.
    #[must_use]
    pub fn builder() -> InventoryBuilder {
        InventoryBuilder::new()
    }

    /// Number of `list_available_seats` calls served so far.
    #[must_use]
    pub fn seat_queries(&self) -> usize {
        self.seat_queries.load(Ordering::SeqCst)
    }

    /// Free seats currently recorded for a carriage.
    #[must_use]
    pub fn available(&self, carriage: &str) -> Option<&HashSet<String>> {
        self.carriages
            .iter()
            .find(|stock| stock.number == carriage)
            .map(|stock| &stock.available)
    }

    /// Total free seats across every carriage of a class.
    #[must_use]
    pub fn total_free(&self, seat_class: SeatClass) -> usize {
        self.carriages
            .iter()
            .filter(|stock| stock.seat_class == seat_class)
            .map(|stock| stock.available.len())
            .sum()
    }

    fn check(&self, train_id: &str) -> Result<(), ProviderError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        if train_id != self.train_id {
            return Err(ProviderError::UnknownTrain(train_id.to_string()));
        }
        Ok(())
    }
}

impl InventoryProvider for InMemoryInventory {
    fn list_usable_carriages(
        &self,
        train_id: &str,
        seat_class: SeatClass,
        _departure: &str,
        _arrival: &str,
    ) -> Result<Vec<String>, ProviderError> {
        self.check(train_id)?;
        Ok(self
            .carriages
            .iter()
            .filter(|stock| stock.seat_class == seat_class)
            .map(|stock| stock.number.clone())
            .collect())
    }

    fn list_remaining_count(
        &self,
        train_id: &str,
        _departure: &str,
        _arrival: &str,
        carriages: &[String],
    ) -> Result<Vec<usize>, ProviderError> {
        self.check(train_id)?;
        if let Some(counts) = &self.remaining_override {
            return Ok(counts.clone());
        }
        carriages
            .iter()
            .map(|number| {
                self.available(number)
                    .map(HashSet::len)
                    .ok_or_else(|| ProviderError::UnknownCarriage {
                        train_id: train_id.to_string(),
                        carriage: number.clone(),
                    })
            })
            .collect()
    }

    fn list_available_seats(
        &self,
        train_id: &str,
        carriage: &str,
        seat_class: SeatClass,
        _departure: &str,
        _arrival: &str,
    ) -> Result<HashSet<String>, ProviderError> {
        self.check(train_id)?;
        self.seat_queries.fetch_add(1, Ordering::SeqCst);
        self.carriages
            .iter()
            .find(|stock| stock.number == carriage && stock.seat_class == seat_class)
            .map(|stock| stock.available.clone())
            .ok_or_else(|| ProviderError::UnknownCarriage {
                train_id: train_id.to_string(),
                carriage: carriage.to_string(),
            })
    }
}

/// Fluent builder for [`InMemoryInventory`].
#[derive(Debug)]
pub struct InventoryBuilder {
    train_id: String,
    seat_class: SeatClass,
    carriages: Vec<CarriageStock>,
    remaining_override: Option<Vec<usize>>,
    failure: Option<ProviderError>,
}

impl InventoryBuilder {
    fn new() -> Self {
        Self {
            train_id: TEST_TRAIN.to_string(),
            seat_class: SeatClass::Business,
            carriages: Vec::new(),
            remaining_override: None,
            failure: None,
        }
    }

    /// Train the snapshot answers for.
    #[must_use]
    pub fn train(mut self, train_id: impl Into<String>) -> Self {
        self.train_id = train_id.into();
        self
    }

    /// Seat class of the carriages added after this call.
    #[must_use]
    pub const fn seat_class(mut self, seat_class: SeatClass) -> Self {
        self.seat_class = seat_class;
        self
    }

    /// Add a carriage with exactly these free seats.
    #[must_use]
    pub fn carriage<I, S>(mut self, number: impl Into<String>, free: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.carriages.push(CarriageStock {
            number: number.into(),
            seat_class: self.seat_class,
            available: free.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Add a carriage with every seat free.
    #[must_use]
    pub fn full_carriage(self, number: impl Into<String>) -> Self {
        let seats = self.seat_class.layout().all_seats();
        self.carriage(number, seats)
    }

    /// Add a carriage with every seat free except `taken`.
    #[must_use]
    pub fn carriage_with_taken<I, S>(self, number: impl Into<String>, taken: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let taken: HashSet<String> = taken.into_iter().map(Into::into).collect();
        let free: Vec<String> = self
            .seat_class
            .layout()
            .all_seats()
            .into_iter()
            .filter(|seat| !taken.contains(seat))
            .collect();
        self.carriage(number, free)
    }

    /// Report these remaining counts instead of the real free-seat totals.
    #[must_use]
    pub fn remaining_counts(mut self, counts: Vec<usize>) -> Self {
        self.remaining_override = Some(counts);
        self
    }

    /// Fail every query with this error.
    #[must_use]
    pub fn failing_with(mut self, error: ProviderError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Finish the snapshot.
    #[must_use]
    pub fn build(self) -> InMemoryInventory {
        InMemoryInventory {
            train_id: self.train_id,
            carriages: self.carriages,
            remaining_override: self.remaining_override,
            failure: self.failure,
            seat_queries: Arc::new(AtomicUsize::new(0)),
        }
    }
}
