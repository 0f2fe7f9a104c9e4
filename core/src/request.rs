//! Allocation request and response types.
//!
//! Passenger order is significant everywhere: the `k`-th passenger of the
//! request receives the `k`-th assignment of the response.

use crate::seat::SeatClass;
use serde::{Deserialize, Serialize};

/// Default prefix of the distributed-lock name guarding one segment.
pub const DEFAULT_LOCK_PREFIX: &str = "seat-allocation";

// ============================================================================
// Request
// ============================================================================

/// A passenger taking part in a purchase.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PassengerDetail {
    /// Opaque passenger identifier
    pub passenger_id: String,
    /// Seat class the passenger is booked into
    pub seat_type: SeatClass,
}

impl PassengerDetail {
    /// Creates a passenger record.
    #[must_use]
    pub fn new(passenger_id: impl Into<String>, seat_type: SeatClass) -> Self {
        Self {
            passenger_id: passenger_id.into(),
            seat_type,
        }
    }
}

/// A `(departure, arrival)` pair on one train. Inventory is scoped to it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TravelSegment {
    /// Train identifier
    pub train_id: String,
    /// Departure station code
    pub departure: String,
    /// Arrival station code
    pub arrival: String,
}

impl TravelSegment {
    /// Creates a travel segment.
    #[must_use]
    pub fn new(
        train_id: impl Into<String>,
        departure: impl Into<String>,
        arrival: impl Into<String>,
    ) -> Self {
        Self {
            train_id: train_id.into(),
            departure: departure.into(),
            arrival: arrival.into(),
        }
    }
}

/// Input of one allocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Train and stations
    pub segment: TravelSegment,
    /// Requested seat class
    pub seat_class: SeatClass,
    /// Passengers, in the order assignments are returned
    pub passengers: Vec<PassengerDetail>,
    /// Wire-form seats the user would like; a preference, not a requirement
    #[serde(default)]
    pub chosen_seats: Vec<String>,
}

impl AllocationRequest {
    /// Creates a request without seat preferences.
    #[must_use]
    pub const fn new(
        segment: TravelSegment,
        seat_class: SeatClass,
        passengers: Vec<PassengerDetail>,
    ) -> Self {
        Self {
            segment,
            seat_class,
            passengers,
            chosen_seats: Vec::new(),
        }
    }

    /// Attach preferred seats in wire form.
    #[must_use]
    pub fn with_chosen_seats<I, S>(mut self, seats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chosen_seats = seats.into_iter().map(Into::into).collect();
        self
    }

    /// Number of passengers.
    #[must_use]
    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }

    /// Whether the user picked seats.
    #[must_use]
    pub fn has_chosen_seats(&self) -> bool {
        !self.chosen_seats.is_empty()
    }

    /// Distributed-lock name for this request's train, class and segment,
    /// using [`DEFAULT_LOCK_PREFIX`].
    #[must_use]
    pub fn lock_name(&self) -> String {
        self.lock_name_with_prefix(DEFAULT_LOCK_PREFIX)
    }

    /// Distributed-lock name with a custom prefix.
    #[must_use]
    pub fn lock_name_with_prefix(&self, prefix: &str) -> String {
        format!(
            "{prefix}:{}:{}:{}:{}",
            self.segment.train_id,
            self.seat_class.mark(),
            self.segment.departure,
            self.segment.arrival
        )
    }
}

// ============================================================================
// Response
// ============================================================================

/// One passenger's seat.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatAssignment {
    /// Passenger the seat belongs to
    pub passenger_id: String,
    /// Seat class of the passenger
    pub seat_type: SeatClass,
    /// Carriage holding the seat
    pub carriage_number: String,
    /// Wire-form seat number
    pub seat_number: String,
}

/// Ordered result of a successful allocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResponse {
    assignments: Vec<SeatAssignment>,
}

impl AllocationResponse {
    /// Wraps assignments that are already in passenger order.
    #[must_use]
    pub const fn new(assignments: Vec<SeatAssignment>) -> Self {
        Self { assignments }
    }

    /// Number of seated passengers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether nobody was seated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Assignments in passenger order.
    #[must_use]
    pub fn assignments(&self) -> &[SeatAssignment] {
        &self.assignments
    }

    /// Iterate over the assignments.
    pub fn iter(&self) -> std::slice::Iter<'_, SeatAssignment> {
        self.assignments.iter()
    }

    /// `(carriage, seat)` pairs in passenger order.
    #[must_use]
    pub fn seats(&self) -> Vec<(&str, &str)> {
        self.assignments
            .iter()
            .map(|a| (a.carriage_number.as_str(), a.seat_number.as_str()))
            .collect()
    }

    /// Distinct carriages in order of first appearance.
    #[must_use]
    pub fn carriages(&self) -> Vec<&str> {
        let mut carriages: Vec<&str> = Vec::new();
        for assignment in &self.assignments {
            if !carriages.contains(&assignment.carriage_number.as_str()) {
                carriages.push(&assignment.carriage_number);
            }
        }
        carriages
    }

    /// Consume the response, returning the assignments.
    #[must_use]
    pub fn into_assignments(self) -> Vec<SeatAssignment> {
        self.assignments
    }
}

impl<'a> IntoIterator for &'a AllocationResponse {
    type Item = &'a SeatAssignment;
    type IntoIter = std::slice::Iter<'a, SeatAssignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.iter()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn request() -> AllocationRequest {
        AllocationRequest::new(
            TravelSegment::new("G1234", "BJP", "SHH"),
            SeatClass::Business,
            vec![
                PassengerDetail::new("p1", SeatClass::Business),
                PassengerDetail::new("p2", SeatClass::Business),
            ],
        )
    }

    #[test]
    fn lock_name_is_keyed_by_train_class_and_segment() {
        assert_eq!(
            request().lock_name(),
            "seat-allocation:G1234:HIGH_SPEED_TRAIN_BUSINESS:BJP:SHH"
        );
        assert_eq!(
            request().lock_name_with_prefix("lock"),
            "lock:G1234:HIGH_SPEED_TRAIN_BUSINESS:BJP:SHH"
        );
    }

    #[test]
    fn chosen_seats_default_to_empty_when_deserializing() {
        let json = r#"{
            "segment": {"train_id": "G1", "departure": "A", "arrival": "B"},
            "seat_class": "Business",
            "passengers": [{"passenger_id": "p1", "seat_type": "Business"}]
        }"#;
        let request: AllocationRequest = serde_json::from_str(json).unwrap();
        assert!(!request.has_chosen_seats());
        assert_eq!(request.passenger_count(), 1);
    }

    #[test]
    fn carriages_are_listed_in_first_appearance_order() {
        let seat = |carriage: &str, seat: &str| SeatAssignment {
            passenger_id: "p".into(),
            seat_type: SeatClass::Business,
            carriage_number: carriage.into(),
            seat_number: seat.into(),
        };
        let response = AllocationResponse::new(vec![
            seat("03", "01A"),
            seat("01", "01A"),
            seat("03", "01C"),
        ]);
        assert_eq!(response.carriages(), vec!["03", "01"]);
        assert_eq!(response.seats()[2], ("03", "01C"));
    }
}
