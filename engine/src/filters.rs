//! Purchase request validation filters.

use crate::chain::{ChainContext, ChainHandler};
use railseat_core::{AllocationError, AllocationRequest, Result};

/// Mark of the purchase validation chain.
pub const PURCHASE_FILTER_MARK: &str = "PURCHASE_TICKET_FILTER";

/// Train and both stations are present, and the stations differ.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequiredParamsFilter;

impl ChainHandler<AllocationRequest> for RequiredParamsFilter {
    fn mark(&self) -> &'static str {
        PURCHASE_FILTER_MARK
    }

    fn order(&self) -> i32 {
        10
    }

    fn handle(&self, request: &AllocationRequest) -> Result<()> {
        let segment = &request.segment;
        let missing = [
            ("train id", &segment.train_id),
            ("departure", &segment.departure),
            ("arrival", &segment.arrival),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());
        if let Some((field, _)) = missing {
            return Err(AllocationError::InvalidRequest(format!("{field} is required")));
        }
        if segment.departure == segment.arrival {
            return Err(AllocationError::InvalidRequest(format!(
                "departure and arrival are both '{}'",
                segment.departure
            )));
        }
        Ok(())
    }
}

/// Party size is between one and the configured maximum.
#[derive(Clone, Copy, Debug)]
pub struct PassengerCountFilter {
    max_passengers: usize,
}

impl PassengerCountFilter {
    /// Accept parties of `1..=max_passengers`.
    #[must_use]
    pub const fn new(max_passengers: usize) -> Self {
        Self { max_passengers }
    }
}

impl ChainHandler<AllocationRequest> for PassengerCountFilter {
    fn mark(&self) -> &'static str {
        PURCHASE_FILTER_MARK
    }

    fn order(&self) -> i32 {
        20
    }

    fn handle(&self, request: &AllocationRequest) -> Result<()> {
        match request.passenger_count() {
            0 => Err(AllocationError::InvalidRequest(
                "passenger list is empty".to_string(),
            )),
            n if n > self.max_passengers => Err(AllocationError::InvalidRequest(format!(
                "{n} passengers exceed the limit of {}",
                self.max_passengers
            ))),
            _ => Ok(()),
        }
    }
}

/// Chosen seats exist in the requested class and do not outnumber the party.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChosenSeatFilter;

impl ChainHandler<AllocationRequest> for ChosenSeatFilter {
    fn mark(&self) -> &'static str {
        PURCHASE_FILTER_MARK
    }

    fn order(&self) -> i32 {
        30
    }

    fn handle(&self, request: &AllocationRequest) -> Result<()> {
        if request.chosen_seats.len() > request.passenger_count() {
            return Err(AllocationError::InvalidRequest(format!(
                "{} chosen seats for {} passengers",
                request.chosen_seats.len(),
                request.passenger_count()
            )));
        }
        let layout = request.seat_class.layout();
        for seat in &request.chosen_seats {
            layout.decode(seat)?;
        }
        Ok(())
    }
}

/// The purchase validation chain with every filter registered.
#[must_use]
pub fn purchase_chain(max_passengers: usize) -> ChainContext<AllocationRequest> {
    ChainContext::new()
        .with(RequiredParamsFilter)
        .with(PassengerCountFilter::new(max_passengers))
        .with(ChosenSeatFilter)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use railseat_core::{PassengerDetail, SeatClass, TravelSegment};

    fn request(departure: &str, arrival: &str, passengers: usize) -> AllocationRequest {
        AllocationRequest::new(
            TravelSegment::new("G1234", departure, arrival),
            SeatClass::Business,
            (1..=passengers)
                .map(|n| PassengerDetail::new(format!("p{n}"), SeatClass::Business))
                .collect(),
        )
    }

    #[test]
    fn valid_request_passes_every_filter() {
        let chain = purchase_chain(5);
        let request = request("BJP", "SHH", 2).with_chosen_seats(["01A", "02F"]);
        chain.handle(PURCHASE_FILTER_MARK, &request).unwrap();
        assert_eq!(chain.len(PURCHASE_FILTER_MARK), 3);
    }

    #[test]
    fn blank_station_is_rejected_first() {
        let error = purchase_chain(5)
            .handle(PURCHASE_FILTER_MARK, &request(" ", "SHH", 0))
            .unwrap_err();
        assert_eq!(error, AllocationError::InvalidRequest("departure is required".into()));
    }

    #[test]
    fn same_station_segment_is_rejected() {
        let error = RequiredParamsFilter.handle(&request("BJP", "BJP", 1)).unwrap_err();
        assert!(error.to_string().contains("both 'BJP'"));
    }

    #[test]
    fn party_size_is_bounded() {
        let filter = PassengerCountFilter::new(3);
        assert!(filter.handle(&request("BJP", "SHH", 0)).is_err());
        assert!(filter.handle(&request("BJP", "SHH", 4)).is_err());
        assert!(filter.handle(&request("BJP", "SHH", 3)).is_ok());
    }

    #[test]
    fn chosen_seats_must_decode_and_fit_the_party() {
        let too_many = request("BJP", "SHH", 1).with_chosen_seats(["01A", "01C"]);
        assert!(ChosenSeatFilter.handle(&too_many).is_err());

        let foreign = request("BJP", "SHH", 1).with_chosen_seats(["01B"]);
        let error = ChosenSeatFilter.handle(&foreign).unwrap_err();
        assert!(matches!(error, AllocationError::InvalidRequest(_)));
    }
}
