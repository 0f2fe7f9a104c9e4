//! Allocation orchestrator.
//!
//! One [`Allocator`] per seat class runs the whole allocation for a request:
//!
//! 1. **Feasibility**: the remaining counts of all usable carriages must
//!    cover the party.
//! 2. **Dispatch**: chosen seats go to the [`PreferredSeatMatcher`]; small
//!    parties look for one row that seats everybody; larger parties are cut
//!    into subgroups that each sit side by side in one carriage.
//! 3. **Degradation**: when adjacency fails everywhere, the party is seated
//!    non-adjacently in a single carriage, and as a last resort across
//!    carriages.
//!
//! Carriages are visited in provider order and seats in row-major order;
//! together they make every result deterministic for a given snapshot.

use crate::grid::{CarriageGrid, SeatClaim, SeatGrid};
use crate::matcher::PreferredSeatMatcher;
use crate::metrics::{Degradation, record_allocation, record_degradation};
use crate::solver::{adjacent, non_adjacent};
use railseat_core::environment::InventoryProvider;
use railseat_core::{
    AllocationError, AllocationRequest, AllocationResponse, Coordinate, ProviderError, Result,
    SeatAssignment, SeatClass, SeatLayout,
};

/// Seat allocator for one seat class.
///
/// Stateless: a single value can serve any number of concurrent requests.
///
/// # Example
///
/// ```ignore
/// let allocator = Allocator::for_class(SeatClass::Business);
/// let response = allocator.allocate(&inventory, &request)?;
/// for assignment in &response {
///     println!("{} -> {}/{}", assignment.passenger_id, assignment.carriage_number, assignment.seat_number);
/// }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Allocator {
    seat_class: SeatClass,
    layout: SeatLayout,
}

impl Allocator {
    /// Allocator for `seat_class` using a custom layout.
    #[must_use]
    pub const fn new(seat_class: SeatClass, layout: SeatLayout) -> Self {
        Self { seat_class, layout }
    }

    /// Allocator for `seat_class` with its standard layout.
    #[must_use]
    pub const fn for_class(seat_class: SeatClass) -> Self {
        Self::new(seat_class, seat_class.layout())
    }

    /// Seat class served.
    #[must_use]
    pub const fn seat_class(&self) -> SeatClass {
        self.seat_class
    }

    /// Layout used for grids and the wire codec.
    #[must_use]
    pub const fn layout(&self) -> SeatLayout {
        self.layout
    }

    /// Assign one seat to every passenger of `request`.
    ///
    /// Assignments come back in passenger order.
    ///
    /// # Errors
    ///
    /// - [`AllocationError::InvalidRequest`] for an empty party or a chosen
    ///   seat that does not exist in this class
    /// - [`AllocationError::InsufficientInventory`] when the remaining counts
    ///   cannot cover the party
    /// - [`AllocationError::Provider`] when an inventory query fails
    /// - [`AllocationError::PartialAllocation`] when the seat lists turn out
    ///   smaller than the remaining counts promised
    pub fn allocate<P>(
        &self,
        provider: &P,
        request: &AllocationRequest,
    ) -> Result<AllocationResponse>
    where
        P: InventoryProvider + ?Sized,
    {
        let result = self.run(provider, request);
        record_allocation(self.seat_class, request.passenger_count(), &result);
        result
    }

    fn run<P>(&self, provider: &P, request: &AllocationRequest) -> Result<AllocationResponse>
    where
        P: InventoryProvider + ?Sized,
    {
        let passengers = request.passenger_count();
        if passengers == 0 {
            return Err(AllocationError::InvalidRequest(
                "passenger list is empty".to_string(),
            ));
        }
        let chosen = request
            .chosen_seats
            .iter()
            .map(|seat| self.layout.decode(seat))
            .collect::<std::result::Result<Vec<Coordinate>, _>>()?;

        let segment = &request.segment;
        let numbers = provider.list_usable_carriages(
            &segment.train_id,
            self.seat_class,
            &segment.departure,
            &segment.arrival,
        )?;
        let remaining = provider.list_remaining_count(
            &segment.train_id,
            &segment.departure,
            &segment.arrival,
            &numbers,
        )?;
        if remaining.len() != numbers.len() {
            return Err(ProviderError::Backend(format!(
                "{} remaining counts for {} carriages",
                remaining.len(),
                numbers.len()
            ))
            .into());
        }

        let available: usize = remaining.iter().sum();
        if available < passengers {
            tracing::debug!(
                train_id = %segment.train_id,
                seat_class = %self.seat_class,
                requested = passengers,
                available,
                "Not enough seats left"
            );
            return Err(AllocationError::InsufficientInventory {
                requested: passengers,
                available,
            });
        }

        let carriages = self.load_carriages(provider, request, numbers)?;

        let claims = if !chosen.is_empty() {
            tracing::debug!(chosen = chosen.len(), passengers, "Matching chosen seats");
            PreferredSeatMatcher::new(&chosen, passengers).run(&carriages)
        } else if self.layout.is_small_party(passengers) {
            tracing::debug!(passengers, "Seating party in one group");
            whole_row(&carriages, passengers).unwrap_or_else(|| degrade(&carriages, passengers))
        } else {
            tracing::debug!(
                passengers,
                subgroup_cap = self.layout.subgroup_cap(),
                "Seating party in subgroups"
            );
            self.multi_group(&carriages, passengers)
        };

        let assignments = request
            .passengers
            .iter()
            .zip(&claims)
            .map(|(passenger, claim)| {
                Ok(SeatAssignment {
                    passenger_id: passenger.passenger_id.clone(),
                    seat_type: passenger.seat_type,
                    carriage_number: claim.carriage.to_string(),
                    seat_number: self.layout.encode(claim.seat)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if assignments.len() < passengers {
            tracing::warn!(
                train_id = %segment.train_id,
                seat_class = %self.seat_class,
                requested = passengers,
                seated = assignments.len(),
                "Seat lists smaller than remaining counts, allocation is partial"
            );
            return Err(AllocationError::PartialAllocation {
                requested: passengers,
                partial: assignments,
            });
        }
        Ok(AllocationResponse::new(assignments))
    }

    /// One grid per carriage, in provider order.
    fn load_carriages<P>(
        &self,
        provider: &P,
        request: &AllocationRequest,
        numbers: Vec<String>,
    ) -> Result<Vec<CarriageGrid>>
    where
        P: InventoryProvider + ?Sized,
    {
        let segment = &request.segment;
        numbers
            .into_iter()
            .map(|number| {
                let free = provider.list_available_seats(
                    &segment.train_id,
                    &number,
                    self.seat_class,
                    &segment.departure,
                    &segment.arrival,
                )?;
                let grid = SeatGrid::from_available(self.layout, &free);
                tracing::trace!(carriage = %number, free = grid.free_count(), "Loaded carriage");
                Ok(CarriageGrid::new(number, grid))
            })
            .collect()
    }

    fn multi_group<'c>(
        &self,
        carriages: &'c [CarriageGrid],
        passengers: usize,
    ) -> Vec<SeatClaim<'c>> {
        if passengers <= self.layout.cols() {
            if let Some(claims) = whole_row(carriages, passengers) {
                return claims;
            }
        }
        for carriage in carriages {
            if let Some(seats) = subgroups(&carriage.grid, passengers, self.layout.subgroup_cap()) {
                return seats
                    .into_iter()
                    .map(|seat| SeatClaim::new(&carriage.number, seat))
                    .collect();
            }
            tracing::trace!(carriage = %carriage.number, "Subgroups do not fit");
        }
        degrade(carriages, passengers)
    }
}

/// The whole party side by side in one row of the first carriage that has
/// such a row.
fn whole_row(carriages: &[CarriageGrid], passengers: usize) -> Option<Vec<SeatClaim<'_>>> {
    carriages.iter().find_map(|carriage| {
        let run = adjacent(passengers, &carriage.grid);
        if run.is_none() {
            tracing::trace!(carriage = %carriage.number, passengers, "No adjacent run");
        }
        run.map(|seats| {
            seats
                .into_iter()
                .map(|seat| SeatClaim::new(&carriage.number, seat))
                .collect()
        })
    })
}

/// Seat the party as consecutive subgroups of at most `cap`, each side by
/// side, all in one carriage.
fn subgroups(grid: &SeatGrid, passengers: usize, cap: usize) -> Option<Vec<Coordinate>> {
    let mut working = grid.clone();
    let mut seats = Vec::with_capacity(passengers);
    let mut remaining = passengers;
    while remaining > 0 {
        let size = remaining.min(cap.max(1));
        let run = adjacent(size, &working)?;
        for seat in &run {
            working.mark_taken(*seat);
        }
        seats.extend(run);
        remaining -= size;
    }
    Some(seats)
}

/// Non-adjacent fallbacks, on the grids as loaded.
fn degrade(carriages: &[CarriageGrid], passengers: usize) -> Vec<SeatClaim<'_>> {
    if let Some(carriage) = carriages
        .iter()
        .find(|carriage| carriage.grid.free_count() > passengers)
    {
        tracing::debug!(
            carriage = %carriage.number,
            passengers,
            "No adjacent seats, seating party in one carriage"
        );
        record_degradation(Degradation::SameCarriage);
        return non_adjacent(passengers, &carriage.grid)
            .into_iter()
            .map(|seat| SeatClaim::new(&carriage.number, seat))
            .collect();
    }

    tracing::debug!(passengers, "No single carriage fits, splitting party across carriages");
    record_degradation(Degradation::SplitCarriages);
    let mut claims = Vec::with_capacity(passengers);
    for carriage in carriages {
        let missing = passengers - claims.len();
        if missing == 0 {
            break;
        }
        claims.extend(
            non_adjacent(missing, &carriage.grid)
                .into_iter()
                .map(|seat| SeatClaim::new(&carriage.number, seat)),
        );
    }
    claims
}
