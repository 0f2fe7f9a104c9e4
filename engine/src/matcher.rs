//! Preferred-seat matching.
//!
//! When the user picked seats, carriages are tried in provider order and the
//! first one that can honor the picks and still seat the whole party wins.
//! Carriages that cannot are remembered with their free seats so the party
//! can still be seated, first in one carriage and finally across several.

use crate::grid::{CarriageGrid, SeatClaim, SeatGrid};
use crate::metrics::{Degradation, record_degradation};
use railseat_core::Coordinate;

/// Whether every chosen seat is free in `grid`.
#[must_use]
pub fn chosen_seats_available(chosen: &[Coordinate], grid: &SeatGrid) -> bool {
    chosen.iter().all(|seat| grid.is_free(*seat))
}

/// Result of matching the picks against one carriage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CarriageMatch {
    /// The whole party is seated here, picks first.
    Seated(Vec<Coordinate>),
    /// Fewer free seats than passengers.
    Insufficient(Vec<Coordinate>),
    /// A lone pick and the front-row seat of its column are both taken.
    Missed(Vec<Coordinate>),
}

/// Matches chosen seats against a train's carriages.
#[derive(Clone, Copy, Debug)]
pub struct PreferredSeatMatcher<'a> {
    chosen: &'a [Coordinate],
    passengers: usize,
}

impl<'a> PreferredSeatMatcher<'a> {
    /// Matcher for `passengers` travellers who picked `chosen`.
    #[must_use]
    pub const fn new(chosen: &'a [Coordinate], passengers: usize) -> Self {
        Self { chosen, passengers }
    }

    /// Try to seat the party in one carriage.
    ///
    /// Picks are honored in order. A lone pick that is taken falls back to
    /// the front-row seat of the same column; with several picks, taken ones
    /// are skipped. Remaining passengers get the first free seats in
    /// row-major order.
    #[must_use]
    pub fn match_carriage(&self, grid: &SeatGrid) -> CarriageMatch {
        let mut free = grid.free_seats();
        if free.len() < self.passengers {
            return CarriageMatch::Insufficient(free);
        }

        let mut working = grid.clone();
        let mut claimed = Vec::with_capacity(self.passengers);
        for &pick in self.chosen {
            if claimed.len() == self.passengers {
                break;
            }
            let seat = if working.is_free(pick) {
                pick
            } else if self.chosen.len() == 1 {
                let front = pick.front_row();
                if !working.is_free(front) {
                    return CarriageMatch::Missed(free);
                }
                front
            } else {
                continue;
            };
            working.mark_taken(seat);
            claimed.push(seat);
        }

        free.retain(|seat| working.is_free(*seat));
        let missing = self.passengers - claimed.len();
        claimed.extend(free.into_iter().take(missing));
        CarriageMatch::Seated(claimed)
    }

    /// Seat the party across `carriages`.
    ///
    /// Returns one claim per passenger, or fewer when the carriages together
    /// hold fewer free seats than passengers.
    #[must_use]
    pub fn run<'c>(&self, carriages: &'c [CarriageGrid]) -> Vec<SeatClaim<'c>> {
        let mut overflow: Vec<(&'c str, Vec<Coordinate>)> = Vec::new();
        for carriage in carriages {
            tracing::trace!(
                carriage = %carriage.number,
                chosen_available = chosen_seats_available(self.chosen, &carriage.grid),
                free = carriage.grid.free_count(),
                "Matching chosen seats"
            );
            match self.match_carriage(&carriage.grid) {
                CarriageMatch::Seated(seats) => {
                    return claims(&carriage.number, seats);
                }
                CarriageMatch::Insufficient(free) | CarriageMatch::Missed(free) => {
                    if !free.is_empty() {
                        overflow.push((carriage.number.as_str(), free));
                    }
                }
            }
        }

        if let Some((number, free)) = overflow
            .iter()
            .find(|(_, free)| free.len() >= self.passengers)
        {
            tracing::debug!(carriage = %number, "Chosen seats missed, seating party in one carriage");
            record_degradation(Degradation::PreferredOverflow);
            return claims(*number, free.iter().copied().take(self.passengers));
        }

        tracing::debug!(
            carriages = overflow.len(),
            "Chosen seats missed, splitting party across carriages"
        );
        record_degradation(Degradation::PreferredSplit);
        let mut split = Vec::with_capacity(self.passengers);
        for (number, free) in overflow {
            let missing = self.passengers - split.len();
            split.extend(free.into_iter().take(missing).map(|seat| SeatClaim::new(number, seat)));
            if split.len() == self.passengers {
                break;
            }
        }
        split
    }
}

fn claims(carriage: &str, seats: impl IntoIterator<Item = Coordinate>) -> Vec<SeatClaim<'_>> {
    seats
        .into_iter()
        .map(|seat| SeatClaim::new(carriage, seat))
        .collect()
}
