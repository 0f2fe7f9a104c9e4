//! Occupancy grid of one carriage.
//!
//! # Ordering contract
//!
//! [`SeatGrid::free_seats`] lists free seats in **row-major order**: rows
//! ascending, and within a row columns ascending. Every fallback in the
//! engine peels seats from the head of that list, so this order is part of
//! the allocation result. Do not change it for performance.

use railseat_core::{Coordinate, SeatCodecError, SeatLayout};
use std::collections::HashSet;
use std::fmt;

/// Free/taken matrix of a single carriage for one seat class.
///
/// Marking a seat taken only affects this in-request copy; nothing is ever
/// written back to the inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatGrid {
    layout: SeatLayout,
    taken: Vec<bool>,
}

impl SeatGrid {
    /// A grid with every seat free.
    #[must_use]
    pub fn all_free(layout: SeatLayout) -> Self {
        Self {
            layout,
            taken: vec![false; layout.capacity()],
        }
    }

    /// Build a grid from the wire-form seats the inventory reports as free.
    ///
    /// Seats are taken unless listed. Strings that do not decode for this
    /// layout are ignored.
    #[must_use]
    pub fn from_available(layout: SeatLayout, available: &HashSet<String>) -> Self {
        let mut grid = Self {
            layout,
            taken: vec![true; layout.capacity()],
        };
        for seat in available {
            if let Some(idx) = layout.decode(seat).ok().and_then(|c| grid.index(c)) {
                grid.taken[idx] = false;
            }
        }
        grid
    }

    /// Layout this grid was built for.
    #[must_use]
    pub const fn layout(&self) -> SeatLayout {
        self.layout
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.layout.rows()
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.layout.cols()
    }

    fn index(&self, coord: Coordinate) -> Option<usize> {
        self.layout
            .contains(coord)
            .then(|| (coord.row - 1) * self.cols() + (coord.col - 1))
    }

    /// Whether the seat exists and is free. Coordinates outside the grid are
    /// never free.
    #[must_use]
    pub fn is_free(&self, coord: Coordinate) -> bool {
        self.index(coord).is_some_and(|idx| !self.taken[idx])
    }

    /// Mark a seat taken in this copy of the grid.
    ///
    /// Returns `true` if the seat was free before the call.
    pub fn mark_taken(&mut self, coord: Coordinate) -> bool {
        match self.index(coord) {
            Some(idx) if !self.taken[idx] => {
                self.taken[idx] = true;
                true
            }
            _ => false,
        }
    }

    /// Number of free seats.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.taken.iter().filter(|taken| !**taken).count()
    }

    /// Free seats in row-major order.
    #[must_use]
    pub fn free_seats(&self) -> Vec<Coordinate> {
        (1..=self.rows())
            .flat_map(|row| (1..=self.cols()).map(move |col| Coordinate::new(row, col)))
            .filter(|coord| self.is_free(*coord))
            .collect()
    }

    /// Wire form of a seat of this grid.
    ///
    /// # Errors
    ///
    /// Returns [`SeatCodecError::OutOfGrid`] for a coordinate outside the grid.
    pub fn wire(&self, coord: Coordinate) -> Result<String, SeatCodecError> {
        self.layout.encode(coord)
    }
}

impl fmt::Display for SeatGrid {
    /// Renders the `0 = free, 1 = taken` matrix, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.taken.chunks(self.cols().max(1)).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let cells: Vec<&str> = row.iter().map(|t| if *t { "1" } else { "0" }).collect();
            write!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// A carriage number together with its grid, in provider order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarriageGrid {
    /// Carriage number as reported by the inventory
    pub number: String,
    /// Occupancy for this request's segment
    pub grid: SeatGrid,
}

impl CarriageGrid {
    /// Pair a carriage number with its grid.
    #[must_use]
    pub fn new(number: impl Into<String>, grid: SeatGrid) -> Self {
        Self {
            number: number.into(),
            grid,
        }
    }
}

/// One seat picked for one passenger, before wire encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeatClaim<'a> {
    /// Carriage the seat is in
    pub carriage: &'a str,
    /// Seat inside that carriage
    pub seat: Coordinate,
}

impl<'a> SeatClaim<'a> {
    /// Claim `seat` in `carriage`.
    #[must_use]
    pub const fn new(carriage: &'a str, seat: Coordinate) -> Self {
        Self { carriage, seat }
    }
}
