//! Seat pickers over a single [`SeatGrid`].
//!
//! Both pickers are pure: they read the grid and return coordinates, and
//! never mark anything taken. Callers that pick repeatedly from one carriage
//! mark the returned seats themselves.

use crate::grid::SeatGrid;
use railseat_core::Coordinate;
use smallvec::SmallVec;

/// A horizontal run of seats in one row. Runs never exceed a row's width,
/// so they stay inline.
pub type SeatRun = SmallVec<[Coordinate; 8]>;

/// First run of `n` horizontally contiguous free seats.
///
/// Rows are scanned top to bottom and the first row holding a run wins;
/// within that row the leftmost run wins. Returns `None` when `n` is zero,
/// wider than a row, or no row has such a run.
///
/// ```
/// use railseat_core::{Coordinate, SeatLayout};
/// use railseat_engine::{grid::SeatGrid, solver};
///
/// let grid = SeatGrid::all_free(SeatLayout::BUSINESS);
/// let run = solver::adjacent(2, &grid).unwrap();
/// assert_eq!(run.as_slice(), &[Coordinate::new(1, 1), Coordinate::new(1, 2)]);
/// ```
#[must_use]
pub fn adjacent(n: usize, grid: &SeatGrid) -> Option<SeatRun> {
    if n == 0 || n > grid.cols() {
        return None;
    }
    for row in 1..=grid.rows() {
        let mut streak = 0;
        for col in 1..=grid.cols() {
            if !grid.is_free(Coordinate::new(row, col)) {
                streak = 0;
                continue;
            }
            streak += 1;
            if streak == n {
                let start = col + 1 - n;
                return Some((start..=col).map(|c| Coordinate::new(row, c)).collect());
            }
        }
    }
    None
}

/// The first `n` free seats in row-major order, ignoring adjacency.
///
/// Returns fewer than `n` seats when the grid has fewer free.
#[must_use]
pub fn non_adjacent(n: usize, grid: &SeatGrid) -> Vec<Coordinate> {
    let mut seats = grid.free_seats();
    seats.truncate(n);
    seats
}
