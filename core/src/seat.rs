//! Seat classes, carriage layouts and the wire-form seat codec.
//!
//! A carriage is viewed as a grid of `rows × cols` seats. Rows are numbered
//! from 1; columns carry a class-specific letter (`A C F` for business class).
//! At the engine boundary a seat travels as a *wire-form* string: a padding
//! `'0'`, the single-digit row, then the column letter (`"01A"`, `"02F"`).
//!
//! # Example
//!
//! ```
//! use railseat_core::seat::{Coordinate, SeatClass};
//!
//! let layout = SeatClass::Business.layout();
//! let coord = layout.decode("02F").unwrap();
//! assert_eq!(coord, Coordinate::new(2, 3));
//! assert_eq!(layout.encode(coord).unwrap(), "02F");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Largest row number the single-digit wire form can express.
pub const MAX_ROWS: usize = 9;

// ============================================================================
// Seat classes
// ============================================================================

/// Seat class of a high-speed train carriage.
///
/// Each class has its own grid shape and party-size thresholds, see
/// [`SeatClass::layout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatClass {
    /// Business class: 2 rows of `A C F`.
    Business,
    /// First class: 3 rows of `A C D F`.
    FirstClass,
    /// Second class: 9 rows of `A B C D F`.
    SecondClass,
}

impl SeatClass {
    /// Every seat class, in registration order.
    pub const ALL: [Self; 3] = [Self::Business, Self::FirstClass, Self::SecondClass];

    /// Stable class key used to look up the purchase handler for this class.
    #[must_use]
    pub const fn mark(self) -> &'static str {
        match self {
            Self::Business => "HIGH_SPEED_TRAIN_BUSINESS",
            Self::FirstClass => "HIGH_SPEED_TRAIN_FIRST",
            Self::SecondClass => "HIGH_SPEED_TRAIN_SECOND",
        }
    }

    /// Resolve a class key back to its seat class.
    #[must_use]
    pub fn from_mark(mark: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.mark() == mark)
    }

    /// Canonical carriage layout for this class.
    #[must_use]
    pub const fn layout(self) -> SeatLayout {
        match self {
            Self::Business => SeatLayout::BUSINESS,
            Self::FirstClass => SeatLayout::FIRST_CLASS,
            Self::SecondClass => SeatLayout::SECOND_CLASS,
        }
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Business => "business",
            Self::FirstClass => "first",
            Self::SecondClass => "second",
        };
        write!(f, "{name}")
    }
}

// ============================================================================
// Coordinates
// ============================================================================

/// A seat position inside one carriage, 1-based in both axes.
///
/// The derived ordering compares `row` first and `col` second, which is
/// exactly the row-major order every allocation fallback relies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Row number, `1..=rows`
    pub row: usize,
    /// Column index, `1..=cols`
    pub col: usize,
}

impl Coordinate {
    /// Creates a coordinate from a 1-based row and column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Front-row seat in the same column.
    #[must_use]
    pub const fn front_row(self) -> Self {
        Self { row: 1, col: self.col }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ============================================================================
// Codec errors
// ============================================================================

/// Errors raised while converting between coordinates and wire-form seats.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeatCodecError {
    /// The string is not `'0'`, a row digit and a column letter.
    #[error("malformed seat number '{0}': expected '0' + row digit + column letter")]
    Malformed(String),

    /// The row is outside the carriage.
    #[error("seat '{seat}' has row {row}, carriage has {rows} rows")]
    RowOutOfRange {
        /// The offending wire-form seat
        seat: String,
        /// Parsed row
        row: usize,
        /// Rows in this layout
        rows: usize,
    },

    /// The column letter is not used by this seat class.
    #[error("seat '{seat}' uses column '{label}', which this seat class does not have")]
    UnknownColumn {
        /// The offending wire-form seat
        seat: String,
        /// Parsed column letter
        label: char,
    },

    /// A coordinate outside the grid cannot be encoded.
    #[error("coordinate {0} lies outside the carriage grid")]
    OutOfGrid(Coordinate),
}

// ============================================================================
// Layouts
// ============================================================================

/// Grid shape and party thresholds of one seat class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SeatLayout {
    rows: usize,
    columns: &'static [char],
    small_party_max: usize,
    subgroup_cap: usize,
}

impl SeatLayout {
    /// Business class, 2 × `A C F`. A party of at most 2 is seated as one group.
    pub const BUSINESS: Self = Self {
        rows: 2,
        columns: &['A', 'C', 'F'],
        small_party_max: 2,
        subgroup_cap: 2,
    };

    /// First class, 3 × `A C D F`.
    pub const FIRST_CLASS: Self = Self {
        rows: 3,
        columns: &['A', 'C', 'D', 'F'],
        small_party_max: 4,
        subgroup_cap: 2,
    };

    /// Second class, 9 × `A B C D F`.
    pub const SECOND_CLASS: Self = Self {
        rows: 9,
        columns: &['A', 'B', 'C', 'D', 'F'],
        small_party_max: 5,
        subgroup_cap: 3,
    };

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (seats per row).
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.columns.len()
    }

    /// Total seats in one carriage.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.rows * self.columns.len()
    }

    /// Column letters in column-index order.
    #[must_use]
    pub const fn column_labels(&self) -> &'static [char] {
        self.columns
    }

    /// Largest party seated through the single-group adjacency path.
    #[must_use]
    pub const fn small_party_max(&self) -> usize {
        self.small_party_max
    }

    /// Largest subgroup the multi-group path keeps together.
    #[must_use]
    pub const fn subgroup_cap(&self) -> usize {
        self.subgroup_cap
    }

    /// Whether a party of `passengers` takes the single-group path.
    #[must_use]
    pub const fn is_small_party(&self, passengers: usize) -> bool {
        passengers <= self.small_party_max
    }

    /// Copy of this layout with a different small-party threshold.
    ///
    /// The threshold is clamped to `1..=cols`: a group larger than one row can
    /// never be adjacent.
    #[must_use]
    pub fn with_small_party_max(mut self, max: usize) -> Self {
        self.small_party_max = max.clamp(1, self.cols());
        self
    }

    /// Column letter of a 1-based column index.
    #[must_use]
    pub fn column_label(&self, col: usize) -> Option<char> {
        col.checked_sub(1).and_then(|idx| self.columns.get(idx).copied())
    }

    /// 1-based column index of a column letter.
    #[must_use]
    pub fn column_index(&self, label: char) -> Option<usize> {
        self.columns
            .iter()
            .position(|&c| c == label)
            .map(|idx| idx + 1)
    }

    /// Whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, coord: Coordinate) -> bool {
        coord.row >= 1 && coord.row <= self.rows && coord.col >= 1 && coord.col <= self.columns.len()
    }

    /// Render a coordinate in wire form (`"0" + row + letter`).
    ///
    /// # Errors
    ///
    /// Returns [`SeatCodecError::OutOfGrid`] if the coordinate is not inside
    /// this layout.
    pub fn encode(&self, coord: Coordinate) -> Result<String, SeatCodecError> {
        match self.column_label(coord.col) {
            Some(label) if self.contains(coord) => Ok(format!("0{}{label}", coord.row)),
            _ => Err(SeatCodecError::OutOfGrid(coord)),
        }
    }

    /// Parse a wire-form seat into a coordinate of this layout.
    ///
    /// # Errors
    ///
    /// Returns a [`SeatCodecError`] if the string is malformed, the row is
    /// outside the carriage, or the column letter belongs to another class.
    pub fn decode(&self, seat: &str) -> Result<Coordinate, SeatCodecError> {
        let mut chars = seat.chars();
        let (Some('0'), Some(row), Some(label), None) =
            (chars.next(), chars.next(), chars.next(), chars.next())
        else {
            return Err(SeatCodecError::Malformed(seat.to_string()));
        };

        let Some(row) = row.to_digit(10) else {
            return Err(SeatCodecError::Malformed(seat.to_string()));
        };
        let row = row as usize;
        if row == 0 || row > self.rows {
            return Err(SeatCodecError::RowOutOfRange {
                seat: seat.to_string(),
                row,
                rows: self.rows,
            });
        }

        let col = self.column_index(label).ok_or_else(|| SeatCodecError::UnknownColumn {
            seat: seat.to_string(),
            label,
        })?;

        Ok(Coordinate::new(row, col))
    }

    /// Every seat of the carriage in row-major order, wire-encoded.
    #[must_use]
    pub fn all_seats(&self) -> Vec<String> {
        (1..=self.rows)
            .flat_map(|row| {
                self.columns
                    .iter()
                    .map(move |label| format!("0{row}{label}"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use proptest::prelude::*;

    #[test]
    fn business_layout_matches_the_two_by_three_grid() {
        let layout = SeatClass::Business.layout();
        assert_eq!(layout.rows(), 2);
        assert_eq!(layout.cols(), 3);
        assert_eq!(layout.column_index('A'), Some(1));
        assert_eq!(layout.column_index('C'), Some(2));
        assert_eq!(layout.column_index('F'), Some(3));
        assert_eq!(layout.column_index('B'), None);
        assert!(layout.is_small_party(2));
        assert!(!layout.is_small_party(3));
    }

    #[test]
    fn encode_pads_the_row_with_a_leading_zero() {
        let layout = SeatLayout::BUSINESS;
        assert_eq!(layout.encode(Coordinate::new(1, 1)).unwrap(), "01A");
        assert_eq!(layout.encode(Coordinate::new(2, 3)).unwrap(), "02F");
    }

    #[test]
    fn encode_rejects_coordinates_outside_the_grid() {
        let layout = SeatLayout::BUSINESS;
        assert_eq!(
            layout.encode(Coordinate::new(3, 1)),
            Err(SeatCodecError::OutOfGrid(Coordinate::new(3, 1)))
        );
        assert!(layout.encode(Coordinate::new(1, 0)).is_err());
        assert!(layout.encode(Coordinate::new(1, 4)).is_err());
    }

    #[test]
    fn decode_reads_wire_form() {
        let layout = SeatLayout::SECOND_CLASS;
        assert_eq!(layout.decode("09D").unwrap(), Coordinate::new(9, 4));
        assert_eq!(layout.decode("01B").unwrap(), Coordinate::new(1, 2));
    }

    #[test]
    fn decode_rejects_malformed_seats() {
        let layout = SeatLayout::BUSINESS;
        for seat in ["", "1A", "11A", "01", "01AA", "0xA", "001A"] {
            assert!(
                matches!(layout.decode(seat), Err(SeatCodecError::Malformed(_))),
                "{seat} should be malformed"
            );
        }
    }

    #[test]
    fn decode_rejects_rows_and_columns_outside_the_class() {
        let layout = SeatLayout::BUSINESS;
        assert!(matches!(
            layout.decode("03A"),
            Err(SeatCodecError::RowOutOfRange { row: 3, rows: 2, .. })
        ));
        assert!(matches!(
            layout.decode("00A"),
            Err(SeatCodecError::RowOutOfRange { row: 0, .. })
        ));
        assert!(matches!(
            layout.decode("01B"),
            Err(SeatCodecError::UnknownColumn { label: 'B', .. })
        ));
    }

    #[test]
    fn all_seats_are_row_major() {
        assert_eq!(
            SeatLayout::BUSINESS.all_seats(),
            vec!["01A", "01C", "01F", "02A", "02C", "02F"]
        );
        assert_eq!(SeatLayout::SECOND_CLASS.all_seats().len(), 45);
    }

    #[test]
    fn small_party_override_is_clamped_to_the_row_width() {
        let layout = SeatLayout::BUSINESS.with_small_party_max(10);
        assert_eq!(layout.small_party_max(), 3);
        let layout = SeatLayout::BUSINESS.with_small_party_max(0);
        assert_eq!(layout.small_party_max(), 1);
    }

    #[test]
    fn coordinate_order_is_row_major() {
        let mut coords = vec![
            Coordinate::new(2, 1),
            Coordinate::new(1, 3),
            Coordinate::new(1, 1),
        ];
        coords.sort();
        assert_eq!(
            coords,
            vec![Coordinate::new(1, 1), Coordinate::new(1, 3), Coordinate::new(2, 1)]
        );
    }

    #[test]
    fn class_marks_round_trip_through_lookup() {
        for class in SeatClass::ALL {
            assert_eq!(SeatClass::from_mark(class.mark()), Some(class));
            assert!(class.layout().rows() <= MAX_ROWS);
        }
        assert_eq!(SeatClass::from_mark("SLEEPER"), None);
    }

    fn layout_and_coordinate() -> impl Strategy<Value = (SeatLayout, Coordinate)> {
        proptest::sample::select(SeatClass::ALL.to_vec()).prop_flat_map(|class| {
            let layout = class.layout();
            (0..=layout.rows() + 1, 0..=layout.cols() + 1)
                .prop_map(move |(row, col)| (layout, Coordinate::new(row, col)))
        })
    }

    proptest! {
        #[test]
        fn codec_accepts_exactly_the_grid((layout, coord) in layout_and_coordinate()) {
            match layout.encode(coord) {
                Ok(seat) => {
                    prop_assert!(layout.contains(coord));
                    prop_assert_eq!(seat.len(), 3);
                    prop_assert_eq!(layout.decode(&seat).unwrap(), coord);
                }
                Err(_) => prop_assert!(!layout.contains(coord)),
            }
        }
    }
}
