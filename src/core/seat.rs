//! Seat identification.
//!
//! ## SeatId
//!
//! Type-safe seat identifier for the four positions at the table.
//! Seat indices are 0-based and play passes `0 -> 1 -> 2 -> 3 -> 0`.

use serde::{Deserialize, Serialize};

use super::error::TableError;

/// Number of seats at the table.
pub const SEAT_COUNT: usize = 4;

/// Seat identifier in `0..4`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SeatId(u8);

impl SeatId {
    /// Create a seat ID, returning `None` outside `0..4`.
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        if (id as usize) < SEAT_COUNT {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that acts after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % SEAT_COUNT as u8)
    }

    /// Distance travelled clockwise from `self` to `other` (0..4).
    #[must_use]
    pub const fn offset_to(self, other: SeatId) -> usize {
        (other.index() + SEAT_COUNT - self.index()) % SEAT_COUNT
    }

    /// Iterate over all seats in turn order.
    ///
    /// ```
    /// use big2_table::core::SeatId;
    ///
    /// let seats: Vec<_> = SeatId::all().collect();
    /// assert_eq!(seats.len(), 4);
    /// assert_eq!(seats[3].index(), 3);
    /// ```
    pub fn all() -> impl Iterator<Item = SeatId> {
        (0..SEAT_COUNT as u8).map(SeatId)
    }
}

impl TryFrom<u8> for SeatId {
    type Error = TableError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SeatId::new(value).ok_or(TableError::InvalidSeat(i64::from(value)))
    }
}

impl TryFrom<i64> for SeatId {
    type Error = TableError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(SeatId::new)
            .ok_or(TableError::InvalidSeat(value))
    }
}

impl From<SeatId> for u8 {
    fn from(seat: SeatId) -> Self {
        seat.0
    }
}

impl std::fmt::Display for SeatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}
