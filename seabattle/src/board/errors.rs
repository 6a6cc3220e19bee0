//! Errors used by the `Board`.

use std::fmt::{self, Debug};

use thiserror::Error;

use crate::board::Coordinate;

/// Reason why a ship could not be placed with a given set of cells.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CannotPlaceReason {
    /// No cells were given.
    #[error("a ship needs at least one cell")]
    EmptyPlacement,
    /// One or more of the cells is off the board.
    #[error("the requested position is off the board")]
    OutOfBounds,
    /// One or more of the cells already holds a ship.
    #[error("the requested position overlaps another ship")]
    Overlap,
    /// One or more of the cells touches another ship, diagonals included.
    #[error("the requested position is too close to another ship")]
    TooClose,
    /// The cells don't share a row or a column.
    #[error("ships must be placed in a straight line")]
    NotStraight,
    /// The cells share a row or column but leave gaps or repeat.
    #[error("ship cells must be contiguous")]
    NotContiguous,
    /// The player has already placed every ship of this length, or no ship of this length
    /// exists in the fleet. Raised by callers enforcing the fleet, never by the board.
    #[error("no ship of this length is left to place")]
    QuotaExceeded,
}

/// Error caused when attempting to place a ship in an invalid position.
#[derive(Error, Clone, Eq, PartialEq)]
#[error("could not place ship: {reason}")]
pub struct PlaceError {
    #[source]
    reason: CannotPlaceReason,
    placement: Vec<Coordinate>,
}

impl Debug for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl PlaceError {
    /// Construct a placement error from a reason and the rejected placement.
    pub(crate) fn new(reason: CannotPlaceReason, placement: Vec<Coordinate>) -> Self {
        Self { reason, placement }
    }

    /// Get the reason placement was aborted.
    pub fn reason(&self) -> CannotPlaceReason {
        self.reason
    }

    /// Get the coordinates where placement was attempted, as they were given.
    pub fn placement(&self) -> &[Coordinate] {
        &self.placement
    }

    /// Extract the placement from this error.
    pub fn into_placement(self) -> Vec<Coordinate> {
        self.placement
    }
}

/// Reason why a particular cell could not be shot.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CannotShootReason {
    /// The cell selected was out of bounds on the board.
    #[error("the target is off the board")]
    OutOfBounds,

    /// A shot has already been fired at that cell.
    #[error("the target cell was already shot")]
    AlreadyTargeted,
}

/// Error returned when trying to shoot a cell.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not shoot cell {coord}: {reason}")]
pub struct ShotError {
    /// Reason why the cell could not be shot.
    reason: CannotShootReason,

    /// The coordinates of the cell.
    coord: Coordinate,
}

impl ShotError {
    /// Construct a shot error with the given reason for the specified cell.
    pub(crate) fn new(reason: CannotShootReason, coord: Coordinate) -> Self {
        Self { reason, coord }
    }

    /// Get the reason the shot failed.
    pub fn reason(&self) -> CannotShootReason {
        self.reason
    }

    /// Get the coordinate of the shot cell.
    pub fn coord(&self) -> &Coordinate {
        &self.coord
    }
}

/// Error returned when the remaining ships could not all be fit onto the board at random.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not find room for a ship of length {len}")]
pub struct FillError {
    len: usize,
}

impl FillError {
    #[cfg_attr(not(feature = "rng_gen"), allow(dead_code))]
    pub(crate) fn new(len: usize) -> Self {
        Self { len }
    }

    /// Length of the ship that could not be placed.
    pub fn ship_len(&self) -> usize {
        self.len
    }
}
