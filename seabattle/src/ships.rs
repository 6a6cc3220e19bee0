//! Types used for defining ships and tracking whether they are afloat.
use std::fmt;

use crate::board::{CellFlag, Coordinate, Grid};

pub use self::linear::Orientation;
pub(crate) use self::linear::check_line;

mod linear;

/// Index of a ship within the board that owns it. Handles are only meaningful for the
/// board that issued them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ShipHandle(pub(crate) usize);

/// Identity of a ship, derived from its length and sorted cells, e.g. `3-1А2А3А`. Two
/// ships on the same board can never share an ID, since they can never share a cell.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ShipId(String);

impl ShipId {
    /// Build the ID for a ship occupying the given sorted cells.
    pub(crate) fn from_cells(cells: &[Coordinate]) -> Self {
        let mut id = format!("{}-", cells.len());
        for cell in cells {
            id.push_str(&cell.to_string());
        }
        ShipId(id)
    }

    /// View the ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// A ship placed on a board.
#[derive(Debug, Clone)]
pub(crate) struct Ship {
    id: ShipId,

    /// Cells of the ship in row-major order.
    cells: Vec<Coordinate>,

    orientation: Orientation,

    /// Set once every cell has been hit. Never cleared.
    sunk: bool,
}

impl Ship {
    /// Create a ship from cells which have already been validated and sorted.
    pub(crate) fn new(cells: Vec<Coordinate>, orientation: Orientation) -> Self {
        Self {
            id: ShipId::from_cells(&cells),
            cells,
            orientation,
            sunk: false,
        }
    }

    pub(crate) fn id(&self) -> &ShipId {
        &self.id
    }

    pub(crate) fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    pub(crate) fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub(crate) fn is_alive(&self) -> bool {
        !self.sunk
    }

    /// Check whether every cell of this ship has been hit. The first time that is true,
    /// every cell is marked as sunk. Returns whether the ship sank during this call.
    pub(crate) fn recompute_sunk(&mut self, grid: &mut Grid) -> bool {
        if self.sunk {
            return false;
        }
        if !self
            .cells
            .iter()
            .all(|coord| grid[coord].flags.contains(CellFlag::Hit))
        {
            return false;
        }
        self.sunk = true;
        for coord in &self.cells {
            grid[coord].flags.insert(CellFlag::Sunk);
        }
        true
    }
}
