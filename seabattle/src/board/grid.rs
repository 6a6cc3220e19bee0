//! Defines the cells that make up a board and the arena that owns them.

use std::ops::{Index, IndexMut};

use enumflags2::BitFlags;

use crate::{
    board::{CannotShootReason, Coordinate, BOARD_SIZE},
    ships::ShipHandle,
};

/// Independent facts that can be true of a cell.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum CellFlag {
    /// The cell is part of a ship.
    Occupied = 0b00001,
    /// A shot landed on this cell while it was occupied.
    Hit = 0b00010,
    /// A shot landed on this cell while it was empty.
    Missed = 0b00100,
    /// The ship occupying this cell has been sunk.
    Sunk = 0b01000,
    /// No ship may be placed here, because this cell or one next to it holds a ship.
    Blocked = 0b10000,
}

/// How a cell should be drawn. Derived from the cell's flags; evaluated in the order the
/// variants are listed, first match wins.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DisplayState {
    /// A ship was hit here.
    Hit,
    /// A shot fell into empty water here.
    Miss,
    /// Part of a sunk ship.
    Sunk,
    /// An intact part of a ship. Only visible to the board's owner.
    Ship,
    /// Empty water where no ship may be placed. Only visible to the board's owner.
    Blocked,
    /// Nothing to show.
    Empty,
}

impl DisplayState {
    /// Single-character symbol for drawing this state in a text grid.
    pub fn symbol(self) -> char {
        match self {
            DisplayState::Hit => 'X',
            DisplayState::Miss => 'O',
            DisplayState::Sunk => '#',
            DisplayState::Ship => 'S',
            DisplayState::Blocked => '.',
            DisplayState::Empty => '~',
        }
    }
}

/// A single cell in the player's grid.
#[derive(Debug, Clone)]
pub(crate) struct GridCell {
    /// Current state of the cell.
    pub(crate) flags: BitFlags<CellFlag>,

    /// The ship that occupies this cell, if any.
    pub(crate) ship: Option<ShipHandle>,
}

impl Default for GridCell {
    fn default() -> Self {
        Self {
            flags: BitFlags::empty(),
            ship: None,
        }
    }
}

impl GridCell {
    /// Whether a shot has already landed on this cell.
    pub(crate) fn targeted(&self) -> bool {
        self.flags.intersects(CellFlag::Hit | CellFlag::Missed)
    }

    /// Record a shot on this cell. Returns the ship that was hit, if any; the caller is
    /// responsible for letting that ship recompute whether it sank. A cell can only be
    /// shot once.
    pub(crate) fn resolve_shot(&mut self) -> Result<Option<ShipHandle>, CannotShootReason> {
        if self.targeted() {
            return Err(CannotShootReason::AlreadyTargeted);
        }
        if self.flags.contains(CellFlag::Occupied) {
            self.flags.insert(CellFlag::Hit);
        } else {
            self.flags.insert(CellFlag::Missed);
        }
        Ok(self.ship)
    }

    /// Mark this cell as unavailable for placement.
    pub(crate) fn disable_placement(&mut self) {
        self.flags.insert(CellFlag::Blocked);
    }

    pub(crate) fn display_state(&self, owner_view: bool) -> DisplayState {
        let flags = self.flags;
        if flags.contains(CellFlag::Hit) {
            DisplayState::Hit
        } else if flags.contains(CellFlag::Missed) {
            DisplayState::Miss
        } else if flags.contains(CellFlag::Sunk) {
            DisplayState::Sunk
        } else if owner_view && flags.contains(CellFlag::Occupied) {
            DisplayState::Ship
        } else if owner_view && flags.contains(CellFlag::Blocked) {
            DisplayState::Blocked
        } else {
            DisplayState::Empty
        }
    }
}

/// Row-major arena of every cell on a board. Membership never changes after creation.
#[derive(Debug, Clone)]
pub(crate) struct Grid {
    cells: Box<[GridCell]>,
}

impl Grid {
    pub(crate) fn new() -> Self {
        let cells = (0..BOARD_SIZE * BOARD_SIZE)
            .map(|_| GridCell::default())
            .collect();
        Self { cells }
    }

    /// Get a reference to the cell at the given [`Coordinate`].
    pub(crate) fn get(&self, coord: &Coordinate) -> Option<&GridCell> {
        coord.linearize().and_then(|i| self.cells.get(i))
    }

    /// Get a mutable reference to the cell at the given [`Coordinate`].
    pub(crate) fn get_mut(&mut self, coord: &Coordinate) -> Option<&mut GridCell> {
        coord.linearize().and_then(move |i| self.cells.get_mut(i))
    }
}

// Only used with coordinates the board has already validated.
impl Index<&Coordinate> for Grid {
    type Output = GridCell;

    fn index(&self, coord: &Coordinate) -> &Self::Output {
        self.get(coord).expect("coordinate out of bounds")
    }
}

impl IndexMut<&Coordinate> for Grid {
    fn index_mut(&mut self, coord: &Coordinate) -> &mut Self::Output {
        self.get_mut(coord).expect("coordinate out of bounds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_shot_is_rejected_without_change() {
        let mut cell = GridCell::default();
        assert_eq!(cell.resolve_shot(), Ok(None));
        assert!(cell.flags.contains(CellFlag::Missed));
        let before = cell.flags;
        assert_eq!(cell.resolve_shot(), Err(CannotShootReason::AlreadyTargeted));
        assert_eq!(cell.flags, before);
        assert!(!cell.flags.contains(CellFlag::Hit));
    }

    #[test]
    fn display_priority() {
        let mut cell = GridCell::default();
        assert_eq!(cell.display_state(true), DisplayState::Empty);
        cell.disable_placement();
        assert_eq!(cell.display_state(true), DisplayState::Blocked);
        assert_eq!(cell.display_state(false), DisplayState::Empty);
        cell.flags.insert(CellFlag::Occupied);
        assert_eq!(cell.display_state(true), DisplayState::Ship);
        assert_eq!(cell.display_state(false), DisplayState::Empty);
        cell.flags.insert(CellFlag::Sunk);
        assert_eq!(cell.display_state(false), DisplayState::Sunk);
        cell.flags.insert(CellFlag::Hit);
        assert_eq!(cell.display_state(false), DisplayState::Hit);
    }
}
