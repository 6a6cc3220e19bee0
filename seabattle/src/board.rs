//! Types that make up the game board.

use enumflags2::BitFlags;
use log::{debug, trace};

use crate::{
    fleet::{Fleet, FleetTally},
    ships::{check_line, Orientation, Ship, ShipHandle, ShipId},
};

pub(crate) use self::grid::Grid;
pub use self::{
    coordinate::{Coordinate, Neighbors, ParseCoordinateError, BOARD_SIZE, ROW_LABELS},
    errors::{CannotPlaceReason, CannotShootReason, FillError, PlaceError, ShotError},
    grid::{CellFlag, DisplayState},
};

mod coordinate;
mod errors;
mod grid;
#[cfg(feature = "rng_gen")]
mod random;

/// Handle to a ship that allows getting information about its status.
#[derive(Debug, Copy, Clone)]
pub struct ShipRef<'a> {
    handle: ShipHandle,

    /// Board that owns the ship.
    board: &'a Board,

    ship: &'a Ship,
}

impl<'a> ShipRef<'a> {
    /// Get the handle of the ship on its board.
    pub fn handle(&self) -> ShipHandle {
        self.handle
    }

    /// Get the ID of the ship.
    pub fn id(&self) -> &'a ShipId {
        self.ship.id()
    }

    /// Number of cells the ship covers.
    pub fn len(&self) -> usize {
        self.ship.cells().len()
    }

    /// Direction the ship's cells run in.
    pub fn orientation(&self) -> Orientation {
        self.ship.orientation()
    }

    /// Check if this ship has been sunk.
    pub fn sunk(&self) -> bool {
        !self.ship.is_alive()
    }

    /// Check if this ship is still afloat.
    pub fn is_alive(&self) -> bool {
        self.ship.is_alive()
    }

    /// Get the coordinates of this ship, in row-major order.
    pub fn coords(&self) -> &'a [Coordinate] {
        self.ship.cells()
    }

    /// Get an iterator over the coordinates of this ship and whether those coords have
    /// been hit.
    pub fn hits(&self) -> impl 'a + Iterator<Item = (Coordinate, bool)> {
        let grid = &self.board.grid;
        self.coords()
            .iter()
            .map(move |coord| (*coord, grid[coord].flags.contains(CellFlag::Hit)))
    }
}

/// Reference to a particular cell in the grid.
#[derive(Debug, Copy, Clone)]
pub struct CellRef<'a> {
    /// Coordinate of this cell.
    coord: Coordinate,

    flags: BitFlags<CellFlag>,

    ship: Option<ShipHandle>,

    board: &'a Board,
}

impl<'a> CellRef<'a> {
    /// The grid coordinate of this cell.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }

    /// Raw state flags of this cell.
    pub fn flags(&self) -> BitFlags<CellFlag> {
        self.flags
    }

    /// Whether this cell is part of a ship.
    pub fn occupied(&self) -> bool {
        self.flags.contains(CellFlag::Occupied)
    }

    /// Whether a shot hit a ship on this cell.
    pub fn hit(&self) -> bool {
        self.flags.contains(CellFlag::Hit)
    }

    /// Whether a shot landed on this cell and found only water.
    pub fn missed(&self) -> bool {
        self.flags.contains(CellFlag::Missed)
    }

    /// Whether this cell belongs to a sunk ship.
    pub fn sunk(&self) -> bool {
        self.flags.contains(CellFlag::Sunk)
    }

    /// Whether a shot has already landed here, hit or miss.
    pub fn targeted(&self) -> bool {
        self.hit() || self.missed()
    }

    /// Whether a new ship could still cover this cell.
    pub fn placement_allowed(&self) -> bool {
        !self.flags.contains(CellFlag::Blocked)
    }

    /// The ship reference for the ship that occupies this cell, if any.
    pub fn ship(&self) -> Option<ShipRef<'a>> {
        self.ship.and_then(|handle| self.board.ship(handle))
    }

    /// How this cell should be drawn. With `owner_view` unset, intact ships and the
    /// blocked zone around them stay hidden.
    pub fn display_state(&self, owner_view: bool) -> DisplayState {
        self.board.grid[&self.coord].display_state(owner_view)
    }
}

/// Result of a shot on a single player's board.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ShotOutcome {
    /// The shot did not hit anything.
    Miss,
    /// The shot hit the ship with the given ID, but did not sink it.
    Hit(ShipId),
    /// The shot sank the ship with the given ID, but the board has more ships afloat.
    Sunk(ShipId),
    /// The shot sank the ship with the given ID, and it was the last one afloat.
    Defeated(ShipId),
}

impl ShotOutcome {
    /// Whether the shot hit a ship.
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotOutcome::Miss)
    }

    /// Whether the shot sank a ship.
    pub fn is_sunk(&self) -> bool {
        matches!(self, ShotOutcome::Sunk(_) | ShotOutcome::Defeated(_))
    }

    /// Whether the shooter loses the turn. Only a miss hands the turn over.
    pub fn passes_turn(&self) -> bool {
        !self.is_hit()
    }

    /// Get the id of the ship that was hit.
    pub fn ship(&self) -> Option<&ShipId> {
        match self {
            ShotOutcome::Miss => None,
            ShotOutcome::Hit(ref id)
            | ShotOutcome::Sunk(ref id)
            | ShotOutcome::Defeated(ref id) => Some(id),
        }
    }

    /// Get the id of the ship that was sunk by this shot, if any.
    pub fn sunk_ship(&self) -> Option<&ShipId> {
        match self {
            ShotOutcome::Sunk(ref id) | ShotOutcome::Defeated(ref id) => Some(id),
            _ => None,
        }
    }
}

/// Represents a single player's board: their side of the ocean and the ships on it.
#[derive(Debug, Clone)]
pub struct Board {
    /// Grid of cells.
    grid: Grid,

    /// Ships in the order they were placed. Only ever appended to.
    ships: Vec<Ship>,

    /// Fleet the owner is expected to place.
    fleet: Fleet,
}

impl Board {
    /// Create an empty board expecting the standard fleet.
    pub fn new() -> Self {
        Self::with_fleet(Fleet::STANDARD)
    }

    /// Create an empty board expecting the given fleet.
    pub fn with_fleet(fleet: Fleet) -> Self {
        Self {
            grid: Grid::new(),
            ships: Vec::new(),
            fleet,
        }
    }

    /// Check if the given cells could hold a new ship, without placing it. Returns the
    /// cells sorted along the ship and its orientation.
    ///
    /// Checks run in a fixed order and the first failure wins: emptiness, bounds,
    /// overlap, proximity to other ships, then shape.
    pub fn check_placement(
        &self,
        placement: &[Coordinate],
    ) -> Result<(Vec<Coordinate>, Orientation), CannotPlaceReason> {
        if placement.is_empty() {
            return Err(CannotPlaceReason::EmptyPlacement);
        }
        let mut cells = Vec::with_capacity(placement.len());
        for coord in placement {
            match self.grid.get(coord) {
                Some(cell) => cells.push(cell),
                None => return Err(CannotPlaceReason::OutOfBounds),
            }
        }
        if cells
            .iter()
            .any(|cell| cell.flags.contains(CellFlag::Occupied))
        {
            return Err(CannotPlaceReason::Overlap);
        }
        if cells
            .iter()
            .any(|cell| cell.flags.contains(CellFlag::Blocked))
        {
            return Err(CannotPlaceReason::TooClose);
        }
        let mut sorted = placement.to_vec();
        sorted.sort();
        let orientation = check_line(&sorted)?;
        Ok((sorted, orientation))
    }

    /// Place a ship on the given cells. On failure the board is left untouched.
    ///
    /// On success every cell of the new ship and every cell touching it, diagonals
    /// included, is blocked for further placement. The fleet quota is not checked here;
    /// see [`fleet`](Self::fleet).
    pub fn place_ship(&mut self, placement: Vec<Coordinate>) -> Result<ShipHandle, PlaceError> {
        let (cells, orientation) = match self.check_placement(&placement) {
            Ok(checked) => checked,
            Err(reason) => {
                trace!("rejected placement {:?}: {}", placement, reason);
                return Err(PlaceError::new(reason, placement));
            }
        };
        let handle = ShipHandle(self.ships.len());
        for coord in &cells {
            let cell = &mut self.grid[coord];
            cell.flags.insert(CellFlag::Occupied);
            cell.ship = Some(handle);
        }
        for coord in &cells {
            self.grid[coord].disable_placement();
            for neighbor in coord.neighbors() {
                self.grid[&neighbor].disable_placement();
            }
        }
        let ship = Ship::new(cells, orientation);
        debug!("placed ship {}", ship.id());
        self.ships.push(ship);
        Ok(handle)
    }

    /// Fire a shot at this board, returning a result indicating why the shot was rejected
    /// or what it hit. A rejected shot changes nothing.
    pub fn fire_at(&mut self, coord: Coordinate) -> Result<ShotOutcome, ShotError> {
        let cell = match self.grid.get_mut(&coord) {
            Some(cell) => cell,
            None => return Err(ShotError::new(CannotShootReason::OutOfBounds, coord)),
        };
        let hit_ship = match cell.resolve_shot() {
            Ok(ship) => ship,
            Err(reason) => {
                trace!("rejected shot at {}: {}", coord, reason);
                return Err(ShotError::new(reason, coord));
            }
        };
        let outcome = match hit_ship {
            None => ShotOutcome::Miss,
            Some(ShipHandle(idx)) => {
                let ship = &mut self.ships[idx];
                let sank = ship.recompute_sunk(&mut self.grid);
                let id = ship.id().clone();
                if !sank {
                    ShotOutcome::Hit(id)
                } else if self.all_ships_sunk() {
                    ShotOutcome::Defeated(id)
                } else {
                    ShotOutcome::Sunk(id)
                }
            }
        };
        debug!("shot at {}: {:?}", coord, outcome);
        Ok(outcome)
    }

    /// Returns true if every ship on this board has been sunk. A board with no ships
    /// reports false, so this is only meaningful once placement is over.
    pub fn all_ships_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(|ship| !ship.is_alive())
    }

    /// Number of ships that are still afloat.
    pub fn ships_afloat(&self) -> usize {
        self.ships.iter().filter(|ship| ship.is_alive()).count()
    }

    /// Count the placed ships against the fleet this board expects.
    pub fn fleet(&self) -> FleetTally {
        FleetTally::from_lengths(self.fleet, self.ships.iter().map(|s| s.cells().len()))
    }

    /// Whether the placed ships exactly match the expected fleet.
    pub fn fleet_complete(&self) -> bool {
        self.fleet().is_complete()
    }

    /// Get the ship with the given handle if it exists on this board.
    pub fn ship(&self, handle: ShipHandle) -> Option<ShipRef> {
        self.ships.get(handle.0).map(|ship| ShipRef {
            handle,
            board: self,
            ship,
        })
    }

    /// Get an iterator over all ships on this board, in placement order.
    pub fn iter_ships(&self) -> impl Iterator<Item = ShipRef> {
        self.ships.iter().enumerate().map(move |(idx, ship)| ShipRef {
            handle: ShipHandle(idx),
            board: self,
            ship,
        })
    }

    /// Get a reference to the cell at the given coordinate. Returns `None` if the
    /// coordinate is out of bounds.
    pub fn cell(&self, coord: Coordinate) -> Option<CellRef> {
        self.grid.get(&coord).map(|cell| CellRef {
            coord,
            flags: cell.flags,
            ship: cell.ship,
            board: self,
        })
    }

    /// Get an iterator over the rows of this board, top to bottom. Each row is an
    /// iterator over its cells, left to right.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = CellRef> + '_> + '_ {
        (0..BOARD_SIZE).map(move |row| {
            (1..=BOARD_SIZE).filter_map(move |col| self.cell(Coordinate::new(col, row)))
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(list: &[(usize, usize)]) -> Vec<Coordinate> {
        list.iter().copied().map(Coordinate::from).collect()
    }

    #[test]
    fn placement_checks_run_in_order() {
        let mut board = Board::new();
        board.place_ship(coords(&[(5, 5)])).unwrap();

        let reason = |board: &Board, list: &[(usize, usize)]| {
            board.check_placement(&coords(list)).unwrap_err()
        };
        assert_eq!(reason(&board, &[]), CannotPlaceReason::EmptyPlacement);
        // Off the board beats overlap.
        assert_eq!(
            reason(&board, &[(5, 5), (11, 5)]),
            CannotPlaceReason::OutOfBounds
        );
        // Overlap beats proximity.
        assert_eq!(
            reason(&board, &[(4, 5), (5, 5)]),
            CannotPlaceReason::Overlap
        );
        // Proximity beats shape.
        assert_eq!(
            reason(&board, &[(6, 6), (1, 1)]),
            CannotPlaceReason::TooClose
        );
        assert_eq!(
            reason(&board, &[(1, 1), (2, 2)]),
            CannotPlaceReason::NotStraight
        );
        assert_eq!(
            reason(&board, &[(1, 1), (3, 1)]),
            CannotPlaceReason::NotContiguous
        );
    }

    #[test]
    fn failed_placement_changes_nothing() {
        let mut board = Board::new();
        let err = board
            .place_ship(coords(&[(1, 0), (2, 1)]))
            .unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::NotStraight);
        assert_eq!(err.placement(), &coords(&[(1, 0), (2, 1)])[..]);
        assert_eq!(board.iter_ships().count(), 0);
        assert!(Coordinate::all().all(|c| {
            let cell = board.cell(c).unwrap();
            !cell.occupied() && cell.placement_allowed()
        }));
    }

    #[test]
    fn placement_blocks_buffer_zone() {
        let mut board = Board::new();
        let handle = board
            .place_ship(coords(&[(3, 1), (2, 1)]))
            .unwrap();
        let ship = board.ship(handle).unwrap();
        assert_eq!(ship.coords(), &coords(&[(2, 1), (3, 1)])[..]);
        assert_eq!(ship.orientation(), Orientation::Horizontal);
        assert_eq!(ship.id().as_str(), "2-2Б3Б");

        let blocked: Vec<_> = Coordinate::all()
            .filter(|&c| !board.cell(c).unwrap().placement_allowed())
            .collect();
        // A 4x3 box around the ship, rows А..В, columns 1..4.
        assert_eq!(blocked.len(), 12);
        assert!(blocked
            .iter()
            .all(|c| c.row <= 2 && (1..=4).contains(&c.col)));
    }

    #[test]
    fn shots_hit_sink_and_defeat() {
        let mut board = Board::new();
        board.place_ship(coords(&[(1, 0), (1, 1)])).unwrap();
        board.place_ship(coords(&[(5, 5)])).unwrap();

        assert_eq!(board.fire_at(Coordinate::new(3, 3)), Ok(ShotOutcome::Miss));
        let id = board.iter_ships().next().unwrap().id().clone();
        assert_eq!(
            board.fire_at(Coordinate::new(1, 0)),
            Ok(ShotOutcome::Hit(id.clone()))
        );
        assert_eq!(
            board.fire_at(Coordinate::new(1, 1)),
            Ok(ShotOutcome::Sunk(id))
        );
        assert!(!board.all_ships_sunk());
        assert_eq!(board.ships_afloat(), 1);

        let outcome = board.fire_at(Coordinate::new(5, 5)).unwrap();
        assert!(matches!(outcome, ShotOutcome::Defeated(_)));
        assert!(board.all_ships_sunk());
    }

    #[test]
    fn rejected_shots() {
        let mut board = Board::new();
        let err = board.fire_at(Coordinate::new(0, 0)).unwrap_err();
        assert_eq!(err.reason(), CannotShootReason::OutOfBounds);
        assert_eq!(err.coord(), &Coordinate::new(0, 0));

        board.fire_at(Coordinate::new(2, 2)).unwrap();
        let err = board.fire_at(Coordinate::new(2, 2)).unwrap_err();
        assert_eq!(err.reason(), CannotShootReason::AlreadyTargeted);
    }

    #[test]
    fn empty_board_is_not_defeated() {
        assert!(!Board::new().all_ships_sunk());
    }

    #[test]
    fn rows_cover_the_board() {
        let board = Board::new();
        let rows: Vec<Vec<Coordinate>> = board
            .rows()
            .map(|row| row.map(|cell| cell.coord()).collect())
            .collect();
        assert_eq!(rows.len(), BOARD_SIZE);
        assert!(rows.iter().all(|row| row.len() == BOARD_SIZE));
        assert_eq!(rows[3][4], Coordinate::new(5, 3));
    }
}
