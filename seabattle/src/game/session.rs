//! Two-player hot-seat game: both fleets are placed in turn, then players take turns
//! firing at each other's board until one fleet is sunk.
use std::fmt;

use log::info;
#[cfg(feature = "rng_gen")]
use rand::Rng;

use crate::{
    board::{Board, CannotPlaceReason, Coordinate, PlaceError, ShotOutcome},
    ships::ShipHandle,
};

pub use self::errors::SessionError;

mod errors;

/// One of the two players of a session.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Both players, in turn order.
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    /// Get the opponent of this player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Position of this player in turn order, 0 or 1.
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// Stage of a session.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Players are placing their fleets, one after the other.
    Placement,
    /// Players are firing at each other.
    Battle,
    /// One fleet has been sunk. Nothing more can happen until a reset.
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Phase::Placement => "placement",
            Phase::Battle => "battle",
            Phase::Finished => "finished",
        })
    }
}

/// Turn and phase controller for a game between two players on one device.
///
/// During placement the active player places ships on their own board and then marks
/// themselves ready, handing placement to the other player. Once both are ready the
/// battle starts with [`Player::One`]. A miss passes the turn; a hit lets the shooter
/// fire again. Sinking the last ship of the opponent ends the game.
#[derive(Debug)]
pub struct Session {
    names: [String; 2],
    boards: [Board; 2],
    ready: [bool; 2],
    active: Player,
    phase: Phase,
    winner: Option<Player>,
}

impl Session {
    /// Start a new session in the placement phase with two empty boards.
    pub fn new(one: impl Into<String>, two: impl Into<String>) -> Self {
        Self {
            names: [one.into(), two.into()],
            boards: [Board::new(), Board::new()],
            ready: [false; 2],
            active: Player::One,
            phase: Phase::Placement,
            winner: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Player whose turn it is to place or fire.
    pub fn active(&self) -> Player {
        self.active
    }

    /// Display name of the given player.
    pub fn name(&self, player: Player) -> &str {
        &self.names[player.index()]
    }

    /// The board owned by the given player.
    pub fn board(&self, player: Player) -> &Board {
        &self.boards[player.index()]
    }

    /// Whether the given player has finished placing their fleet.
    pub fn is_ready(&self, player: Player) -> bool {
        self.ready[player.index()]
    }

    /// The winner, once the game is finished.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn active_board_mut(&mut self) -> &mut Board {
        &mut self.boards[self.active.index()]
    }

    /// Place a ship for the active player. The fleet quota is checked before the board
    /// checks the position.
    pub fn place_ship(&mut self, placement: Vec<Coordinate>) -> Result<ShipHandle, SessionError> {
        self.expect_phase(Phase::Placement)?;
        let board = self.active_board_mut();
        if !placement.is_empty() {
            if let Err(reason) = board.fleet().check(placement.len()) {
                debug_assert_eq!(reason, CannotPlaceReason::QuotaExceeded);
                return Err(PlaceError::new(reason, placement).into());
            }
        }
        Ok(board.place_ship(placement)?)
    }

    /// Place the active player's remaining ships at random. Returns the number of ships
    /// placed.
    #[cfg(feature = "rng_gen")]
    pub fn fill_fleet<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, SessionError> {
        self.expect_phase(Phase::Placement)?;
        Ok(self.active_board_mut().fill_fleet(rng)?)
    }

    /// Mark the active player's fleet as placed. Hands placement to the other player, or
    /// starts the battle if they are ready too.
    pub fn mark_ready(&mut self) -> Result<(), SessionError> {
        self.expect_phase(Phase::Placement)?;
        if !self.board(self.active).fleet_complete() {
            return Err(SessionError::FleetIncomplete);
        }
        self.ready[self.active.index()] = true;
        info!("{} is ready", self.name(self.active));
        if self.is_ready(self.active.opponent()) {
            self.phase = Phase::Battle;
            self.active = Player::One;
            info!("battle begins, {} fires first", self.name(self.active));
        } else {
            self.active = self.active.opponent();
        }
        Ok(())
    }

    /// Fire at the opponent of the active player.
    ///
    /// A miss hands the turn to the opponent immediately; a hit keeps it. A shot that
    /// sinks the opponent's last ship finishes the game with the shooter as winner.
    pub fn fire(&mut self, coord: Coordinate) -> Result<ShotOutcome, SessionError> {
        self.expect_phase(Phase::Battle)?;
        let shooter = self.active;
        let outcome = self.boards[shooter.opponent().index()].fire_at(coord)?;
        match outcome {
            ShotOutcome::Miss => self.active = shooter.opponent(),
            ShotOutcome::Defeated(_) => {
                self.phase = Phase::Finished;
                self.winner = Some(shooter);
                info!("{} wins", self.name(shooter));
            }
            ShotOutcome::Hit(_) | ShotOutcome::Sunk(_) => {}
        }
        Ok(outcome)
    }

    /// Fire on behalf of a specific player, rejecting the shot if it isn't their turn.
    pub fn fire_as(
        &mut self,
        player: Player,
        coord: Coordinate,
    ) -> Result<ShotOutcome, SessionError> {
        self.expect_phase(Phase::Battle)?;
        if player != self.active {
            return Err(SessionError::OutOfTurn);
        }
        self.fire(coord)
    }

    /// Throw away both boards and return to placement, keeping the players' names.
    pub fn reset(&mut self) {
        info!("session reset");
        self.boards = [Board::new(), Board::new()];
        self.ready = [false; 2];
        self.active = Player::One;
        self.phase = Phase::Placement;
        self.winner = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new("Player 1", "Player 2")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(col: usize, row: usize) -> Vec<Coordinate> {
        vec![Coordinate::new(col, row)]
    }

    #[test]
    fn quota_is_checked_before_geometry() {
        let mut session = Session::default();
        let line = |row: usize| -> Vec<Coordinate> {
            (1..=4).map(|col| Coordinate::new(col, row)).collect()
        };
        session.place_ship(line(0)).unwrap();
        // Off the board too, but the quota is already used up.
        let mut second = line(5);
        second[3] = Coordinate::new(11, 5);
        match session.place_ship(second) {
            Err(SessionError::Place(err)) => {
                assert_eq!(err.reason(), CannotPlaceReason::QuotaExceeded)
            }
            other => panic!("unexpected {:?}", other),
        }
        let five: Vec<_> = (1..=5).map(|col| Coordinate::new(col, 8)).collect();
        match session.place_ship(five) {
            Err(SessionError::Place(err)) => {
                assert_eq!(err.reason(), CannotPlaceReason::QuotaExceeded)
            }
            other => panic!("unexpected {:?}", other),
        }
        match session.place_ship(Vec::new()) {
            Err(SessionError::Place(err)) => {
                assert_eq!(err.reason(), CannotPlaceReason::EmptyPlacement)
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(session.board(Player::One).iter_ships().count(), 1);
    }

    #[test]
    fn cannot_ready_with_partial_fleet() {
        let mut session = Session::default();
        session.place_ship(single(1, 0)).unwrap();
        assert_eq!(session.mark_ready(), Err(SessionError::FleetIncomplete));
        assert_eq!(session.active(), Player::One);
        assert!(!session.is_ready(Player::One));
    }

    #[test]
    fn no_firing_during_placement() {
        let mut session = Session::default();
        assert_eq!(
            session.fire(Coordinate::new(1, 0)),
            Err(SessionError::WrongPhase {
                expected: Phase::Battle,
                actual: Phase::Placement,
            })
        );
    }
}
