//! Rules engine for Sea Battle, the Battleship variant played on a 10x10 grid with rows
//! labelled `А`..`К` and a fleet of ten straight ships that may not touch, not even at
//! the corners.
//!
//! [`board`] holds one player's grid and validates placements and shots, [`fleet`]
//! describes how many ships of each length a player owns, and [`game`] drives a
//! two-player hot-seat session through placement, battle and a winner.
//!
//! ```
//! use seabattle::{Board, Coordinate, ShotOutcome};
//!
//! let mut board = Board::new();
//! let ship = vec!["1А".parse().unwrap(), "2А".parse().unwrap()];
//! board.place_ship(ship).unwrap();
//!
//! assert!(board.fire_at(Coordinate::new(1, 0)).unwrap().is_hit());
//! assert!(matches!(
//!     board.fire_at("2А".parse().unwrap()),
//!     Ok(ShotOutcome::Defeated(_))
//! ));
//! assert!(board.all_ships_sunk());
//! ```

pub mod board;
pub mod fleet;
pub mod game;
pub mod ships;

pub use crate::{
    board::{Board, CannotPlaceReason, CannotShootReason, Coordinate, ShotOutcome},
    fleet::{Fleet, FleetTally},
    game::{Phase, Player, Session, SessionError},
    ships::{ShipHandle, ShipId},
};
