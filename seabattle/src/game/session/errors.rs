use thiserror::Error;

use crate::{
    board::{FillError, PlaceError, ShotError},
    game::session::Phase,
};

/// Error returned when the session rejects a request. A rejected request never changes
/// the session.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum SessionError {
    /// The request isn't allowed in the current phase.
    #[error("not allowed during {actual}, only during {expected}")]
    WrongPhase {
        /// Phase the request needs.
        expected: Phase,
        /// Phase the session is in.
        actual: Phase,
    },

    /// The player tried to finish placement before placing exactly their whole fleet.
    #[error("the whole fleet must be placed first")]
    FleetIncomplete,

    /// A player other than the active one tried to act.
    #[error("it is not this player's turn")]
    OutOfTurn,

    /// The board or the fleet quota rejected a placement.
    #[error(transparent)]
    Place(#[from] PlaceError),

    /// The opponent's board rejected a shot.
    #[error(transparent)]
    Shot(#[from] ShotError),

    /// Random placement could not finish the fleet.
    #[error(transparent)]
    Fill(#[from] FillError),
}
