//! Orchestration of a whole game between two players sharing one device.
//!
//! [`session`] holds both players' boards and the phase/turn state machine that moves
//! the game from placing ships, through the battle, to a winner. Boards are only ever
//! changed through the session while a game is running.

pub mod session;

pub use self::session::{Phase, Player, Session, SessionError};
