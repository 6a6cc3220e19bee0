#![allow(dead_code)]

use seabattle::{Board, Coordinate, Session};

/// Parse a list of coordinates written like `"1А 2А 3А"`.
pub fn cells(text: &str) -> Vec<Coordinate> {
    text.split_whitespace()
        .map(|c| c.parse().unwrap())
        .collect()
}

/// A complete standard fleet where no two ships touch.
///
/// ```text
///     1 2 3 4 5 6 7 8 9 10
///  А  S S S . . S S S . S
///  Б  . . . . . . . . . .
///  В  S S S S . S S . . .
///  Г  . . . . . . . . . .
///  Д  S S . S S . . . . S
///  Е  . . . . . . . . . .
///  Ж  S . S . . . . . . .
/// ```
pub const LAYOUT: [&str; 10] = [
    "1В 2В 3В 4В",
    "1А 2А 3А",
    "6А 7А 8А",
    "6В 7В",
    "1Д 2Д",
    "4Д 5Д",
    "10А",
    "10Д",
    "1Ж",
    "3Ж",
];

/// Every cell covered by [`LAYOUT`].
pub fn layout_cells() -> Vec<Coordinate> {
    LAYOUT.iter().flat_map(|ship| cells(ship)).collect()
}

/// A board holding the whole of [`LAYOUT`].
pub fn full_board() -> Board {
    let mut board = Board::new();
    for ship in LAYOUT.iter() {
        board.place_ship(cells(ship)).unwrap();
    }
    board
}

/// Place [`LAYOUT`] for the active player and mark them ready.
pub fn place_layout(session: &mut Session) {
    for ship in LAYOUT.iter() {
        session.place_ship(cells(ship)).unwrap();
    }
    session.mark_ready().unwrap();
}

/// A session where both players have placed [`LAYOUT`] and the battle has begun.
pub fn battle_session() -> Session {
    let mut session = Session::new("Anna", "Boris");
    place_layout(&mut session);
    place_layout(&mut session);
    session
}
