//! Coordinates of cells on the fixed 10x10 board.
use std::{fmt, str::FromStr};

use thiserror::Error;

/// Number of rows and columns on a board.
pub const BOARD_SIZE: usize = 10;

/// Labels of the rows, top to bottom. There is no `Й`.
pub const ROW_LABELS: [char; BOARD_SIZE] = ['А', 'Б', 'В', 'Г', 'Д', 'Е', 'Ж', 'З', 'И', 'К'];

/// Latin stand-ins for [`ROW_LABELS`], accepted when parsing so that the board can be
/// addressed from a keyboard without a Cyrillic layout.
const LATIN_ROW_LABELS: [char; BOARD_SIZE] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'];

/// Position of a cell on the board.
///
/// The row is a 0-based index into [`ROW_LABELS`] and the column is 1-based, the way
/// players call out shots ("5Г"). A coordinate may be constructed out of range: bounds
/// are checked by the [`Board`][crate::board::Board] that resolves it, so that shots and
/// placements off the board can be reported rather than being unrepresentable.
///
/// Ordering is row-major: by row, then by column.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Coordinate {
    /// Row index, `0..BOARD_SIZE` when in bounds.
    pub row: usize,
    /// Column number, `1..=BOARD_SIZE` when in bounds.
    pub col: usize,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from a 1-based column and a 0-based row index.
    pub fn new(col: usize, row: usize) -> Self {
        Self { row, col }
    }

    /// Construct a [`Coordinate`] from a column and a row label. Returns `None` if the
    /// label is not one of the row letters.
    pub fn labelled(col: usize, row: char) -> Option<Self> {
        row_index(row).map(|row| Self::new(col, row))
    }

    /// Whether this coordinate lies on the board.
    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && (1..=BOARD_SIZE).contains(&self.col)
    }

    /// The label of this coordinate's row, if the row is in range.
    pub fn row_label(&self) -> Option<char> {
        ROW_LABELS.get(self.row).copied()
    }

    /// Position of this coordinate in a row-major arena of cells. `None` when out of
    /// bounds.
    pub(crate) fn linearize(&self) -> Option<usize> {
        if self.in_bounds() {
            Some(self.row * BOARD_SIZE + (self.col - 1))
        } else {
            None
        }
    }

    /// Inverse of [`linearize`](Self::linearize).
    pub(crate) fn un_linearize(idx: usize) -> Self {
        Self::new(idx % BOARD_SIZE + 1, idx / BOARD_SIZE)
    }

    /// Iterate over the in-bounds cells touching this one, diagonals included. Yields
    /// nothing for an out-of-bounds coordinate.
    pub fn neighbors(self) -> Neighbors {
        Neighbors {
            center: self,
            next: if self.in_bounds() { 0 } else { OFFSETS.len() },
        }
    }

    /// Iterate over every coordinate of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE * BOARD_SIZE).map(Self::un_linearize)
    }
}

impl From<(usize, usize)> for Coordinate {
    /// Construct a [`Coordinate`] from a `(col, row)` pair.
    fn from((col, row): (usize, usize)) -> Self {
        Self::new(col, row)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.row_label() {
            Some(label) => write!(f, "{}{}", self.col, label),
            None => write!(f, "{}?{}", self.col, self.row),
        }
    }
}

/// Find the row index for a row label. Accepts the Cyrillic labels in either case as well
/// as their Latin stand-ins.
fn row_index(label: char) -> Option<usize> {
    let upper = label.to_uppercase().next()?;
    ROW_LABELS
        .iter()
        .position(|&l| l == upper)
        .or_else(|| LATIN_ROW_LABELS.iter().position(|&l| l == upper))
}

/// Error returned when text can't be read as a [`Coordinate`].
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ParseCoordinateError {
    /// The text did not start with a column number.
    #[error("missing column number in {0:?}")]
    MissingColumn(String),
    /// The row label is not one of the board's row letters.
    #[error("unknown row {0:?}")]
    UnknownRow(String),
}

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    /// Parse coordinates written as `<col><row>`, e.g. `5Г` or `10к`. The column is not
    /// range-checked.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(s.len(), |(i, _)| i);
        let (col, row) = s.split_at(split);
        let col = col
            .parse()
            .map_err(|_| ParseCoordinateError::MissingColumn(s.to_owned()))?;
        let mut chars = row.chars();
        match (chars.next(), chars.next()) {
            (Some(label), None) => Self::labelled(col, label)
                .ok_or_else(|| ParseCoordinateError::UnknownRow(row.to_owned())),
            _ => Err(ParseCoordinateError::UnknownRow(row.to_owned())),
        }
    }
}

/// Row and column offsets of the eight surrounding cells.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Iterator over the neighbors of a coordinate.
#[derive(Debug, Clone)]
pub struct Neighbors {
    center: Coordinate,
    next: usize,
}

impl Iterator for Neighbors {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        while let Some(&(drow, dcol)) = OFFSETS.get(self.next) {
            self.next += 1;
            let row = self.center.row as isize + drow;
            let col = self.center.col as isize + dcol;
            if row < 0 || col < 0 {
                continue;
            }
            let coord = Coordinate::new(col as usize, row as usize);
            if coord.in_bounds() {
                return Some(coord);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_row_then_column() {
        let mut coords = vec![
            Coordinate::new(1, 2),
            Coordinate::new(5, 0),
            Coordinate::new(2, 0),
        ];
        coords.sort();
        assert_eq!(
            coords,
            vec![
                Coordinate::new(2, 0),
                Coordinate::new(5, 0),
                Coordinate::new(1, 2)
            ]
        );
    }

    #[test]
    fn parses_cyrillic_and_latin_rows() {
        assert_eq!("5Г".parse::<Coordinate>(), Ok(Coordinate::new(5, 3)));
        assert_eq!("10к".parse::<Coordinate>(), Ok(Coordinate::new(10, 9)));
        assert_eq!(" 1a ".parse::<Coordinate>(), Ok(Coordinate::new(1, 0)));
        assert_eq!(
            "Г5".parse::<Coordinate>(),
            Err(ParseCoordinateError::MissingColumn("Г5".to_owned()))
        );
        assert_eq!(
            "5Й".parse::<Coordinate>(),
            Err(ParseCoordinateError::UnknownRow("Й".to_owned()))
        );
        assert_eq!(Coordinate::new(10, 9).to_string(), "10К");
    }

    #[test]
    fn corner_has_three_neighbors() {
        let corner = Coordinate::new(1, 0);
        let mut neighbors: Vec<_> = corner.neighbors().collect();
        neighbors.sort();
        assert_eq!(
            neighbors,
            vec![
                Coordinate::new(2, 0),
                Coordinate::new(1, 1),
                Coordinate::new(2, 1)
            ]
        );
        assert_eq!(Coordinate::new(5, 5).neighbors().count(), 8);
        assert_eq!(Coordinate::new(11, 5).neighbors().count(), 0);
    }

    #[test]
    fn linearize_round_trips_in_bounds() {
        for coord in Coordinate::all() {
            let idx = coord.linearize().unwrap();
            assert_eq!(Coordinate::un_linearize(idx), coord);
        }
        assert_eq!(Coordinate::new(0, 0).linearize(), None);
        assert_eq!(Coordinate::new(1, 10).linearize(), None);
    }
}
