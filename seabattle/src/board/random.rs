//! Random completion of a player's fleet.
use log::debug;
use rand::Rng;

use crate::board::{Board, Coordinate, FillError, BOARD_SIZE};

/// Number of random positions tried for each ship before giving up.
const ATTEMPTS_PER_SHIP: usize = 1000;

impl Board {
    /// Place every ship still missing from the fleet at random legal positions, longest
    /// first. Returns the number of ships placed.
    ///
    /// Either every missing ship is placed or none is: on error the board is left as it
    /// was. An empty board never fails with the standard fleet in practice, but a board
    /// already crowded by hand-placed ships can.
    pub fn fill_fleet<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, FillError> {
        let mut scratch = self.clone();
        let mut placed = 0;
        let pending: Vec<(usize, usize)> = scratch.fleet().pending().collect();
        for (len, count) in pending {
            for _ in 0..count {
                if !scratch.place_random(rng, len) {
                    debug!("no room for a ship of length {}, board left unchanged", len);
                    return Err(FillError::new(len));
                }
                placed += 1;
            }
        }
        *self = scratch;
        debug!("randomly placed {} ships", placed);
        Ok(placed)
    }

    /// Try random starting cells and directions until a ship of the given length fits.
    fn place_random<R: Rng + ?Sized>(&mut self, rng: &mut R, len: usize) -> bool {
        for _ in 0..ATTEMPTS_PER_SHIP {
            let horizontal: bool = rng.gen();
            let (cols, rows) = if horizontal {
                (BOARD_SIZE + 1 - len, BOARD_SIZE)
            } else {
                (BOARD_SIZE, BOARD_SIZE + 1 - len)
            };
            let col = rng.gen_range(1, cols + 1);
            let row = rng.gen_range(0, rows);
            let placement = (0..len)
                .map(|i| {
                    if horizontal {
                        Coordinate::new(col + i, row)
                    } else {
                        Coordinate::new(col, row + i)
                    }
                })
                .collect();
            if self.place_ship(placement).is_ok() {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn fills_empty_board() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut board = Board::new();
        assert_eq!(board.fill_fleet(&mut rng), Ok(10));
        assert!(board.fleet_complete());
        assert_eq!(
            Coordinate::all()
                .filter(|&c| board.cell(c).unwrap().occupied())
                .count(),
            20
        );
    }

    #[test]
    fn crowded_board_is_left_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = Board::new();
        // Blocks everything but column 10 and row К, too little room for the rest.
        for &row in &[1, 4, 7] {
            for &col in &[2, 5, 8] {
                board.place_ship(vec![Coordinate::new(col, row)]).unwrap();
            }
        }
        let snapshot = |board: &Board| -> Vec<_> {
            Coordinate::all()
                .map(|c| board.cell(c).unwrap().flags())
                .collect()
        };
        let before = snapshot(&board);

        let err = board.fill_fleet(&mut rng).unwrap_err();
        assert!(err.ship_len() > 1);
        assert_eq!(board.iter_ships().count(), 9);
        assert_eq!(snapshot(&board), before);
    }

    #[test]
    fn completes_partial_fleet() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut board = Board::new();
        board
            .place_ship(vec![
                Coordinate::new(1, 0),
                Coordinate::new(2, 0),
                Coordinate::new(3, 0),
                Coordinate::new(4, 0),
            ])
            .unwrap();
        assert_eq!(board.fill_fleet(&mut rng), Ok(9));
        assert!(board.fleet_complete());
        // Nothing left to place.
        assert_eq!(board.fill_fleet(&mut rng), Ok(0));
    }
}
