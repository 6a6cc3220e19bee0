// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use crate::board::{CannotPlaceReason, Coordinate};

/// Direction a ship's cells run in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// A one-cell ship has no direction.
    Single,
    /// The cells share a row.
    Horizontal,
    /// The cells share a column.
    Vertical,
}

/// Check that the given cells form a straight, gap-free line. The cells must already be
/// sorted; for a line that is both straight and contiguous this leaves them in order
/// along the line.
pub(crate) fn check_line(sorted: &[Coordinate]) -> Result<Orientation, CannotPlaceReason> {
    let (first, rest) = match sorted.split_first() {
        Some(split) => split,
        None => return Err(CannotPlaceReason::EmptyPlacement),
    };
    if rest.is_empty() {
        return Ok(Orientation::Single);
    }
    let orientation = if rest.iter().all(|c| c.row == first.row) {
        Orientation::Horizontal
    } else if rest.iter().all(|c| c.col == first.col) {
        Orientation::Vertical
    } else {
        return Err(CannotPlaceReason::NotStraight);
    };
    let position = |c: &Coordinate| match orientation {
        Orientation::Vertical => c.row,
        _ => c.col,
    };
    let contiguous = sorted
        .windows(2)
        .all(|pair| position(&pair[1]) == position(&pair[0]) + 1);
    if contiguous {
        Ok(orientation)
    } else {
        Err(CannotPlaceReason::NotContiguous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(coords: &[(usize, usize)]) -> Vec<Coordinate> {
        let mut coords: Vec<Coordinate> = coords.iter().copied().map(Coordinate::from).collect();
        coords.sort();
        coords
    }

    #[test]
    fn accepts_lines() {
        assert_eq!(check_line(&sorted(&[(4, 4)])), Ok(Orientation::Single));
        assert_eq!(
            check_line(&sorted(&[(3, 0), (1, 0), (2, 0)])),
            Ok(Orientation::Horizontal)
        );
        assert_eq!(
            check_line(&sorted(&[(7, 5), (7, 3), (7, 4), (7, 6)])),
            Ok(Orientation::Vertical)
        );
    }

    #[test]
    fn rejects_bends_and_gaps() {
        assert_eq!(
            check_line(&sorted(&[(1, 0), (2, 1)])),
            Err(CannotPlaceReason::NotStraight)
        );
        assert_eq!(
            check_line(&sorted(&[(1, 0), (2, 0), (2, 1)])),
            Err(CannotPlaceReason::NotStraight)
        );
        assert_eq!(
            check_line(&sorted(&[(1, 0), (3, 0)])),
            Err(CannotPlaceReason::NotContiguous)
        );
        assert_eq!(
            check_line(&sorted(&[(1, 0), (1, 0)])),
            Err(CannotPlaceReason::NotContiguous)
        );
        assert_eq!(check_line(&[]), Err(CannotPlaceReason::EmptyPlacement));
    }
}
