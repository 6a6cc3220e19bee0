//! Fleet composition and tracking of which ships a player still has to place.
use std::fmt;

use crate::board::CannotPlaceReason;

/// Length of the longest ship in the fleet.
pub const MAX_SHIP_LEN: usize = 4;

/// Number of ships of each length a player places.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Fleet {
    /// Quota for ships of length `i + 1`.
    quota: [usize; MAX_SHIP_LEN],
}

impl Fleet {
    /// The standard fleet: one 4-cell ship, two 3-cell, three 2-cell and four 1-cell.
    pub const STANDARD: Fleet = Fleet {
        quota: [4, 3, 2, 1],
    };

    /// How many ships of the given length belong to the fleet.
    pub fn quota(&self, len: usize) -> usize {
        len.checked_sub(1)
            .and_then(|i| self.quota.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Total number of ships in the fleet.
    pub fn ship_count(&self) -> usize {
        self.quota.iter().sum()
    }

    /// Total number of cells covered by the fleet.
    pub fn cell_count(&self) -> usize {
        self.lengths().map(|(len, count)| len * count).sum()
    }

    /// Iterate over `(length, quota)` pairs, longest ships first.
    pub fn lengths(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (1..=MAX_SHIP_LEN)
            .rev()
            .map(move |len| (len, self.quota(len)))
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Fleet::STANDARD
    }
}

/// Count of the ships placed so far against a [`Fleet`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FleetTally {
    fleet: Fleet,
    placed: [usize; MAX_SHIP_LEN],
}

impl FleetTally {
    /// Start a tally with no ships placed.
    pub fn new(fleet: Fleet) -> Self {
        Self {
            fleet,
            placed: [0; MAX_SHIP_LEN],
        }
    }

    /// Build a tally from the lengths of ships already placed. Lengths outside the fleet
    /// are ignored.
    pub fn from_lengths(fleet: Fleet, lengths: impl IntoIterator<Item = usize>) -> Self {
        let mut tally = Self::new(fleet);
        for len in lengths {
            if let Some(slot) = len.checked_sub(1).and_then(|i| tally.placed.get_mut(i)) {
                *slot += 1;
            }
        }
        tally
    }

    /// The fleet being tallied against.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Number of ships of the given length placed so far.
    pub fn placed(&self, len: usize) -> usize {
        len.checked_sub(1)
            .and_then(|i| self.placed.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Number of ships of the given length still to place.
    pub fn remaining(&self, len: usize) -> usize {
        self.fleet.quota(len).saturating_sub(self.placed(len))
    }

    /// Check whether another ship of the given length may be placed.
    pub fn check(&self, len: usize) -> Result<(), CannotPlaceReason> {
        if self.remaining(len) > 0 {
            Ok(())
        } else {
            Err(CannotPlaceReason::QuotaExceeded)
        }
    }

    /// Whether the placed ships exactly match the fleet.
    pub fn is_complete(&self) -> bool {
        (1..=MAX_SHIP_LEN).all(|len| self.placed(len) == self.fleet.quota(len))
    }

    /// Iterate over `(length, remaining)` pairs for lengths with ships left to place,
    /// longest first.
    pub fn pending(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.fleet
            .lengths()
            .map(move |(len, _)| (len, self.remaining(len)))
            .filter(|&(_, remaining)| remaining > 0)
    }
}

impl fmt::Display for FleetTally {
    /// Summarize the ships left to place as `<count>x<length>`, e.g. `1x4, 2x3`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut pending = self.pending();
        match pending.next() {
            None => f.write_str("all ships placed"),
            Some((len, count)) => {
                write!(f, "{}x{}", count, len)?;
                for (len, count) in pending {
                    write!(f, ", {}x{}", count, len)?;
                }
                Ok(())
            }
        }
    }
}
