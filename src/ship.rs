//! Ship catalog entries, orientations and placed-ship records.

use core::fmt;
use core::str::FromStr;

use crate::config::BOARD_SIZE;
use crate::error::PlacementError;

/// Orientation of a ship on the board.
///
/// Horizontal ships extend along `y` (the column), vertical ships along `x`
/// (the row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Candidate order used by automatic placement.
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// Cell `i` steps away from `(x, y)` along this orientation.
    pub fn step(self, x: usize, y: usize, i: usize) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (x, y + i),
            Orientation::Vertical => (x + i, y),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => f.write_str("horizontal"),
            Orientation::Vertical => f.write_str("vertical"),
        }
    }
}

impl FromStr for Orientation {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("horizontal") || s.eq_ignore_ascii_case("h") {
            Ok(Orientation::Horizontal)
        } else if s.eq_ignore_ascii_case("vertical") || s.eq_ignore_ascii_case("v") {
            Ok(Orientation::Vertical)
        } else {
            Err(PlacementError::BadOrientation(s.into()))
        }
    }
}

/// Catalog entry: ship name, length and how many of it each player gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipSpec {
    name: &'static str,
    length: usize,
    count: usize,
}

impl ShipSpec {
    /// Create a new catalog entry.
    pub const fn new(name: &'static str, length: usize, count: usize) -> Self {
        Self {
            name,
            length,
            count,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// A ship that has been placed on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedShip {
    name: &'static str,
    x: usize,
    y: usize,
    length: usize,
    orientation: Orientation,
}

impl PlacedShip {
    pub(crate) fn new(
        name: &'static str,
        x: usize,
        y: usize,
        length: usize,
        orientation: Orientation,
    ) -> Self {
        Self {
            name,
            x,
            y,
            length,
            orientation,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Origin of the ship (x, y).
    pub fn origin(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Coordinates occupied by the ship, starting at the origin.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |i| self.orientation.step(self.x, self.y, i))
    }

    /// Whether every occupied cell lies on the board.
    pub fn in_bounds(&self) -> bool {
        let (end_x, end_y) = self
            .orientation
            .step(self.x, self.y, self.length.saturating_sub(1));
        self.length > 0 && end_x < BOARD_SIZE && end_y < BOARD_SIZE
    }
}
