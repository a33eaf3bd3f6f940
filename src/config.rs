use alloc::vec::Vec;

use crate::ship::ShipSpec;

/// Width and height of every board.
pub const BOARD_SIZE: usize = 5;
/// Maximum number of players admitted to a session.
pub const MAX_PLAYERS: usize = 2;
pub const NUM_SHIPS: usize = 4;
pub const SHIPS: [ShipSpec; NUM_SHIPS] = [
    ShipSpec::new("Submarine", 1, 1),
    ShipSpec::new("Patrol Boat", 2, 1),
    ShipSpec::new("Destroyer", 3, 1),
    ShipSpec::new("Carrier", 3, 1),
];

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = 1 + 2 + 3 + 3;

/// Ordered list of ships every player has to place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    specs: Vec<ShipSpec>,
}

impl Catalog {
    /// The canonical fleet: one each of length 1, 2, 3 and 3.
    pub fn standard() -> Self {
        Self {
            specs: SHIPS.to_vec(),
        }
    }

    /// Build a catalog from arbitrary entries. Intended for tests that need
    /// a smaller fleet.
    pub fn new(specs: Vec<ShipSpec>) -> Self {
        Self { specs }
    }

    pub fn specs(&self) -> &[ShipSpec] {
        &self.specs
    }

    /// Number of ship cells a fully placed board holds.
    pub fn total_cells(&self) -> usize {
        self.specs.iter().map(|s| s.length() * s.count()).sum()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Options a [`GameSession`](crate::GameSession) is built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub catalog: Catalog,
    /// Start the match as soon as the second player joins.
    pub auto_start: bool,
}

impl SessionConfig {
    /// Players place ships manually and the match starts on request.
    pub fn manual_start() -> Self {
        Self {
            auto_start: false,
            ..Self::default()
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            catalog: Catalog::standard(),
            auto_start: true,
        }
    }
}
