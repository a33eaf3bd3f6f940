//! Player board: a 5x5 grid of cells, the ships placed on it and the ships
//! still waiting to be placed.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::config::{Catalog, BOARD_SIZE};
use crate::error::PlacementError;
use crate::ship::{Orientation, PlacedShip, ShipSpec};

/// Grid of cell states indexed as `cells[x][y]`.
pub type Grid = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Ship,
    Hit,
    Miss,
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Ship => '#',
            Cell::Hit => 'X',
            Cell::Miss => 'o',
        }
    }
}

/// Result of firing at a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shot {
    Hit,
    Miss,
}

/// A ship record as carried in a [`BoardView`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipRecord {
    pub name: String,
    pub x: usize,
    pub y: usize,
    pub length: usize,
    pub orientation: Orientation,
}

/// Serializable copy of a board, sent to clients after every move.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardView {
    pub cells: Grid,
    pub ships: Vec<ShipRecord>,
}

impl BoardView {
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.cells.get(x).and_then(|row| row.get(y)).copied()
    }

    /// Number of cells still holding an unhit ship segment.
    pub fn ship_cells_left(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| **c == Cell::Ship)
            .count()
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Grid,
    ships: Vec<PlacedShip>,
    inventory: Vec<(ShipSpec, usize)>,
}

impl Board {
    /// Empty board expecting every ship of `catalog`.
    pub fn new(catalog: &Catalog) -> Self {
        Board {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
            ships: Vec::new(),
            inventory: catalog.specs().iter().map(|s| (*s, s.count())).collect(),
        }
    }

    pub fn cells(&self) -> &Grid {
        &self.cells
    }

    /// Cell at (x, y), or `None` off the board.
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.cells.get(x).and_then(|row| row.get(y)).copied()
    }

    /// Ships placed so far, in placement order.
    pub fn ships(&self) -> &[PlacedShip] {
        &self.ships
    }

    /// How many ships named `name` are still to be placed.
    pub fn remaining(&self, name: &str) -> Option<usize> {
        self.inventory
            .iter()
            .find(|(spec, _)| spec.name() == name)
            .map(|(_, left)| *left)
    }

    /// Returns `true` once every catalog ship is on the board.
    pub fn is_fully_placed(&self) -> bool {
        self.inventory.iter().all(|(_, left)| *left == 0)
    }

    /// Fit-and-no-overlap rule: every cell the ship would occupy must be on
    /// the board and `Empty`.
    pub fn check_placement(
        &self,
        length: usize,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        if length == 0 || x >= BOARD_SIZE || y >= BOARD_SIZE {
            return Err(PlacementError::OutOfBounds);
        }
        for i in 0..length {
            let (cx, cy) = orientation.step(x, y, i);
            match self.cell(cx, cy) {
                None => return Err(PlacementError::OutOfBounds),
                Some(Cell::Empty) => {}
                Some(_) => return Err(PlacementError::Overlap),
            }
        }
        Ok(())
    }

    /// Place the next ship named `name` at (x, y).
    pub fn place(
        &mut self,
        name: &str,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> Result<PlacedShip, PlacementError> {
        let idx = self
            .inventory
            .iter()
            .position(|(spec, _)| spec.name() == name)
            .ok_or_else(|| PlacementError::UnknownShip(name.to_string()))?;
        let (spec, left) = self.inventory[idx];
        if left == 0 {
            return Err(PlacementError::NoneRemaining(name.to_string()));
        }
        self.check_placement(spec.length(), x, y, orientation)?;
        let ship = PlacedShip::new(spec.name(), x, y, spec.length(), orientation);
        self.commit(ship);
        self.inventory[idx].1 -= 1;
        Ok(ship)
    }

    /// First origin in row-major order, trying horizontal before vertical,
    /// where a ship of `length` fits.
    pub fn first_fit(&self, length: usize) -> Option<(usize, usize, Orientation)> {
        (0..BOARD_SIZE)
            .flat_map(|x| (0..BOARD_SIZE).map(move |y| (x, y)))
            .flat_map(|(x, y)| Orientation::ALL.into_iter().map(move |o| (x, y, o)))
            .find(|&(x, y, o)| self.check_placement(length, x, y, o).is_ok())
    }

    /// Automatically place every ship still in the inventory, in catalog
    /// order.
    pub fn place_remaining(&mut self) -> Result<(), PlacementError> {
        for idx in 0..self.inventory.len() {
            let (spec, left) = self.inventory[idx];
            for _ in 0..left {
                let (x, y, orientation) = self
                    .first_fit(spec.length())
                    .ok_or_else(|| PlacementError::NoRoom(spec.name().to_string()))?;
                self.commit(PlacedShip::new(
                    spec.name(),
                    x,
                    y,
                    spec.length(),
                    orientation,
                ));
                self.inventory[idx].1 -= 1;
            }
        }
        Ok(())
    }

    fn commit(&mut self, ship: PlacedShip) {
        for (x, y) in ship.cells() {
            self.cells[x][y] = Cell::Ship;
        }
        self.ships.push(ship);
    }

    /// Fire at (x, y). Ship cells turn into hits, empty cells into misses;
    /// already resolved cells keep their state and count as a miss. `None`
    /// when (x, y) is off the board.
    pub fn fire(&mut self, x: usize, y: usize) -> Option<Shot> {
        let cell = self.cells.get_mut(x)?.get_mut(y)?;
        let shot = match *cell {
            Cell::Ship => {
                *cell = Cell::Hit;
                Shot::Hit
            }
            Cell::Empty => {
                *cell = Cell::Miss;
                Shot::Miss
            }
            Cell::Hit | Cell::Miss => Shot::Miss,
        };
        Some(shot)
    }

    /// Number of cells still holding an unhit ship segment.
    pub fn ship_cells_left(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| **c == Cell::Ship)
            .count()
    }

    /// Returns `true` when no unhit ship segment remains.
    pub fn all_sunk(&self) -> bool {
        self.ship_cells_left() == 0
    }

    pub fn view(&self) -> BoardView {
        BoardView::from(self)
    }
}

impl From<&Board> for BoardView {
    fn from(b: &Board) -> Self {
        BoardView {
            cells: b.cells,
            ships: b
                .ships
                .iter()
                .map(|s| {
                    let (x, y) = s.origin();
                    ShipRecord {
                        name: s.name().to_string(),
                        x,
                        y,
                        length: s.length(),
                        orientation: s.orientation(),
                    }
                })
                .collect(),
        }
    }
}
