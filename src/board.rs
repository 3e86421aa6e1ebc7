//! Board occupancy, the cell→ship placement map and random board generation.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::bitgrid::{BitGrid, GridError};
use crate::common::BoardError;
use crate::config::MAX_PLACEMENT_ATTEMPTS;
use crate::ship::{Coord, Orientation, PlacedShip, Placement, ShipSpec};

/// Occupancy grid of one session: `true` where a ship sits.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: BitGrid,
}

impl Board {
    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.cells.size()
    }

    /// Whether a ship occupies `(row, col)`.
    pub fn is_occupied(&self, row: usize, col: usize) -> Result<bool, GridError> {
        self.cells.get(row, col)
    }

    /// Whether `(row, col)` is on the board.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.contains(row, col)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.count_ones()
    }

    /// Occupied cells in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter_set()
    }

    /// Raw occupancy grid.
    pub fn grid(&self) -> &BitGrid {
        &self.cells
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board {{ {:?} }}", self.cells)
    }
}

/// Which ship occupies each occupied cell.
///
/// Every occupied cell has exactly one entry. Entries remember the roster
/// index of their ship so ships that share a name stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlacementMap {
    cells: BTreeMap<Coord, usize>,
    ships: Vec<PlacedShip>,
}

impl PlacementMap {
    /// Name of the ship at `cell`, if any.
    pub fn name_at(&self, cell: Coord) -> Option<&str> {
        self.ship_at(cell).map(|(_, ship)| ship.name())
    }

    /// Roster index and placed ship at `cell`, if any.
    pub fn ship_at(&self, cell: Coord) -> Option<(usize, &PlacedShip)> {
        let idx = *self.cells.get(&cell)?;
        self.ships.get(idx).map(|ship| (idx, ship))
    }

    /// Ships in roster order.
    pub fn ships(&self) -> &[PlacedShip] {
        &self.ships
    }

    /// Number of mapped cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `(cell, ship name)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &str)> + '_ {
        self.cells
            .iter()
            .map(move |(cell, idx)| (*cell, self.ships[*idx].name()))
    }

    fn insert(&mut self, ship: PlacedShip) {
        let idx = self.ships.len();
        for cell in ship.cells() {
            self.cells.insert(cell, idx);
        }
        self.ships.push(ship);
    }
}

/// Builds boards for a fixed side length by rejection sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGenerator {
    size: usize,
    max_attempts: usize,
}

impl BoardGenerator {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }

    /// Limit the number of random draws spent on each ship.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Place every ship of the roster, in order, at a uniformly random anchor
    /// and orientation, redrawing until the ship fits. Either the whole fleet
    /// is placed or an error is returned.
    pub fn generate<R: Rng>(
        &self,
        rng: &mut R,
        ships: &[ShipSpec],
    ) -> Result<(Board, PlacementMap), BoardError> {
        self.check_roster(ships)?;
        let mut occupied = BitGrid::new(self.size);
        let mut placements = PlacementMap::default();
        for spec in ships {
            let placement = self.random_placement(rng, &occupied, spec)?;
            let ship = PlacedShip::new(spec.clone(), placement);
            for (r, c) in ship.cells() {
                occupied.set(r, c)?;
            }
            placements.insert(ship);
        }
        log::debug!(
            "generated {}x{} board with {} ships ({} cells)",
            self.size,
            self.size,
            ships.len(),
            occupied.count_ones()
        );
        Ok((Board { cells: occupied }, placements))
    }

    /// Build a board from explicit placements, one per roster entry.
    pub fn arrange(
        &self,
        ships: &[ShipSpec],
        layout: &[Placement],
    ) -> Result<(Board, PlacementMap), BoardError> {
        self.check_roster(ships)?;
        if ships.len() != layout.len() {
            return Err(BoardError::LayoutMismatch {
                ships: ships.len(),
                placements: layout.len(),
            });
        }
        let mut occupied = BitGrid::new(self.size);
        let mut placements = PlacementMap::default();
        for (spec, placement) in ships.iter().zip(layout) {
            let mask = self.ship_mask(spec, placement).ok_or_else(|| {
                BoardError::ShipOutOfBounds {
                    ship: spec.name().into(),
                }
            })?;
            if occupied.intersects(&mask)? {
                return Err(BoardError::ShipOverlaps {
                    ship: spec.name().into(),
                });
            }
            occupied.union_with(&mask)?;
            placements.insert(PlacedShip::new(spec.clone(), *placement));
        }
        Ok((Board { cells: occupied }, placements))
    }

    /// Draw anchors and orientations until one lands entirely on free,
    /// in-bounds cells.
    fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        occupied: &BitGrid,
        spec: &ShipSpec,
    ) -> Result<Placement, BoardError> {
        for _ in 0..self.max_attempts {
            let row = rng.random_range(0..self.size);
            let col = rng.random_range(0..self.size);
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let placement = Placement::new(row, col, orientation);
            let free = placement
                .cells(spec.length())
                .all(|(r, c)| occupied.contains(r, c) && !occupied.get(r, c).unwrap_or(true));
            if free {
                return Ok(placement);
            }
        }
        log::warn!(
            "gave up placing '{}' after {} attempts",
            spec.name(),
            self.max_attempts
        );
        Err(BoardError::PlacementExhaustion {
            ship: spec.name().into(),
            attempts: self.max_attempts,
        })
    }

    /// Occupancy mask of one ship, or `None` if it leaves the board.
    fn ship_mask(&self, spec: &ShipSpec, placement: &Placement) -> Option<BitGrid> {
        BitGrid::from_cells(self.size, placement.cells(spec.length())).ok()
    }

    fn check_roster(&self, ships: &[ShipSpec]) -> Result<(), BoardError> {
        if self.size == 0 {
            return Err(BoardError::InvalidBoardSize(self.size));
        }
        match ships.iter().find(|s| s.length() == 0) {
            Some(ship) => Err(BoardError::InvalidShipLength {
                ship: ship.name().into(),
            }),
            None => Ok(()),
        }
    }
}

/// Generate a `size×size` board for `ships` with the default retry budget.
pub fn generate<R: Rng>(
    rng: &mut R,
    size: usize,
    ships: &[ShipSpec],
) -> Result<(Board, PlacementMap), BoardError> {
    BoardGenerator::new(size).generate(rng, ships)
}
