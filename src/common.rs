//! Common types: shot results and the errors raised by boards and sessions.

use alloc::string::String;
use core::fmt;

use crate::bitgrid::GridError;

/// Result of resolving an attack against one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotResult {
    /// The cell was empty.
    Miss,
    /// The cell held part of a ship that is still afloat.
    Hit,
    /// The attack hit the last intact cell of a ship, carrying its name.
    Sink(String),
}

impl ShotResult {
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotResult::Miss)
    }
}

/// Errors returned while building a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying grid error (e.g., index out of range).
    Grid(GridError),
    /// Board side length must be positive.
    InvalidBoardSize(usize),
    /// Ship length must be positive.
    InvalidShipLength { ship: String },
    /// Every attack must cost something.
    InvalidMovePenalty(i64),
    /// Sinking a ship may not lower the score.
    NegativeSinkBonus { ship: String, bonus: i64 },
    /// Manual layout does not provide one placement per roster entry.
    LayoutMismatch { ships: usize, placements: usize },
    /// Ship placement overlaps another ship.
    ShipOverlaps { ship: String },
    /// Ship placement runs off the board.
    ShipOutOfBounds { ship: String },
    /// The placement retry budget was spent without finding room for a ship.
    PlacementExhaustion { ship: String, attempts: usize },
}

impl From<GridError> for BoardError {
    fn from(err: GridError) -> Self {
        BoardError::Grid(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Grid(e) => write!(f, "Grid error: {}", e),
            BoardError::InvalidBoardSize(size) => write!(f, "Invalid board size {}", size),
            BoardError::InvalidShipLength { ship } => {
                write!(f, "Ship '{}' must have a positive length", ship)
            }
            BoardError::InvalidMovePenalty(penalty) => {
                write!(f, "Move penalty must be positive, got {}", penalty)
            }
            BoardError::NegativeSinkBonus { ship, bonus } => {
                write!(f, "Ship '{}' has negative sink bonus {}", ship, bonus)
            }
            BoardError::LayoutMismatch { ships, placements } => write!(
                f,
                "Layout has {} placements for {} ships",
                placements, ships
            ),
            BoardError::ShipOverlaps { ship } => {
                write!(f, "Ship '{}' overlaps with another ship", ship)
            }
            BoardError::ShipOutOfBounds { ship } => {
                write!(f, "Ship '{}' placement is out of bounds", ship)
            }
            BoardError::PlacementExhaustion { ship, attempts } => write!(
                f,
                "Unable to place ship '{}' after {} attempts",
                ship, attempts
            ),
        }
    }
}

/// Errors returned by session transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Attack target lies outside the grid.
    InvalidCoordinate { row: usize, col: usize, size: usize },
    /// The fleet is already sunk; reset to play again.
    GameOver,
    /// An occupied cell has no ship in the placement map.
    UnmappedCell { row: usize, col: usize },
    /// Board generation failed.
    Board(BoardError),
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidCoordinate { row, col, size } => write!(
                f,
                "Coordinate ({}, {}) is outside the {}x{} board",
                row, col, size, size
            ),
            GameError::GameOver => write!(f, "Game is over"),
            GameError::UnmappedCell { row, col } => {
                write!(f, "Occupied cell ({}, {}) belongs to no ship", row, col)
            }
            GameError::Board(e) => write!(f, "Board error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

#[cfg(feature = "std")]
impl std::error::Error for GridError {}
