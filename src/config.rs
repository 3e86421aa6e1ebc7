use alloc::vec;
use alloc::vec::Vec;

use crate::common::BoardError;
use crate::ship::ShipSpec;

pub const BOARD_SIZE: usize = 10;
/// Largest supported side length; columns are labelled `A..=Z`.
pub const MAX_BOARD_SIZE: usize = 26;
pub const INITIAL_SCORE: i64 = 1000;
pub const MOVE_PENALTY: i64 = 10;
pub const DEFAULT_SINK_BONUS: i64 = 100;
/// Random draws allowed per ship before generation gives up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// The classic five-ship fleet.
pub fn standard_roster() -> Vec<ShipSpec> {
    vec![
        ShipSpec::new("Carrier", 5),
        ShipSpec::new("Battleship", 4),
        ShipSpec::new("Cruiser", 3),
        ShipSpec::new("Submarine", 3),
        ShipSpec::new("Destroyer", 2),
    ]
}

/// Fixed score adjustments applied by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct ScoringRules {
    pub initial_score: i64,
    /// Subtracted on every new attack, hit or miss.
    pub move_penalty: i64,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            initial_score: INITIAL_SCORE,
            move_penalty: MOVE_PENALTY,
        }
    }
}

/// Everything fixed at session start: board size, fleet and scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct GameConfig {
    pub size: usize,
    pub ships: Vec<ShipSpec>,
    pub rules: ScoringRules,
    pub max_placement_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: BOARD_SIZE,
            ships: standard_roster(),
            rules: ScoringRules::default(),
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

impl GameConfig {
    pub fn new(size: usize, ships: Vec<ShipSpec>) -> Self {
        Self {
            size,
            ships,
            ..Self::default()
        }
    }

    pub fn with_rules(mut self, rules: ScoringRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_max_placement_attempts(mut self, attempts: usize) -> Self {
        self.max_placement_attempts = attempts;
        self
    }

    /// Number of cells occupied by the whole fleet, duplicates included.
    pub fn fleet_cells(&self) -> usize {
        self.ships.iter().map(|s| s.length()).sum()
    }

    /// Reject sizes and rosters no board could be built from, and scoring
    /// where an attack is free or a sink costs points.
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.size == 0 || self.size > MAX_BOARD_SIZE {
            return Err(BoardError::InvalidBoardSize(self.size));
        }
        if let Some(ship) = self.ships.iter().find(|s| s.length() == 0) {
            return Err(BoardError::InvalidShipLength {
                ship: ship.name().into(),
            });
        }
        if self.rules.move_penalty <= 0 {
            return Err(BoardError::InvalidMovePenalty(self.rules.move_penalty));
        }
        if let Some(ship) = self.ships.iter().find(|s| s.sink_bonus() < 0) {
            return Err(BoardError::NegativeSinkBonus {
                ship: ship.name().into(),
                bonus: ship.sink_bonus(),
            });
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl GameConfig {
    /// Parse and validate a JSON configuration. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: GameConfig = serde_json::from_str(json)
            .map_err(|e| anyhow::anyhow!("Invalid game config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration from disk.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", path.display(), e))?;
        Self::from_json(&text)
    }
}
