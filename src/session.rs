//! The single-player game session: attack resolution, scoring and game over.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use rand::Rng;

use crate::{
    board::{Board, BoardGenerator, PlacementMap},
    common::{BoardError, GameError, ShotResult},
    config::GameConfig,
    ship::{Coord, Placement},
};

/// Cells attacked so far and whether each one held a ship at the time.
///
/// Presence (`contains`) and outcome (`get`) are separate questions: a cell
/// that was attacked and missed is present with `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttackLog {
    entries: BTreeMap<Coord, bool>,
}

impl AttackLog {
    /// Whether `cell` has been attacked.
    pub fn contains(&self, cell: Coord) -> bool {
        self.entries.contains_key(&cell)
    }

    /// Recorded hit (`true`) or miss (`false`) for `cell`, if attacked.
    pub fn get(&self, cell: Coord) -> Option<bool> {
        self.entries.get(&cell).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.entries.values().filter(|hit| **hit).count()
    }

    /// `(cell, hit)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, bool)> + '_ {
        self.entries.iter().map(|(cell, hit)| (*cell, *hit))
    }

    /// Insert a new entry. Returns `false` and leaves the log untouched when
    /// `cell` is already present.
    fn record(&mut self, cell: Coord, hit: bool) -> bool {
        if self.contains(cell) {
            return false;
        }
        self.entries.insert(cell, hit);
        true
    }
}

/// Current status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionStatus {
    Active,
    Over,
}

/// Snapshot returned by [`GameSession::attack`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub cell: Coord,
    pub result: ShotResult,
    /// Score after the attack.
    pub score: i64,
    /// Whether the whole fleet is sunk.
    pub game_over: bool,
    /// The cell had already been attacked; nothing changed.
    pub repeated: bool,
}

/// One game: a generated board plus everything that changes as the player
/// attacks it.
///
/// The board and placements never change after construction. A new board is
/// only produced by [`GameSession::reset`], which replaces the whole session.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    placements: PlacementMap,
    attacks: AttackLog,
    hits_by_name: BTreeMap<String, usize>,
    hits_by_ship: Vec<usize>,
    fleet_cells: usize,
    score: i64,
    over: bool,
}

impl GameSession {
    /// Start a session on a freshly generated board.
    pub fn new<R: Rng>(config: GameConfig, rng: &mut R) -> Result<Self, BoardError> {
        config.validate()?;
        let (board, placements) = BoardGenerator::new(config.size)
            .with_max_attempts(config.max_placement_attempts)
            .generate(rng, &config.ships)?;
        Ok(Self::from_parts(config, board, placements))
    }

    /// Start a session on a board with fixed placements, one per roster entry.
    pub fn with_layout(config: GameConfig, layout: &[Placement]) -> Result<Self, BoardError> {
        config.validate()?;
        let (board, placements) = BoardGenerator::new(config.size).arrange(&config.ships, layout)?;
        Ok(Self::from_parts(config, board, placements))
    }

    fn from_parts(config: GameConfig, board: Board, placements: PlacementMap) -> Self {
        let fleet_cells = config.fleet_cells();
        let score = config.rules.initial_score;
        let ship_count = placements.ships().len();
        log::info!(
            "new {}x{} session: {} ships, {} cells",
            config.size,
            config.size,
            ship_count,
            fleet_cells
        );
        Self {
            config,
            board,
            placements,
            attacks: AttackLog::default(),
            hits_by_name: BTreeMap::new(),
            hits_by_ship: vec![0; ship_count],
            fleet_cells,
            score,
            over: false,
        }
    }

    /// Discard all state and start over on a newly generated board.
    ///
    /// On error the current session is left as it was.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        *self = Self::new(self.config.clone(), rng)?;
        Ok(())
    }

    /// Attack `(row, col)`.
    ///
    /// Repeating an attack is a no-op that reports the recorded result with
    /// `repeated` set. Attacks after the fleet is sunk are rejected.
    pub fn attack(&mut self, row: usize, col: usize) -> Result<AttackOutcome, GameError> {
        if !self.board.contains(row, col) {
            return Err(GameError::InvalidCoordinate {
                row,
                col,
                size: self.board.size(),
            });
        }
        if self.over {
            return Err(GameError::GameOver);
        }
        let cell = (row, col);
        if let Some(hit) = self.attacks.get(cell) {
            log::debug!("repeat attack at {:?} ignored", cell);
            return Ok(self.outcome(cell, if hit { ShotResult::Hit } else { ShotResult::Miss }, true));
        }

        let hit = self
            .board
            .is_occupied(row, col)
            .map_err(BoardError::from)?;
        let ship = if hit {
            let (idx, _) = self
                .placements
                .ship_at(cell)
                .ok_or(GameError::UnmappedCell { row, col })?;
            Some(idx)
        } else {
            None
        };

        self.attacks.record(cell, hit);
        self.score = self.score.saturating_sub(self.config.rules.move_penalty);

        let result = match ship {
            Some(idx) => self.register_hit(idx),
            None => ShotResult::Miss,
        };

        if self.fleet_sunk() {
            if !self.over {
                log::info!(
                    "fleet sunk after {} attacks, final score {}",
                    self.attacks.len(),
                    self.score
                );
            }
            self.over = true;
        }
        log::debug!("attack {:?}: {:?}, score {}", cell, result, self.score);
        Ok(self.outcome(cell, result, false))
    }

    /// Count a hit against roster entry `idx` and pay its bonus if this was
    /// the ship's last intact cell.
    fn register_hit(&mut self, idx: usize) -> ShotResult {
        let spec = self.placements.ships()[idx].spec();
        *self.hits_by_name.entry(String::from(spec.name())).or_insert(0) += 1;
        self.hits_by_ship[idx] += 1;
        if self.hits_by_ship[idx] == spec.length() {
            self.score = self.score.saturating_add(spec.sink_bonus());
            log::info!("{} sunk, +{}", spec.name(), spec.sink_bonus());
            ShotResult::Sink(String::from(spec.name()))
        } else {
            ShotResult::Hit
        }
    }

    fn outcome(&self, cell: Coord, result: ShotResult, repeated: bool) -> AttackOutcome {
        AttackOutcome {
            cell,
            result,
            score: self.score,
            game_over: self.over,
            repeated,
        }
    }

    /// Whether every fleet cell has been hit. Recomputed from the per-name
    /// hit counts.
    fn fleet_sunk(&self) -> bool {
        self.hits_by_name.values().sum::<usize>() == self.fleet_cells
    }

    /// Whether the game has ended. Once `true`, stays `true` until reset.
    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn status(&self) -> SessionStatus {
        if self.over {
            SessionStatus::Over
        } else {
            SessionStatus::Active
        }
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn placements(&self) -> &PlacementMap {
        &self.placements
    }

    pub fn attacks(&self) -> &AttackLog {
        &self.attacks
    }

    /// Number of attacks made (repeats excluded).
    pub fn moves(&self) -> usize {
        self.attacks.len()
    }

    /// Hits landed on ships called `name`.
    pub fn hits_for(&self, name: &str) -> usize {
        self.hits_by_name.get(name).copied().unwrap_or(0)
    }

    pub fn hits_per_ship_name(&self) -> &BTreeMap<String, usize> {
        &self.hits_by_name
    }

    /// Total cells the fleet occupies.
    pub fn fleet_cells(&self) -> usize {
        self.fleet_cells
    }

    /// Whether the roster entry at `idx` has been sunk.
    pub fn is_sunk(&self, idx: usize) -> bool {
        match (self.placements.ships().get(idx), self.hits_by_ship.get(idx)) {
            (Some(ship), Some(hits)) => *hits == ship.spec().length(),
            _ => false,
        }
    }

    /// Names of sunk ships, in roster order.
    pub fn sunk_ships(&self) -> Vec<&str> {
        self.placements
            .ships()
            .iter()
            .enumerate()
            .filter(|(i, _)| self.is_sunk(*i))
            .map(|(_, ship)| ship.name())
            .collect()
    }

    /// Ships still afloat.
    pub fn ships_remaining(&self) -> usize {
        self.placements.ships().len() - self.sunk_ships().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ScoringRules, DEFAULT_SINK_BONUS, INITIAL_SCORE, MOVE_PENALTY};
    use crate::ship::{Orientation, ShipSpec};
    use rand::{rngs::SmallRng, SeedableRng};

    fn two_destroyers() -> GameSession {
        let config = GameConfig::new(
            4,
            vec![
                ShipSpec::new("Destroyer", 2).with_bonus(50),
                ShipSpec::new("Destroyer", 2).with_bonus(50),
            ],
        );
        GameSession::with_layout(
            config,
            &[
                Placement::new(0, 0, Orientation::Horizontal),
                Placement::new(2, 0, Orientation::Horizontal),
            ],
        )
        .unwrap()
    }

    #[test]
    fn miss_costs_penalty() {
        let mut session = two_destroyers();
        let out = session.attack(3, 3).unwrap();
        assert_eq!(out.result, ShotResult::Miss);
        assert_eq!(out.score, INITIAL_SCORE - MOVE_PENALTY);
        assert!(!out.game_over);
        assert_eq!(session.attacks().get((3, 3)), Some(false));
        assert!(session.attacks().contains((3, 3)));
        assert!(!session.attacks().contains((3, 2)));
    }

    #[test]
    fn repeat_attack_is_noop() {
        let mut session = two_destroyers();
        session.attack(0, 0).unwrap();
        let before = session.score();
        let again = session.attack(0, 0).unwrap();
        assert!(again.repeated);
        assert_eq!(again.result, ShotResult::Hit);
        assert_eq!(session.score(), before);
        assert_eq!(session.moves(), 1);
        assert_eq!(session.hits_for("Destroyer"), 1);
    }

    #[test]
    fn same_name_ships_sink_independently() {
        let mut session = two_destroyers();
        // One hit on each destroyer: two "Destroyer" hits, nothing sunk.
        assert_eq!(session.attack(0, 0).unwrap().result, ShotResult::Hit);
        assert_eq!(session.attack(2, 0).unwrap().result, ShotResult::Hit);
        assert_eq!(session.hits_for("Destroyer"), 2);
        assert!(session.sunk_ships().is_empty());
        assert_eq!(session.score(), INITIAL_SCORE - 2 * MOVE_PENALTY);

        let sink = session.attack(0, 1).unwrap();
        assert_eq!(sink.result, ShotResult::Sink("Destroyer".into()));
        assert_eq!(sink.score, INITIAL_SCORE - 3 * MOVE_PENALTY + 50);
        assert!(!sink.game_over);

        let last = session.attack(2, 1).unwrap();
        assert_eq!(last.result, ShotResult::Sink("Destroyer".into()));
        assert_eq!(last.score, INITIAL_SCORE - 4 * MOVE_PENALTY + 100);
        assert!(last.game_over);
        assert_eq!(session.status(), SessionStatus::Over);
        assert_eq!(session.ships_remaining(), 0);
    }

    #[test]
    fn attacks_after_game_over_are_rejected() {
        let config = GameConfig::new(2, vec![ShipSpec::new("Submarine", 1)]);
        let mut session =
            GameSession::with_layout(config, &[Placement::new(1, 1, Orientation::Vertical)])
                .unwrap();
        assert!(session.attack(1, 1).unwrap().game_over);
        let score = session.score();
        assert_eq!(session.attack(0, 0), Err(GameError::GameOver));
        assert_eq!(session.score(), score);
        assert!(session.is_over());
        assert_eq!(session.moves(), 1);
    }

    #[test]
    fn out_of_range_is_invalid_coordinate() {
        let mut session = two_destroyers();
        assert_eq!(
            session.attack(4, 0),
            Err(GameError::InvalidCoordinate { row: 4, col: 0, size: 4 })
        );
        assert_eq!(session.score(), INITIAL_SCORE);
        assert!(session.attacks().is_empty());
    }

    #[test]
    fn custom_rules_are_applied() {
        let config = GameConfig::new(3, vec![ShipSpec::new("Submarine", 1)]).with_rules(
            ScoringRules {
                initial_score: 20,
                move_penalty: 7,
            },
        );
        let mut session =
            GameSession::with_layout(config, &[Placement::new(0, 0, Orientation::Horizontal)])
                .unwrap();
        assert_eq!(session.score(), 20);
        session.attack(2, 2).unwrap();
        let out = session.attack(0, 0).unwrap();
        assert_eq!(out.score, 20 - 14 + DEFAULT_SINK_BONUS);
    }

    #[test]
    fn extreme_scores_saturate() {
        let ship = vec![ShipSpec::new("Submarine", 1)];
        let layout = [Placement::new(0, 0, Orientation::Horizontal)];

        let floor = GameConfig::new(2, ship.clone()).with_rules(ScoringRules {
            initial_score: i64::MIN,
            move_penalty: MOVE_PENALTY,
        });
        let mut session = GameSession::with_layout(floor, &layout).unwrap();
        assert_eq!(session.attack(1, 1).unwrap().score, i64::MIN);

        let ceiling = GameConfig::new(2, ship).with_rules(ScoringRules {
            initial_score: i64::MAX,
            move_penalty: MOVE_PENALTY,
        });
        let mut session = GameSession::with_layout(ceiling, &layout).unwrap();
        let out = session.attack(0, 0).unwrap();
        assert!(out.game_over);
        assert_eq!(out.score, i64::MAX);
    }

    #[test]
    fn unmapped_ship_cell_is_an_error() {
        let mut session = two_destroyers();
        session.placements = PlacementMap::default();
        assert_eq!(
            session.attack(0, 0),
            Err(GameError::UnmappedCell { row: 0, col: 0 })
        );
        assert!(session.attacks().is_empty());
        assert_eq!(session.score(), INITIAL_SCORE);
    }

    #[test]
    fn reset_builds_fresh_session() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut session = GameSession::new(GameConfig::default(), &mut rng).unwrap();
        session.attack(0, 0).unwrap();
        session.attack(5, 5).unwrap();
        session.reset(&mut rng).unwrap();
        assert_eq!(session.score(), INITIAL_SCORE);
        assert!(session.attacks().is_empty());
        assert!(session.hits_per_ship_name().is_empty());
        assert!(!session.is_over());
        assert_eq!(session.board().occupied_count(), 17);
    }

    #[test]
    fn failed_reset_keeps_session() {
        let mut rng = SmallRng::seed_from_u64(5);
        let config = GameConfig::new(3, vec![ShipSpec::new("Cruiser", 3)]).with_max_placement_attempts(500);
        let mut session = GameSession::new(config, &mut rng).unwrap();
        session.attack(1, 1).unwrap();

        session.config.ships.push(ShipSpec::new("Carrier", 5));
        assert!(matches!(
            session.reset(&mut rng),
            Err(BoardError::PlacementExhaustion { .. })
        ));
        assert_eq!(session.moves(), 1);
        assert_eq!(session.placements().ships().len(), 1);
    }
}
