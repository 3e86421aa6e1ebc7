//! Automatic players used by the simulator and for demos.

use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::common::ShotResult;
use crate::session::{AttackOutcome, GameSession};
use crate::ship::Coord;

/// Something that picks cells to attack.
pub trait Player: Send {
    /// Choose the next cell. Must return an in-bounds cell that has not been
    /// attacked yet while the session is active.
    fn select_target(&mut self, rng: &mut SmallRng, session: &GameSession) -> Coord;

    /// Inform the player of the result of its last attack.
    fn handle_outcome(&mut self, _outcome: &AttackOutcome) {}
}

fn unattacked(session: &GameSession) -> Vec<Coord> {
    let size = session.size();
    (0..size)
        .flat_map(|r| (0..size).map(move |c| (r, c)))
        .filter(|cell| !session.attacks().contains(*cell))
        .collect()
}

/// Picks uniformly among cells not attacked yet.
#[derive(Debug, Default)]
pub struct RandomPlayer;

impl RandomPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Player for RandomPlayer {
    fn select_target(&mut self, rng: &mut SmallRng, session: &GameSession) -> Coord {
        let open = unattacked(session);
        if open.is_empty() {
            return (0, 0);
        }
        open[rng.random_range(0..open.len())]
    }
}

/// Hunt/target player: fires at random until it hits, then works through the
/// neighbours of its hits until the ship sinks.
#[derive(Debug, Default)]
pub struct HuntPlayer {
    targets: Vec<Coord>,
}

impl HuntPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue_neighbours(&mut self, (r, c): Coord) {
        let mut push = |cell: Coord| {
            if !self.targets.contains(&cell) {
                self.targets.push(cell);
            }
        };
        if r > 0 {
            push((r - 1, c));
        }
        if c > 0 {
            push((r, c - 1));
        }
        push((r + 1, c));
        push((r, c + 1));
    }
}

impl Player for HuntPlayer {
    fn select_target(&mut self, rng: &mut SmallRng, session: &GameSession) -> Coord {
        while let Some((r, c)) = self.targets.pop() {
            if session.board().contains(r, c) && !session.attacks().contains((r, c)) {
                return (r, c);
            }
        }
        RandomPlayer.select_target(rng, session)
    }

    fn handle_outcome(&mut self, outcome: &AttackOutcome) {
        match outcome.result {
            ShotResult::Hit => self.queue_neighbours(outcome.cell),
            // Neighbours queued for the sunk ship may belong to another one;
            // keep them.
            ShotResult::Sink(_) | ShotResult::Miss => {}
        }
    }
}

/// Let `player` attack until the fleet is sunk. Returns the number of attacks.
pub fn play_out<P: Player + ?Sized>(
    player: &mut P,
    rng: &mut SmallRng,
    session: &mut GameSession,
) -> Result<usize, crate::common::GameError> {
    let mut moves = 0;
    while !session.is_over() {
        let (r, c) = player.select_target(rng, session);
        let outcome = session.attack(r, c)?;
        player.handle_outcome(&outcome);
        if !outcome.repeated {
            moves += 1;
        }
    }
    Ok(moves)
}
