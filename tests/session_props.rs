use proptest::prelude::*;
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};
use salvo::{GameConfig, GameSession, ShipSpec, ShotResult, INITIAL_SCORE, MOVE_PENALTY};

fn all_cells(size: usize) -> Vec<(usize, usize)> {
    (0..size).flat_map(|r| (0..size).map(move |c| (r, c))).collect()
}

fn session(seed: u64) -> (GameSession, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let config = GameConfig::new(
        6,
        vec![
            ShipSpec::new("Cruiser", 3).with_bonus(60),
            ShipSpec::new("Destroyer", 2).with_bonus(30),
            ShipSpec::new("Destroyer", 2).with_bonus(30),
            ShipSpec::new("Submarine", 1).with_bonus(10),
        ],
    );
    let session = GameSession::new(config, &mut rng).unwrap();
    (session, rng)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn repeat_attack_changes_nothing(seed in any::<u64>(), row in 0..6usize, col in 0..6usize) {
        let (mut session, _) = session(seed);
        let first = session.attack(row, col).unwrap();
        prop_assert!(!first.repeated);
        let score = session.score();
        let log = session.attacks().clone();
        let hits = session.hits_per_ship_name().clone();

        let second = session.attack(row, col).unwrap();
        prop_assert!(second.repeated);
        prop_assert_eq!(second.score, score);
        prop_assert_eq!(session.score(), score);
        prop_assert_eq!(session.attacks(), &log);
        prop_assert_eq!(session.hits_per_ship_name(), &hits);
        prop_assert_eq!(session.attacks().len(), 1);
    }

    #[test]
    fn full_sweep_scores_exactly(seed in any::<u64>()) {
        let (mut session, mut rng) = session(seed);
        let mut cells = all_cells(6);
        cells.shuffle(&mut rng);

        let fleet = session.fleet_cells();
        let mut hits = 0usize;
        let mut bonuses = 0i64;
        let mut sinks = 0usize;
        let mut moves = 0i64;
        for (r, c) in cells {
            if session.is_over() {
                break;
            }
            let before = session.score();
            let out = session.attack(r, c).unwrap();
            moves += 1;
            let bonus = match &out.result {
                ShotResult::Sink(name) => {
                    sinks += 1;
                    session.config().ships.iter().find(|s| s.name() == name).unwrap().sink_bonus()
                }
                _ => 0,
            };
            // Each new attack costs the penalty; only sinks give anything back.
            prop_assert_eq!(out.score, before - MOVE_PENALTY + bonus);
            bonuses += bonus;
            if out.result.is_hit() {
                hits += 1;
            }
            // Game over exactly when the last fleet cell is hit.
            prop_assert_eq!(out.game_over, hits == fleet);
            prop_assert_eq!(session.hits_per_ship_name().values().sum::<usize>(), hits);
        }

        prop_assert!(session.is_over());
        prop_assert_eq!(sinks, 4);
        prop_assert_eq!(bonuses, 60 + 30 + 30 + 10);
        prop_assert_eq!(session.score(), INITIAL_SCORE - moves * MOVE_PENALTY + bonuses);
        for ship in session.config().ships.clone() {
            let named: usize = session
                .config()
                .ships
                .iter()
                .filter(|s| s.name() == ship.name())
                .map(|s| s.length())
                .sum();
            prop_assert_eq!(session.hits_for(ship.name()), named);
        }
    }

    #[test]
    fn game_over_never_reverts(seed in any::<u64>()) {
        let (mut session, _) = session(seed);
        let ship_cells: Vec<_> = session.board().occupied_cells().collect();
        for (r, c) in ship_cells {
            session.attack(r, c).unwrap();
        }
        prop_assert!(session.is_over());
        for (r, c) in all_cells(6) {
            prop_assert!(session.attack(r, c).is_err());
            prop_assert!(session.is_over());
        }
    }
}
