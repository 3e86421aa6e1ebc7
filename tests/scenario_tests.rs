use rand::{rngs::SmallRng, SeedableRng};
use salvo::{
    GameConfig, GameError, GameSession, SessionStatus, ShipSpec, ShotResult, DEFAULT_SINK_BONUS,
    INITIAL_SCORE, MOVE_PENALTY,
};

/// One single-cell submarine on a 2x2 board, every cell attacked in turn.
#[test]
fn lone_submarine_sweep() {
    let orders = [
        [(0, 0), (0, 1), (1, 0), (1, 1)],
        [(1, 1), (1, 0), (0, 1), (0, 0)],
    ];
    for seed in 0..8u64 {
        for order in orders {
            let mut rng = SmallRng::seed_from_u64(seed);
            let config = GameConfig::new(2, vec![ShipSpec::new("Submarine", 1)]);
            let mut session = GameSession::new(config, &mut rng).unwrap();
            assert_eq!(session.score(), INITIAL_SCORE);

            let sub = session.board().occupied_cells().next().unwrap();
            let mut attacks = 0;
            for (r, c) in order {
                let out = match session.attack(r, c) {
                    Ok(out) => out,
                    Err(GameError::GameOver) => break,
                    Err(e) => panic!("unexpected error {e}"),
                };
                attacks += 1;
                if (r, c) == sub {
                    assert_eq!(out.result, ShotResult::Sink("Submarine".into()));
                    assert!(out.game_over);
                } else {
                    assert_eq!(out.result, ShotResult::Miss);
                    assert!(!out.game_over);
                }
            }
            assert!(session.is_over());
            assert_eq!(
                session.score(),
                INITIAL_SCORE - attacks * MOVE_PENALTY + DEFAULT_SINK_BONUS
            );
        }
    }
}

/// Same scenario, played until all four cells are attacked: the win lands on
/// the last cell.
#[test]
fn submarine_found_last_scores_four_penalties() {
    let mut rng = SmallRng::seed_from_u64(3);
    let config = GameConfig::new(2, vec![ShipSpec::new("Submarine", 1)]);
    let mut session = GameSession::new(config, &mut rng).unwrap();
    let sub = session.board().occupied_cells().next().unwrap();

    for r in 0..2 {
        for c in 0..2 {
            if (r, c) != sub {
                assert!(!session.attack(r, c).unwrap().game_over);
            }
        }
    }
    assert_eq!(session.status(), SessionStatus::Active);
    let last = session.attack(sub.0, sub.1).unwrap();
    assert!(last.game_over);
    assert_eq!(last.score, 1000 - 4 * 10 + DEFAULT_SINK_BONUS);
}

#[test]
fn double_attack_at_origin() {
    let mut rng = SmallRng::seed_from_u64(77);
    let mut session = GameSession::new(GameConfig::default(), &mut rng).unwrap();
    session.attack(0, 0).unwrap();
    let repeat = session.attack(0, 0).unwrap();

    assert!(repeat.repeated);
    assert_eq!(session.attacks().len(), 1);
    assert!(session.attacks().contains((0, 0)));
    assert_eq!(
        session.attacks().get((0, 0)),
        Some(session.board().is_occupied(0, 0).unwrap())
    );
    let sunk_bonus = if session.sunk_ships().is_empty() { 0 } else { DEFAULT_SINK_BONUS };
    assert_eq!(session.score(), INITIAL_SCORE - MOVE_PENALTY + sunk_bonus);
}

#[test]
fn attacking_outside_the_grid_fails_fast() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut session = GameSession::new(GameConfig::default(), &mut rng).unwrap();
    for (r, c) in [(10, 0), (0, 10), (usize::MAX, 3)] {
        assert!(matches!(
            session.attack(r, c),
            Err(GameError::InvalidCoordinate { size: 10, .. })
        ));
    }
    assert!(session.attacks().is_empty());
    assert_eq!(session.score(), INITIAL_SCORE);
}
