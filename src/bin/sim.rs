use rand::{rngs::SmallRng, SeedableRng};
use salvo::{play_out, GameConfig, GameSession, HuntPlayer, Player, RandomPlayer};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    salvo::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [random|hunt]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let strategy = args.get(2).map(String::as_str).unwrap_or("hunt");
    let mut player: Box<dyn Player> = match strategy {
        "random" => Box::new(RandomPlayer::new()),
        "hunt" => Box::new(HuntPlayer::new()),
        other => anyhow::bail!("unknown strategy '{}'", other),
    };

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut session =
        GameSession::new(GameConfig::default(), &mut rng).map_err(|e| anyhow::anyhow!(e))?;
    let moves = play_out(player.as_mut(), &mut rng, &mut session).map_err(|e| anyhow::anyhow!(e))?;

    let result = json!({
        "seed": seed,
        "strategy": strategy,
        "moves": moves,
        "score": session.score(),
        "over": session.is_over(),
        "sunk": session.sunk_ships(),
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
