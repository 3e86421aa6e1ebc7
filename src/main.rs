#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::{path::PathBuf, sync::Arc};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use rand::{rngs::SmallRng, SeedableRng};
#[cfg(feature = "std")]
use salvo::{
    init_logging, scoreboard::MAX_TOP_LIMIT, ui::render_leaderboard, CliGame, GameConfig,
    GameSession, MemoryScoreStore, ScoreStore, ScoreStub, TcpTransport, DEFAULT_TOP_LIMIT,
};
#[cfg(feature = "std")]
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play a game in the terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible boards (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "JSON file with board size, fleet and scoring")]
        config: Option<PathBuf>,
        #[arg(long, help = "Board size, overriding the config file")]
        size: Option<usize>,
        #[arg(long, help = "Score server to submit the final score to (e.g., 127.0.0.1:7878)")]
        server: Option<String>,
        #[arg(long, help = "Email to submit the score under; asked for if omitted")]
        email: Option<String>,
    },
    /// Run the high-score server.
    Serve {
        #[arg(long, default_value = "0.0.0.0:7878")]
        bind: String,
    },
    /// Show the best scores.
    Leaderboard {
        #[arg(long, default_value = "127.0.0.1:7878")]
        connect: String,
        #[arg(long, default_value_t = DEFAULT_TOP_LIMIT)]
        limit: usize,
        #[arg(long, help = "Print raw JSON instead of a table")]
        json: bool,
    },
    /// Submit a score by hand.
    Submit {
        #[arg(long, default_value = "127.0.0.1:7878")]
        connect: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        score: i64,
    },
}

#[cfg(feature = "std")]
fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
async fn connect(addr: &str) -> anyhow::Result<ScoreStub<TcpTransport>> {
    let transport = TcpTransport::connect(addr).await?;
    Ok(ScoreStub::new(transport))
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            seed,
            config,
            size,
            server,
            email,
        } => {
            let mut config = match config {
                Some(path) => GameConfig::load(&path)?,
                None => GameConfig::default(),
            };
            if let Some(size) = size {
                config.size = size;
            }
            if let Some(s) = seed {
                println!("Using fixed seed: {} (board will be reproducible)", s);
            }
            let mut rng = seeded_rng(seed);
            let mut session =
                GameSession::new(config, &mut rng).map_err(|e| anyhow::anyhow!(e))?;

            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut game = CliGame::new(stdin.lock(), stdout.lock());
            let summary = game.play(&mut session, &mut rng)?;

            let Some(server) = server else {
                return Ok(());
            };
            if !summary.finished {
                return Ok(());
            }
            let email = match email {
                Some(email) => email,
                None => match game.ask("Email for the leaderboard (blank to skip): ")? {
                    Some(email) if !email.is_empty() => email,
                    _ => return Ok(()),
                },
            };

            // A failed submission only costs the leaderboard entry; the
            // result on screen stands.
            let submitted = match connect(&server).await {
                Ok(stub) => match stub.submit_score(&email, summary.score).await {
                    Ok(record) => {
                        game.say(&format!("Score {} saved (record #{}).", record.score, record.id))?;
                        stub.top_scores(DEFAULT_TOP_LIMIT).await.ok()
                    }
                    Err(e) => {
                        log::warn!("score submission failed: {}", e);
                        game.say(&format!("Could not save your score: {}", e))?;
                        None
                    }
                },
                Err(e) => {
                    log::warn!("cannot reach score server {}: {}", server, e);
                    game.say(&format!("Could not reach the score server: {}", e))?;
                    None
                }
            };
            if let Some(entries) = submitted {
                game.say(&render_leaderboard(&entries))?;
            }
        }
        Commands::Serve { bind } => {
            let listener = TcpListener::bind(&bind).await?;
            println!("Score server listening on {}", listener.local_addr()?);
            salvo::serve(listener, Arc::new(MemoryScoreStore::new())).await?;
        }
        Commands::Leaderboard {
            connect: addr,
            limit,
            json,
        } => {
            let stub = connect(&addr).await?;
            let entries = stub
                .top_scores(limit.min(MAX_TOP_LIMIT))
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print!("{}", render_leaderboard(&entries));
            }
        }
        Commands::Submit {
            connect: addr,
            email,
            score,
        } => {
            let stub = connect(&addr).await?;
            let record = stub
                .submit_score(&email, score)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
            println!("{}", serde_json::to_string(&record)?);
        }
    }
    Ok(())
}
