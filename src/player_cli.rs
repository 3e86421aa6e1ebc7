use std::io::{BufRead, Write};

use rand::rngs::SmallRng;

use crate::common::GameError;
use crate::session::GameSession;
use crate::ui::{describe_outcome, parse_coord, render_board, render_status};

/// How an interactive game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct GameSummary {
    pub score: i64,
    pub moves: usize,
    /// `true` when the whole fleet was sunk, `false` if the player quit.
    pub finished: bool,
}

const HELP: &str = "Enter a cell like B7 to fire, 'reset' for a new board, 'quit' to stop.";

/// Terminal front end for one player.
///
/// Reads commands line by line from `input` and writes the board and results
/// to `output`. Input errors are reported and the prompt repeats; the session
/// is only changed through `attack` and `reset`.
pub struct CliGame<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> CliGame<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Play until the fleet is sunk, the player quits, or input ends.
    pub fn play(
        &mut self,
        session: &mut GameSession,
        rng: &mut SmallRng,
    ) -> anyhow::Result<GameSummary> {
        writeln!(self.output, "{}", HELP)?;
        while !session.is_over() {
            write!(self.output, "\n{}", render_board(session, false))?;
            writeln!(self.output, "{}", render_status(session))?;
            write!(self.output, "Target> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };
            match line.to_ascii_lowercase().as_str() {
                "" => continue,
                "q" | "quit" | "exit" => break,
                "?" | "h" | "help" => {
                    writeln!(self.output, "{}", HELP)?;
                    continue;
                }
                "r" | "reset" => {
                    session.reset(rng).map_err(|e| anyhow::anyhow!(e))?;
                    writeln!(self.output, "New board generated.")?;
                    continue;
                }
                _ => {}
            }

            let (r, c) = match parse_coord(&line, session.size()) {
                Ok(cell) => cell,
                Err(e) => {
                    writeln!(self.output, "{}", e)?;
                    continue;
                }
            };
            match session.attack(r, c) {
                Ok(outcome) => writeln!(self.output, "{}", describe_outcome(&outcome))?,
                Err(e @ GameError::InvalidCoordinate { .. }) => writeln!(self.output, "{}", e)?,
                Err(e) => return Err(anyhow::anyhow!(e)),
            }
        }

        let summary = GameSummary {
            score: session.score(),
            moves: session.moves(),
            finished: session.is_over(),
        };
        if summary.finished {
            write!(self.output, "\n{}", render_board(session, true))?;
            writeln!(
                self.output,
                "Fleet destroyed in {} moves! Final score: {}",
                summary.moves, summary.score
            )?;
        }
        Ok(summary)
    }

    /// Prompt for a line of free text, e.g. an email address.
    pub fn ask(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Write a line to the player.
    pub fn say(&mut self, text: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }
}
