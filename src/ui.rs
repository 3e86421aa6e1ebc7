//! Terminal rendering and coordinate parsing.

use std::fmt::Write;

use crate::common::ShotResult;
use crate::domain::LeaderboardEntry;
use crate::session::{AttackOutcome, GameSession};
use crate::ship::Coord;

/// `(row, col)` as a label like `C7`: column letter, 1-based row.
pub fn coord_to_string(r: usize, c: usize) -> String {
    let col = (b'A' + c as u8) as char;
    format!("{}{}", col, r + 1)
}

/// Parse a label like `c7` or `C7` on a `size×size` board.
pub fn parse_coord(input: &str, size: usize) -> Result<Coord, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let last_col = (b'A' + size.saturating_sub(1) as u8) as char;
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-{}", col_ch, last_col));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= size {
        return Err(format!("Column '{}' out of bounds - must be A-{}", col_ch, last_col));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-{}", row_str, size))?;
    if row == 0 || row > size {
        return Err(format!("Row {} out of bounds - must be 1-{}", row, size));
    }
    Ok((row - 1, col))
}

/// Draw the attack grid. `X` hit, `o` miss, `.` unknown; with `reveal`,
/// untouched ship cells show as `S`.
pub fn render_board(session: &GameSession, reveal: bool) -> String {
    let size = session.size();
    let mut out = String::new();
    let _ = write!(out, "    ");
    for c in 0..size {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    let _ = writeln!(out);
    for r in 0..size {
        let _ = write!(out, "  {:2}", r + 1);
        for c in 0..size {
            let ch = match session.attacks().get((r, c)) {
                Some(true) => 'X',
                Some(false) => 'o',
                None if reveal && session.board().is_occupied(r, c).unwrap_or(false) => 'S',
                None => '.',
            };
            let _ = write!(out, " {}", ch);
        }
        let _ = writeln!(out);
    }
    out
}

/// One line describing the result of an attack.
pub fn describe_outcome(outcome: &AttackOutcome) -> String {
    let (r, c) = outcome.cell;
    let label = coord_to_string(r, c);
    let what = match (&outcome.result, outcome.repeated) {
        (_, true) => format!("{} was already attacked", label),
        (ShotResult::Miss, _) => format!("{}: miss", label),
        (ShotResult::Hit, _) => format!("{}: hit!", label),
        (ShotResult::Sink(name), _) => format!("{}: hit - {} sunk!", label, name),
    };
    format!("{} (score {})", what, outcome.score)
}

/// Score, moves and ships left.
pub fn render_status(session: &GameSession) -> String {
    format!(
        "Score: {}  Moves: {}  Ships afloat: {}/{}",
        session.score(),
        session.moves(),
        session.ships_remaining(),
        session.placements().ships().len()
    )
}

/// Leaderboard as a ranked table.
pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>4}  {:<32} {:>8}", "Rank", "Email", "Points");
    if entries.is_empty() {
        let _ = writeln!(out, "      (no scores yet)");
    }
    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<32} {:>8}",
            format!("{:02}", i + 1),
            entry.user.email,
            entry.score
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::domain::User;
    use crate::ship::{Orientation, Placement, ShipSpec};

    #[test]
    fn coords_round_trip_through_labels() {
        assert_eq!(coord_to_string(0, 0), "A1");
        assert_eq!(coord_to_string(9, 2), "C10");
        assert_eq!(parse_coord("c10", 10), Ok((9, 2)));
        assert_eq!(parse_coord(" a1 ", 10), Ok((0, 0)));
    }

    #[test]
    fn bad_coords_are_explained() {
        assert!(parse_coord("", 10).is_err());
        assert!(parse_coord("A", 10).is_err());
        assert!(parse_coord("K1", 10).unwrap_err().contains("A-J"));
        assert!(parse_coord("A0", 10).is_err());
        assert!(parse_coord("A11", 10).is_err());
        assert!(parse_coord("1A", 10).is_err());
        assert!(parse_coord("Bx", 4).unwrap_err().contains("1-4"));
    }

    #[test]
    fn board_marks_hits_misses_and_reveals() {
        let config = GameConfig::new(3, vec![ShipSpec::new("Destroyer", 2)]);
        let mut session =
            GameSession::with_layout(config, &[Placement::new(0, 0, Orientation::Horizontal)])
                .unwrap();
        session.attack(0, 0).unwrap();
        session.attack(2, 2).unwrap();
        let hidden = render_board(&session, false);
        assert!(hidden.contains(" X . ."));
        assert!(hidden.contains(" . . o"));
        let shown = render_board(&session, true);
        assert!(shown.contains(" X S ."));
    }

    #[test]
    fn leaderboard_is_ranked() {
        let entries = vec![LeaderboardEntry {
            id: 1,
            score: 930,
            submitted_at: 0,
            user: User {
                id: 1,
                email: "ana@example.com".into(),
            },
        }];
        let table = render_leaderboard(&entries);
        assert!(table.contains("01"));
        assert!(table.contains("ana@example.com"));
        assert!(table.contains("930"));
        assert!(render_leaderboard(&[]).contains("no scores"));
    }
}
