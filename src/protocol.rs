use serde::{Deserialize, Serialize};

use crate::domain::{LeaderboardEntry, ScoreReceipt, SubmitScore};

/// Protocol version spoken by client and server.
pub const PROTOCOL_VERSION: u8 = 1;

/// Messages exchanged between a score client and the score server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Handshake opening every connection; echoed back by the server.
    Hello { version: u8 },
    /// Record a final score.
    SubmitScore(SubmitScore),
    /// Reply to `SubmitScore`.
    ScoreRecorded(ScoreReceipt),
    /// Ask for the best `limit` scores.
    TopScoresReq { limit: usize },
    /// Reply to `TopScoresReq`, best first.
    TopScoresResp(Vec<LeaderboardEntry>),
    /// The request was refused.
    Rejected { reason: String },
}
