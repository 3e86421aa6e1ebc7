//! Records exchanged with the high-score service.

use serde::{Deserialize, Serialize};

/// A player, identified by a lower-cased email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
}

/// One immutable, timestamped score entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: u64,
    pub score: i64,
    /// Seconds since the Unix epoch at submission time.
    pub submitted_at: u64,
    pub user_id: u64,
}

/// A leaderboard row: a score record with its owner embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: u64,
    pub score: i64,
    pub submitted_at: u64,
    pub user: User,
}

/// Body of a score submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitScore {
    pub email: String,
    pub score: i64,
}

/// Reply to a score submission. Only a receipt carrying an `id` means the
/// score was stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReceipt {
    pub id: Option<u64>,
    pub score: i64,
    pub submitted_at: u64,
    pub user_id: Option<u64>,
}

impl ScoreReceipt {
    /// The stored record, or `None` if the receipt lacks an id.
    pub fn into_record(self) -> Option<ScoreRecord> {
        Some(ScoreRecord {
            id: self.id?,
            score: self.score,
            submitted_at: self.submitted_at,
            user_id: self.user_id?,
        })
    }
}

impl From<ScoreRecord> for ScoreReceipt {
    fn from(record: ScoreRecord) -> Self {
        ScoreReceipt {
            id: Some(record.id),
            score: record.score,
            submitted_at: record.submitted_at,
            user_id: Some(record.user_id),
        }
    }
}
