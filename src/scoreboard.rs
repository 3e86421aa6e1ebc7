//! High-score persistence boundary.
//!
//! [`ScoreStore`] is what a finished game talks to. [`MemoryScoreStore`]
//! keeps users and records in process; [`crate::ScoreStub`] forwards the same
//! calls to a remote [`crate::ScoreSkeleton`].

use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::{LeaderboardEntry, ScoreRecord, User};

/// Number of rows returned by a leaderboard query unless asked otherwise.
pub const DEFAULT_TOP_LIMIT: usize = 10;
/// Largest leaderboard a single query may ask for.
pub const MAX_TOP_LIMIT: usize = 100;

/// Errors raised at the score-service boundary. None of them affect the
/// state of a game session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreboardError {
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),
    #[error("leaderboard limit must be between 1 and {max}, got {limit}")]
    InvalidLimit { limit: usize, max: usize },
    /// The service answered but did not store the score.
    #[error("score service rejected the request: {0}")]
    Rejected(String),
    /// The service could not be reached or the exchange broke down.
    #[error("score service unavailable: {0}")]
    Transport(String),
}

impl ScoreboardError {
    /// Errors caused by the service rather than by the request.
    pub fn is_submission_failure(&self) -> bool {
        matches!(self, ScoreboardError::Rejected(_) | ScoreboardError::Transport(_))
    }
}

/// Trim and lower-case an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Minimal address check: one `@`, a non-empty local part and a dotted
/// domain, no whitespace.
pub fn validate_email(email: &str) -> Result<(), ScoreboardError> {
    let invalid = || ScoreboardError::InvalidEmail(email.to_string());
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels_ok = domain.split('.').count() >= 2 && domain.split('.').all(|l| !l.is_empty());
    if !labels_ok {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_limit(limit: usize) -> Result<(), ScoreboardError> {
    if limit == 0 || limit > MAX_TOP_LIMIT {
        Err(ScoreboardError::InvalidLimit {
            limit,
            max: MAX_TOP_LIMIT,
        })
    } else {
        Ok(())
    }
}

/// Append-only store of final scores.
#[async_trait::async_trait]
pub trait ScoreStore: Send + Sync {
    /// Find or create the user for `email`, then append a new record.
    /// Records are never merged or capped per user.
    async fn submit_score(&self, email: &str, score: i64) -> Result<ScoreRecord, ScoreboardError>;

    /// The best `limit` records, highest score first. Equal scores keep
    /// submission order.
    async fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ScoreboardError>;
}

#[async_trait::async_trait]
impl<S: ScoreStore + ?Sized> ScoreStore for std::sync::Arc<S> {
    async fn submit_score(&self, email: &str, score: i64) -> Result<ScoreRecord, ScoreboardError> {
        (**self).submit_score(email, score).await
    }

    async fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ScoreboardError> {
        (**self).top_scores(limit).await
    }
}

#[derive(Debug, Default)]
struct Ledger {
    users: Vec<User>,
    records: Vec<ScoreRecord>,
}

impl Ledger {
    fn find_or_create_user(&mut self, email: &str) -> u64 {
        if let Some(user) = self.users.iter().find(|u| u.email == email) {
            return user.id;
        }
        let id = self.users.len() as u64 + 1;
        self.users.push(User {
            id,
            email: email.to_string(),
        });
        log::info!("created user {} for {}", id, email);
        id
    }

    fn user(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

/// In-process [`ScoreStore`].
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    ledger: Mutex<Ledger>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.ledger.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Every record owned by `email`, oldest first.
    pub async fn history(&self, email: &str) -> Vec<ScoreRecord> {
        let ledger = self.ledger.lock().await;
        let Some(user) = ledger.users.iter().find(|u| u.email == email) else {
            return Vec::new();
        };
        ledger
            .records
            .iter()
            .filter(|r| r.user_id == user.id)
            .cloned()
            .collect()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[async_trait::async_trait]
impl ScoreStore for MemoryScoreStore {
    async fn submit_score(&self, email: &str, score: i64) -> Result<ScoreRecord, ScoreboardError> {
        validate_email(email)?;
        let mut ledger = self.ledger.lock().await;
        let user_id = ledger.find_or_create_user(email);
        let record = ScoreRecord {
            id: ledger.records.len() as u64 + 1,
            score,
            submitted_at: unix_now(),
            user_id,
        };
        ledger.records.push(record.clone());
        log::info!("recorded score {} for user {}", score, user_id);
        Ok(record)
    }

    async fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ScoreboardError> {
        validate_limit(limit)?;
        let ledger = self.ledger.lock().await;
        let mut ranked: Vec<&ScoreRecord> = ledger.records.iter().collect();
        // Stable sort keeps submission order among equal scores.
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(ranked
            .into_iter()
            .take(limit)
            .filter_map(|r| {
                let user = ledger.user(r.user_id)?.clone();
                Some(LeaderboardEntry {
                    id: r.id,
                    score: r.score,
                    submitted_at: r.submitted_at,
                    user,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_checks() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("a.b+c@mail.example.org").is_ok());
        for bad in ["", "ana", "@example.com", "ana@", "ana@example", "a b@x.io", "a@b@c.io", "ana@.com"] {
            assert!(validate_email(bad).is_err(), "{bad:?} should be rejected");
        }
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
    }

    #[test]
    fn limit_bounds() {
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(MAX_TOP_LIMIT).is_ok());
        assert!(validate_limit(MAX_TOP_LIMIT + 1).is_err());
    }

    #[tokio::test]
    async fn same_email_reuses_user_and_appends() {
        let store = MemoryScoreStore::new();
        let a = store.submit_score("ana@example.com", 900).await.unwrap();
        let b = store.submit_score("ana@example.com", 900).await.unwrap();
        assert_eq!(a.user_id, b.user_id);
        assert_ne!(a.id, b.id);
        assert_eq!(store.history("ana@example.com").await.len(), 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn top_scores_descending_with_stable_ties() {
        let store = MemoryScoreStore::new();
        store.submit_score("a@x.io", 500).await.unwrap();
        let first_tie = store.submit_score("b@x.io", 800).await.unwrap();
        store.submit_score("c@x.io", 300).await.unwrap();
        let second_tie = store.submit_score("d@x.io", 800).await.unwrap();

        let top = store.top_scores(3).await.unwrap();
        let scores: Vec<i64> = top.iter().map(|e| e.score).collect();
        assert_eq!(scores, [800, 800, 500]);
        assert_eq!(top[0].id, first_tie.id);
        assert_eq!(top[1].id, second_tie.id);
        assert_eq!(top[0].user.email, "b@x.io");
    }

    #[tokio::test]
    async fn invalid_requests_are_refused() {
        let store = MemoryScoreStore::new();
        assert!(matches!(
            store.submit_score("nope", 10).await,
            Err(ScoreboardError::InvalidEmail(_))
        ));
        assert!(matches!(
            store.top_scores(0).await,
            Err(ScoreboardError::InvalidLimit { .. })
        ));
        assert!(store.is_empty().await);
    }
}
