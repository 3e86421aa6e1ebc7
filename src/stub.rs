use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

use crate::domain::{LeaderboardEntry, ScoreRecord, SubmitScore};
use crate::protocol::{Message, PROTOCOL_VERSION};
use crate::scoreboard::{normalize_email, validate_email, validate_limit, ScoreStore, ScoreboardError};
use crate::transport::Transport;

/// Client side of the score service. Implements [`ScoreStore`] by forwarding
/// each call over a transport to a [`crate::ScoreSkeleton`].
///
/// No call is retried; a failed exchange is reported and the caller decides
/// what to do.
pub struct ScoreStub<T: Transport> {
    transport: Mutex<T>,
    handshaken: AtomicBool,
}

fn transport_error(e: anyhow::Error) -> ScoreboardError {
    ScoreboardError::Transport(e.to_string())
}

impl<T: Transport> ScoreStub<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Mutex::new(transport),
            handshaken: AtomicBool::new(false),
        }
    }

    /// Send `msg` and wait for the reply, performing the handshake first if
    /// this is the first exchange.
    async fn request(&self, msg: Message) -> Result<Message, ScoreboardError> {
        let mut transport = self.transport.lock().await;
        if !self.handshaken.load(Ordering::SeqCst) {
            transport
                .send(Message::Hello {
                    version: PROTOCOL_VERSION,
                })
                .await
                .map_err(transport_error)?;
            match transport.recv().await.map_err(transport_error)? {
                Message::Hello { version } if version == PROTOCOL_VERSION => {
                    self.handshaken.store(true, Ordering::SeqCst);
                }
                Message::Rejected { reason } => return Err(ScoreboardError::Rejected(reason)),
                other => {
                    return Err(ScoreboardError::Transport(format!(
                        "unexpected handshake reply {:?}",
                        other
                    )))
                }
            }
        }
        transport.send(msg).await.map_err(transport_error)?;
        transport.recv().await.map_err(transport_error)
    }
}

#[async_trait::async_trait]
impl<T: Transport> ScoreStore for ScoreStub<T> {
    async fn submit_score(&self, email: &str, score: i64) -> Result<ScoreRecord, ScoreboardError> {
        let email = normalize_email(email);
        validate_email(&email)?;
        log::debug!("submitting score {} for {}", score, email);
        match self
            .request(Message::SubmitScore(SubmitScore { email, score }))
            .await?
        {
            Message::ScoreRecorded(receipt) => receipt.into_record().ok_or_else(|| {
                ScoreboardError::Rejected("response carried no record id".to_string())
            }),
            Message::Rejected { reason } => Err(ScoreboardError::Rejected(reason)),
            other => Err(ScoreboardError::Transport(format!(
                "unexpected reply {:?}",
                other
            ))),
        }
    }

    async fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ScoreboardError> {
        validate_limit(limit)?;
        match self.request(Message::TopScoresReq { limit }).await? {
            Message::TopScoresResp(entries) => Ok(entries),
            Message::Rejected { reason } => Err(ScoreboardError::Rejected(reason)),
            other => Err(ScoreboardError::Transport(format!(
                "unexpected reply {:?}",
                other
            ))),
        }
    }
}
