use std::sync::Arc;

use anyhow::anyhow;
use tokio::net::TcpListener;

use crate::domain::ScoreReceipt;
use crate::protocol::{Message, PROTOCOL_VERSION};
use crate::scoreboard::ScoreStore;
use crate::transport::{is_peer_closed, tcp::TcpTransport, Transport};

/// Server side of one client connection: answers requests from a
/// [`crate::ScoreStub`] using a [`ScoreStore`].
pub struct ScoreSkeleton<S: ScoreStore, T: Transport> {
    store: S,
    transport: T,
}

impl<S: ScoreStore, T: Transport> ScoreSkeleton<S, T> {
    pub fn new(store: S, transport: T) -> Self {
        Self { store, transport }
    }

    /// Serve requests until the peer disconnects.
    ///
    /// A peer that hangs up, even before the handshake, ends the session with
    /// `Ok`. Undecodable or oversized frames and timeouts are errors.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let hello = match self.transport.recv().await {
            Ok(msg) => msg,
            Err(e) if is_peer_closed(&e) => {
                log::debug!("peer left before the handshake");
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        match hello {
            Message::Hello { version } if version == PROTOCOL_VERSION => {
                self.transport
                    .send(Message::Hello {
                        version: PROTOCOL_VERSION,
                    })
                    .await?;
            }
            Message::Hello { version } => {
                self.transport
                    .send(Message::Rejected {
                        reason: format!("unsupported protocol version {}", version),
                    })
                    .await?;
                return Err(anyhow!(
                    "Protocol version mismatch: expected {}, got {}",
                    PROTOCOL_VERSION,
                    version
                ));
            }
            _ => return Err(anyhow!("Expected handshake")),
        }

        loop {
            let msg = match self.transport.recv().await {
                Ok(msg) => msg,
                Err(e) if is_peer_closed(&e) => return Ok(()),
                Err(e) => return Err(e),
            };
            let reply = match msg {
                Message::SubmitScore(req) => {
                    match self.store.submit_score(&req.email, req.score).await {
                        Ok(record) => Message::ScoreRecorded(ScoreReceipt::from(record)),
                        Err(e) => {
                            log::warn!("refused score from {}: {}", req.email, e);
                            Message::Rejected {
                                reason: e.to_string(),
                            }
                        }
                    }
                }
                Message::TopScoresReq { limit } => match self.store.top_scores(limit).await {
                    Ok(entries) => Message::TopScoresResp(entries),
                    Err(e) => Message::Rejected {
                        reason: e.to_string(),
                    },
                },
                other => Message::Rejected {
                    reason: format!("unexpected message {:?}", other),
                },
            };
            self.transport.send(reply).await?;
        }
    }
}

/// Accept connections forever, serving each on its own task against a shared
/// store.
pub async fn serve<S>(listener: TcpListener, store: Arc<S>) -> anyhow::Result<()>
where
    S: ScoreStore + 'static,
{
    log::info!("score server listening on {}", listener.local_addr()?);
    loop {
        let (stream, addr) = listener.accept().await?;
        log::info!("client connected from {}", addr);
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let mut skeleton = ScoreSkeleton::new(store, TcpTransport::new(stream));
            match skeleton.run().await {
                Ok(()) => log::info!("client {} disconnected", addr),
                Err(e) => log::warn!("client {} dropped: {}", addr, e),
            }
        });
    }
}
