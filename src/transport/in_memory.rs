use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::task::yield_now;

use crate::protocol::Message;
use crate::transport::{PeerClosed, Transport};

/// Pair of connected in-process endpoints, used by tests and by local play
/// against an in-process score store.
pub struct InMemoryTransport {
    recv_queue: Arc<Mutex<VecDeque<Message>>>,
    send_queue: Arc<Mutex<VecDeque<Message>>>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let q1 = Arc::new(Mutex::new(VecDeque::new()));
        let q2 = Arc::new(Mutex::new(VecDeque::new()));
        (
            Self {
                recv_queue: q1.clone(),
                send_queue: q2.clone(),
            },
            Self {
                recv_queue: q2,
                send_queue: q1,
            },
        )
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        if Arc::strong_count(&self.send_queue) == 1 {
            return Err(PeerClosed.into());
        }
        let mut queue = self
            .send_queue
            .lock()
            .map_err(|_| anyhow::anyhow!("Channel poisoned"))?;
        queue.push_back(msg);
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        loop {
            if let Some(msg) = {
                let mut queue = self
                    .recv_queue
                    .lock()
                    .map_err(|_| anyhow::anyhow!("Channel poisoned"))?;
                queue.pop_front()
            } {
                return Ok(msg);
            }
            // Both handles of a queue live in the two endpoints; a single
            // owner means the peer was dropped.
            if Arc::strong_count(&self.recv_queue) == 1 {
                return Err(PeerClosed.into());
            }
            yield_now().await;
        }
    }
}
