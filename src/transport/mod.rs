use thiserror::Error;

use crate::protocol::Message;

/// The other end went away. Transports return this (inside `anyhow::Error`)
/// for an orderly disconnect so callers can tell it from a broken exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Connection closed by peer")]
pub struct PeerClosed;

/// Whether `err` is a [`PeerClosed`] disconnect.
pub fn is_peer_closed(err: &anyhow::Error) -> bool {
    err.downcast_ref::<PeerClosed>().is_some()
}

/// A bidirectional, message-oriented channel between score client and server.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<Message>;
}

pub mod in_memory;
pub mod tcp;
