#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bitgrid;
mod board;
mod common;
mod config;
mod player;
mod session;
mod ship;
#[cfg(feature = "std")]
pub mod domain;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
mod player_cli;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod scoreboard;
#[cfg(feature = "std")]
mod skeleton;
#[cfg(feature = "std")]
mod stub;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;

pub use bitgrid::{BitGrid, GridError};
pub use board::*;
pub use common::*;
pub use config::*;
pub use player::*;
pub use session::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
#[cfg(feature = "std")]
pub use player_cli::{CliGame, GameSummary};
#[cfg(feature = "std")]
pub use protocol::{Message, PROTOCOL_VERSION};
#[cfg(feature = "std")]
pub use scoreboard::{MemoryScoreStore, ScoreStore, ScoreboardError, DEFAULT_TOP_LIMIT};
#[cfg(feature = "std")]
pub use skeleton::{serve, ScoreSkeleton};
#[cfg(feature = "std")]
pub use stub::ScoreStub;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
