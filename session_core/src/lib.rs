//! session_core - Heartbeated websocket session to the battle bot
//!
//! This library provides:
//! - protocol: the JSON frames exchanged with the bot relay
//! - command: chat commands rendered into COMMAND frames
//! - Session: connection state, liveness and pong deadline bookkeeping
//! - SessionManager: the async driver that connects, heartbeats and reconnects
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use session_core::{Identity, SessionConfig, SessionManager, WsConnector};
//!
//! let manager = SessionManager::new(config, identity, WsConnector, hooks);
//! let handle = manager.handle();
//! tokio::spawn(manager.run());
//! handle.send(BattleCommand::Explore);
//! ```

pub mod command;
pub mod config;
pub mod manager;
pub mod protocol;
pub mod session;
pub mod transport;

pub use command::{BattleCommand, Target};
pub use config::{ReconnectPolicy, SessionConfig, MIN_TIMER};
pub use manager::{SessionHandle, SessionHooks, SessionManager};
pub use protocol::{ContextSnapshot, InboundEvent, Outbound};
pub use session::{ConnectionState, Identity, Session, SessionStatus};
pub use transport::{Connection, Connector, WsConnector};

use thiserror::Error;

/// Transport-level failure; every variant ends the current connection
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("WebSocket error: {0}")]
    Ws(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("Encode error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Connection closed")]
    Closed,
}
