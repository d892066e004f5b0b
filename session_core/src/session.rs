//! Connection state owned by the session driver

use crate::command::BattleCommand;
use crate::protocol::{InboundEvent, Outbound};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
        };
        write!(f, "{}", s)
    }
}

/// Who the panel speaks for, and which bot it addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub token: String,
    pub channel_id: String,
}

impl Identity {
    pub fn new(token: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Identity {
            token: token.into(),
            channel_id: channel_id.into(),
        }
    }

    pub fn routing_address(&self) -> String {
        format!("BOT-{}", self.channel_id)
    }
}

/// Snapshot published to observers after every state change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStatus {
    pub state: ConnectionState,
    /// Whether the bot has answered recently
    pub live: bool,
    pub last_pong: Option<Instant>,
}

impl SessionStatus {
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }
}

/// Session bookkeeping with no I/O.
///
/// Each transition returns the frames to write; the driver owns the socket.
#[derive(Debug, Clone)]
pub struct Session {
    identity: Identity,
    to: String,
    state: ConnectionState,
    live: bool,
    pong_deadline: Option<Instant>,
    last_pong: Option<Instant>,
}

impl Session {
    pub fn new(identity: Identity) -> Self {
        let to = identity.routing_address();
        Session {
            identity,
            to,
            state: ConnectionState::Disconnected,
            live: false,
            pong_deadline: None,
            last_pong: None,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn awaiting_pong(&self) -> bool {
        self.pong_deadline.is_some()
    }

    pub fn pong_deadline(&self) -> Option<Instant> {
        self.pong_deadline
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            state: self.state,
            live: self.live,
            last_pong: self.last_pong,
        }
    }

    pub fn on_connecting(&mut self) {
        self.state = ConnectionState::Connecting;
    }

    /// Socket is open: register, then ask for an initial snapshot
    pub fn on_open(&mut self) -> Vec<Outbound> {
        self.state = ConnectionState::Connected;
        vec![
            Outbound::Register {
                jwt: self.identity.token.clone(),
            },
            self.context_frame(),
        ]
    }

    /// Heartbeat tick. An elapsed deadline still armed is judged before re-arming.
    pub fn on_heartbeat(&mut self, now: Instant, deadline: Duration) -> Outbound {
        self.on_pong_deadline(now);
        self.pong_deadline = Some(now + deadline);
        Outbound::Ping {
            jwt: self.identity.token.clone(),
            to: self.to.clone(),
        }
    }

    /// Returns true if the bot was just marked asleep
    pub fn on_pong_deadline(&mut self, now: Instant) -> bool {
        match self.pong_deadline {
            Some(at) if at <= now => {
                self.pong_deadline = None;
                let was_live = self.live;
                self.live = false;
                was_live
            }
            _ => false,
        }
    }

    /// Apply an inbound event; returns true when the host should refresh
    pub fn on_event(&mut self, event: &InboundEvent, now: Instant) -> bool {
        match event {
            InboundEvent::Pong {} => {
                self.live = true;
                self.last_pong = Some(now);
                self.pong_deadline = None;
                false
            }
            InboundEvent::Startup {} => {
                self.live = true;
                false
            }
            InboundEvent::Shutdown {} => {
                self.live = false;
                false
            }
            InboundEvent::Context { data } => {
                self.live = true;
                data.should_refresh
            }
        }
    }

    /// Socket gone: drop liveness and any pending deadline
    pub fn on_close(&mut self) {
        self.state = ConnectionState::Disconnected;
        self.live = false;
        self.pong_deadline = None;
    }

    /// COMMAND frame for a chat command, or None when not connected
    pub fn command(&self, command: &BattleCommand) -> Option<Outbound> {
        if self.state != ConnectionState::Connected {
            return None;
        }
        Some(Outbound::Command {
            jwt: self.identity.token.clone(),
            to: self.to.clone(),
            message: command.message(),
        })
    }

    pub fn context_request(&self) -> Option<Outbound> {
        if self.state != ConnectionState::Connected {
            return None;
        }
        Some(self.context_frame())
    }

    fn context_frame(&self) -> Outbound {
        Outbound::Context {
            jwt: self.identity.token.clone(),
            to: self.to.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ContextSnapshot;

    const DEADLINE: Duration = Duration::from_secs(20);

    fn connected() -> Session {
        let mut session = Session::new(Identity::new("tok", "42"));
        session.on_connecting();
        session.on_open();
        session
    }

    #[test]
    fn test_open_registers_then_requests_context() {
        let mut session = Session::new(Identity::new("tok", "42"));
        assert_eq!(session.state(), ConnectionState::Disconnected);
        let frames = session.on_open();
        assert_eq!(
            frames,
            vec![
                Outbound::Register {
                    jwt: "tok".to_string()
                },
                Outbound::Context {
                    jwt: "tok".to_string(),
                    to: "BOT-42".to_string()
                },
            ]
        );
        assert_eq!(session.state(), ConnectionState::Connected);
        assert!(!session.is_live());
    }

    #[test]
    fn test_missed_pong_marks_asleep() {
        let mut session = connected();
        let t0 = Instant::now();
        session.on_event(&InboundEvent::Startup {}, t0);
        assert!(session.is_live());

        let ping = session.on_heartbeat(t0, DEADLINE);
        assert_eq!(ping.kind(), "PING");
        assert!(session.awaiting_pong());

        assert!(!session.on_pong_deadline(t0 + Duration::from_secs(19)));
        assert!(session.is_live());
        assert!(session.on_pong_deadline(t0 + DEADLINE));
        assert!(!session.is_live());
        assert!(!session.awaiting_pong());
        assert_eq!(session.state(), ConnectionState::Connected);
    }

    #[test]
    fn test_pong_restores_liveness() {
        let mut session = connected();
        let t0 = Instant::now();
        session.on_heartbeat(t0, DEADLINE);
        session.on_pong_deadline(t0 + DEADLINE);
        assert!(!session.is_live());

        let later = t0 + Duration::from_secs(30);
        session.on_event(&InboundEvent::Pong {}, later);
        assert!(session.is_live());
        assert_eq!(session.status().last_pong, Some(later));
    }

    #[test]
    fn test_stale_deadline_judged_on_next_heartbeat() {
        let mut session = connected();
        let t0 = Instant::now();
        session.on_event(&InboundEvent::Startup {}, t0);
        session.on_heartbeat(t0, DEADLINE);
        // Heartbeat runs before the deadline handler got a chance
        session.on_heartbeat(t0 + DEADLINE, DEADLINE);
        assert!(!session.is_live());
        assert_eq!(session.pong_deadline(), Some(t0 + DEADLINE + DEADLINE));
    }

    #[test]
    fn test_pong_before_deadline_disarms() {
        let mut session = connected();
        let t0 = Instant::now();
        session.on_heartbeat(t0, DEADLINE);
        session.on_event(&InboundEvent::Pong {}, t0 + Duration::from_secs(1));
        assert!(!session.awaiting_pong());
        assert!(!session.on_pong_deadline(t0 + DEADLINE));
        assert!(session.is_live());
    }

    #[test]
    fn test_event_liveness() {
        let mut session = connected();
        let now = Instant::now();
        session.on_event(&InboundEvent::Startup {}, now);
        assert!(session.is_live());
        session.on_event(&InboundEvent::Shutdown {}, now);
        assert!(!session.is_live());

        let refresh = session.on_event(
            &InboundEvent::Context {
                data: ContextSnapshot::default(),
            },
            now,
        );
        assert!(session.is_live());
        assert!(!refresh);

        let refresh = session.on_event(
            &InboundEvent::Context {
                data: ContextSnapshot {
                    should_refresh: true,
                    ..ContextSnapshot::default()
                },
            },
            now,
        );
        assert!(refresh);
    }

    #[test]
    fn test_close_resets() {
        let mut session = connected();
        let now = Instant::now();
        session.on_event(&InboundEvent::Startup {}, now);
        session.on_heartbeat(now, DEADLINE);
        session.on_close();
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert!(!session.is_live());
        assert!(!session.awaiting_pong());
    }

    #[test]
    fn test_commands_only_when_connected() {
        let mut session = Session::new(Identity::new("tok", "7"));
        assert!(session.command(&BattleCommand::Ready).is_none());
        assert!(session.context_request().is_none());

        session.on_open();
        let frame = session.command(&BattleCommand::Ready);
        assert_eq!(
            frame,
            Some(Outbound::Command {
                jwt: "tok".to_string(),
                to: "BOT-7".to_string(),
                message: "!ready".to_string(),
            })
        );
        session.on_close();
        assert!(session.command(&BattleCommand::Ready).is_none());
    }
}
