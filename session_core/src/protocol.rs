//! JSON envelope exchanged with the bot relay, discriminated by `type`

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Frames sent by the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outbound {
    Register { jwt: String },
    Context { jwt: String, to: String },
    Ping { jwt: String, to: String },
    Command { jwt: String, to: String, message: String },
}

impl Outbound {
    pub fn kind(&self) -> &'static str {
        match self {
            Outbound::Register { .. } => "REGISTER",
            Outbound::Context { .. } => "CONTEXT",
            Outbound::Ping { .. } => "PING",
            Outbound::Command { .. } => "COMMAND",
        }
    }
}

/// Frames pushed by the relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InboundEvent {
    Context { data: ContextSnapshot },
    Shutdown {},
    Startup {},
    Pong {},
}

/// Snapshot of the dungeon as seen by the bot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSnapshot {
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub monsters: Vec<String>,
    /// Passed through to the display layer as-is
    #[serde(default)]
    pub buffs: Value,
    #[serde(default)]
    pub cooldown: Value,
    #[serde(default)]
    pub should_refresh: bool,
}

impl ContextSnapshot {
    pub fn has_player(&self, name: &str) -> bool {
        self.players.iter().any(|p| p == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outbound_shapes() {
        let register = Outbound::Register {
            jwt: "tok".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&register).unwrap(),
            json!({"type": "REGISTER", "jwt": "tok"})
        );

        let command = Outbound::Command {
            jwt: "tok".to_string(),
            to: "BOT-42".to_string(),
            message: "!explore".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&command).unwrap(),
            json!({"type": "COMMAND", "jwt": "tok", "to": "BOT-42", "message": "!explore"})
        );
        assert_eq!(command.kind(), "COMMAND");
    }

    #[test]
    fn test_parse_context() {
        let frame = r#"{
            "type": "CONTEXT",
            "data": {
                "players": ["deus", "rook"],
                "monsters": ["slime"],
                "buffs": {"deus": ["haste"]},
                "cooldown": 3,
                "shouldRefresh": true
            }
        }"#;
        let event: InboundEvent = serde_json::from_str(frame).unwrap();
        let InboundEvent::Context { data } = event else {
            panic!("Expected context event");
        };
        assert!(data.should_refresh);
        assert!(data.has_player("rook"));
        assert_eq!(data.monsters, vec!["slime".to_string()]);
        assert_eq!(data.cooldown, json!(3));
    }

    #[test]
    fn test_parse_bare_events() {
        let event: InboundEvent = serde_json::from_str(r#"{"type": "PONG"}"#).unwrap();
        assert_eq!(event, InboundEvent::Pong {});
        let event: InboundEvent =
            serde_json::from_str(r#"{"type": "SHUTDOWN", "reason": "stream ended"}"#).unwrap();
        assert_eq!(event, InboundEvent::Shutdown {});
        let event: InboundEvent = serde_json::from_str(r#"{"type": "STARTUP"}"#).unwrap();
        assert_eq!(event, InboundEvent::Startup {});
    }

    #[test]
    fn test_context_defaults() {
        let event: InboundEvent =
            serde_json::from_str(r#"{"type": "CONTEXT", "data": {}}"#).unwrap();
        assert_eq!(
            event,
            InboundEvent::Context {
                data: ContextSnapshot::default()
            }
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(serde_json::from_str::<InboundEvent>(r#"{"type": "HELLO"}"#).is_err());
    }
}
