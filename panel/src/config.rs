//! Panel configuration

use serde::{Deserialize, Serialize};
use session_core::{Identity, ReconnectPolicy, SessionConfig};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "panel.toml";

#[derive(Debug, Error)]
pub enum PanelConfigError {
    #[error("IO error reading '{}': {error}", .path.display())]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Parse error in '{}': {error}", .path.display())]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{}': {message}", .path.display())]
    Validation { message: String, path: PathBuf },
    #[error("Invalid value for {var}: '{value}'")]
    Env { var: &'static str, value: String },
}

/// Everything the panel needs to reach the bot and the game server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub session: SessionSection,
    /// Read catalog tables from this directory instead of the API
    #[serde(default)]
    pub catalog_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            ws_url: default_ws_url(),
            api_url: default_api_url(),
        }
    }
}

fn default_ws_url() -> String {
    "ws://localhost:8090".to_string()
}
fn default_api_url() -> String {
    "http://localhost:8081".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Signed viewer token, sent as `jwt` and as the bearer credential
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub channel_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSection {
    #[serde(default = "default_heartbeat_secs")]
    pub heartbeat_secs: u64,
    #[serde(default = "default_pong_deadline_secs")]
    pub pong_deadline_secs: u64,
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
    #[serde(default)]
    pub reconnect_jitter_ms: u64,
}

impl Default for SessionSection {
    fn default() -> Self {
        SessionSection {
            heartbeat_secs: default_heartbeat_secs(),
            pong_deadline_secs: default_pong_deadline_secs(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
            reconnect_jitter_ms: 0,
        }
    }
}

fn default_heartbeat_secs() -> u64 {
    20
}
fn default_pong_deadline_secs() -> u64 {
    20
}
fn default_reconnect_delay_ms() -> u64 {
    5000
}

impl PanelConfig {
    /// Load from a TOML file; a missing file yields the defaults
    pub fn load_from_path(path: &Path) -> Result<Self, PanelConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(PanelConfig::default()),
            Err(error) => {
                return Err(PanelConfigError::Io {
                    error,
                    path: path.to_path_buf(),
                })
            }
        };
        let config: PanelConfig =
            toml::from_str(&content).map_err(|error| PanelConfigError::Parse {
                error,
                path: path.to_path_buf(),
            })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<(), PanelConfigError> {
        let invalid = |message: &str| PanelConfigError::Validation {
            message: message.to_string(),
            path: path.to_path_buf(),
        };
        if self.session.heartbeat_secs == 0 {
            return Err(invalid("session.heartbeat_secs must be at least 1"));
        }
        if self.session.pong_deadline_secs == 0 {
            return Err(invalid("session.pong_deadline_secs must be at least 1"));
        }
        Ok(())
    }

    /// Apply `PANEL_*` overrides from a variable lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), PanelConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PANEL_WS_URL") {
            self.server.ws_url = v;
        }
        if let Some(v) = lookup("PANEL_API_URL") {
            self.server.api_url = v;
        }
        if let Some(v) = lookup("PANEL_TOKEN") {
            self.identity.token = v;
        }
        if let Some(v) = lookup("PANEL_USER_ID") {
            self.identity.user_id = v;
        }
        if let Some(v) = lookup("PANEL_CHANNEL_ID") {
            self.identity.channel_id = v;
        }
        if let Some(v) = lookup("PANEL_CATALOG_DIR") {
            self.catalog_dir = if v.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(v))
            };
        }
        if let Some(v) = lookup("PANEL_RECONNECT_JITTER_MS") {
            self.session.reconnect_jitter_ms = v.trim().parse().map_err(|_| PanelConfigError::Env {
                var: "PANEL_RECONNECT_JITTER_MS",
                value: v,
            })?;
        }
        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            url: self.server.ws_url.clone(),
            heartbeat_secs: self.session.heartbeat_secs,
            pong_deadline_secs: self.session.pong_deadline_secs,
            reconnect: ReconnectPolicy {
                delay_ms: self.session.reconnect_delay_ms,
                jitter_ms: self.session.reconnect_jitter_ms,
            },
        }
    }

    pub fn session_identity(&self) -> Identity {
        Identity::new(self.identity.token.clone(), self.identity.channel_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PanelConfig::load_from_path(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, PanelConfig::default());
        assert_eq!(config.session.heartbeat_secs, 20);
        assert_eq!(config.session.reconnect_delay_ms, 5000);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
catalog_dir = "catalog"

[server]
ws_url = "wss://relay.example"

[identity]
token = "abc"
channel_id = "42"

[session]
reconnect_jitter_ms = 250
"#
        )
        .unwrap();

        let config = PanelConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.server.ws_url, "wss://relay.example");
        assert_eq!(config.server.api_url, "http://localhost:8081");
        assert_eq!(config.identity.token, "abc");
        assert_eq!(config.catalog_dir, Some(PathBuf::from("catalog")));

        let session = config.session_config();
        assert_eq!(session.url, "wss://relay.example");
        assert_eq!(session.reconnect.delay_ms, 5000);
        assert_eq!(session.reconnect.jitter_ms, 250);
        assert_eq!(config.session_identity().routing_address(), "BOT-42");
    }

    #[test]
    fn test_parse_error_names_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server\nws_url = 1").unwrap();
        let err = PanelConfig::load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, PanelConfigError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_zero_timers_rejected() {
        for section in ["heartbeat_secs = 0", "pong_deadline_secs = 0"] {
            let mut file = NamedTempFile::new().unwrap();
            writeln!(file, "[session]\n{}", section).unwrap();
            let err = PanelConfig::load_from_path(file.path()).unwrap_err();
            assert!(matches!(err, PanelConfigError::Validation { .. }), "{section}");
        }
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PANEL_TOKEN", "from-env"),
            ("PANEL_USER_ID", "u1"),
            ("PANEL_CATALOG_DIR", "/srv/catalog"),
        ]
        .into_iter()
        .collect();

        let mut config = PanelConfig::default();
        config
            .apply_env(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.identity.token, "from-env");
        assert_eq!(config.identity.user_id, "u1");
        assert_eq!(config.catalog_dir, Some(PathBuf::from("/srv/catalog")));
        assert_eq!(config.server.ws_url, "ws://localhost:8090");
    }

    #[test]
    fn test_bad_env_number() {
        let mut config = PanelConfig::default();
        let err = config
            .apply_env(|k| (k == "PANEL_RECONNECT_JITTER_MS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, PanelConfigError::Env { .. }));
    }
}
