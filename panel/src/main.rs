mod api;
mod config;
mod input;
mod refresh;
mod state;

use std::path::PathBuf;

use anyhow::Context;
use session_core::{
    BattleCommand, ContextSnapshot, InboundEvent, SessionHandle, SessionHooks, SessionManager,
    SessionStatus, WsConnector,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::{ApiClient, Backend};
use crate::config::{PanelConfig, DEFAULT_CONFIG_PATH};
use crate::input::{Action, HELP};
use crate::refresh::Refresher;
use crate::state::PanelState;

fn usage_and_exit() -> ! {
    eprintln!(
        "panel\n\n\
USAGE:\n\
  panel [--config PATH]\n\n\
ENV:\n\
  PANEL_WS_URL       bot relay websocket\n\
  PANEL_API_URL      game server REST base\n\
  PANEL_TOKEN        viewer token\n\
  PANEL_USER_ID      viewer id\n\
  PANEL_CHANNEL_ID   channel the bot runs in\n\
  PANEL_CATALOG_DIR  read catalog tables from disk\n\
  RUST_LOG           log filter, default info\n"
    );
    std::process::exit(2);
}

fn parse_args() -> PathBuf {
    let mut config = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut it = std::env::args().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--config" => config = it.next().map(PathBuf::from).unwrap_or_else(|| usage_and_exit()),
            "-h" | "--help" => usage_and_exit(),
            _ => usage_and_exit(),
        }
    }
    config
}

/// Everything the main task reacts to
#[derive(Debug)]
enum Event {
    Status(SessionStatus),
    Context(ContextSnapshot),
    Refresh,
    Line(String),
    InputClosed,
}

/// Forwards driver callbacks to the main task
struct Hooks {
    tx: mpsc::UnboundedSender<Event>,
}

impl SessionHooks for Hooks {
    fn on_status(&mut self, status: SessionStatus) {
        let _ = self.tx.send(Event::Status(status));
    }

    fn on_event(&mut self, event: &InboundEvent) {
        if let InboundEvent::Context { data } = event {
            let _ = self.tx.send(Event::Context(data.clone()));
        }
    }

    fn refresh(&mut self) {
        let _ = self.tx.send(Event::Refresh);
    }
}

async fn read_stdin(tx: mpsc::UnboundedSender<Event>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if tx.send(Event::Line(line)).is_err() {
                    return;
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                break;
            }
        }
    }
    let _ = tx.send(Event::InputClosed);
}

struct Panel<B> {
    state: PanelState,
    backend: B,
    refresher: Refresher,
    session: SessionHandle,
}

impl<B: Backend> Panel<B> {
    async fn reload(&mut self) {
        self.state.view = self.refresher.refresh(&self.backend).await;
    }

    fn set_status(&mut self, status: SessionStatus) {
        let before = self.state.status();
        self.state.live = status.live;
        let after = self.state.status();
        if before != after {
            println!("status: {}", after);
        }
    }

    async fn handle_line(&mut self, line: &str) {
        let action = match input::parse_line(line) {
            Ok(Some(action)) => action,
            Ok(None) => return,
            Err(e) => {
                println!("{}", e);
                return;
            }
        };

        match action {
            Action::Battle(command) => {
                let ready = command == BattleCommand::Ready;
                if !self.session.send(command) {
                    println!("not connected, command dropped");
                } else if ready {
                    self.state.mark_ready();
                }
            }
            Action::Context => {
                if !self.session.request_context() {
                    println!("not connected");
                }
            }
            Action::Reload => {
                self.reload().await;
                print!("{}", self.state.summary());
            }
            Action::Reconnect => self.session.close(),
            Action::Create => {
                let user_id = self.refresher.user_id.clone();
                let token = self.refresher.token.clone();
                match self.backend.create_character(&user_id, &token).await {
                    Ok(()) => {
                        info!(user_id = %user_id, "Battler created");
                        self.reload().await;
                        // The bot only picks up new battlers on register
                        self.session.close();
                        print!("{}", self.state.summary());
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to create battler");
                        println!("could not create battler: {}", e);
                    }
                }
            }
            Action::Status => print!("{}", self.state.summary()),
            Action::Help => println!("{}", HELP),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config_path = parse_args();
    let mut config = PanelConfig::load_from_path(&config_path)
        .with_context(|| format!("load config {}", config_path.display()))?;
    config
        .apply_env(|k| std::env::var(k).ok())
        .context("apply environment overrides")?;
    if config.identity.token.is_empty() {
        warn!("No viewer token configured, the relay will reject REGISTER");
    }

    let refresher = Refresher {
        user_id: config.identity.user_id.clone(),
        token: config.identity.token.clone(),
        catalog_dir: config.catalog_dir.clone(),
    };
    let backend = ApiClient::new(config.server.api_url.clone());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let manager = SessionManager::new(
        config.session_config(),
        config.session_identity(),
        WsConnector,
        Hooks { tx: tx.clone() },
    );
    let mut panel = Panel {
        state: PanelState::default(),
        backend,
        refresher,
        session: manager.handle(),
    };

    // First refresh completes before the socket opens
    panel.reload().await;
    print!("{}", panel.state.summary());

    info!(url = %config.server.ws_url, channel = %config.identity.channel_id, "Starting session");
    tokio::spawn(manager.run());
    tokio::spawn(read_stdin(tx));

    while let Some(event) = rx.recv().await {
        match event {
            Event::Status(status) => panel.set_status(status),
            Event::Context(snapshot) => panel.state.apply_context(snapshot),
            Event::Refresh => panel.reload().await,
            Event::Line(line) => panel.handle_line(&line).await,
            Event::InputClosed => break,
        }
    }

    info!("Input closed, shutting down");
    Ok(())
}
