//! Async session driver: connect, heartbeat, reconnect

use crate::command::BattleCommand;
use crate::config::SessionConfig;
use crate::protocol::{InboundEvent, Outbound};
use crate::session::{Identity, Session, SessionStatus};
use crate::transport::{Connection, Connector, FrameSink};
use crate::SessionError;
use futures_util::{SinkExt, StreamExt};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Callbacks invoked on the driver task
pub trait SessionHooks: Send {
    /// Connection state or liveness changed
    fn on_status(&mut self, _status: SessionStatus) {}

    /// Any parsed inbound frame
    fn on_event(&mut self, _event: &InboundEvent) {}

    /// The bot flagged the character as stale
    fn refresh(&mut self);
}

#[derive(Debug)]
enum Control {
    Command(BattleCommand),
    RequestContext,
    Close,
}

/// Cloneable handle for issuing commands to a running manager
#[derive(Debug, Clone)]
pub struct SessionHandle {
    control_tx: mpsc::UnboundedSender<Control>,
    status_rx: watch::Receiver<SessionStatus>,
}

impl SessionHandle {
    /// Queue a chat command. Returns false, without sending, unless connected.
    pub fn send(&self, command: BattleCommand) -> bool {
        if !self.status().is_connected() {
            debug!(command = %command, "Dropping command, socket not open");
            return false;
        }
        self.control_tx.send(Control::Command(command)).is_ok()
    }

    /// Ask the bot for a fresh context snapshot
    pub fn request_context(&self) -> bool {
        if !self.status().is_connected() {
            debug!("Dropping context request, socket not open");
            return false;
        }
        self.control_tx.send(Control::RequestContext).is_ok()
    }

    /// Close the current socket; the manager reconnects after its usual delay
    pub fn close(&self) {
        let _ = self.control_tx.send(Control::Close);
    }

    pub fn status(&self) -> SessionStatus {
        *self.status_rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status_rx.clone()
    }
}

struct Driver<C, H> {
    connector: C,
    hooks: H,
    config: SessionConfig,
    session: Session,
    status_tx: watch::Sender<SessionStatus>,
    rng: ChaCha8Rng,
}

/// Owns the session and its socket for the lifetime of the panel
pub struct SessionManager<C, H> {
    driver: Driver<C, H>,
    control_tx: mpsc::UnboundedSender<Control>,
    control_rx: mpsc::UnboundedReceiver<Control>,
    status_rx: watch::Receiver<SessionStatus>,
}

impl<C: Connector, H: SessionHooks> SessionManager<C, H> {
    pub fn new(config: SessionConfig, identity: Identity, connector: C, hooks: H) -> Self {
        let session = Session::new(identity);
        let (status_tx, status_rx) = watch::channel(session.status());
        let (control_tx, control_rx) = mpsc::unbounded_channel();
        SessionManager {
            driver: Driver {
                connector,
                hooks,
                config,
                session,
                status_tx,
                rng: ChaCha8Rng::from_entropy(),
            },
            control_tx,
            control_rx,
            status_rx,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            control_tx: self.control_tx.clone(),
            status_rx: self.status_rx.clone(),
        }
    }

    /// Connect and keep reconnecting forever
    pub async fn run(mut self) {
        loop {
            self.connect_once().await;

            self.driver.session.on_close();
            self.driver.publish();
            self.discard_pending();

            let delay = self.driver.config.reconnect.next_delay(&mut self.driver.rng);
            info!(delay_ms = delay.as_millis() as u64, "Socket closed, reconnecting");
            time::sleep(delay).await;
            self.discard_pending();
        }
    }

    /// One connection from dial to close
    async fn connect_once(&mut self) {
        let Self {
            driver, control_rx, ..
        } = self;

        driver.session.on_connecting();
        driver.publish();

        let Connection {
            mut sink,
            mut stream,
        } = match driver.connector.connect(&driver.config.url).await {
            Ok(connection) => connection,
            Err(e) => {
                warn!(url = %driver.config.url, error = %e, "Connect failed");
                return;
            }
        };
        info!(url = %driver.config.url, "Connected");

        let opening = driver.session.on_open();
        driver.publish();
        for frame in &opening {
            if let Err(e) = write_frame(&mut sink, frame).await {
                warn!(error = %e, "Failed to register");
                return;
            }
        }

        let period = driver.config.heartbeat_interval();
        let mut heartbeat = time::interval_at(Instant::now() + period, period);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let deadline = driver.session.pong_deadline();
            tokio::select! {
                biased;

                _ = deadline_elapsed(deadline) => {
                    if driver.session.on_pong_deadline(Instant::now()) {
                        warn!("No PONG before deadline, bot marked asleep");
                    }
                    driver.publish();
                }
                frame = stream.next() => match frame {
                    Some(Ok(text)) => driver.handle_frame(&text),
                    Some(Err(e)) => {
                        warn!(error = %e, "Socket error");
                        let _ = sink.close().await;
                        return;
                    }
                    None => {
                        info!("Socket closed by remote");
                        return;
                    }
                },
                _ = heartbeat.tick() => {
                    let ping = driver
                        .session
                        .on_heartbeat(Instant::now(), driver.config.pong_deadline());
                    driver.publish();
                    if let Err(e) = write_frame(&mut sink, &ping).await {
                        warn!(error = %e, "Failed to send PING");
                        return;
                    }
                }
                control = control_rx.recv() => {
                    let frame = match control {
                        Some(Control::Command(command)) => driver.session.command(&command),
                        Some(Control::RequestContext) => driver.session.context_request(),
                        Some(Control::Close) | None => {
                            info!("Closing socket on request");
                            let _ = sink.close().await;
                            return;
                        }
                    };
                    if let Some(frame) = frame {
                        if let Err(e) = write_frame(&mut sink, &frame).await {
                            warn!(error = %e, kind = frame.kind(), "Failed to send frame");
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Commands queued against a socket that is gone are never replayed
    fn discard_pending(&mut self) {
        let mut dropped = 0usize;
        while let Ok(control) = self.control_rx.try_recv() {
            if matches!(control, Control::Command(_)) {
                dropped += 1;
            }
        }
        if dropped > 0 {
            debug!(dropped, "Discarded commands queued before close");
        }
    }
}

impl<C, H: SessionHooks> Driver<C, H> {
    fn handle_frame(&mut self, text: &str) {
        let event: InboundEvent = match serde_json::from_str(text) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "Ignoring unparseable frame");
                return;
            }
        };
        debug!(?event, "Received frame");

        let refresh = self.session.on_event(&event, Instant::now());
        self.hooks.on_event(&event);
        if refresh {
            info!("Bot requested a character refresh");
            self.hooks.refresh();
        }
        self.publish();
    }

    fn publish(&mut self) {
        let status = self.session.status();
        let changed = self.status_tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
        if changed {
            debug!(state = %status.state, live = status.live, "Session status");
            self.hooks.on_status(status);
        }
    }
}

async fn write_frame(sink: &mut FrameSink, frame: &Outbound) -> Result<(), SessionError> {
    let text = serde_json::to_string(frame)?;
    debug!(kind = frame.kind(), "Sending frame");
    sink.send(text).await
}

async fn deadline_elapsed(deadline: Option<Instant>) {
    match deadline {
        Some(at) => time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
