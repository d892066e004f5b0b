//! Socket seam between the session driver and the network

use crate::SessionError;
use futures_util::future::{self, BoxFuture};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use std::pin::Pin;
use tokio_tungstenite::tungstenite::Message;

pub type FrameSink = Pin<Box<dyn Sink<String, Error = SessionError> + Send>>;
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<String, SessionError>> + Send>>;

/// One open duplex connection carrying text frames
pub struct Connection {
    pub sink: FrameSink,
    pub stream: FrameStream,
}

/// Opens connections to the relay
pub trait Connector: Send + Sync {
    fn connect<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Connection, SessionError>>;
}

/// Websocket transport via tokio-tungstenite
#[derive(Debug, Clone, Copy, Default)]
pub struct WsConnector;

impl Connector for WsConnector {
    fn connect<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Connection, SessionError>> {
        Box::pin(async move {
            let (ws, _response) = tokio_tungstenite::connect_async(url).await?;
            let (write, read) = ws.split();

            let sink = write
                .sink_map_err(SessionError::from)
                .with(|text: String| future::ready(Ok::<_, SessionError>(Message::Text(text))));

            // Only text frames carry the envelope; control frames are handled by tungstenite
            let stream = read.filter_map(|msg| {
                future::ready(match msg {
                    Ok(Message::Text(text)) => Some(Ok(text)),
                    Ok(_) => None,
                    Err(e) => Some(Err(SessionError::from(e))),
                })
            });

            Ok(Connection {
                sink: Box::pin(sink),
                stream: Box::pin(stream),
            })
        })
    }
}
