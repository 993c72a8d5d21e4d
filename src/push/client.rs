//! WebSocket transport for the push subscription.

use super::codec::{self, EnginePacket, SocketPacket};
use super::{PushError, board_update_for_event};
use crate::board::BoardUpdate;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

/// What one read from the subscription produced.
#[derive(Debug)]
pub enum PushEvent {
    /// The server confirmed the namespace subscription.
    Subscribed,
    /// An order event the board follows.
    Update(BoardUpdate),
    /// A frame or payload that could not be used; the connection stays open.
    Dropped(PushError),
}

#[derive(Debug, Clone)]
pub struct PushClient {
    url: String,
}

impl PushClient {
    pub fn new(url: String) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Opens the WebSocket. The Socket.IO handshake completes while reading events.
    pub async fn connect(&self) -> Result<PushConnection, PushError> {
        let (ws, _response) = connect_async(self.url.as_str()).await?;
        Ok(PushConnection { ws })
    }
}

/// An open push subscription.
pub struct PushConnection {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl PushConnection {
    /// Reads until something the caller needs to see, answering handshake and
    /// heartbeat frames along the way.
    ///
    /// # Errors
    /// Transport failures, a server-side close or a rejected subscription end the
    /// connection and are returned as errors.
    pub async fn next_event(&mut self) -> Result<PushEvent, PushError> {
        loop {
            let message = match self.ws.next().await {
                Some(message) => message?,
                None => return Err(PushError::Closed),
            };
            let text = match message {
                Message::Text(text) => text,
                Message::Close(_) => return Err(PushError::Closed),
                // Pings are answered by tungstenite itself.
                _ => continue,
            };

            let packet = match codec::decode_frame(&text) {
                Ok(packet) => packet,
                Err(e) => return Ok(PushEvent::Dropped(e.into())),
            };
            match packet {
                EnginePacket::Open(_) => self.send_frame(codec::connect_frame()).await?,
                EnginePacket::Ping(data) => self.send_frame(codec::pong_frame(&data)).await?,
                EnginePacket::Close => return Err(PushError::Closed),
                EnginePacket::Message(SocketPacket::Connect(_)) => {
                    return Ok(PushEvent::Subscribed);
                }
                EnginePacket::Message(SocketPacket::Disconnect) => {
                    return Err(PushError::Closed);
                }
                EnginePacket::Message(SocketPacket::ConnectError(detail)) => {
                    let detail = detail.map(|d| d.to_string()).unwrap_or_default();
                    return Err(PushError::Rejected(detail));
                }
                EnginePacket::Message(SocketPacket::Event { name, payload }) => {
                    match board_update_for_event(&name, payload) {
                        Ok(Some(update)) => return Ok(PushEvent::Update(update)),
                        Ok(None) => continue,
                        Err(e) => return Ok(PushEvent::Dropped(e)),
                    }
                }
                EnginePacket::Message(SocketPacket::Ack)
                | EnginePacket::Pong(_)
                | EnginePacket::Upgrade
                | EnginePacket::Noop => continue,
            }
        }
    }

    /// Closes the subscription.
    pub async fn close(mut self) {
        let _ = self.ws.close(None).await;
    }

    async fn send_frame(&mut self, frame: String) -> Result<(), PushError> {
        self.ws.send(Message::Text(frame)).await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use futures::{SinkExt, StreamExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;
    use tokio_tungstenite::accept_async;
    use tokio_tungstenite::tungstenite::Message;

    /// Minimal Socket.IO server: completes the handshake, sends `frames`,
    /// then holds the socket open (or closes it when `close_after` is set).
    /// Frames received from the client are forwarded to the returned channel.
    pub async fn serve(
        frames: Vec<String>,
        close_after: bool,
    ) -> (String, mpsc::UnboundedReceiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (seen_tx, seen_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            ws.send(Message::Text(
                r#"0{"sid":"s1","pingInterval":25000,"pingTimeout":20000}"#.to_string(),
            ))
            .await
            .unwrap();

            // Wait for the namespace connect before confirming it.
            while let Some(Ok(message)) = ws.next().await {
                if let Message::Text(text) = message {
                    let _ = seen_tx.send(text.clone());
                    if text == "40" {
                        break;
                    }
                }
            }
            ws.send(Message::Text(r#"40{"sid":"n1"}"#.to_string()))
                .await
                .unwrap();

            for frame in frames {
                ws.send(Message::Text(frame)).await.unwrap();
            }

            if close_after {
                let _ = ws.close(None).await;
                return;
            }
            while let Some(Ok(message)) = ws.next().await {
                if let Message::Text(text) = message {
                    let _ = seen_tx.send(text);
                }
            }
        });

        (format!("ws://{}/socket.io/?EIO=4&transport=websocket", addr), seen_rx)
    }
}
