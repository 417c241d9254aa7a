// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! WebSocket Transport
//!
//! Real transport implementation using tokio-tungstenite.
//! TLS backend is chosen by the `network-native-tls` / `network-rustls`
//! features.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::debug;

use super::error::NetworkError;
use super::transport::{Connector, Transport, TransportResult, WireMessage};

/// Opens WebSocket connections.
///
/// Supports both ws:// (plaintext) and wss:// (TLS) URLs.
#[derive(Debug, Clone)]
pub struct WebSocketConnector {
    connect_timeout: Duration,
}

impl WebSocketConnector {
    /// Creates a connector that gives up on handshakes after `connect_timeout`.
    pub fn new(connect_timeout: Duration) -> Self {
        WebSocketConnector { connect_timeout }
    }

    /// Checks that `url` uses a WebSocket scheme.
    fn check_scheme(url: &str) -> Result<(), NetworkError> {
        if url.starts_with("ws://") || url.starts_with("wss://") {
            Ok(())
        } else {
            Err(NetworkError::ConnectionFailed(
                "Invalid URL scheme (expected ws:// or wss://)".into(),
            ))
        }
    }
}

impl Default for WebSocketConnector {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

#[async_trait]
impl Connector for WebSocketConnector {
    async fn connect(&self, url: &str) -> TransportResult<Box<dyn Transport>> {
        Self::check_scheme(url)?;

        let handshake = tokio_tungstenite::connect_async(url);
        let (stream, _response) = tokio::time::timeout(self.connect_timeout, handshake)
            .await
            .map_err(|_| NetworkError::Timeout)?
            .map_err(|e| {
                NetworkError::ConnectionFailed(format!("WebSocket handshake failed: {}", e))
            })?;

        Ok(Box::new(WebSocketTransport { stream }))
    }
}

/// An open WebSocket.
pub struct WebSocketTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn send(&mut self, text: String) -> TransportResult<()> {
        self.stream.send(Message::Text(text)).await.map_err(|e| {
            if matches!(
                e,
                tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed
            ) {
                NetworkError::ConnectionClosed
            } else {
                NetworkError::SendFailed(e.to_string())
            }
        })
    }

    async fn receive(&mut self) -> TransportResult<Option<WireMessage>> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(WireMessage::Text(text))),
                Some(Ok(Message::Binary(data))) => return Ok(Some(WireMessage::Binary(data))),
                // Pongs to incoming pings are queued by tungstenite itself
                Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => continue,
                Some(Ok(Message::Close(frame))) => {
                    debug!(?frame, "peer sent close frame");
                    return Ok(None);
                }
                Some(Err(
                    tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed,
                ))
                | None => return Ok(None),
                Some(Err(e)) => return Err(NetworkError::ReceiveFailed(e.to_string())),
            }
        }
    }

    async fn close(&mut self) -> TransportResult<()> {
        match self.stream.close(None).await {
            Ok(())
            | Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                Ok(())
            }
            Err(e) => Err(NetworkError::SendFailed(e.to_string())),
        }
    }
}
