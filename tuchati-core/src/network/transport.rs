//! Transport Trait
//!
//! Platform-agnostic abstraction for the realtime channel.

use async_trait::async_trait;

use super::error::NetworkError;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, NetworkError>;

/// Connection state as seen by socket owners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected and no attempt in progress.
    Disconnected,
    /// Connection attempt in flight.
    Connecting,
    /// Connected and ready.
    Connected,
    /// Connection lost, a retry is scheduled.
    Reconnecting { attempt: u32 },
    /// Torn down by the owner. Terminal.
    Closed,
}

/// One message read from or written to the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireMessage {
    /// Text frame.
    Text(String),
    /// Binary frame.
    Binary(Vec<u8>),
}

/// An open bidirectional channel.
///
/// Implementations must make [`Transport::receive`] cancel-safe: sockets
/// race it against owner commands and drop the future when a command wins.
#[async_trait]
pub trait Transport: Send {
    /// Writes a text frame.
    async fn send(&mut self, text: String) -> TransportResult<()>;

    /// Waits for the next data frame.
    ///
    /// Returns `Ok(None)` once the peer has closed the channel. Control
    /// frames are handled internally and never surface here.
    async fn receive(&mut self) -> TransportResult<Option<WireMessage>>;

    /// Closes the channel.
    ///
    /// Safe to call more than once.
    async fn close(&mut self) -> TransportResult<()>;
}

/// Opens transports.
///
/// # Example
///
/// ```ignore
/// use tuchati_core::network::{Connector, WebSocketConnector};
///
/// let connector = WebSocketConnector::new(Duration::from_secs(10));
/// let mut transport = connector.connect("ws://localhost:8011/ws/chat/42/?token=t").await?;
/// transport.send(r#"{"type":"focus"}"#.into()).await?;
/// ```
#[async_trait]
pub trait Connector: Send + Sync {
    /// Establishes a new channel to `url`.
    async fn connect(&self, url: &str) -> TransportResult<Box<dyn Transport>>;
}
