// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mock Transport
//!
//! In-memory connector for tests. Every accepted connection gets a
//! [`MockPeer`] that plays the server side.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::error::NetworkError;
use super::transport::{Connector, Transport, TransportResult, WireMessage};

enum PeerEvent {
    Frame(WireMessage),
    Close,
    Error(NetworkError),
}

#[derive(Default)]
struct PeerState {
    sent: Vec<String>,
    closed_by_client: bool,
    fail_sends: bool,
}

#[derive(Default)]
struct ConnectorState {
    attempts: Vec<String>,
    refusals: VecDeque<NetworkError>,
    stalled: bool,
    peers: Vec<MockPeer>,
}

/// Mock connector for testing.
///
/// Records every connection attempt and can refuse or stall them.
///
/// # Example
///
/// ```ignore
/// let connector = MockConnector::new();
/// let socket = RoomSocket::open(Arc::new(connector.clone()), &config, "42", "token", handler)?;
///
/// let peer = connector.wait_for_peer(0).await;
/// peer.push_text(r#"{"type":"join","user":"amani"}"#);
/// peer.close();
/// ```
#[derive(Clone, Default)]
pub struct MockConnector {
    state: Arc<Mutex<ConnectorState>>,
}

enum Outcome {
    Stall,
    Refuse(NetworkError),
    Accept(MockTransport),
}

impl MockConnector {
    /// Creates a connector that accepts every attempt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next attempt fail with `error`. Calls stack up.
    pub fn refuse_next(&self, error: NetworkError) {
        self.state.lock().refusals.push_back(error);
    }

    /// While set, attempts never complete.
    pub fn set_stalled(&self, stalled: bool) {
        self.state.lock().stalled = stalled;
    }

    /// Number of connection attempts so far.
    pub fn attempts(&self) -> usize {
        self.state.lock().attempts.len()
    }

    /// URLs of all attempts, in order.
    pub fn attempted_urls(&self) -> Vec<String> {
        self.state.lock().attempts.clone()
    }

    /// Server side of the `index`-th accepted connection.
    pub fn peer(&self, index: usize) -> Option<MockPeer> {
        self.state.lock().peers.get(index).cloned()
    }

    /// Number of accepted connections so far.
    pub fn accepted(&self) -> usize {
        self.state.lock().peers.len()
    }

    /// Waits until the `index`-th connection has been accepted.
    pub async fn wait_for_peer(&self, index: usize) -> MockPeer {
        loop {
            if let Some(peer) = self.peer(index) {
                return peer;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self, url: &str) -> TransportResult<Box<dyn Transport>> {
        let outcome = {
            let mut state = self.state.lock();
            state.attempts.push(url.to_string());

            if state.stalled {
                Outcome::Stall
            } else if let Some(error) = state.refusals.pop_front() {
                Outcome::Refuse(error)
            } else {
                let (tx, rx) = mpsc::unbounded_channel();
                let shared = Arc::new(Mutex::new(PeerState::default()));
                state.peers.push(MockPeer {
                    url: url.to_string(),
                    events: tx,
                    state: Arc::clone(&shared),
                });
                Outcome::Accept(MockTransport {
                    events: rx,
                    state: shared,
                })
            }
        };

        match outcome {
            Outcome::Stall => std::future::pending().await,
            Outcome::Refuse(error) => Err(error),
            Outcome::Accept(transport) => Ok(Box::new(transport)),
        }
    }
}

/// Client side of a mock connection.
pub struct MockTransport {
    events: mpsc::UnboundedReceiver<PeerEvent>,
    state: Arc<Mutex<PeerState>>,
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&mut self, text: String) -> TransportResult<()> {
        let mut state = self.state.lock();
        if state.closed_by_client {
            return Err(NetworkError::ConnectionClosed);
        }
        if state.fail_sends {
            return Err(NetworkError::SendFailed("injected send failure".into()));
        }
        state.sent.push(text);
        Ok(())
    }

    async fn receive(&mut self) -> TransportResult<Option<WireMessage>> {
        match self.events.recv().await {
            Some(PeerEvent::Frame(message)) => Ok(Some(message)),
            Some(PeerEvent::Error(error)) => Err(error),
            Some(PeerEvent::Close) | None => Ok(None),
        }
    }

    async fn close(&mut self) -> TransportResult<()> {
        self.state.lock().closed_by_client = true;
        self.events.close();
        Ok(())
    }
}

/// Server side of a mock connection.
#[derive(Clone)]
pub struct MockPeer {
    url: String,
    events: mpsc::UnboundedSender<PeerEvent>,
    state: Arc<Mutex<PeerState>>,
}

impl MockPeer {
    /// URL the client connected to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Delivers a text frame to the client.
    pub fn push_text(&self, text: impl Into<String>) {
        let _ = self.events.send(PeerEvent::Frame(WireMessage::Text(text.into())));
    }

    /// Delivers a binary frame to the client.
    pub fn push_binary(&self, data: Vec<u8>) {
        let _ = self.events.send(PeerEvent::Frame(WireMessage::Binary(data)));
    }

    /// Closes the connection from the server side.
    pub fn close(&self) {
        let _ = self.events.send(PeerEvent::Close);
    }

    /// Makes the client's next receive fail with `error`.
    pub fn fail(&self, error: NetworkError) {
        let _ = self.events.send(PeerEvent::Error(error));
    }

    /// Makes every following client send fail.
    pub fn fail_sends(&self) {
        self.state.lock().fail_sends = true;
    }

    /// Text frames the client has sent on this connection.
    pub fn sent(&self) -> Vec<String> {
        self.state.lock().sent.clone()
    }

    /// True once the client closed this connection.
    pub fn is_closed_by_client(&self) -> bool {
        self.state.lock().closed_by_client
    }
}
