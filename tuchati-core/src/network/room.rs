// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Room Socket
//!
//! Keeps a best-effort realtime channel to one room open, reconnecting
//! after unexpected closures.
//!
//! Each socket is served by one task that owns the transport, the retry
//! timer and the lifecycle flags. The [`RoomSocket`] handle only sends it
//! commands, so connection state is never shared or locked.
//!
//! Known limitations, kept on purpose:
//! - the reconnect delay is fixed (no backoff, no jitter, no retry ceiling);
//! - frames sent while disconnected are dropped, never queued or replayed;
//! - a clean closure the owner did not ask for still triggers a reconnect.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Sleep;
use tracing::{debug, info, warn};

use super::frame::{InboundFrame, OutboundFrame};
use super::handler::{FrameHandler, HandlerSlot};
use super::transport::{ConnectionState, Connector, Transport, TransportResult, WireMessage};
use crate::config::{ChatConfig, ConfigError};

enum Command {
    Send(OutboundFrame),
    Close,
}

/// Realtime connection to a single room.
///
/// # Example
///
/// ```ignore
/// use tuchati_core::network::{RoomSocket, WebSocketConnector};
///
/// let connector = Arc::new(WebSocketConnector::new(config.connect_timeout));
/// let room = RoomSocket::open(connector, &config, room_id, token, Arc::new(|frame| {
///     println!("{:?}", frame);
/// }))?;
///
/// room.start_typing();
/// room.send_message("habari");
/// room.close();
/// ```
pub struct RoomSocket {
    commands: Option<mpsc::UnboundedSender<Command>>,
    handler: HandlerSlot,
    state: watch::Receiver<ConnectionState>,
    task: Option<JoinHandle<()>>,
}

impl RoomSocket {
    /// Opens the socket and issues the first connection attempt.
    ///
    /// With an empty room id or token nothing is attempted and the
    /// returned socket stays inert. Must be called from within a tokio
    /// runtime.
    pub fn open(
        connector: Arc<dyn Connector>,
        config: &ChatConfig,
        room_id: &str,
        token: &str,
        handler: FrameHandler,
    ) -> Result<Self, ConfigError> {
        let handler = HandlerSlot::new(handler);

        if room_id.is_empty() || token.is_empty() {
            debug!("room id or token missing, not connecting");
            let (_, state) = watch::channel(ConnectionState::Disconnected);
            return Ok(RoomSocket {
                commands: None,
                handler,
                state,
                task: None,
            });
        }

        let url = config.room_url(room_id, token)?;
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);

        let connection = Connection {
            url: url.to_string(),
            room_id: room_id.to_string(),
            connector,
            reconnect_delay: config.reconnect_delay,
            handler: handler.clone(),
            commands: commands_rx,
            state: state_tx,
            socket: None,
            retry: None,
            closing: false,
            connecting: false,
            attempt: 0,
        };
        let task = tokio::spawn(connection.run());

        Ok(RoomSocket {
            commands: Some(commands_tx),
            handler,
            state: state_rx,
            task: Some(task),
        })
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state.borrow().clone()
    }

    /// Returns true if a socket is open.
    pub fn is_connected(&self) -> bool {
        *self.state.borrow() == ConnectionState::Connected
    }

    /// Receiver notified on every state change.
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.clone()
    }

    /// Registers a new inbound frame handler.
    ///
    /// The socket is left untouched; the next frame goes to `handler`.
    pub fn set_handler(&self, handler: FrameHandler) {
        self.handler.replace(handler);
    }

    /// Sends a frame, or silently drops it when no socket is open.
    pub fn send(&self, frame: OutboundFrame) {
        if !self.is_connected() {
            debug!("not connected, dropping outbound frame");
            return;
        }
        if let Some(commands) = &self.commands {
            let _ = commands.send(Command::Send(frame));
        }
    }

    pub fn send_message(&self, content: impl Into<String>) {
        self.send(OutboundFrame::message(content));
    }

    pub fn start_typing(&self) {
        self.send(OutboundFrame::Typing);
    }

    pub fn stop_typing(&self) {
        self.send(OutboundFrame::StoppedTyping);
    }

    pub fn focus(&self) {
        self.send(OutboundFrame::Focus);
    }

    /// Tears the connection down for good.
    ///
    /// Cancels any pending reconnect and closes the socket, or abandons the
    /// attempt in flight. Idempotent.
    pub fn close(&self) {
        if let Some(commands) = &self.commands {
            let _ = commands.send(Command::Close);
        }
    }

    /// Waits until the connection task has finished.
    ///
    /// Only returns after [`RoomSocket::close`] for a live socket.
    pub async fn closed(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for RoomSocket {
    fn drop(&mut self) {
        self.close();
    }
}

/// State owned by the connection task.
struct Connection {
    url: String,
    room_id: String,
    connector: Arc<dyn Connector>,
    reconnect_delay: Duration,
    handler: HandlerSlot,
    commands: mpsc::UnboundedReceiver<Command>,
    state: watch::Sender<ConnectionState>,
    socket: Option<Box<dyn Transport>>,
    retry: Option<Pin<Box<Sleep>>>,
    closing: bool,
    connecting: bool,
    attempt: u32,
}

impl Connection {
    async fn run(mut self) {
        self.connect().await;

        while !self.closing {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Send(frame)) => self.send(frame).await,
                    Some(Command::Close) | None => self.teardown().await,
                },
                inbound = next_inbound(&mut self.socket), if self.socket.is_some() => {
                    self.on_inbound(inbound).await;
                }
                () = retry_elapsed(&mut self.retry), if self.retry.is_some() => {
                    self.retry = None;
                    self.connect().await;
                }
            }
        }

        debug!(room = %self.room_id, "connection task finished");
    }

    /// Issues one connection attempt, unless one is pointless or already
    /// under way.
    async fn connect(&mut self) {
        if self.closing || self.connecting || self.socket.is_some() {
            debug!(room = %self.room_id, "connect suppressed");
            return;
        }

        self.connecting = true;
        self.set_state(ConnectionState::Connecting);

        let connector = Arc::clone(&self.connector);
        let url = self.url.clone();
        let mut attempt = connector.connect(&url);

        let result = loop {
            tokio::select! {
                result = &mut attempt => break Some(result),
                command = self.commands.recv() => match command {
                    Some(Command::Send(_)) => debug!("connecting, dropping outbound frame"),
                    Some(Command::Close) | None => break None,
                },
            }
        };
        drop(attempt);
        self.connecting = false;

        match result {
            None => {
                debug!(room = %self.room_id, "connect abandoned by owner");
                self.teardown().await;
            }
            Some(Ok(socket)) => {
                info!(room = %self.room_id, "realtime connection open");
                self.socket = Some(socket);
                self.attempt = 0;
                self.set_state(ConnectionState::Connected);
            }
            Some(Err(e)) => {
                warn!(room = %self.room_id, error = %e, "realtime connection failed");
                self.on_closed();
            }
        }
    }

    async fn send(&mut self, frame: OutboundFrame) {
        let Some(socket) = self.socket.as_mut() else {
            debug!("not connected, dropping outbound frame");
            return;
        };

        let text = match frame.encode() {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "dropping unencodable frame");
                return;
            }
        };

        if let Err(e) = socket.send(text).await {
            warn!(room = %self.room_id, error = %e, "send failed, closing");
            self.force_close().await;
        }
    }

    async fn on_inbound(&mut self, inbound: TransportResult<Option<WireMessage>>) {
        match inbound {
            Ok(Some(message)) => self.handler.dispatch(InboundFrame::decode(message)),
            Ok(None) => {
                info!(room = %self.room_id, "realtime connection closed");
                self.socket = None;
                self.on_closed();
            }
            Err(e) => {
                warn!(room = %self.room_id, error = %e, "transport error, closing");
                self.force_close().await;
            }
        }
    }

    /// Closes the socket after an error and takes the closure path.
    async fn force_close(&mut self) {
        if let Some(mut socket) = self.socket.take() {
            let _ = socket.close().await;
        }
        self.on_closed();
    }

    /// Reacts to the socket going away.
    fn on_closed(&mut self) {
        self.socket = None;
        if self.closing {
            self.set_state(ConnectionState::Closed);
        } else {
            self.schedule_reconnect();
        }
    }

    fn schedule_reconnect(&mut self) {
        if self.closing || self.connecting || self.socket.is_some() || self.retry.is_some() {
            debug!(room = %self.room_id, "reconnect suppressed");
            return;
        }

        self.attempt += 1;
        info!(
            room = %self.room_id,
            attempt = self.attempt,
            delay = ?self.reconnect_delay,
            "scheduling reconnect"
        );
        self.retry = Some(Box::pin(tokio::time::sleep(self.reconnect_delay)));
        self.set_state(ConnectionState::Reconnecting {
            attempt: self.attempt,
        });
    }

    /// Owner-requested teardown. Safe in any state.
    async fn teardown(&mut self) {
        self.closing = true;
        self.retry = None;
        if let Some(mut socket) = self.socket.take() {
            if let Err(e) = socket.close().await {
                debug!(error = %e, "error while closing socket");
            }
        }
        self.set_state(ConnectionState::Closed);
        info!(room = %self.room_id, "realtime connection torn down");
    }

    fn set_state(&self, state: ConnectionState) {
        self.state.send_replace(state);
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // Reached without teardown when the task unwinds or is aborted
        if !self.closing {
            warn!(room = %self.room_id, "connection task ended unexpectedly");
            self.set_state(ConnectionState::Disconnected);
        }
    }
}

async fn next_inbound(
    socket: &mut Option<Box<dyn Transport>>,
) -> TransportResult<Option<WireMessage>> {
    match socket {
        Some(socket) => socket.receive().await,
        None => std::future::pending().await,
    }
}

async fn retry_elapsed(retry: &mut Option<Pin<Box<Sleep>>>) {
    match retry {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}
