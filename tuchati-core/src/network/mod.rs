// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network + Transport Layer
//!
//! Realtime channels between the chat client and the backend.
//!
//! # Architecture
//!
//! The network layer consists of:
//! - **Transport trait**: Platform-agnostic interface for an open channel
//! - **Connector trait**: Opens transports (WebSocket in production, mock in tests)
//! - **Frames**: Outbound frame kinds and opportunistic inbound decoding
//! - **Room socket**: Per-room connection with fixed-delay reconnection
//! - **Notification socket**: Single, non-reconnecting invite channel
//!
//! # Example
//!
//! ```ignore
//! use tuchati_core::network::{MockConnector, RoomSocket};
//!
//! let connector = MockConnector::new();
//! let room = RoomSocket::open(Arc::new(connector.clone()), &config, "42", "token", handler)?;
//!
//! room.send_message("habari");
//! room.close();
//! ```

mod error;
mod frame;
mod handler;
mod mock;
mod notifications;
mod room;
mod transport;
mod websocket;

// Error types
pub use error::NetworkError;

// Frame types
pub use frame::{ChatMessage, InboundFrame, MessagePayload, OutboundFrame, ServerEvent};

// Handlers
pub use handler::FrameHandler;

// Transport abstraction
pub use transport::{ConnectionState, Connector, Transport, TransportResult, WireMessage};

// Mock transport for testing
pub use mock::{MockConnector, MockPeer, MockTransport};

// WebSocket transport for production
pub use websocket::{WebSocketConnector, WebSocketTransport};

// Sockets
pub use notifications::NotificationSocket;
pub use room::RoomSocket;
