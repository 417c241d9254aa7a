// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network Error Types

use thiserror::Error;

/// Errors raised by transports and connectors.
///
/// None of these reach socket owners directly: the room socket treats every
/// one of them as a closure and falls back to its reconnect path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Connection establishment failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Connection was closed by the peer.
    #[error("Connection closed")]
    ConnectionClosed,

    /// Connection attempt did not complete in time.
    #[error("Connection timeout")]
    Timeout,

    /// Operation requires an open connection.
    #[error("Transport not connected")]
    NotConnected,

    /// Writing a frame failed.
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// Reading a frame failed.
    #[error("Receive failed: {0}")]
    ReceiveFailed(String),

    /// Outbound frame could not be encoded.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        NetworkError::Serialization(err.to_string())
    }
}
