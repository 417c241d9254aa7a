// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for network::error

use tuchati_core::network::*;

#[test]
fn test_error_display_messages() {
    let errors = vec![
        (
            NetworkError::ConnectionFailed("refused".into()),
            "Connection failed: refused",
        ),
        (NetworkError::ConnectionClosed, "Connection closed"),
        (NetworkError::Timeout, "Connection timeout"),
        (NetworkError::NotConnected, "Transport not connected"),
        (NetworkError::SendFailed("broken pipe".into()), "Send failed: broken pipe"),
        (NetworkError::ReceiveFailed("reset".into()), "Receive failed: reset"),
    ];

    for (error, expected) in errors {
        assert_eq!(error.to_string(), expected);
    }
}

#[test]
fn test_error_clone() {
    let error = NetworkError::ConnectionFailed("test".into());
    let cloned = error.clone();
    assert_eq!(error, cloned);
}

#[test]
fn test_serde_error_converts_to_serialization() {
    let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error = NetworkError::from(err);
    assert!(matches!(error, NetworkError::Serialization(_)));
}
