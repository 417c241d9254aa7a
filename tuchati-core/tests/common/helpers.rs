// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Test Helpers

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tuchati_core::network::{ConnectionState, FrameHandler, InboundFrame};
use tuchati_core::ChatConfig;

pub const TEST_ROOM: &str = "3f2b6c1e-7d4a-4b8e-9c0f-1a2b3c4d5e6f";
pub const TEST_TOKEN: &str = "test-token";
pub const RECONNECT_DELAY: Duration = Duration::from_millis(1_500);

/// Config pointing at a local server with the default reconnect delay.
pub fn create_test_config() -> ChatConfig {
    ChatConfig::new("ws://localhost:8011")
        .unwrap()
        .with_reconnect_delay(RECONNECT_DELAY)
}

/// Frames received by a collecting handler.
#[derive(Clone, Default)]
pub struct Received(Arc<Mutex<Vec<InboundFrame>>>);

impl Received {
    pub fn frames(&self) -> Vec<InboundFrame> {
        self.0.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    /// Handler pushing every frame into this collector.
    pub fn handler(&self) -> FrameHandler {
        let frames = Arc::clone(&self.0);
        Arc::new(move |frame| frames.lock().unwrap().push(frame))
    }
}

/// Handler that panics on the text frame `trigger` and collects the rest.
pub fn panicking_handler(trigger: &'static str, received: &Received) -> FrameHandler {
    let collect = received.handler();
    Arc::new(move |frame| {
        if frame == InboundFrame::Text(trigger.to_string()) {
            panic!("handler failure on {trigger}");
        }
        collect(frame);
    })
}

/// Handler that ignores everything.
pub fn noop_handler() -> FrameHandler {
    Arc::new(|_| {})
}

/// Waits until the watched state satisfies `predicate`.
pub async fn wait_for_state(
    state: &mut watch::Receiver<ConnectionState>,
    predicate: impl Fn(&ConnectionState) -> bool,
) {
    state
        .wait_for(|s| predicate(s))
        .await
        .expect("connection task dropped its state sender");
}

/// Lets spawned tasks run without moving the clock meaningfully.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

/// Waits until `len()` reaches `count`.
pub async fn wait_for_frames(received: &Received, count: usize) {
    while received.len() < count {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
}
