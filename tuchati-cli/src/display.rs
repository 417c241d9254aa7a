//! Terminal output helpers.

use console::style;
use tuchati_core::network::{ChatMessage, ConnectionState, InboundFrame, ServerEvent};

pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

pub fn warning(msg: &str) {
    println!("{} {}", style("!").yellow().bold(), msg);
}

pub fn message(msg: &ChatMessage) {
    let time = msg
        .created_at
        .as_deref()
        .and_then(|t| t.get(11..16))
        .unwrap_or("--:--");
    println!(
        "{} {} {}",
        style(time).dim(),
        style(format!("{}:", msg.sender)).cyan().bold(),
        msg.content
    );
}

/// Prints one inbound frame, typed when recognised.
pub fn frame(frame: &InboundFrame) {
    match ServerEvent::from_frame(frame) {
        Some(ServerEvent::History { messages }) => {
            info(&format!("{} earlier messages", messages.len()));
            for msg in &messages {
                message(msg);
            }
        }
        Some(ServerEvent::Message(msg)) => message(&msg),
        Some(ServerEvent::Typing { user, typing: true }) => {
            println!("{}", style(format!("{} is typing…", user)).dim().italic());
        }
        Some(ServerEvent::Typing { typing: false, .. }) => {}
        Some(ServerEvent::Join { user }) => info(&format!("{} joined", user)),
        None => raw(frame),
    }
}

pub fn raw(frame: &InboundFrame) {
    match frame {
        InboundFrame::Json(value) => println!("{} {}", style("»").dim(), value),
        InboundFrame::Text(text) => println!("{} {}", style("»").dim(), text),
        InboundFrame::Binary(data) => {
            println!("{} <{} bytes>", style("»").dim(), data.len());
        }
    }
}

pub fn state(state: &ConnectionState) {
    match state {
        ConnectionState::Connected => success("Connected"),
        ConnectionState::Connecting => info("Connecting..."),
        ConnectionState::Reconnecting { attempt } => {
            warning(&format!("Connection lost, retrying (attempt {})", attempt));
        }
        ConnectionState::Disconnected => warning("Disconnected"),
        ConnectionState::Closed => info("Closed"),
    }
}
