//! Chat Command
//!
//! Joins a room: stdin lines become messages, inbound frames are printed.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use tuchati_core::network::{ConnectionState, RoomSocket};
use tuchati_core::ChatClient;

use crate::config::CliConfig;
use crate::display;

/// Line typed by the user.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Message(&'a str),
    Typing,
    StopTyping,
    Focus,
    Quit,
    Unknown(&'a str),
    Empty,
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    match line {
        "" => Input::Empty,
        "/typing" => Input::Typing,
        "/stop" => Input::StopTyping,
        "/focus" => Input::Focus,
        "/quit" | "/exit" => Input::Quit,
        // "//text" sends "/text"
        _ if line.starts_with("//") => Input::Message(&line[1..]),
        _ if line.starts_with('/') => Input::Unknown(line),
        _ => Input::Message(line),
    }
}

/// Runs the interactive chat loop until stdin closes, `/quit` or Ctrl-C.
pub async fn run(config: &CliConfig, room_id: &str, token: &str) -> Result<()> {
    let client = ChatClient::new(config.chat_config()?);
    let mut room = client.join_room(room_id, token, Arc::new(|frame| display::frame(&frame)))?;

    display::info(&format!("Joining room {}", room_id));
    display::info("Commands: /typing, /stop, /focus, /quit");

    let mut states = room.watch_state();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    if !handle_line(&room, &line) {
                        break;
                    }
                }
                None => break,
            },
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                display::state(&state);
                if state == ConnectionState::Closed {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    debug!(room = %room_id, "leaving room");
    room.close();
    room.closed().await;
    Ok(())
}

/// Returns false when the user asked to leave.
fn handle_line(room: &RoomSocket, line: &str) -> bool {
    match parse_input(line) {
        Input::Message(text) => {
            if !room.is_connected() {
                display::warning("Not connected, message dropped");
            }
            room.send_message(text);
        }
        Input::Typing => room.start_typing(),
        Input::StopTyping => room.stop_typing(),
        Input::Focus => room.focus(),
        Input::Quit => return false,
        Input::Unknown(cmd) => display::warning(&format!("Unknown command: {}", cmd)),
        Input::Empty => {}
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("  habari  "), Input::Message("habari"));
        assert_eq!(parse_input("/typing"), Input::Typing);
        assert_eq!(parse_input("/stop"), Input::StopTyping);
        assert_eq!(parse_input("/focus"), Input::Focus);
        assert_eq!(parse_input("/quit"), Input::Quit);
        assert_eq!(parse_input("/exit"), Input::Quit);
        assert_eq!(parse_input("/dance"), Input::Unknown("/dance"));
        assert_eq!(parse_input("//typing"), Input::Message("/typing"));
        assert_eq!(parse_input("   "), Input::Empty);
    }
}
