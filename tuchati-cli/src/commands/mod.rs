//! CLI Commands

pub mod chat;
pub mod notifications;
