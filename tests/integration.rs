#![cfg(feature = "integration")]

mod common;

#[path = "integration/status_command.rs"]
mod status_command;
#[path = "integration/web_command.rs"]
mod web_command;
