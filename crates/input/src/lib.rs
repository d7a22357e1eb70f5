//! Terminal input module (engine-facing).
//!
//! This crate is independent of any UI framework beyond `crossterm` key events. It
//! maps each key press to either a [`crate::types::GameAction`] for the session or a
//! [`HostCommand`] for the binary (start, restart, quit). Every press is a discrete
//! command; there is no key repeat handling beyond what the terminal delivers.

pub mod map;

pub use fruit_drop_types as types;

pub use map::{handle_key_event, host_command, should_quit, HostCommand, KeyInput};
