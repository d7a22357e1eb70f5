//! Fruit Drop (workspace facade crate).
//!
//! Re-exports the engine crates under `fruit_drop::{core,input,term,types}` and holds the
//! host-side collaborators the terminal binary wires together: command-line options,
//! high-score persistence and audio sinks.

pub mod audio;
pub mod cli;
pub mod highscore;

pub use fruit_drop_core as core;
pub use fruit_drop_input as input;
pub use fruit_drop_term as term;
pub use fruit_drop_types as types;
