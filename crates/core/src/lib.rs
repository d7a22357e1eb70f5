//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds every rule of the fruit-drop puzzle. It has **no dependencies**
//! on terminal, audio or storage code, making it:
//!
//! - **Deterministic**: the same seed and the same tick/action sequence reproduce a game
//! - **Testable**: every rule is reachable from plain function calls
//! - **Portable**: hosts drive it with `tick(elapsed_ms)` and read a snapshot back
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 fruit grid with column collapse
//! - [`pieces`]: shape rotation tables, co-rotated fruit assignment, kicks
//! - [`collision`]: fit test for a piece on the grid
//! - [`matcher`]: flood-fill match detection and the chain resolver state machine
//! - [`scoring`]: chain points, drop interval, level and palette rules
//! - [`rng`]: seeded LCG and uniform piece generation
//! - [`clock`]: countdown baseline with paused time excluded
//! - [`config`]: session configuration and its validation errors
//! - [`session`]: the progression controller (spawn, lock, resolve, stage, game over)
//! - [`snapshot`]: read-only state for renderers
//! - [`audio`]: sink trait for sound cues
//!
//! # Game Rules
//!
//! - Connected same-fruit regions (4-directional) of 4 or more cells clear
//! - A pass scores `cleared * 10 * level * 2^chain`; chain starts at 1 after each lock
//! - Gravity is re-applied before every scan, which is what produces chains
//! - Level grows every 32 cleared cells (Normal) or stays at 9 (Score-Attack)
//! - Normal mode stages end when the score reaches the goal; the board then resets
//!
//! # Example
//!
//! ```
//! use fruit_drop_core::{GameSession, Phase, SessionConfig};
//! use fruit_drop_core::types::{GameAction, GameMode};
//!
//! let mut session = GameSession::new(SessionConfig::new(GameMode::Normal).with_seed(12345))
//!     .expect("default config is valid");
//! session.start();
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::Rotate);
//! session.apply_action(GameAction::HardDrop);
//!
//! assert!(session.score() > 0); // Hard drop awards points
//! assert!(matches!(session.phase(), Phase::Playing | Phase::Resolving));
//! ```
//!
//! # Timing
//!
//! - **Tick Rate**: 16ms (approximately 60 FPS)
//! - **Gravity**: 1000ms per row at level 1, 50ms faster per level, floored at 150ms
//! - **Chain Step**: 100ms between resolution passes
//! - **Stage Clear**: 3000ms before the next stage starts
//!
//! Call [`GameSession::tick`](session::GameSession::tick) every frame with elapsed time.

pub mod audio;
pub mod clock;
pub mod collision;
pub mod config;
pub mod grid;
pub mod matcher;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use fruit_drop_types as types;

// Re-export commonly used types for convenience
pub use audio::{dispatch_cues, AudioSink, NullAudio};
pub use collision::fits;
pub use config::{ConfigError, SessionConfig};
pub use grid::Grid;
pub use matcher::{find_matches, resolve_all, ChainResolver, ClearReport, MatchGroup, ResolveStep};
pub use pieces::{get_shape, try_rotate, ActivePiece};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{chain_score, drop_interval_ms};
pub use session::{GameSession, Phase};
pub use snapshot::{GameSnapshot, PieceSnapshot};
