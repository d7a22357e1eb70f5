//! Read-only view of a session for renderers and other observers.

use crate::pieces::{ActivePiece, PIECE_CELLS};
use crate::session::Phase;
use crate::types::{Cell, FruitType, GameMode, GameOverReason, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    /// Absolute `(x, y, fruit)` per occupied cell
    pub cells: [(i8, i8, FruitType); PIECE_CELLS],
}

impl From<ActivePiece> for PieceSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

impl PieceSnapshot {
    /// Cells relative to the piece origin, for drawing a preview box
    pub fn relative_cells(&self) -> [(i8, i8, FruitType); PIECE_CELLS] {
        self.cells.map(|(x, y, fruit)| (x - self.x, y - self.y, fruit))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<PieceSnapshot>,
    pub next: Option<PieceSnapshot>,
    pub mode: GameMode,
    pub phase: Phase,
    pub paused: bool,
    pub game_over: Option<GameOverReason>,
    pub new_record: bool,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub total_cleared: u32,
    pub stage: u32,
    /// `None` in Score-Attack
    pub goal: Option<u32>,
    pub time_left_ms: u64,
    pub drop_interval_ms: u32,
    /// Chain index of the running resolution sequence, 0 when idle
    pub chain: u32,
}

impl GameSnapshot {
    pub fn empty(mode: GameMode) -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            mode,
            phase: Phase::AwaitingStart,
            paused: false,
            game_over: None,
            new_record: false,
            score: 0,
            high_score: 0,
            level: 0,
            total_cleared: 0,
            stage: 1,
            goal: None,
            time_left_ms: 0,
            drop_interval_ms: 0,
            chain: 0,
        }
    }

    /// Countdown as displayed: whole seconds, rounded up
    pub fn time_display_secs(&self) -> u64 {
        self.time_left_ms.div_ceil(1000)
    }

    /// True while the countdown is in its final seconds
    pub fn time_warning(&self) -> bool {
        self.time_left_ms > 0 && self.time_left_ms <= crate::types::TIME_WARNING_MS as u64
    }

    pub fn resolving(&self) -> bool {
        self.phase == Phase::Resolving
    }

    /// Even stages use the alternate backdrop
    pub fn alternate_backdrop(&self) -> bool {
        self.stage % 2 == 0
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing && !self.paused
    }
}
