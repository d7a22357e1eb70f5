//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, audio and persistence hosts).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the spawn row)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity at level 1, stage 1 |
//! | `DROP_STEP_PER_LEVEL_MS` | 50 | Gravity speed-up per level |
//! | `DROP_STEP_PER_STAGE_MS` | 25 | Gravity speed-up per stage |
//! | `DROP_INTERVAL_FLOOR_MS` | 150 | Fastest gravity |
//! | `CHAIN_STEP_DELAY_MS` | 100 | Pause between chain passes |
//! | `STAGE_CLEAR_DELAY_MS` | 3000 | Stage clear banner before the board resets |
//!
//! # Examples
//!
//! ```
//! use fruit_drop_types::{FruitType, GameAction, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(FruitType::from_str("Cherry"), Some(FruitType::Cherry));
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Total number of cells on the board
pub const BOARD_CELLS: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Base gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity speed-up per level above 1
pub const DROP_STEP_PER_LEVEL_MS: u32 = 50;

/// Gravity speed-up per stage above 1 (Normal mode)
pub const DROP_STEP_PER_STAGE_MS: u32 = 25;

/// Minimum drop interval
pub const DROP_INTERVAL_FLOOR_MS: u32 = 150;

/// Delay between two passes of a chain sequence
pub const CHAIN_STEP_DELAY_MS: u32 = 100;

/// Delay between the stage clear signal and the next stage
pub const STAGE_CLEAR_DELAY_MS: u32 = 3000;

/// Smallest connected same-fruit region that clears
pub const MIN_MATCH_SIZE: usize = 4;

/// Cleared cells in one pass that count as a large clear
pub const LARGE_CLEAR_SIZE: usize = 5;

/// Cumulative cleared cells per level
pub const LEVEL_UP_CLEARED: u32 = 32;

/// Starting level in Normal mode
pub const NORMAL_START_LEVEL: u32 = 1;

/// Fixed level in Score-Attack mode
pub const SCORE_ATTACK_LEVEL: u32 = 9;

/// Highest level the palette and gravity formulas are defined for
pub const MAX_LEVEL: u32 = 99;

/// Time limit for a Normal stage in seconds
pub const NORMAL_TIME_LIMIT_SECS: u32 = 90;

/// Time limit for a Score-Attack session in seconds
pub const SCORE_ATTACK_TIME_LIMIT_SECS: u32 = 60;

/// Score goal of the first Normal stage
pub const INITIAL_GOAL: u32 = 1000;

/// Goal increase per cleared stage
pub const GOAL_INCREMENT: u32 = 500;

/// Points per cleared cell before level and chain multipliers
pub const POINTS_PER_CELL: u32 = 10;

/// Remaining time (ms) below which the countdown warning is shown
pub const TIME_WARNING_MS: u32 = 5500;

/// Number of fruits in the palette at level 0 (one more per level, capped at 7)
pub const BASE_PALETTE_SIZE: u32 = 3;


/// The seven fruit types, in palette order
///
/// The palette at level `L` is the first `min(7, 3 + L)` entries of [`FruitType::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FruitType {
    Cherry,
    Peach,
    Orange,
    Banana,
    Melon,
    Blueberry,
    Grape,
}

impl FruitType {
    /// All fruits in palette order
    pub const ALL: [FruitType; 7] = [
        FruitType::Cherry,
        FruitType::Peach,
        FruitType::Orange,
        FruitType::Banana,
        FruitType::Melon,
        FruitType::Blueberry,
        FruitType::Grape,
    ];

    /// Position in the palette order
    pub fn index(&self) -> usize {
        match self {
            FruitType::Cherry => 0,
            FruitType::Peach => 1,
            FruitType::Orange => 2,
            FruitType::Banana => 3,
            FruitType::Melon => 4,
            FruitType::Blueberry => 5,
            FruitType::Grape => 6,
        }
    }

    /// Parse fruit type from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use fruit_drop_types::FruitType;
    ///
    /// assert_eq!(FruitType::from_str("grape"), Some(FruitType::Grape));
    /// assert_eq!(FruitType::from_str("MELON"), Some(FruitType::Melon));
    /// assert_eq!(FruitType::from_str("kiwi"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cherry" => Some(FruitType::Cherry),
            "peach" => Some(FruitType::Peach),
            "orange" => Some(FruitType::Orange),
            "banana" => Some(FruitType::Banana),
            "melon" => Some(FruitType::Melon),
            "blueberry" => Some(FruitType::Blueberry),
            "grape" => Some(FruitType::Grape),
            _ => None,
        }
    }

    /// Single-letter code used by text fixtures and the terminal view
    pub fn letter(&self) -> char {
        match self {
            FruitType::Cherry => 'C',
            FruitType::Peach => 'P',
            FruitType::Orange => 'O',
            FruitType::Banana => 'B',
            FruitType::Melon => 'M',
            FruitType::Blueberry => 'U',
            FruitType::Grape => 'G',
        }
    }

    /// Inverse of [`FruitType::letter`] (case-insensitive)
    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'C' => Some(FruitType::Cherry),
            'P' => Some(FruitType::Peach),
            'O' => Some(FruitType::Orange),
            'B' => Some(FruitType::Banana),
            'M' => Some(FruitType::Melon),
            'U' => Some(FruitType::Blueberry),
            'G' => Some(FruitType::Grape),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FruitType::Cherry => "cherry",
            FruitType::Peach => "peach",
            FruitType::Orange => "orange",
            FruitType::Banana => "banana",
            FruitType::Melon => "melon",
            FruitType::Blueberry => "blueberry",
            FruitType::Grape => "grape",
        }
    }
}

/// The seven polyomino shapes a piece can take
///
/// Rotation-state count per shape:
/// - **O**: 1 (rotation is a no-op)
/// - **I**, **S**, **Z**: 2
/// - **T**, **L**, **J**: 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use fruit_drop_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("Z"), Some(ShapeKind::Z));
    /// assert_eq!(ShapeKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
        }
    }
}

/// Session mode, fixed when the session is constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    /// Staged play: each stage has a score goal, level grows with cleared cells
    #[default]
    Normal,
    /// Fixed level 9, no stages or goal, shorter timer
    ScoreAttack,
}

impl GameMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(&['-', '_'][..], "").as_str() {
            "normal" => Some(GameMode::Normal),
            "scoreattack" => Some(GameMode::ScoreAttack),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Normal => "normal",
            GameMode::ScoreAttack => "score-attack",
        }
    }
}

/// Discrete player commands delivered by the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (1 point per row)
    SoftDrop,
    /// Drop piece to its lowest valid position and lock it (1 point per row)
    HardDrop,
    /// Rotate piece 90° clockwise, with kicks
    Rotate,
    /// Toggle pause state
    TogglePause,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use fruit_drop_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "togglepause" | "pause" => Some(GameAction::TogglePause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::TogglePause => "togglePause",
        }
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOverReason {
    /// The countdown reached zero
    TimeUp,
    /// A freshly spawned piece did not fit the board
    BoardFull,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::TimeUp => "TIME'S UP!",
            GameOverReason::BoardFull => "GAME OVER",
        }
    }
}

/// Named sounds the audio collaborator plays, one per occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Land,
    Clear,
    Chain,
    LevelUp,
    StageClear,
    GameOver,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Land => "land",
            SoundCue::Clear => "clear",
            SoundCue::Chain => "chain",
            SoundCue::LevelUp => "level_up",
            SoundCue::StageClear => "stage_clear",
            SoundCue::GameOver => "game_over",
        }
    }
}

/// Engine event, queued on the session and drained by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The active piece was written into the grid
    PieceLanded,
    /// One resolution pass removed `cleared` cells
    MatchCleared {
        cleared: u32,
        chain: u32,
        score_delta: u32,
    },
    /// A pass after the first one in the same sequence cleared cells
    Chain { count: u32 },
    /// A pass removed at least [`LARGE_CLEAR_SIZE`] cells; `(x, y)` of each
    LargeClear { cells: Vec<(u8, u8)> },
    LevelUp { level: u32 },
    /// Normal-mode goal reached; the board resets after the stage clear delay
    StageClear { stage: u32, score: u32 },
    StageStarted { stage: u32 },
    GameOver {
        reason: GameOverReason,
        final_score: u32,
        new_record: bool,
    },
}

impl GameEvent {
    /// Sound the audio collaborator should play for this event, if any.
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::PieceLanded => Some(SoundCue::Land),
            GameEvent::MatchCleared { chain, .. } if *chain > 1 => Some(SoundCue::Chain),
            GameEvent::MatchCleared { .. } => Some(SoundCue::Clear),
            GameEvent::LevelUp { .. } => Some(SoundCue::LevelUp),
            GameEvent::StageClear { .. } => Some(SoundCue::StageClear),
            GameEvent::GameOver { .. } => Some(SoundCue::GameOver),
            GameEvent::Chain { .. } | GameEvent::LargeClear { .. } | GameEvent::StageStarted { .. } => {
                None
            }
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(FruitType)`: Cell holding a landed fruit
pub type Cell = Option<FruitType>;
