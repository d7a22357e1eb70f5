//! Session module - the progression controller
//!
//! Owns the grid, the active and next pieces, score, level, stage, goal and countdown,
//! and drives the whole cycle from a fixed-timestep [`GameSession::tick`]:
//!
//! ```text
//! AwaitingStart -> Playing -> Resolving -> Playing -> ...
//!                     |           \-> StageClearing -> Playing   (Normal mode)
//!                     \-> GameOver (time's up, or a spawned piece does not fit)
//! ```
//!
//! Pause is a flag on top of the phase: while set, nothing advances and the paused
//! span is excluded from the countdown. Input is only accepted in `Playing` with an
//! active piece and no pause; everything else is a silent no-op.

use log::{debug, info};

use crate::clock::SessionClock;
use crate::collision::{drop_distance, fits, fits_at};
use crate::config::{ConfigError, SessionConfig};
use crate::grid::Grid;
use crate::matcher::{ChainResolver, ClearReport, ResolveStep};
use crate::pieces::{try_rotate, ActivePiece};
use crate::rng::PieceGenerator;
use crate::scoring::{calculate_drop_score, drop_interval_ms, level_for_cleared};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{
    GameAction, GameEvent, GameMode, GameOverReason, ShapeKind, LARGE_CLEAR_SIZE,
};

/// Top-level phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    AwaitingStart,
    Playing,
    /// A lock triggered a resolution sequence; input is ignored
    Resolving,
    /// Normal-mode goal reached; the board resets once the delay runs out
    StageClearing,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::AwaitingStart => "awaiting_start",
            Phase::Playing => "playing",
            Phase::Resolving => "resolving",
            Phase::StageClearing => "stage_clearing",
            Phase::GameOver => "game_over",
        }
    }
}

/// One game from start to game over
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    grid: Grid,
    active: Option<ActivePiece>,
    next: Option<ActivePiece>,
    generator: PieceGenerator,
    resolver: Option<ChainResolver>,

    phase: Phase,
    paused: bool,
    game_over: Option<GameOverReason>,
    new_record: bool,

    score: u32,
    high_score: u32,
    level: u32,
    total_cleared: u32,
    stage: u32,
    goal: Option<u32>,

    clock: SessionClock,
    drop_counter_ms: u32,
    drop_interval_ms: u32,
    stage_clear_left_ms: u32,

    events: Vec<GameEvent>,
}

impl GameSession {
    /// Build a session in `AwaitingStart`; fails only on an invalid configuration
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let level = level_for_cleared(config.mode, config.start_level, 0);
        let goal = match config.mode {
            GameMode::Normal => Some(config.initial_goal),
            GameMode::ScoreAttack => None,
        };

        Ok(Self {
            grid: Grid::new(),
            active: None,
            next: None,
            generator: PieceGenerator::new(config.seed),
            resolver: None,
            phase: Phase::AwaitingStart,
            paused: false,
            game_over: None,
            new_record: false,
            score: 0,
            high_score: config.high_score,
            level,
            total_cleared: 0,
            stage: 1,
            goal,
            clock: SessionClock::new(),
            drop_counter_ms: 0,
            drop_interval_ms: drop_interval_ms(level, 1),
            stage_clear_left_ms: 0,
            events: Vec::new(),
            config,
        })
    }

    /// Leave `AwaitingStart`: start the countdown and spawn the first piece
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::AwaitingStart {
            return false;
        }
        info!(
            "session start: mode={} seed={} level={}",
            self.config.mode.as_str(),
            self.config.seed,
            self.level
        );
        self.clock.reset_baseline();
        self.next = Some(self.generator.next_piece(self.level));
        self.spawn_next();
        true
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn is_resolving(&self) -> bool {
        self.phase == Phase::Resolving
    }

    pub fn game_over(&self) -> Option<GameOverReason> {
        self.game_over
    }

    pub fn new_record(&self) -> bool {
        self.new_record
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn total_cleared(&self) -> u32 {
        self.total_cleared
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    /// Score needed to clear the stage; `None` in Score-Attack
    pub fn goal(&self) -> Option<u32> {
        self.goal
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Remaining countdown in milliseconds
    pub fn time_left_ms(&self) -> u64 {
        self.clock.remaining_ms(self.config.time_limit_ms())
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_piece(&self) -> Option<ActivePiece> {
        self.next
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get mutable grid access (for setting up positions)
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Replace the active piece while playing. Rejected if it does not fit.
    pub fn set_active_piece(&mut self, piece: ActivePiece) -> bool {
        if self.phase != Phase::Playing || !fits(&piece, &self.grid) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_rows(&mut out.board);
        out.active = self.active.map(PieceSnapshot::from);
        out.next = self.next.map(PieceSnapshot::from);
        out.mode = self.config.mode;
        out.phase = self.phase;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.new_record = self.new_record;
        out.score = self.score;
        out.high_score = self.high_score;
        out.level = self.level;
        out.total_cleared = self.total_cleared;
        out.stage = self.stage;
        out.goal = self.goal;
        out.time_left_ms = self.time_left_ms();
        out.drop_interval_ms = self.drop_interval_ms;
        out.chain = self.resolver.as_ref().map_or(0, ChainResolver::chain);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::empty(self.config.mode);
        self.snapshot_into(&mut snap);
        snap
    }

    /// Main game tick. Returns true if visible state changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.clock.advance(elapsed_ms);

        if self.paused {
            return false;
        }

        match self.phase {
            Phase::AwaitingStart | Phase::GameOver => false,
            Phase::Playing => self.tick_playing(elapsed_ms),
            Phase::Resolving => {
                self.drive_resolution(elapsed_ms);
                true
            }
            Phase::StageClearing => {
                self.stage_clear_left_ms = self.stage_clear_left_ms.saturating_sub(elapsed_ms);
                if self.stage_clear_left_ms == 0 {
                    self.next_stage();
                    return true;
                }
                false
            }
        }
    }

    fn tick_playing(&mut self, elapsed_ms: u32) -> bool {
        if self.time_left_ms() == 0 {
            self.end_game(GameOverReason::TimeUp);
            return true;
        }

        if self.active.is_none() {
            return false;
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms <= self.drop_interval_ms {
            return false;
        }

        self.drop_counter_ms = 0;
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        true
    }

    /// Apply a player command. Returns true if it changed state.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if action == GameAction::TogglePause {
            return self.toggle_pause();
        }

        if self.paused || self.phase != Phase::Playing || self.active.is_none() {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => {
                let moved = self.try_move(0, 1);
                if moved {
                    self.add_score(calculate_drop_score(1));
                }
                self.drop_counter_ms = 0;
                moved
            }
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::Rotate => self.try_rotate(),
            GameAction::TogglePause => false,
        }
    }

    fn toggle_pause(&mut self) -> bool {
        if matches!(self.phase, Phase::AwaitingStart | Phase::GameOver) {
            return false;
        }

        self.paused = !self.paused;
        if self.paused {
            self.clock.suspend();
        } else if self.phase != Phase::StageClearing {
            self.clock.resume();
        }
        debug!("pause toggled: paused={}", self.paused);
        true
    }

    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        if !fits_at(&piece, &self.grid, dx, dy) {
            return false;
        }
        self.active = Some(piece.translated(dx, dy));
        true
    }

    pub(crate) fn try_rotate(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        if piece.kind == ShapeKind::O {
            return false;
        }

        let grid = &self.grid;
        match try_rotate(&piece, |candidate| fits(candidate, grid)) {
            Some((rotated, kick)) => {
                if kick != (0, 0) {
                    debug!("rotation kicked by {:?}", kick);
                }
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    fn hard_drop(&mut self) {
        let Some(piece) = self.active else {
            return;
        };
        let rows = drop_distance(&piece, &self.grid);
        self.active = Some(piece.translated(0, rows as i8));
        self.add_score(calculate_drop_score(rows as u32));
        self.lock_piece();
    }

    /// Write the active piece into the grid and start resolving
    fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        for (x, y, fruit) in piece.cells() {
            // Cells above the visible board are discarded
            if y >= 0 {
                self.grid.place(x, y, fruit);
            }
        }
        self.events.push(GameEvent::PieceLanded);
        self.drop_counter_ms = 0;
        self.start_resolution();
    }

    fn start_resolution(&mut self) {
        self.phase = Phase::Resolving;
        self.resolver = Some(ChainResolver::new(self.config.chain_step_delay_ms));
        self.drive_resolution(0);
    }

    fn drive_resolution(&mut self, elapsed_ms: u32) {
        let mut elapsed_ms = elapsed_ms;
        loop {
            let Some(resolver) = self.resolver.as_mut() else {
                return;
            };

            match resolver.advance(&mut self.grid, elapsed_ms, self.level) {
                ResolveStep::Waiting => return,
                ResolveStep::Cleared(report) => {
                    self.apply_clear(report);
                    elapsed_ms = 0;
                }
                ResolveStep::Settled { passes } => {
                    if passes > 0 {
                        debug!("resolution settled after {} pass(es)", passes);
                    }
                    self.resolver = None;
                    self.finish_resolution();
                    return;
                }
            }
        }
    }

    fn apply_clear(&mut self, report: ClearReport) {
        debug!(
            "chain {}: cleared {} cells in {} group(s), +{}",
            report.chain, report.cleared, report.groups, report.score_delta
        );

        self.add_score(report.score_delta);
        self.total_cleared = self.total_cleared.saturating_add(report.cleared);

        self.events.push(GameEvent::MatchCleared {
            cleared: report.cleared,
            chain: report.chain,
            score_delta: report.score_delta,
        });
        if report.chain > 1 {
            self.events.push(GameEvent::Chain {
                count: report.chain,
            });
        }
        if report.cleared as usize >= LARGE_CLEAR_SIZE {
            self.events.push(GameEvent::LargeClear {
                cells: report.cells,
            });
        }

        self.update_level();
    }

    fn update_level(&mut self) {
        let level = level_for_cleared(self.config.mode, self.config.start_level, self.total_cleared);
        if level <= self.level {
            return;
        }
        self.level = level;
        self.drop_interval_ms = drop_interval_ms(self.level, self.stage);
        info!(
            "level up: level={} drop_interval={}ms",
            self.level, self.drop_interval_ms
        );
        self.events.push(GameEvent::LevelUp { level: self.level });
    }

    fn finish_resolution(&mut self) {
        if self.goal.is_some_and(|goal| self.score >= goal) {
            self.begin_stage_clear();
        } else {
            self.spawn_next();
        }
    }

    fn begin_stage_clear(&mut self) {
        info!("stage {} clear: score={}", self.stage, self.score);
        self.phase = Phase::StageClearing;
        self.stage_clear_left_ms = self.config.stage_clear_delay_ms;
        self.clock.suspend();
        self.events.push(GameEvent::StageClear {
            stage: self.stage,
            score: self.score,
        });

        if self.stage_clear_left_ms == 0 {
            self.next_stage();
        }
    }

    fn next_stage(&mut self) {
        self.stage += 1;
        self.goal = self
            .goal
            .map(|goal| goal.saturating_add(self.config.goal_increment));
        self.grid.clear_all();
        self.score = 0;
        self.active = None;
        self.drop_interval_ms = drop_interval_ms(self.level, self.stage);
        self.drop_counter_ms = 0;
        self.clock.reset_baseline();
        self.clock.resume();

        info!(
            "stage {} start: goal={:?} drop_interval={}ms",
            self.stage, self.goal, self.drop_interval_ms
        );
        self.events.push(GameEvent::StageStarted { stage: self.stage });
        self.spawn_next();
    }

    /// Promote the look-ahead piece and generate a new one.
    ///
    /// A promoted piece that does not fit ends the session instead of being placed.
    fn spawn_next(&mut self) {
        let piece = match self.next.take() {
            Some(piece) => piece,
            None => self.generator.next_piece(self.level),
        };
        self.next = Some(self.generator.next_piece(self.level));
        self.drop_counter_ms = 0;

        if !fits(&piece, &self.grid) {
            info!("spawn blocked: {} at x={}", piece.kind.as_str(), piece.x);
            self.end_game(GameOverReason::BoardFull);
            return;
        }

        self.active = Some(piece);
        self.phase = Phase::Playing;
    }

    fn end_game(&mut self, reason: GameOverReason) {
        if self.phase == Phase::GameOver {
            return;
        }
        self.phase = Phase::GameOver;
        self.resolver = None;
        self.game_over = Some(reason);
        self.new_record = self.score > self.high_score;
        if self.new_record {
            self.high_score = self.score;
        }

        info!(
            "game over ({}): score={} new_record={}",
            reason.as_str(),
            self.score,
            self.new_record
        );
        self.events.push(GameEvent::GameOver {
            reason,
            final_score: self.score,
            new_record: self.new_record,
        });
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }
}
