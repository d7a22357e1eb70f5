//! Session configuration
//!
//! Everything a [`crate::GameSession`] needs at construction time. Mode is fixed here
//! and cannot change on a live session.

use thiserror::Error;

use crate::scoring::default_start_level;
use crate::types::{
    GameMode, CHAIN_STEP_DELAY_MS, GOAL_INCREMENT, INITIAL_GOAL, MAX_LEVEL,
    NORMAL_TIME_LIMIT_SECS, SCORE_ATTACK_TIME_LIMIT_SECS, STAGE_CLEAR_DELAY_MS,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("time limit must be greater than zero ({mode} mode)")]
    ZeroTimeLimit { mode: &'static str },
    #[error("start level {0} is outside 1..={max}", max = MAX_LEVEL)]
    LevelOutOfRange(u32),
    #[error("stage goal must be greater than zero")]
    ZeroGoal,
    #[error("stage goal increment must be greater than zero")]
    ZeroGoalIncrement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: GameMode,
    pub seed: u32,
    /// Normal mode only; Score-Attack always plays at its fixed level
    pub start_level: u32,
    pub normal_time_limit_secs: u32,
    pub score_attack_time_limit_secs: u32,
    pub initial_goal: u32,
    pub goal_increment: u32,
    pub chain_step_delay_ms: u32,
    pub stage_clear_delay_ms: u32,
    /// Best score read from persistent storage at session start
    pub high_score: u32,
}

impl SessionConfig {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            seed: 1,
            start_level: default_start_level(mode),
            normal_time_limit_secs: NORMAL_TIME_LIMIT_SECS,
            score_attack_time_limit_secs: SCORE_ATTACK_TIME_LIMIT_SECS,
            initial_goal: INITIAL_GOAL,
            goal_increment: GOAL_INCREMENT,
            chain_step_delay_ms: CHAIN_STEP_DELAY_MS,
            stage_clear_delay_ms: STAGE_CLEAR_DELAY_MS,
            high_score: 0,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_start_level(mut self, level: u32) -> Self {
        self.start_level = level;
        self
    }

    /// Override the time limit of the configured mode
    pub fn with_time_limit_secs(mut self, secs: u32) -> Self {
        match self.mode {
            GameMode::Normal => self.normal_time_limit_secs = secs,
            GameMode::ScoreAttack => self.score_attack_time_limit_secs = secs,
        }
        self
    }

    pub fn with_goal(mut self, initial_goal: u32, goal_increment: u32) -> Self {
        self.initial_goal = initial_goal;
        self.goal_increment = goal_increment;
        self
    }

    pub fn with_chain_step_delay_ms(mut self, ms: u32) -> Self {
        self.chain_step_delay_ms = ms;
        self
    }

    pub fn with_stage_clear_delay_ms(mut self, ms: u32) -> Self {
        self.stage_clear_delay_ms = ms;
        self
    }

    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self
    }

    /// Time limit of the configured mode, in seconds
    pub fn time_limit_secs(&self) -> u32 {
        match self.mode {
            GameMode::Normal => self.normal_time_limit_secs,
            GameMode::ScoreAttack => self.score_attack_time_limit_secs,
        }
    }

    pub fn time_limit_ms(&self) -> u64 {
        self.time_limit_secs() as u64 * 1000
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_limit_secs() == 0 {
            return Err(ConfigError::ZeroTimeLimit {
                mode: self.mode.as_str(),
            });
        }
        if self.mode == GameMode::Normal {
            if !(1..=MAX_LEVEL).contains(&self.start_level) {
                return Err(ConfigError::LevelOutOfRange(self.start_level));
            }
            if self.initial_goal == 0 {
                return Err(ConfigError::ZeroGoal);
            }
            if self.goal_increment == 0 {
                return Err(ConfigError::ZeroGoalIncrement);
            }
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(GameMode::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_mode() {
        let normal = SessionConfig::new(GameMode::Normal);
        assert_eq!(normal.time_limit_secs(), 90);
        assert_eq!(normal.start_level, 1);
        assert_eq!(normal.validate(), Ok(()));

        let attack = SessionConfig::new(GameMode::ScoreAttack);
        assert_eq!(attack.time_limit_secs(), 60);
        assert_eq!(attack.start_level, 9);
        assert_eq!(attack.validate(), Ok(()));
    }

    #[test]
    fn time_limit_override_targets_mode() {
        let cfg = SessionConfig::new(GameMode::ScoreAttack).with_time_limit_secs(30);
        assert_eq!(cfg.score_attack_time_limit_secs, 30);
        assert_eq!(cfg.normal_time_limit_secs, 90);
        assert_eq!(cfg.time_limit_ms(), 30_000);
    }

    #[test]
    fn rejects_invalid_values() {
        assert_eq!(
            SessionConfig::default().with_time_limit_secs(0).validate(),
            Err(ConfigError::ZeroTimeLimit { mode: "normal" })
        );
        assert_eq!(
            SessionConfig::default().with_start_level(0).validate(),
            Err(ConfigError::LevelOutOfRange(0))
        );
        assert_eq!(
            SessionConfig::default().with_goal(0, 500).validate(),
            Err(ConfigError::ZeroGoal)
        );
        assert_eq!(
            SessionConfig::default().with_goal(1000, 0).validate(),
            Err(ConfigError::ZeroGoalIncrement)
        );
    }

    #[test]
    fn score_attack_ignores_goal_settings() {
        let cfg = SessionConfig::new(GameMode::ScoreAttack).with_goal(0, 0);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn error_messages_are_readable() {
        assert_eq!(
            ConfigError::LevelOutOfRange(120).to_string(),
            "start level 120 is outside 1..=99"
        );
    }
}
