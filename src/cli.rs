//! Command-line options for the terminal binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::core::{ConfigError, SessionConfig};
use crate::types::GameMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Normal,
    ScoreAttack,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Normal => GameMode::Normal,
            ModeArg::ScoreAttack => GameMode::ScoreAttack,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "fruit-drop", version, about = "Falling-block fruit matching puzzle")]
pub struct Args {
    /// Game mode
    #[arg(short, long, value_enum, default_value_t = ModeArg::Normal)]
    pub mode: ModeArg,

    /// Seed for the piece generator (defaults to the wall clock)
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<u32>,

    /// Starting level (Normal mode only)
    #[arg(long, value_name = "LEVEL")]
    pub level: Option<u32>,

    /// Countdown length in seconds for the selected mode
    #[arg(short, long, value_name = "SECS")]
    pub time_limit: Option<u32>,

    /// Where the high score is stored
    #[arg(long, value_name = "PATH")]
    pub high_score_file: Option<PathBuf>,

    /// Log destination; the terminal itself is owned by the renderer
    #[arg(long, value_name = "PATH", default_value = "fruit-drop.log")]
    pub log_file: PathBuf,

    /// Ring the terminal bell on sound cues
    #[arg(long)]
    pub bell: bool,
}

impl Args {
    /// Build a validated session config. `fallback_seed` is used when `--seed` is absent.
    pub fn session_config(
        &self,
        fallback_seed: u32,
        high_score: u32,
    ) -> Result<SessionConfig, ConfigError> {
        let mut config = SessionConfig::new(self.mode.into())
            .with_seed(self.seed.unwrap_or(fallback_seed))
            .with_high_score(high_score);
        if let Some(level) = self.level {
            config = config.with_start_level(level);
        }
        if let Some(secs) = self.time_limit {
            config = config.with_time_limit_secs(secs);
        }
        config.validate()?;
        Ok(config)
    }
}
