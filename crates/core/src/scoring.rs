//! Scoring module - clear points, gravity speed and level rules
//!
//! Rules:
//! - A pass clearing `n` cells scores `n * 10 * level * 2^chain`, chain starting at 1.
//! - Soft and hard drops score 1 point per row descended.
//! - Level is `total_cleared / 32 + 1` in Normal mode, pinned at 9 in Score-Attack.
//! - Gravity is `max(150, 1000 - (level-1)*50 - (stage-1)*25)` ms per row.

use crate::types::{
    FruitType, GameMode, BASE_DROP_MS, BASE_PALETTE_SIZE, DROP_INTERVAL_FLOOR_MS,
    DROP_STEP_PER_LEVEL_MS, DROP_STEP_PER_STAGE_MS, LEVEL_UP_CLEARED, MAX_LEVEL,
    NORMAL_START_LEVEL, POINTS_PER_CELL, SCORE_ATTACK_LEVEL,
};

/// Points for one resolution pass.
///
/// `chain` is 1 for the first pass after a lock. Saturates instead of overflowing on
/// absurdly long chains.
pub fn chain_score(cleared: u32, level: u32, chain: u32) -> u32 {
    let multiplier = 2u32.checked_pow(chain).unwrap_or(u32::MAX);
    cleared
        .saturating_mul(POINTS_PER_CELL)
        .saturating_mul(level)
        .saturating_mul(multiplier)
}

/// Points for a soft or hard drop
pub fn calculate_drop_score(rows: u32) -> u32 {
    rows
}

/// Gravity interval in milliseconds
pub fn drop_interval_ms(level: u32, stage: u32) -> u32 {
    let level_step = level.saturating_sub(1).saturating_mul(DROP_STEP_PER_LEVEL_MS);
    let stage_step = stage.saturating_sub(1).saturating_mul(DROP_STEP_PER_STAGE_MS);
    BASE_DROP_MS
        .saturating_sub(level_step)
        .saturating_sub(stage_step)
        .max(DROP_INTERVAL_FLOOR_MS)
}

/// Level reached after `total_cleared` cells in the given mode.
///
/// Normal mode grows one level per 32 cleared cells from `start_level`; Score-Attack
/// ignores both arguments and stays at its fixed level.
pub fn level_for_cleared(mode: GameMode, start_level: u32, total_cleared: u32) -> u32 {
    match mode {
        GameMode::Normal => start_level
            .saturating_add(total_cleared / LEVEL_UP_CLEARED)
            .min(MAX_LEVEL),
        GameMode::ScoreAttack => SCORE_ATTACK_LEVEL,
    }
}

/// Starting level of a mode when no explicit start level is configured
pub fn default_start_level(mode: GameMode) -> u32 {
    match mode {
        GameMode::Normal => NORMAL_START_LEVEL,
        GameMode::ScoreAttack => SCORE_ATTACK_LEVEL,
    }
}

/// Fruits a new piece may draw from at `level`
///
/// ```
/// use fruit_drop_core::scoring::palette;
/// use fruit_drop_core::types::FruitType;
///
/// assert_eq!(palette(1), &[FruitType::Cherry, FruitType::Peach, FruitType::Orange, FruitType::Banana]);
/// assert_eq!(palette(9).len(), 7);
/// ```
pub fn palette(level: u32) -> &'static [FruitType] {
    let size = BASE_PALETTE_SIZE.saturating_add(level).min(FruitType::ALL.len() as u32);
    &FruitType::ALL[..size as usize]
}
