//! Typed play requests parsed from navigation parameters.
//!
//! Screens pass `game_id`, `mode`, `level` and `manual_code` around as
//! strings; they are validated here before any domain type is built.

use tracing::warn;

use crate::card::{CardId, GameId};
use crate::error::{GameError, Result};
use crate::level::LevelPolicy;
use crate::secret::PlayMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayRequest {
    pub game_id: GameId,
    pub mode: PlayMode,
    pub level: LevelPolicy,
}

impl PlayRequest {
    pub fn new(game_id: GameId, mode: PlayMode, level: u8) -> Result<Self> {
        let level = LevelPolicy::resolve(level).inspect_err(|err| {
            warn!(game = %game_id, %mode, level, error = %err, "level out of range, back to level selection");
        })?;
        Ok(Self {
            game_id,
            mode,
            level,
        })
    }

    /// Build a request from raw route parameters.
    pub fn parse(game_id: &str, mode: &str, level: &str) -> Result<Self> {
        let game_id = parse_id(game_id, "game_id").map(GameId)?;
        let mode = mode.parse::<PlayMode>()?;
        let level = level
            .trim()
            .parse::<u8>()
            .map_err(|_| GameError::InvalidRequest(format!("level `{}` is not a number", level.trim())))?;
        Self::new(game_id, mode, level)
    }
}

/// Levels to offer again when `err` aborts the flow back to level
/// selection; `None` when the player can recover where they are.
pub fn level_selection(err: &GameError) -> Option<&'static [LevelPolicy]> {
    if err.is_recoverable() {
        None
    } else {
        Some(LevelPolicy::all())
    }
}

/// Parse a comma-joined list of card ids such as `"3,5,7,9"`.
pub fn parse_card_ids(raw: &str) -> Result<Vec<CardId>> {
    if raw.trim().is_empty() {
        return Err(GameError::InvalidRequest("empty card list".to_string()));
    }
    raw.split(',')
        .map(|part| parse_id(part, "card").map(CardId))
        .collect()
}

/// Parse a saved Manual Mode sequence; same format as [`parse_card_ids`].
pub fn parse_manual_code(raw: &str) -> Result<Vec<CardId>> {
    if raw.trim().is_empty() {
        return Err(GameError::InvalidManualCode("empty code".to_string()));
    }
    parse_card_ids(raw).map_err(|err| match err {
        GameError::InvalidRequest(detail) => GameError::InvalidManualCode(detail),
        other => other,
    })
}

/// Inverse of [`parse_manual_code`].
pub fn format_manual_code(ids: &[CardId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_id(raw: &str, field: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| GameError::InvalidRequest(format!("{field} `{}` is not a valid id", raw.trim())))
}
