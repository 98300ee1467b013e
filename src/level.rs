//! Difficulty tiers.
//!
//! Each level trades attempts for distractors: higher levels allow fewer
//! guesses and mix more incorrect cards into the display pool. Every level
//! reshuffles the pool at the start of a round.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Resolved rules for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelPolicy {
    pub level: u8,
    pub max_attempts: usize,
    /// Incorrect cards added to the display pool.
    pub distractor_cards: usize,
    pub reshuffle: bool,
}

impl LevelPolicy {
    pub const MIN_LEVEL: u8 = 1;
    pub const MAX_LEVEL: u8 = 4;

    const TABLE: [LevelPolicy; 4] = [
        LevelPolicy { level: 1, max_attempts: 10, distractor_cards: 0, reshuffle: true },
        LevelPolicy { level: 2, max_attempts: 8, distractor_cards: 1, reshuffle: true },
        LevelPolicy { level: 3, max_attempts: 6, distractor_cards: 2, reshuffle: true },
        LevelPolicy { level: 4, max_attempts: 5, distractor_cards: 3, reshuffle: true },
    ];

    pub fn resolve(level: u8) -> Result<Self> {
        if !(Self::MIN_LEVEL..=Self::MAX_LEVEL).contains(&level) {
            return Err(GameError::InvalidLevel(level));
        }
        Ok(Self::TABLE[(level - 1) as usize])
    }

    /// All levels in ascending order, for selection screens.
    pub fn all() -> &'static [LevelPolicy] {
        &Self::TABLE
    }

    /// Short description used by level pickers.
    pub fn describe(&self) -> String {
        match self.distractor_cards {
            0 => format!("Nível {}: {} tentativas", self.level, self.max_attempts),
            1 => format!(
                "Nível {}: {} tentativas, 1 carta distratora",
                self.level, self.max_attempts
            ),
            n => format!(
                "Nível {}: {} tentativas, {} cartas distratoras",
                self.level, self.max_attempts, n
            ),
        }
    }
}

impl Default for LevelPolicy {
    fn default() -> Self {
        Self::TABLE[0]
    }
}
