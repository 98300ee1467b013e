//! Card pool for one game: the authored cards split by type.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::card::{Card, CardId, CardType};
use crate::error::{GameError, Result};
use crate::level::LevelPolicy;
use crate::{MIN_CORRECT, MIN_INCORRECT};

/// Read-only view over a game's cards, partitioned into correct answers and
/// distractors. Authoring order is preserved inside each partition.
#[derive(Debug, Clone, Default)]
pub struct CardPool {
    correct: Vec<Card>,
    incorrect: Vec<Card>,
}

impl CardPool {
    /// Partition `cards` by type. Fails with [`GameError::DuplicateCard`]
    /// if two cards share an id.
    pub fn new(cards: Vec<Card>) -> Result<Self> {
        ensure_unique_ids(&cards)?;
        let (correct, incorrect) = cards.into_iter().partition(Card::is_correct);
        Ok(Self { correct, incorrect })
    }

    pub fn correct(&self) -> &[Card] {
        &self.correct
    }

    pub fn incorrect(&self) -> &[Card] {
        &self.incorrect
    }

    pub fn count(&self, card_type: CardType) -> usize {
        match card_type {
            CardType::Correct => self.correct.len(),
            CardType::Incorrect => self.incorrect.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.correct.len() + self.incorrect.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.correct
            .iter()
            .chain(self.incorrect.iter())
            .find(|card| card.id == id)
    }

    /// Check the minimum card counts required before any round may start.
    pub fn validate_minimums(&self) -> Result<()> {
        if self.correct.len() < MIN_CORRECT || self.incorrect.len() < MIN_INCORRECT {
            return Err(GameError::NotEnoughCards {
                correct: self.correct.len(),
                incorrect: self.incorrect.len(),
            });
        }
        Ok(())
    }

    /// Cards offered to the player for one round: every correct card plus
    /// the level's share of distractors, shuffled when the level asks for it.
    pub fn display_pool<R: Rng + ?Sized>(
        &self,
        policy: &LevelPolicy,
        rng: &mut R,
    ) -> Result<Vec<Card>> {
        let wanted = policy.distractor_cards;
        if self.incorrect.len() < wanted {
            return Err(GameError::InsufficientCards {
                needed: wanted,
                available: self.incorrect.len(),
            });
        }

        let mut distractors = self.incorrect.clone();
        distractors.shuffle(rng);
        distractors.truncate(wanted);

        let mut pool = Vec::with_capacity(self.correct.len() + wanted);
        pool.extend(self.correct.iter().cloned());
        pool.extend(distractors);
        if policy.reshuffle {
            pool.shuffle(rng);
        }

        debug!(
            level = policy.level,
            cards = pool.len(),
            distractors = wanted,
            "built display pool"
        );
        Ok(pool)
    }
}

/// Reject a card list in which some id appears twice, naming the first repeat.
pub fn ensure_unique_ids(cards: &[Card]) -> Result<()> {
    let mut seen = HashSet::with_capacity(cards.len());
    match cards.iter().find(|card| !seen.insert(card.id)) {
        Some(repeated) => {
            warn!(card = %repeated.id, "duplicate card id");
            Err(GameError::DuplicateCard(repeated.id))
        }
        None => Ok(()),
    }
}
