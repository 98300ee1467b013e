//! Secret sequence generation for Random and Manual modes.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::card::{Card, CardId};
use crate::error::{GameError, Result};
use crate::pool::CardPool;

/// How the secret for a round is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    /// Fresh sample of correct cards every round.
    #[default]
    Random,
    /// The author's saved sequence.
    Manual,
}

impl FromStr for PlayMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" | "aleatorio" | "aleatório" => Ok(PlayMode::Random),
            "manual" => Ok(PlayMode::Manual),
            other => Err(GameError::InvalidRequest(format!("unknown mode `{other}`"))),
        }
    }
}

impl fmt::Display for PlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayMode::Random => write!(f, "random"),
            PlayMode::Manual => write!(f, "manual"),
        }
    }
}

/// The hidden ordered cards a player must deduce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSequence {
    cards: Vec<Card>,
}

impl SecretSequence {
    /// Sample `length` distinct cards from `correct`, in random order.
    pub fn random<R: Rng + ?Sized>(correct: &[Card], length: usize, rng: &mut R) -> Result<Self> {
        if correct.len() < length {
            return Err(GameError::InsufficientCards {
                needed: length,
                available: correct.len(),
            });
        }
        let mut cards = correct.to_vec();
        cards.shuffle(rng);
        cards.truncate(length);
        Ok(Self { cards })
    }

    /// Resolve a saved sequence of ids against the game's correct cards.
    pub fn manual(ids: &[CardId], pool: &CardPool, expected_length: usize) -> Result<Self> {
        if ids.len() != expected_length {
            return Err(GameError::InvalidManualCode(format!(
                "expected {expected_length} cards, found {}",
                ids.len()
            )));
        }

        let mut seen = HashSet::with_capacity(ids.len());
        let mut cards = Vec::with_capacity(ids.len());
        for &id in ids {
            let card = pool
                .get(id)
                .ok_or_else(|| GameError::InvalidManualCode(format!("card {id} does not exist")))?;
            if !card.is_correct() {
                return Err(GameError::InvalidManualCode(format!(
                    "card {id} is not a correct card"
                )));
            }
            if !seen.insert(id) {
                return Err(GameError::InvalidManualCode(format!(
                    "card {id} appears more than once"
                )));
            }
            cards.push(card.clone());
        }
        Ok(Self { cards })
    }

    /// Wrap an already resolved sequence. No validation is performed.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|card| card.id).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
