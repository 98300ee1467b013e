//! Authored content: cards and the game definition that owns them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an authored card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an authored game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u32);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a card may appear in a secret sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    /// Belongs to the answer; secrets are drawn from these.
    Correct,
    /// Distractor offered alongside the correct cards.
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// Display text. May be empty when the card only carries an image.
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

impl Card {
    pub fn new(id: u32, text: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id: CardId(id),
            text: text.into(),
            card_type,
            image_uri: None,
        }
    }

    pub fn correct(id: u32, text: impl Into<String>) -> Self {
        Self::new(id, text, CardType::Correct)
    }

    pub fn incorrect(id: u32, text: impl Into<String>) -> Self {
        Self::new(id, text, CardType::Incorrect)
    }

    pub fn is_correct(&self) -> bool {
        self.card_type == CardType::Correct
    }

    /// Text shown on the card face, falling back to the image or the id.
    pub fn label(&self) -> String {
        if !self.text.is_empty() {
            self.text.clone()
        } else if let Some(uri) = &self.image_uri {
            format!("[img {uri}]")
        } else {
            format!("#{}", self.id)
        }
    }
}

/// Game-type discriminator. Only the secret code game exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameModel {
    #[default]
    SecretCode,
}

/// An authored game definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub rules: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub model: GameModel,
    /// Fixed slot count; `None` falls back to [`crate::DEFAULT_SECRET_LENGTH`].
    #[serde(default)]
    pub secret_code_length: Option<usize>,
    /// Saved Manual Mode sequence, in slot order.
    #[serde(default)]
    pub manual_code_ids: Option<Vec<CardId>>,
}

impl Game {
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id: GameId(id),
            title: title.into(),
            subject: String::new(),
            grade: String::new(),
            authors: String::new(),
            rules: String::new(),
            goal: String::new(),
            prompt: String::new(),
            explanation: String::new(),
            model: GameModel::SecretCode,
            secret_code_length: None,
            manual_code_ids: None,
        }
    }

    /// Number of slots in this game's secret.
    pub fn code_length(&self) -> usize {
        self.secret_code_length
            .unwrap_or(crate::DEFAULT_SECRET_LENGTH)
    }

    pub fn has_manual_code(&self) -> bool {
        self.manual_code_ids
            .as_ref()
            .is_some_and(|ids| !ids.is_empty())
    }
}
