//! Read access to authored games and cards.
//!
//! Persistence lives outside the engine; [`CardStore`] is the contract the
//! engine needs from it. [`MemoryStore`] backs the CLI and tests and can be
//! loaded from a JSON deck file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::card::{Card, CardId, Game, GameId};
use crate::error::{GameError, Result};
use crate::pool::ensure_unique_ids;

pub trait CardStore {
    fn list_cards(&self, game_id: GameId) -> Result<Vec<Card>>;

    fn get_game(&self, game_id: GameId) -> Result<Game>;

    /// Persist a Manual Mode sequence for later rounds.
    fn save_manual_code(&mut self, game_id: GameId, card_ids: &[CardId]) -> Result<()>;
}

/// One game with its cards, as stored in a deck file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(flatten)]
    pub game: Game,
    #[serde(default)]
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckFile {
    pub games: Vec<GameRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    games: BTreeMap<GameId, GameRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, game: Game, cards: Vec<Card>) {
        self.games.insert(game.id, GameRecord { game, cards });
    }

    /// Parse a deck file. A game whose cards repeat an id is rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let deck: DeckFile =
            serde_json::from_str(json).map_err(|e| GameError::Store(e.to_string()))?;
        let mut store = Self::new();
        for record in deck.games {
            if let Err(GameError::DuplicateCard(id)) = ensure_unique_ids(&record.cards) {
                return Err(GameError::Store(format!(
                    "game {} repeats card id {id}",
                    record.game.id
                )));
            }
            store.insert(record.game, record.cards);
        }
        Ok(store)
    }

    pub fn to_json(&self) -> Result<String> {
        let deck = DeckFile {
            games: self.games.values().cloned().collect(),
        };
        serde_json::to_string_pretty(&deck).map_err(|e| GameError::Store(e.to_string()))
    }

    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.games.values().map(|record| &record.game)
    }

    fn record(&self, game_id: GameId) -> Result<&GameRecord> {
        self.games
            .get(&game_id)
            .ok_or_else(|| GameError::Store(format!("game {game_id} not found")))
    }
}

impl CardStore for MemoryStore {
    fn list_cards(&self, game_id: GameId) -> Result<Vec<Card>> {
        Ok(self.record(game_id)?.cards.clone())
    }

    fn get_game(&self, game_id: GameId) -> Result<Game> {
        Ok(self.record(game_id)?.game.clone())
    }

    fn save_manual_code(&mut self, game_id: GameId, card_ids: &[CardId]) -> Result<()> {
        let record = self
            .games
            .get_mut(&game_id)
            .ok_or_else(|| GameError::Store(format!("game {game_id} not found")))?;
        record.game.manual_code_ids = Some(card_ids.to_vec());
        Ok(())
    }
}

/// Load the demo deck bundled with the crate.
pub fn load_demo_store() -> Result<MemoryStore> {
    MemoryStore::from_json(include_str!("../decks/demo.json"))
}
