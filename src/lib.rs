//! # Secret Code
//!
//! Engine for a secret code deduction card game.
//!
//! An author fills a game with correct answer cards and incorrect distractor
//! cards. Each round hides a sequence of correct cards; the player places
//! cards into slots and, after each submitted guess, learns how many cards
//! sit in the right slot and how many belong to the secret but were placed
//! elsewhere. Higher levels give fewer attempts and mix in more distractors.

pub mod card;
pub mod error;
pub mod feedback;
pub mod flow;
pub mod hint;
pub mod history;
pub mod level;
pub mod pool;
pub mod request;
pub mod secret;
pub mod session;
pub mod store;

pub use card::{Card, CardId, CardType, Game, GameId, GameModel};
pub use error::{GameError, Result};
pub use feedback::Feedback;
pub use flow::{start_round, GameContent};
pub use hint::HintAdvisor;
pub use history::{History, HistoryEntry};
pub use level::LevelPolicy;
pub use pool::CardPool;
pub use request::PlayRequest;
pub use secret::{PlayMode, SecretSequence};
pub use session::{RoundSession, SessionState, SubmitOutcome};
pub use store::{load_demo_store, CardStore, MemoryStore};

/// Minimum correct cards a game needs before it can be played
pub const MIN_CORRECT: usize = 9;

/// Minimum incorrect cards a game needs before it can be played
pub const MIN_INCORRECT: usize = 3;

/// Secret length used when a game does not fix one
pub const DEFAULT_SECRET_LENGTH: usize = 4;

/// Upper bound on codes the hint advisor will enumerate
pub const MAX_HINT_CANDIDATES: usize = 200_000;

/// Guesses scored per hint request
pub const MAX_HINT_GUESSES: usize = 400;
