//! Entry point of the play flow: load content, validate, build a round.

use rand::Rng;
use tracing::{info, warn};

use crate::card::{CardId, Game, GameId};
use crate::error::{GameError, Result};
use crate::pool::CardPool;
use crate::request::PlayRequest;
use crate::secret::{PlayMode, SecretSequence};
use crate::session::RoundSession;
use crate::store::CardStore;

/// Loaded content for a game, ready to start rounds from.
#[derive(Debug, Clone)]
pub struct GameContent {
    pub game: Game,
    pub pool: CardPool,
}

impl GameContent {
    pub fn load<S: CardStore + ?Sized>(store: &S, game_id: GameId) -> Result<Self> {
        let game = store.get_game(game_id)?;
        let pool = CardPool::new(store.list_cards(game_id)?)?;
        Ok(Self { game, pool })
    }

    /// Slot count for rounds of this game.
    pub fn code_length(&self) -> Result<usize> {
        let length = self.game.code_length();
        let correct = self.pool.correct().len();
        if length == 0 || length > correct {
            return Err(GameError::InsufficientCards {
                needed: length.max(1),
                available: correct,
            });
        }
        Ok(length)
    }

    /// Create a round in `Setup` and start it with a fresh secret and
    /// display pool.
    pub fn start_round<R: Rng + ?Sized>(
        &self,
        request: &PlayRequest,
        rng: &mut R,
    ) -> Result<RoundSession> {
        self.pool.validate_minimums()?;
        let length = self.code_length()?;

        let secret = match request.mode {
            PlayMode::Random => SecretSequence::random(self.pool.correct(), length, rng)?,
            PlayMode::Manual => {
                let ids = self.game.manual_code_ids.as_deref().unwrap_or_default();
                if ids.is_empty() {
                    return Err(GameError::InvalidManualCode(
                        "no manual code saved for this game".to_string(),
                    ));
                }
                SecretSequence::manual(ids, &self.pool, length)?
            }
        };
        let display_pool = self.pool.display_pool(&request.level, rng)?;

        let mut session = RoundSession::new(request.mode, request.level, length);
        session.start(secret, display_pool)?;
        Ok(session)
    }
}

/// Load a game from `store` and start a round for `request`.
///
/// Load failures are returned before anything is built, so no round exists
/// unless the content validated.
pub fn start_round<S, R>(store: &S, request: &PlayRequest, rng: &mut R) -> Result<RoundSession>
where
    S: CardStore + ?Sized,
    R: Rng + ?Sized,
{
    let content = GameContent::load(store, request.game_id)?;
    match content.start_round(request, rng) {
        Ok(session) => {
            info!(game = %request.game_id, title = %content.game.title, "play flow entered");
            Ok(session)
        }
        Err(err) => {
            warn!(game = %request.game_id, error = %err, "could not start round");
            Err(err)
        }
    }
}

/// Validate and persist a Manual Mode sequence.
pub fn save_manual_code<S: CardStore + ?Sized>(
    store: &mut S,
    game_id: GameId,
    ids: &[CardId],
) -> Result<()> {
    let content = GameContent::load(&*store, game_id)?;
    let length = content.code_length()?;
    SecretSequence::manual(ids, &content.pool, length)?;
    store.save_manual_code(game_id, ids)?;
    info!(game = %game_id, length, "manual code saved");
    Ok(())
}
