//! Round session: the state machine for one playthrough.
//!
//! A session starts in [`SessionState::Setup`], moves to
//! [`SessionState::InProgress`] once a secret and display pool are in place,
//! and ends in [`SessionState::Won`] or [`SessionState::Lost`]. The guess is
//! built slot by slot; the set of cards still available to place is kept up
//! to date on every placement instead of being recomputed by the caller.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::card::{Card, CardId};
use crate::error::{GameError, Result};
use crate::feedback::Feedback;
use crate::history::{History, HistoryEntry};
use crate::level::LevelPolicy;
use crate::pool::ensure_unique_ids;
use crate::secret::{PlayMode, SecretSequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Setup,
    InProgress,
    Won,
    Lost,
}

impl SessionState {
    pub fn is_finished(self) -> bool {
        matches!(self, SessionState::Won | SessionState::Lost)
    }
}

/// What happened on a submitted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub attempt_number: usize,
    pub feedback: Feedback,
    pub state: SessionState,
}

#[derive(Debug, Clone)]
pub struct RoundSession {
    mode: PlayMode,
    policy: LevelPolicy,
    length: usize,
    state: SessionState,
    secret: Option<SecretSequence>,
    slots: Vec<Option<Card>>,
    /// Display pool minus placed cards, in display order.
    available: Vec<Card>,
    /// Position of each display-pool card, used to restore display order.
    display_rank: HashMap<CardId, usize>,
    attempts_used: usize,
    history: History,
}

impl RoundSession {
    pub fn new(mode: PlayMode, policy: LevelPolicy, length: usize) -> Self {
        Self {
            mode,
            policy,
            length,
            state: SessionState::Setup,
            secret: None,
            slots: vec![None; length],
            available: Vec::new(),
            display_rank: HashMap::new(),
            attempts_used: 0,
            history: History::new(),
        }
    }

    /// Install the secret and the cards offered to the player, and begin play.
    pub fn start(&mut self, secret: SecretSequence, display_pool: Vec<Card>) -> Result<()> {
        match self.state {
            SessionState::Setup => {}
            SessionState::InProgress => return Err(GameError::SessionAlreadyStarted),
            SessionState::Won | SessionState::Lost => return Err(GameError::SessionFinished),
        }
        if secret.len() != self.length {
            return Err(GameError::InvalidRequest(format!(
                "secret has {} cards, round expects {}",
                secret.len(),
                self.length
            )));
        }
        ensure_unique_ids(&display_pool)?;
        if let Some(missing) = secret
            .cards()
            .iter()
            .find(|card| !display_pool.iter().any(|c| c.id == card.id))
        {
            return Err(GameError::CardUnavailable(missing.id));
        }

        self.display_rank = display_pool
            .iter()
            .enumerate()
            .map(|(rank, card)| (card.id, rank))
            .collect();
        self.available = display_pool;
        self.secret = Some(secret);
        self.slots = vec![None; self.length];
        self.attempts_used = 0;
        self.history.clear();
        self.state = SessionState::InProgress;

        info!(
            mode = %self.mode,
            level = self.policy.level,
            length = self.length,
            max_attempts = self.policy.max_attempts,
            "round started"
        );
        Ok(())
    }

    /// Put `card_id` into `slot`. A card already in that slot goes back to
    /// the available cards.
    pub fn place_card(&mut self, slot: usize, card_id: CardId) -> Result<()> {
        self.ensure_in_progress()?;
        self.check_slot(slot)?;

        let pos = self
            .available
            .iter()
            .position(|card| card.id == card_id)
            .ok_or(GameError::CardUnavailable(card_id))?;
        let card = self.available.remove(pos);

        if let Some(previous) = self.slots[slot].replace(card) {
            self.restore_available(previous);
        }
        debug!(slot, card = %card_id, "card placed");
        Ok(())
    }

    /// Empty `slot`, returning the card that was there.
    pub fn clear_slot(&mut self, slot: usize) -> Result<Option<Card>> {
        self.ensure_in_progress()?;
        self.check_slot(slot)?;

        let removed = self.slots[slot].take();
        if let Some(card) = &removed {
            debug!(slot, card = %card.id, "slot cleared");
            self.restore_available(card.clone());
        }
        Ok(removed)
    }

    /// Score the current guess and advance the state machine.
    pub fn submit_guess(&mut self) -> Result<SubmitOutcome> {
        self.ensure_in_progress()?;

        let filled = self.slots.iter().filter(|slot| slot.is_some()).count();
        if filled < self.length {
            warn!(filled, length = self.length, "rejected incomplete guess");
            return Err(GameError::IncompleteGuess {
                filled,
                length: self.length,
            });
        }
        let secret = self.secret.as_ref().ok_or(GameError::SessionNotStarted)?;

        let guess: Vec<Card> = self.slots.iter().flatten().cloned().collect();
        let feedback = Feedback::evaluate(secret.cards(), &guess);
        self.attempts_used += 1;
        let attempt_number = self.attempts_used;

        self.history.append(HistoryEntry {
            attempt_number,
            guess,
            feedback,
        });

        if feedback.is_win(self.length) {
            self.state = SessionState::Won;
            info!(attempts = attempt_number, "round won");
        } else if self.attempts_used >= self.policy.max_attempts {
            self.state = SessionState::Lost;
            info!(attempts = attempt_number, "round lost");
        } else {
            for card in std::mem::replace(&mut self.slots, vec![None; self.length])
                .into_iter()
                .flatten()
            {
                self.restore_available(card);
            }
            debug!(attempt = attempt_number, %feedback, "guess scored");
        }

        Ok(SubmitOutcome {
            attempt_number,
            feedback,
            state: self.state,
        })
    }

    /// Tear the round down: history and guess are discarded and the session
    /// goes back to `Setup`, waiting for a fresh secret.
    pub fn reset(&mut self) {
        self.state = SessionState::Setup;
        self.secret = None;
        self.slots = vec![None; self.length];
        self.available.clear();
        self.display_rank.clear();
        self.attempts_used = 0;
        self.history.clear();
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    pub fn policy(&self) -> &LevelPolicy {
        &self.policy
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn attempts_used(&self) -> usize {
        self.attempts_used
    }

    pub fn attempts_remaining(&self) -> usize {
        self.policy.max_attempts.saturating_sub(self.attempts_used)
    }

    pub fn guess(&self) -> &[Option<Card>] {
        &self.slots
    }

    pub fn is_guess_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Cards that can still be placed, in display order.
    pub fn available(&self) -> &[Card] {
        &self.available
    }

    /// Every card offered this round, placed or not, in display order.
    pub fn display_pool(&self) -> Vec<Card> {
        let mut all: Vec<Card> = self
            .available
            .iter()
            .chain(self.slots.iter().flatten())
            .cloned()
            .collect();
        all.sort_by_key(|card| self.rank_of(card.id));
        all
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The secret, once the round is over.
    pub fn revealed_secret(&self) -> Option<&SecretSequence> {
        if self.state.is_finished() {
            self.secret.as_ref()
        } else {
            None
        }
    }

    fn ensure_in_progress(&self) -> Result<()> {
        match self.state {
            SessionState::InProgress => Ok(()),
            SessionState::Setup => Err(GameError::SessionNotStarted),
            SessionState::Won | SessionState::Lost => {
                warn!(state = ?self.state, "operation on finished round");
                Err(GameError::SessionFinished)
            }
        }
    }

    fn check_slot(&self, slot: usize) -> Result<()> {
        if slot >= self.length {
            return Err(GameError::SlotOutOfRange {
                slot,
                length: self.length,
            });
        }
        Ok(())
    }

    fn rank_of(&self, id: CardId) -> usize {
        self.display_rank.get(&id).copied().unwrap_or(usize::MAX)
    }

    fn restore_available(&mut self, card: Card) {
        let rank = self.rank_of(card.id);
        let pos = self
            .available
            .partition_point(|c| self.rank_of(c.id) < rank);
        self.available.insert(pos, card);
    }
}
