//! Feedback calculation for submitted guesses.
//!
//! A guess is scored with two counts: cards in the exact slot they hold in
//! the secret, and cards present in the secret but placed in another slot.
//! Repeated ids are matched at most as many times as the secret holds them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::card::{Card, CardId};

/// Result of checking one complete guess against the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Feedback {
    pub correct_position: usize,
    pub correct_card_wrong_position: usize,
}

impl Feedback {
    pub fn new(correct_position: usize, correct_card_wrong_position: usize) -> Self {
        Self {
            correct_position,
            correct_card_wrong_position,
        }
    }

    /// Score a guess of cards against a secret of cards.
    ///
    /// `secret` and `guess` must have the same length. Debug builds panic on
    /// a mismatch; release builds compare only the common prefix.
    pub fn evaluate(secret: &[Card], guess: &[Card]) -> Self {
        Self::evaluate_by(secret, guess, |card| card.id)
    }

    /// Score a guess of ids against a secret of ids. Same length
    /// requirement as [`Feedback::evaluate`].
    pub fn evaluate_ids(secret: &[CardId], guess: &[CardId]) -> Self {
        Self::evaluate_by(secret, guess, |id| *id)
    }

    fn evaluate_by<T>(secret: &[T], guess: &[T], id_of: impl Fn(&T) -> CardId) -> Self {
        debug_assert_eq!(secret.len(), guess.len());
        let len = secret.len().min(guess.len());

        let mut matched = vec![false; len];
        let mut secret_remaining: Vec<(CardId, usize)> = Vec::with_capacity(len);
        let mut correct_position = 0;

        for i in 0..len {
            let secret_id = id_of(&secret[i]);
            if id_of(&guess[i]) == secret_id {
                matched[i] = true;
                correct_position += 1;
            } else {
                match secret_remaining.iter_mut().find(|(id, _)| *id == secret_id) {
                    Some((_, count)) => *count += 1,
                    None => secret_remaining.push((secret_id, 1)),
                }
            }
        }

        let mut correct_card_wrong_position = 0;
        for i in 0..len {
            if matched[i] {
                continue;
            }
            let guess_id = id_of(&guess[i]);
            if let Some((_, count)) = secret_remaining
                .iter_mut()
                .find(|(id, count)| *id == guess_id && *count > 0)
            {
                *count -= 1;
                correct_card_wrong_position += 1;
            }
        }

        Self::new(correct_position, correct_card_wrong_position)
    }

    /// Check if this feedback wins a code of `length` slots
    pub fn is_win(self, length: usize) -> bool {
        self.correct_position == length
    }

    /// Total cards that belong to the secret, wherever they were placed.
    pub fn total_matches(self) -> usize {
        self.correct_position + self.correct_card_wrong_position
    }

    /// Number of distinct feedback values possible for a code of `length` slots.
    ///
    /// Some of these never occur (e.g. `length - 1` exact and one displaced),
    /// but the dense range keeps [`Feedback::index`] a plain array offset.
    pub fn num_patterns(length: usize) -> usize {
        (length + 1) * (length + 1)
    }

    /// Dense index in `0..num_patterns(length)`.
    pub fn index(self, length: usize) -> usize {
        self.correct_position * (length + 1) + self.correct_card_wrong_position
    }

    /// Marker string: one filled dot per exact match, one hollow per displaced card.
    pub fn to_marker_string(self) -> String {
        let mut out = "●".repeat(self.correct_position);
        out.push_str(&"○".repeat(self.correct_card_wrong_position));
        if out.is_empty() {
            out.push('-');
        }
        out
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} na posição certa, {} na posição errada",
            self.correct_position, self.correct_card_wrong_position
        )
    }
}
