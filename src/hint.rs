//! Hint advisor using an entropy-based strategy.
//!
//! The advisor tracks every code that is still consistent with the feedback
//! received so far, and suggests the guess whose feedback is expected to
//! split the remaining codes most evenly (maximum Shannon entropy).

use crate::card::{Card, CardId};
use crate::error::{GameError, Result};
use crate::feedback::Feedback;
use crate::history::History;
use crate::{MAX_HINT_CANDIDATES, MAX_HINT_GUESSES};
use rayon::prelude::*;

/// Result of analyzing a potential guess
#[derive(Debug, Clone)]
pub struct GuessAnalysis {
    pub code: Vec<CardId>,
    pub entropy: f64,
    pub expected_remaining: f64,
}

#[derive(Debug, Clone)]
pub struct HintAdvisor {
    length: usize,
    possible_codes: Vec<Vec<CardId>>,
}

impl HintAdvisor {
    /// Enumerate every arrangement of `length` distinct cards from `pool`.
    pub fn new(pool: &[Card], length: usize) -> Result<Self> {
        let candidates = arrangement_count(pool.len(), length);
        match candidates {
            Some(count) if count <= MAX_HINT_CANDIDATES => {}
            other => {
                return Err(GameError::HintUnavailable {
                    candidates: other.unwrap_or(usize::MAX),
                })
            }
        }

        let ids: Vec<CardId> = pool.iter().map(|card| card.id).collect();
        let mut possible_codes = Vec::new();
        let mut current = Vec::with_capacity(length);
        let mut used = vec![false; ids.len()];
        arrangements(&ids, length, &mut current, &mut used, &mut possible_codes);

        Ok(Self {
            length,
            possible_codes,
        })
    }

    /// Build an advisor and replay a round's history into it.
    pub fn from_history(pool: &[Card], length: usize, history: &History) -> Result<Self> {
        let mut advisor = Self::new(pool, length)?;
        for entry in history.chronological() {
            let guess: Vec<CardId> = entry.guess.iter().map(|card| card.id).collect();
            advisor.apply(&guess, entry.feedback);
        }
        Ok(advisor)
    }

    pub fn remaining_count(&self) -> usize {
        self.possible_codes.len()
    }

    pub fn possible_codes(&self) -> &[Vec<CardId>] {
        &self.possible_codes
    }

    /// Keep only codes that would have answered `guess` with `feedback`.
    pub fn apply(&mut self, guess: &[CardId], feedback: Feedback) {
        self.possible_codes
            .retain(|code| Feedback::evaluate_ids(code, guess) == feedback);
    }

    pub fn calculate_entropy_for_code(&self, guess: &[CardId]) -> f64 {
        let n = self.possible_codes.len() as f64;
        if n <= 1.0 {
            return 0.0;
        }

        let mut pattern_counts = vec![0u32; Feedback::num_patterns(self.length)];
        for code in &self.possible_codes {
            let feedback = Feedback::evaluate_ids(code, guess);
            pattern_counts[feedback.index(self.length)] += 1;
        }

        let mut entropy = 0.0;
        for &count in &pattern_counts {
            if count > 0 {
                let p = count as f64 / n;
                entropy -= p * p.log2();
            }
        }

        entropy
    }

    pub fn best_guess(&self) -> Option<GuessAnalysis> {
        self.best_guesses(1).into_iter().next()
    }

    pub fn best_guesses(&self, n: usize) -> Vec<GuessAnalysis> {
        match self.possible_codes.len() {
            0 => return vec![],
            1 | 2 => {
                return vec![GuessAnalysis {
                    code: self.possible_codes[0].clone(),
                    entropy: if self.possible_codes.len() == 1 { 0.0 } else { 1.0 },
                    expected_remaining: 1.0,
                }]
            }
            _ => {}
        }

        // Only a spread sample of the remaining codes is scored as guesses;
        // every guess is still scored against all remaining codes.
        let step = self.possible_codes.len().div_ceil(MAX_HINT_GUESSES).max(1);
        let mut analyses: Vec<GuessAnalysis> = self
            .possible_codes
            .par_iter()
            .step_by(step)
            .map(|code| {
                let entropy = self.calculate_entropy_for_code(code);
                GuessAnalysis {
                    code: code.clone(),
                    entropy,
                    expected_remaining: self.possible_codes.len() as f64 / 2_f64.powf(entropy),
                }
            })
            .collect();

        analyses.sort_by(|a, b| {
            b.entropy
                .partial_cmp(&a.entropy)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        analyses.truncate(n);
        analyses
    }
}

/// `n! / (n - k)!`, or `None` on overflow.
fn arrangement_count(n: usize, k: usize) -> Option<usize> {
    if k > n {
        return Some(0);
    }
    (n - k + 1..=n).try_fold(1usize, |acc, factor| acc.checked_mul(factor))
}

fn arrangements(
    ids: &[CardId],
    length: usize,
    current: &mut Vec<CardId>,
    used: &mut [bool],
    out: &mut Vec<Vec<CardId>>,
) {
    if current.len() == length {
        out.push(current.clone());
        return;
    }
    for i in 0..ids.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        current.push(ids[i]);
        arrangements(ids, length, current, used, out);
        current.pop();
        used[i] = false;
    }
}
