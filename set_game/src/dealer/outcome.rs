//! Final scores and winners.

use crate::cards::PlayerId;
use serde::Serialize;

/// Result of a finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    /// Every player whose score equals the maximum, in id order
    pub winners: Vec<PlayerId>,

    /// Highest score, 0 if nobody scored
    pub max_score: u32,

    /// Score of each player, indexed by player id
    pub scores: Vec<u32>,
}

impl GameOutcome {
    pub fn from_scores(scores: Vec<u32>) -> Self {
        let max_score = scores.iter().copied().max().unwrap_or(0);
        let winners = scores
            .iter()
            .enumerate()
            .filter(|&(_, &score)| score == max_score)
            .map(|(player, _)| player)
            .collect();
        Self {
            winners,
            max_score,
            scores,
        }
    }

    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }
}
