//! Game configuration.

use crate::errors::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything the core reads from configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid rows
    pub rows: usize,

    /// Grid columns
    pub columns: usize,

    /// Number of cards in the deck
    pub deck_size: usize,

    /// Attributes encoded in each card (standard rules)
    pub features: usize,

    /// Values per attribute (standard rules)
    pub feature_size: usize,

    /// Players driven by keyboard input
    pub human_players: usize,

    /// Players driven by random input
    pub computer_players: usize,

    /// Time before the table is reshuffled
    pub turn_timeout_ms: u64,

    /// Remaining time below which the countdown shows as a warning
    pub turn_timeout_warning_ms: u64,

    /// Freeze after a valid claim
    pub point_freeze_ms: u64,

    /// Freeze after an invalid claim
    pub penalty_freeze_ms: u64,

    /// Hold between completing a claim and handing it to the dealer
    pub claim_hold_ms: u64,

    /// Interval between random presses of computer players
    pub computer_press_interval_ms: u64,

    /// Seed for deck shuffles and computer input; random when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            columns: 4,
            deck_size: 81,
            features: 4,
            feature_size: 3,
            human_players: 0,
            computer_players: 2,
            turn_timeout_ms: 60_000,
            turn_timeout_warning_ms: 5_000,
            point_freeze_ms: 1_000,
            penalty_freeze_ms: 3_000,
            claim_hold_ms: 500,
            computer_press_interval_ms: 100,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Validate configuration
    pub fn validate(&self) -> GameResult<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(GameError::invalid_config(
                "rows/columns",
                "The grid needs at least one slot",
            ));
        }

        if self.deck_size < 3 {
            return Err(GameError::invalid_config(
                "deck_size",
                "A deck needs at least 3 cards",
            ));
        }

        if self.features == 0 || self.feature_size < 2 {
            return Err(GameError::invalid_config(
                "features/feature_size",
                "Cards need at least one feature with two values",
            ));
        }

        let max_deck = u32::try_from(self.features)
            .ok()
            .and_then(|features| self.feature_size.checked_pow(features));
        let Some(max_deck) = max_deck else {
            return Err(GameError::invalid_config(
                "features/feature_size",
                format!(
                    "{} features with {} values describe more cards than a card id can hold",
                    self.features, self.feature_size
                ),
            ));
        };
        if self.deck_size > max_deck {
            return Err(GameError::invalid_config(
                "deck_size",
                format!(
                    "{} features with {} values describe fewer than {} cards",
                    self.features, self.feature_size, self.deck_size
                ),
            ));
        }

        if self.turn_timeout_ms == 0 {
            return Err(GameError::invalid_config(
                "turn_timeout_ms",
                "Must be greater than 0",
            ));
        }

        if self.turn_timeout_warning_ms >= self.turn_timeout_ms {
            return Err(GameError::invalid_config(
                "turn_timeout_warning_ms",
                format!("Must be less than turn timeout ({})", self.turn_timeout_ms),
            ));
        }

        if self.computer_press_interval_ms == 0 {
            return Err(GameError::invalid_config(
                "computer_press_interval_ms",
                "Must be greater than 0",
            ));
        }

        Ok(())
    }

    pub fn table_size(&self) -> usize {
        self.rows * self.columns
    }

    pub fn player_count(&self) -> usize {
        self.human_players + self.computer_players
    }

    pub fn turn_timeout(&self) -> Duration {
        Duration::from_millis(self.turn_timeout_ms)
    }

    pub fn turn_timeout_warning(&self) -> Duration {
        Duration::from_millis(self.turn_timeout_warning_ms)
    }

    pub fn point_freeze(&self) -> Duration {
        Duration::from_millis(self.point_freeze_ms)
    }

    pub fn penalty_freeze(&self) -> Duration {
        Duration::from_millis(self.penalty_freeze_ms)
    }

    pub fn claim_hold(&self) -> Duration {
        Duration::from_millis(self.claim_hold_ms)
    }

    pub fn computer_press_interval(&self) -> Duration {
        Duration::from_millis(self.computer_press_interval_ms)
    }
}
