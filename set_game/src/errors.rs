//! Game error types.

use crate::cards::{Card, Slot};
use thiserror::Error;

/// Errors raised by the game core
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Configuration value rejected by validation
    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Slot index outside the grid
    #[error("Slot {slot} is outside a table of {size} slots")]
    SlotOutOfRange { slot: Slot, size: usize },

    /// Slot already holds a card
    #[error("Slot {slot} already holds card {card}")]
    SlotOccupied { slot: Slot, card: Card },

    /// Card id outside the deck
    #[error("Card {card} is outside a deck of {deck_size} cards")]
    CardOutOfRange { card: Card, deck_size: usize },

    /// Card already lies on another slot
    #[error("Card {card} is already on slot {slot}")]
    CardAlreadyPlaced { card: Card, slot: Slot },

    /// Game started without any player
    #[error("A game needs at least one player")]
    NoPlayers,

    /// An actor task panicked or was aborted
    #[error("Task failed: {0}")]
    TaskFailed(String),
}

impl GameError {
    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        GameError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl From<tokio::task::JoinError> for GameError {
    fn from(err: tokio::task::JoinError) -> Self {
        GameError::TaskFailed(err.to_string())
    }
}

/// Result type for game operations
pub type GameResult<T> = Result<T, GameError>;
