//! Display callbacks produced by the game core.

use crate::cards::{Card, PlayerId, Slot};
use std::time::Duration;

/// Fire-and-forget sink for everything a display needs to render.
///
/// Every callback has an empty default so sinks only implement what they draw.
pub trait GameUi: Send + Sync {
    fn place_card(&self, _card: Card, _slot: Slot) {}

    /// Card removed; any tokens on the slot are gone with it
    fn remove_card(&self, _slot: Slot) {}

    fn place_token(&self, _player: PlayerId, _slot: Slot) {}

    fn remove_token(&self, _player: PlayerId, _slot: Slot) {}

    /// Time left until the reshuffle; `warning` once below the warning threshold
    fn set_countdown(&self, _remaining: Duration, _warning: bool) {}

    fn set_score(&self, _player: PlayerId, _score: u32) {}

    /// Remaining freeze for a player, zero when the freeze ends
    fn set_freeze(&self, _player: PlayerId, _remaining: Duration) {}

    fn announce_winners(&self, _winners: &[PlayerId]) {}
}

/// Sink that ignores every callback
#[derive(Debug, Default, Clone, Copy)]
pub struct NullUi;

impl GameUi for NullUi {}

/// Sink rendering callbacks as log lines
#[derive(Debug, Default, Clone, Copy)]
pub struct LogUi;

impl GameUi for LogUi {
    fn place_card(&self, card: Card, slot: Slot) {
        log::debug!("Card {} placed on slot {}", card, slot);
    }

    fn remove_card(&self, slot: Slot) {
        log::debug!("Card removed from slot {}", slot);
    }

    fn place_token(&self, player: PlayerId, slot: Slot) {
        log::trace!("Player {} placed token on slot {}", player, slot);
    }

    fn remove_token(&self, player: PlayerId, slot: Slot) {
        log::trace!("Player {} removed token from slot {}", player, slot);
    }

    fn set_countdown(&self, remaining: Duration, warning: bool) {
        if warning {
            log::trace!("Reshuffle in {} ms", remaining.as_millis());
        }
    }

    fn set_score(&self, player: PlayerId, score: u32) {
        log::info!("Player {} score: {}", player, score);
    }

    fn set_freeze(&self, player: PlayerId, remaining: Duration) {
        log::debug!("Player {} frozen for {} ms", player, remaining.as_millis());
    }

    fn announce_winners(&self, winners: &[PlayerId]) {
        log::info!("Winners: {:?}", winners);
    }
}
