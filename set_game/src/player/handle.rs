//! Handle for feeding presses to a player and reading its state.

use super::status::{PlayerStatus, StatusCell};
use crate::{
    cards::{PlayerId, Slot},
    table::{MAX_TOKENS, SharedTable},
    ui::GameUi,
};
use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};
use tokio::sync::mpsc;

/// What became of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// Player frozen, awaiting a verdict, terminated, or table blocked
    Ignored,
    /// The player already had a token there; it was toggled off
    TokenRemoved,
    /// Queued for the player's own loop to apply
    Queued,
    /// The press queue already held three presses
    Dropped,
}

/// A queued press, stamped with the table round it was made in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Press {
    pub slot: Slot,
    pub round: u64,
}

/// State shared between a player's task, its input source and observers
pub(crate) struct PlayerShared {
    pub id: PlayerId,
    pub status: StatusCell,
    pub score: AtomicU32,
    pub table: Arc<SharedTable>,
    pub ui: Arc<dyn GameUi>,
}

/// Cloneable handle to a player
#[derive(Clone)]
pub struct PlayerHandle {
    shared: Arc<PlayerShared>,
    presses: mpsc::Sender<Press>,
}

impl PlayerHandle {
    /// Create a handle and the receiving end of its press queue
    pub(crate) fn new(
        id: PlayerId,
        table: Arc<SharedTable>,
        ui: Arc<dyn GameUi>,
    ) -> (Self, mpsc::Receiver<Press>) {
        let (presses, inbox) = mpsc::channel(MAX_TOKENS);
        let shared = Arc::new(PlayerShared {
            id,
            status: StatusCell::default(),
            score: AtomicU32::new(0),
            table,
            ui,
        });
        (Self { shared, presses }, inbox)
    }

    pub fn id(&self) -> PlayerId {
        self.shared.id
    }

    pub fn score(&self) -> u32 {
        self.shared.score.load(Ordering::Acquire)
    }

    pub fn status(&self) -> PlayerStatus {
        self.shared.status.load()
    }

    pub(crate) fn shared(&self) -> &PlayerShared {
        &self.shared
    }

    /// Add one to the score and return the new total
    pub(crate) fn award_point(&self) -> u32 {
        self.shared.score.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Handle a press on `slot`.
    ///
    /// A press on a slot the player already tokened removes the token right
    /// away. Any other press is queued for the player's loop, which applies
    /// it to the table.
    pub fn key_pressed(&self, slot: Slot) -> KeyPress {
        let shared = &self.shared;
        if !shared.status.load().accepts_input() || shared.table.is_blocked() {
            return KeyPress::Ignored;
        }

        let round = shared.table.round();
        if shared.table.lock().remove_token(shared.id, slot) {
            shared.ui.remove_token(shared.id, slot);
            return KeyPress::TokenRemoved;
        }

        match self.presses.try_send(Press { slot, round }) {
            Ok(()) => KeyPress::Queued,
            Err(mpsc::error::TrySendError::Full(_)) => KeyPress::Dropped,
            Err(mpsc::error::TrySendError::Closed(_)) => KeyPress::Ignored,
        }
    }
}

impl std::fmt::Debug for PlayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerHandle")
            .field("id", &self.id())
            .field("status", &self.status())
            .field("score", &self.score())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{table::Table, ui::NullUi};

    fn handle() -> (PlayerHandle, mpsc::Receiver<Press>, Arc<SharedTable>) {
        let table = Arc::new(SharedTable::new(Table::new(3, 4, 81, 2)));
        {
            let mut grid = table.block();
            for slot in 0..12 {
                grid.place_card(slot, slot).unwrap();
            }
        }
        let (handle, inbox) = PlayerHandle::new(1, table.clone(), Arc::new(NullUi));
        (handle, inbox, table)
    }

    #[test]
    fn test_press_is_queued_with_round() {
        let (handle, mut inbox, _table) = handle();
        assert_eq!(handle.key_pressed(4), KeyPress::Queued);
        assert_eq!(inbox.try_recv().unwrap(), Press { slot: 4, round: 0 });
    }

    #[test]
    fn test_press_on_own_token_toggles_it_off() {
        let (handle, mut inbox, table) = handle();
        table.lock().place_token(1, 4);

        assert_eq!(handle.key_pressed(4), KeyPress::TokenRemoved);
        assert!(table.lock().tokens(1).is_empty());
        assert!(inbox.try_recv().is_err());
    }

    #[test]
    fn test_other_players_token_is_not_toggled() {
        let (handle, _inbox, table) = handle();
        table.lock().place_token(0, 4);

        assert_eq!(handle.key_pressed(4), KeyPress::Queued);
        assert!(table.lock().has_token(0, 4));
    }

    #[test]
    fn test_queue_holds_three_presses() {
        let (handle, _inbox, _table) = handle();
        for slot in 0..3 {
            assert_eq!(handle.key_pressed(slot), KeyPress::Queued);
        }
        assert_eq!(handle.key_pressed(3), KeyPress::Dropped);
    }

    #[test]
    fn test_ignored_while_table_blocked() {
        let (handle, mut inbox, table) = handle();
        let guard = table.block();
        assert_eq!(handle.key_pressed(0), KeyPress::Ignored);
        drop(guard);
        assert!(inbox.try_recv().is_err());
    }

    #[test]
    fn test_ignored_while_frozen() {
        let (handle, _inbox, _table) = handle();
        handle.shared().status.store(PlayerStatus::FrozenPenalty);
        assert_eq!(handle.key_pressed(0), KeyPress::Ignored);
        handle.shared().status.store(PlayerStatus::AwaitingClaim);
        assert_eq!(handle.key_pressed(0), KeyPress::Ignored);
    }

    #[test]
    fn test_ignored_after_player_loop_exits() {
        let (handle, inbox, _table) = handle();
        drop(inbox);
        assert_eq!(handle.key_pressed(0), KeyPress::Ignored);
    }

    #[test]
    fn test_award_point_returns_running_total() {
        let (handle, _inbox, _table) = handle();
        assert_eq!(handle.award_point(), 1);
        assert_eq!(handle.award_point(), 2);
        assert_eq!(handle.score(), 2);
    }
}
