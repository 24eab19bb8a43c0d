//! Table shared between the dealer and every player.

use super::grid::Table;
use std::{
    ops::{Deref, DerefMut},
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};
use tokio::sync::watch;

/// Table behind a lock, plus the dealer's global block flag.
///
/// Players mutate tokens through [`SharedTable::lock`] for single,
/// short operations. The dealer performs bulk mutations (dealing,
/// clearing, replacing claimed cards) through a [`BlockGuard`], which
/// raises the block flag for every player at once and holds the table
/// lock until it is dropped.
#[derive(Debug)]
pub struct SharedTable {
    table: Mutex<Table>,
    blocked: watch::Sender<bool>,
    round: AtomicU64,
}

impl SharedTable {
    pub fn new(table: Table) -> Self {
        let (blocked, _) = watch::channel(false);
        Self {
            table: Mutex::new(table),
            blocked,
            round: AtomicU64::new(0),
        }
    }

    /// Lock the table for a single operation
    pub fn lock(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block all players and lock the table for a bulk mutation
    pub fn block(&self) -> BlockGuard<'_> {
        let table = self.lock();
        self.blocked.send_replace(true);
        BlockGuard {
            shared: self,
            table,
        }
    }

    pub fn is_blocked(&self) -> bool {
        *self.blocked.borrow()
    }

    /// Wait until the dealer lifts the block
    pub async fn wait_unblocked(&self) {
        let mut blocked = self.blocked.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = blocked.wait_for(|blocked| !*blocked).await;
    }

    /// Reshuffle counter; presses made in an older round are stale
    pub fn round(&self) -> u64 {
        self.round.load(Ordering::Acquire)
    }
}

/// Exclusive access to the table while every player is blocked
pub struct BlockGuard<'a> {
    shared: &'a SharedTable,
    table: MutexGuard<'a, Table>,
}

impl BlockGuard<'_> {
    /// Start a new round, invalidating presses queued before it
    pub fn start_new_round(&self) -> u64 {
        self.shared.round.fetch_add(1, Ordering::AcqRel) + 1
    }
}

impl Deref for BlockGuard<'_> {
    type Target = Table;

    fn deref(&self) -> &Table {
        &self.table
    }
}

impl DerefMut for BlockGuard<'_> {
    fn deref_mut(&mut self) -> &mut Table {
        &mut self.table
    }
}

impl Drop for BlockGuard<'_> {
    fn drop(&mut self) {
        self.shared.blocked.send_replace(false);
    }
}
