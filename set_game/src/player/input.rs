//! Input sources feeding presses into a player.
//!
//! Human and computer players differ only in where their presses come
//! from. Every source goes through [`PlayerHandle::key_pressed`], so none
//! can bypass the freeze and block checks.

use super::handle::PlayerHandle;
use crate::cards::Slot;
use async_trait::async_trait;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::{collections::VecDeque, time::Duration};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Source of slot presses for one player
#[async_trait]
pub trait InputSource: Send {
    /// Wait for the next press; `None` once the source is exhausted
    async fn next_press(&mut self) -> Option<Slot>;
}

/// No presses of its own: the display calls [`PlayerHandle::key_pressed`] directly
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualInput;

#[async_trait]
impl InputSource for ManualInput {
    async fn next_press(&mut self) -> Option<Slot> {
        None
    }
}

/// Presses forwarded from a channel, e.g. a keyboard reader
#[derive(Debug)]
pub struct ChannelInput {
    presses: mpsc::UnboundedReceiver<Slot>,
}

impl ChannelInput {
    pub fn new() -> (Self, mpsc::UnboundedSender<Slot>) {
        let (tx, presses) = mpsc::unbounded_channel();
        (Self { presses }, tx)
    }
}

#[async_trait]
impl InputSource for ChannelInput {
    async fn next_press(&mut self) -> Option<Slot> {
        self.presses.recv().await
    }
}

/// Computer player: a uniformly random slot at a fixed interval
#[derive(Debug)]
pub struct RandomInput {
    table_size: usize,
    interval: Duration,
    rng: StdRng,
}

impl RandomInput {
    pub fn new(table_size: usize, interval: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            table_size,
            interval,
            rng,
        }
    }
}

#[async_trait]
impl InputSource for RandomInput {
    async fn next_press(&mut self) -> Option<Slot> {
        if self.table_size == 0 {
            return None;
        }
        tokio::time::sleep(self.interval).await;
        Some(self.rng.random_range(0..self.table_size))
    }
}

/// A fixed sequence of presses, one per interval
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    presses: VecDeque<Slot>,
    interval: Duration,
}

impl ScriptedInput {
    pub fn new(presses: impl IntoIterator<Item = Slot>, interval: Duration) -> Self {
        Self {
            presses: presses.into_iter().collect(),
            interval,
        }
    }
}

#[async_trait]
impl InputSource for ScriptedInput {
    async fn next_press(&mut self) -> Option<Slot> {
        let slot = self.presses.pop_front()?;
        tokio::time::sleep(self.interval).await;
        Some(slot)
    }
}

/// Pump presses from `source` into the player until shutdown or exhaustion
pub(crate) async fn drive(
    mut source: Box<dyn InputSource>,
    handle: PlayerHandle,
    cancel: CancellationToken,
) {
    log::debug!("Input for player {} starting", handle.id());

    loop {
        let slot = tokio::select! {
            _ = cancel.cancelled() => break,
            press = source.next_press() => match press {
                Some(slot) => slot,
                None => break,
            },
        };
        let outcome = handle.key_pressed(slot);
        log::trace!("Player {} pressed slot {}: {:?}", handle.id(), slot, outcome);
    }

    log::debug!("Input for player {} terminated", handle.id());
}
