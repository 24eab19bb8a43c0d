//! Player actor: applies queued presses and runs the claim cycle.

use super::{
    handle::{PlayerHandle, PlayerShared, Press},
    input::{self, InputSource},
    status::PlayerStatus,
};
use crate::{
    config::GameConfig,
    dealer::{Claim, ClaimSender, Verdict},
    table::MAX_TOKENS,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Display tick of the penalty countdown
pub const FREEZE_TICK: Duration = Duration::from_secs(1);

/// Freeze durations a player observes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerTimings {
    pub claim_hold: Duration,
    pub point_freeze: Duration,
    pub penalty_freeze: Duration,
}

impl From<&GameConfig> for PlayerTimings {
    fn from(config: &GameConfig) -> Self {
        Self {
            claim_hold: config.claim_hold(),
            point_freeze: config.point_freeze(),
            penalty_freeze: config.penalty_freeze(),
        }
    }
}

/// One player's task.
///
/// Owns the receiving end of the player's press queue. Presses are applied
/// to the table one at a time; the press completing a third token turns into
/// a claim, and the player waits for the dealer's verdict before running its
/// point or penalty freeze. The dealer credits points; the player only
/// serves the freeze.
pub struct PlayerActor {
    handle: PlayerHandle,
    presses: mpsc::Receiver<Press>,
    claims: ClaimSender,
    timings: PlayerTimings,
    cancel: CancellationToken,
}

impl PlayerActor {
    pub(crate) fn new(
        handle: PlayerHandle,
        presses: mpsc::Receiver<Press>,
        claims: ClaimSender,
        timings: PlayerTimings,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            handle,
            presses,
            claims,
            timings,
            cancel,
        }
    }

    fn shared(&self) -> &PlayerShared {
        self.handle.shared()
    }

    /// Run the player loop, fed by `source`, until shutdown
    pub async fn run(mut self, source: Box<dyn InputSource>) {
        let id = self.handle.id();
        log::info!("Player {} starting", id);

        let input = tokio::spawn(input::drive(
            source,
            self.handle.clone(),
            self.cancel.clone(),
        ));

        loop {
            let press = tokio::select! {
                _ = self.cancel.cancelled() => break,
                press = self.presses.recv() => match press {
                    Some(press) => press,
                    None => break,
                },
            };
            if !self.apply_press(press).await {
                break;
            }
        }

        self.shared().status.store(PlayerStatus::Terminated);
        if let Err(e) = input.await {
            log::warn!("Input for player {} failed: {}", id, e);
        }
        log::info!("Player {} terminated", id);
    }

    /// Sleep for `duration` unless shut down first; `false` on shutdown
    async fn pause(&self, duration: Duration) -> bool {
        tokio::select! {
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(duration) => true,
        }
    }

    /// Toggle a token for one queued press; `false` on shutdown
    async fn apply_press(&mut self, press: Press) -> bool {
        let shared = self.handle.shared();
        tokio::select! {
            _ = self.cancel.cancelled() => return false,
            _ = shared.table.wait_unblocked() => {}
        }

        let id = shared.id;
        let completed = {
            let mut table = shared.table.lock();
            if press.round != shared.table.round() {
                log::trace!("Player {} dropped press from an earlier round", id);
                return true;
            }
            if table.remove_token(id, press.slot) {
                shared.ui.remove_token(id, press.slot);
                false
            } else if table.place_token(id, press.slot) {
                shared.ui.place_token(id, press.slot);
                table.token_count(id) == MAX_TOKENS
            } else {
                false
            }
        };

        if completed {
            self.claim().await
        } else {
            true
        }
    }

    /// Hand a claim to the dealer and act on its verdict; `false` on shutdown
    async fn claim(&mut self) -> bool {
        let id = self.handle.id();
        self.shared().status.store(PlayerStatus::AwaitingClaim);
        if !self.pause(self.timings.claim_hold).await {
            return false;
        }

        let (claim, verdict) = Claim::new(id);
        if !self.claims.submit(claim) {
            return false;
        }
        log::debug!("Player {} submitted a claim", id);

        let verdict = tokio::select! {
            _ = self.cancel.cancelled() => return false,
            verdict = verdict => verdict.unwrap_or(Verdict::Void),
        };
        log::debug!("Player {} claim resolved: {:?}", id, verdict);

        match verdict {
            Verdict::Point => self.point().await,
            Verdict::Penalty => self.penalty().await,
            Verdict::Void => {
                self.shared().status.store(PlayerStatus::Idle);
                true
            }
        }
    }

    /// Freeze for the point window; the dealer has already credited the point
    async fn point(&mut self) -> bool {
        let shared = self.handle.shared();
        shared.status.store(PlayerStatus::FrozenPoint);
        shared.ui.set_freeze(shared.id, self.timings.point_freeze);

        let completed = self.pause(self.timings.point_freeze).await;

        shared.ui.set_freeze(shared.id, Duration::ZERO);
        if completed {
            shared.status.store(PlayerStatus::Idle);
        }
        completed
    }

    /// Freeze for the penalty window, counting down in display ticks
    async fn penalty(&mut self) -> bool {
        let shared = self.handle.shared();
        shared.status.store(PlayerStatus::FrozenPenalty);

        let mut remaining = self.timings.penalty_freeze;
        while !remaining.is_zero() {
            shared.ui.set_freeze(shared.id, remaining);
            let tick = remaining.min(FREEZE_TICK);
            if !self.pause(tick).await {
                shared.ui.set_freeze(shared.id, Duration::ZERO);
                return false;
            }
            remaining -= tick;
        }

        shared.ui.set_freeze(shared.id, Duration::ZERO);
        shared.status.store(PlayerStatus::Idle);
        true
    }
}
