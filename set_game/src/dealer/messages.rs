//! Claim hand-off between players and the dealer.

use crate::cards::PlayerId;
use std::{sync::Arc, time::Duration};
use tokio::sync::{Notify, mpsc, oneshot};

/// Dealer's decision on a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Valid set: cards replaced, player runs its point freeze
    Point,
    /// Not a set: player's tokens cleared, player runs its penalty freeze
    Penalty,
    /// Skipped: the player no longer held three tokens when drained
    Void,
}

/// A player holding exactly three tokens, waiting for the dealer
#[derive(Debug)]
pub struct Claim {
    pub player: PlayerId,
    verdict: oneshot::Sender<Verdict>,
}

impl Claim {
    pub fn new(player: PlayerId) -> (Self, oneshot::Receiver<Verdict>) {
        let (verdict, receiver) = oneshot::channel();
        (Self { player, verdict }, receiver)
    }

    /// Deliver the verdict, consuming the claim
    pub fn resolve(self, verdict: Verdict) {
        if self.verdict.send(verdict).is_err() {
            log::debug!(
                "Player {} left before its claim was resolved",
                self.player
            );
        }
    }
}

/// Producer side of the claim queue, one clone per player
#[derive(Debug, Clone)]
pub struct ClaimSender {
    claims: mpsc::UnboundedSender<Claim>,
    wake: Arc<Notify>,
}

impl ClaimSender {
    /// Enqueue a claim and wake the dealer.
    ///
    /// Returns `false` if the dealer is gone.
    pub fn submit(&self, claim: Claim) -> bool {
        let submitted = self.claims.send(claim).is_ok();
        self.wake.notify_one();
        submitted
    }
}

/// Consumer side of the claim queue, owned by the dealer.
///
/// Claims come out in submission order. Enqueueing while the dealer
/// drains is safe: a drain simply sees the new claim or leaves it for
/// the next pass.
#[derive(Debug)]
pub struct ClaimQueue {
    claims: mpsc::UnboundedReceiver<Claim>,
    wake: Arc<Notify>,
}

impl ClaimQueue {
    /// Pop the oldest pending claim
    pub fn try_next(&mut self) -> Option<Claim> {
        self.claims.try_recv().ok()
    }

    pub(crate) fn len(&self) -> usize {
        self.claims.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Sleep until `timeout` elapses or a claim is submitted, whichever is first.
    ///
    /// Returns `true` if woken by a claim.
    pub async fn wait(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, self.wake.notified())
            .await
            .is_ok()
    }
}

/// Create a connected claim sender and queue
pub fn claim_channel() -> (ClaimSender, ClaimQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    let wake = Arc::new(Notify::new());
    (
        ClaimSender {
            claims: tx,
            wake: wake.clone(),
        },
        ClaimQueue { claims: rx, wake },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_claims_drain_in_submission_order() {
        let (sender, mut queue) = claim_channel();
        let mut verdicts = Vec::new();
        for player in [2, 0, 1] {
            let (claim, verdict) = Claim::new(player);
            assert!(sender.submit(claim));
            verdicts.push(verdict);
        }
        assert_eq!(queue.len(), 3);

        let order: Vec<PlayerId> = std::iter::from_fn(|| queue.try_next())
            .map(|claim| {
                let player = claim.player;
                claim.resolve(Verdict::Void);
                player
            })
            .collect();
        assert_eq!(order, vec![2, 0, 1]);
        assert!(queue.is_empty());

        for verdict in verdicts {
            assert_eq!(verdict.await.unwrap(), Verdict::Void);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_times_out_without_claims() {
        let (_sender, queue) = claim_channel();
        let start = tokio::time::Instant::now();
        assert!(!queue.wait(Duration::from_secs(1)).await);
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_before_wait_is_not_lost() {
        let (sender, queue) = claim_channel();
        let (claim, _verdict) = Claim::new(0);
        sender.submit(claim);

        let start = tokio::time::Instant::now();
        assert!(queue.wait(Duration::from_secs(1)).await);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_wakes_waiting_dealer() {
        let (sender, queue) = claim_channel();
        let submitter = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            let (claim, verdict) = Claim::new(4);
            sender.submit(claim);
            verdict
        });

        let start = tokio::time::Instant::now();
        assert!(queue.wait(Duration::from_secs(1)).await);
        assert!(start.elapsed() < Duration::from_millis(100));
        drop(submitter.await.unwrap());
    }

    #[test]
    fn test_resolve_after_player_left() {
        let (claim, verdict) = Claim::new(1);
        drop(verdict);
        claim.resolve(Verdict::Point);
    }
}
