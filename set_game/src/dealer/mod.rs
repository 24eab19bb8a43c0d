//! Dealer actor and the claim hand-off.
//!
//! This module implements:
//! - Dealer: deals cards, runs the reshuffle countdown, resolves claims
//! - ClaimSender / ClaimQueue: FIFO claim queue with an early-wake signal
//! - Countdown: reshuffle deadline with coarse and fine poll intervals
//! - GameOutcome: final scores and winners
//!
//! ## Rounds
//!
//! Each round the dealer blocks the table, shuffles and fills every empty
//! slot, then polls until the countdown expires: once a second, every 10 ms
//! inside the warning window, and immediately when a claim arrives. A valid
//! claim restarts the countdown. On expiry every card returns to the deck and
//! a new round starts. The game ends when no set remains among the deck and
//! the table.

pub mod actor;
pub mod countdown;
pub mod messages;
pub mod outcome;

pub use actor::Dealer;
pub use countdown::{COARSE_TICK, Countdown, FINE_TICK};
pub use messages::{Claim, ClaimQueue, ClaimSender, Verdict, claim_channel};
pub use outcome::GameOutcome;
