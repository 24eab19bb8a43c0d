//! Player actors.
//!
//! This module implements:
//! - PlayerActor: one task per player applying presses and running claims
//! - PlayerHandle: cloneable entry point for key presses and state reads
//! - PlayerStatus: the Idle / AwaitingClaim / Frozen state machine
//! - InputSource: where presses come from (keyboard, random, scripted)
//!
//! ## Claim cycle
//!
//! A press is queued by [`PlayerHandle::key_pressed`] and applied by the
//! player's own task. The press that completes a third token moves the
//! player to `AwaitingClaim`; after a short hold the claim is handed to the
//! dealer, whose verdict moves the player to `FrozenPoint` or
//! `FrozenPenalty` and, once the freeze ends, back to `Idle`.

pub mod actor;
pub mod handle;
pub mod input;
pub mod status;

pub use actor::{FREEZE_TICK, PlayerActor, PlayerTimings};
pub use handle::{KeyPress, PlayerHandle};
pub use input::{ChannelInput, InputSource, ManualInput, RandomInput, ScriptedInput};
pub use status::{PlayerStatus, StatusCell};
