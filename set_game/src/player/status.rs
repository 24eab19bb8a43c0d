//! Player state machine.

use std::sync::atomic::{AtomicU8, Ordering};

/// Where a player is in its claim cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PlayerStatus {
    /// Processing presses normally
    Idle = 0,
    /// Holding three tokens, waiting for the dealer's verdict
    AwaitingClaim = 1,
    /// Frozen after a valid claim
    FrozenPoint = 2,
    /// Frozen after an invalid claim
    FrozenPenalty = 3,
    /// Shut down
    Terminated = 4,
}

impl PlayerStatus {
    /// Whether key presses are accepted in this state
    pub fn accepts_input(self) -> bool {
        matches!(self, PlayerStatus::Idle)
    }

    pub fn is_frozen(self) -> bool {
        matches!(self, PlayerStatus::FrozenPoint | PlayerStatus::FrozenPenalty)
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => PlayerStatus::Idle,
            1 => PlayerStatus::AwaitingClaim,
            2 => PlayerStatus::FrozenPoint,
            3 => PlayerStatus::FrozenPenalty,
            _ => PlayerStatus::Terminated,
        }
    }
}

impl std::fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerStatus::Idle => write!(f, "idle"),
            PlayerStatus::AwaitingClaim => write!(f, "awaiting claim"),
            PlayerStatus::FrozenPoint => write!(f, "frozen (point)"),
            PlayerStatus::FrozenPenalty => write!(f, "frozen (penalty)"),
            PlayerStatus::Terminated => write!(f, "terminated"),
        }
    }
}

/// Atomic cell holding a [`PlayerStatus`].
///
/// Written only by the owning player task, read by anyone.
#[derive(Debug)]
pub struct StatusCell(AtomicU8);

impl StatusCell {
    pub fn new(status: PlayerStatus) -> Self {
        Self(AtomicU8::new(status as u8))
    }

    pub fn load(&self) -> PlayerStatus {
        PlayerStatus::from_u8(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, status: PlayerStatus) {
        self.0.store(status as u8, Ordering::Release);
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new(PlayerStatus::Idle)
    }
}
