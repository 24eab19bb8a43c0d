//! # Set Game
//!
//! Concurrency core of a real-time multiplayer Set card game.
//!
//! Several players act at once on a shared table of cards, claiming cards
//! by placing tokens on slots. A single dealer validates claims, scores
//! players, reshuffles the table when its countdown runs out, and ends the
//! game once no set remains.
//!
//! ## Architecture
//!
//! Every actor is a tokio task:
//!
//! - **Dealer**: the only task touching the deck and the cards on the table
//! - **Player**: one task per player, applying its own queued presses
//! - **Input source**: one task per player generating presses (keyboard,
//!   random, scripted)
//!
//! They share a [`SharedTable`] whose global block keeps players off the
//! table while the dealer moves cards. Claims travel to the dealer over a
//! FIFO queue that also wakes it early, and verdicts travel back on a
//! oneshot channel. One cancellation token shuts everything down.
//!
//! ## Core Modules
//!
//! - [`table`]: slot, card and token bookkeeping and the shared block
//! - [`player`]: player actor, handle, status and input sources
//! - [`dealer`]: dealer actor, claim queue, countdown, outcome
//! - [`rules`]: the set-validation capability and standard rules
//! - [`game`]: wiring everything into a running game
//!
//! ## Example
//!
//! ```no_run
//! use set_game::{Game, GameConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut game = Game::new(GameConfig::default()).unwrap();
//!     game.add_configured_players();
//!     let handle = game.start().unwrap();
//!
//!     let outcome = handle.wait().await.unwrap();
//!     println!("Winners: {:?}", outcome.winners);
//! }
//! ```

pub mod cards;
pub mod config;
pub mod dealer;
pub mod errors;
pub mod game;
pub mod player;
pub mod rules;
pub mod table;
pub mod ui;

pub use cards::{Card, Deck, PlayerId, Slot};
pub use config::GameConfig;
pub use dealer::{Dealer, GameOutcome, Verdict};
pub use errors::{GameError, GameResult};
pub use game::{Game, GameHandle};
pub use player::{
    ChannelInput, InputSource, KeyPress, ManualInput, PlayerHandle, PlayerStatus, RandomInput,
    ScriptedInput,
};
pub use rules::{SetValidator, StandardRules};
pub use table::{MAX_TOKENS, SharedTable, Table};
pub use ui::{GameUi, LogUi, NullUi};
