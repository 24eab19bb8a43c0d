//! Shared table of cards and player tokens.
//!
//! This module implements:
//! - Table: grid bookkeeping of cards and per-player tokens
//! - SharedTable: the table behind a lock, with the dealer's global block
//! - BlockGuard: RAII handle held by the dealer during bulk mutations

pub mod grid;
pub mod shared;

pub use grid::{MAX_TOKENS, Table};
pub use shared::{BlockGuard, SharedTable};
