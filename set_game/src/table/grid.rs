//! Slot, card and token bookkeeping for the shared table.

use crate::{
    cards::{Card, PlayerId, Slot},
    errors::{GameError, GameResult},
};

/// Maximum number of tokens a single player may hold
pub const MAX_TOKENS: usize = 3;

/// Grid of slots, each optionally holding a card, plus per-player tokens.
///
/// Enforces its own invariants: a card lies on at most one slot, tokens
/// only sit on slots holding a card, and no player holds more than
/// [`MAX_TOKENS`] tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    rows: usize,
    columns: usize,
    slot_to_card: Vec<Option<Card>>,
    card_to_slot: Vec<Option<Slot>>,
    /// Slots tokened by each player, in placement order
    tokens: Vec<Vec<Slot>>,
}

impl Table {
    pub fn new(rows: usize, columns: usize, deck_size: usize, players: usize) -> Self {
        Self {
            rows,
            columns,
            slot_to_card: vec![None; rows * columns],
            card_to_slot: vec![None; deck_size],
            tokens: vec![Vec::with_capacity(MAX_TOKENS); players],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of slots in the grid
    pub fn size(&self) -> usize {
        self.slot_to_card.len()
    }

    pub fn player_count(&self) -> usize {
        self.tokens.len()
    }

    /// `(row, column)` of a slot
    pub fn position(&self, slot: Slot) -> (usize, usize) {
        (slot / self.columns, slot % self.columns)
    }

    /// Place a card on an empty slot
    pub fn place_card(&mut self, card: Card, slot: Slot) -> GameResult<()> {
        let size = self.size();
        let deck_size = self.card_to_slot.len();
        let current = self
            .slot_to_card
            .get(slot)
            .ok_or(GameError::SlotOutOfRange { slot, size })?;
        if let Some(current) = *current {
            return Err(GameError::SlotOccupied {
                slot,
                card: current,
            });
        }
        match self.card_to_slot.get(card) {
            None => return Err(GameError::CardOutOfRange { card, deck_size }),
            Some(Some(other)) => {
                return Err(GameError::CardAlreadyPlaced { card, slot: *other });
            }
            Some(None) => {}
        }

        self.slot_to_card[slot] = Some(card);
        self.card_to_slot[card] = Some(slot);
        Ok(())
    }

    /// Remove the card on a slot, dropping every player's token on it.
    ///
    /// Returns the removed card, or `None` if the slot was already empty.
    pub fn remove_card(&mut self, slot: Slot) -> Option<Card> {
        let card = self.slot_to_card.get_mut(slot)?.take()?;
        self.card_to_slot[card] = None;
        for tokens in &mut self.tokens {
            tokens.retain(|&s| s != slot);
        }
        Some(card)
    }

    /// Remove every card and token, returning the cards in slot order
    pub fn clear(&mut self) -> Vec<(Slot, Card)> {
        for tokens in &mut self.tokens {
            tokens.clear();
        }
        let removed: Vec<(Slot, Card)> = self
            .slot_to_card
            .iter_mut()
            .enumerate()
            .filter_map(|(slot, card)| card.take().map(|card| (slot, card)))
            .collect();
        for &(_, card) in &removed {
            self.card_to_slot[card] = None;
        }
        removed
    }

    /// Place a player's token on a slot.
    ///
    /// No-op returning `false` if the slot holds no card, the player
    /// already holds a token there, or already holds [`MAX_TOKENS`] tokens.
    pub fn place_token(&mut self, player: PlayerId, slot: Slot) -> bool {
        if self.card_at(slot).is_none() {
            return false;
        }
        let Some(tokens) = self.tokens.get_mut(player) else {
            return false;
        };
        if tokens.len() >= MAX_TOKENS || tokens.contains(&slot) {
            return false;
        }
        tokens.push(slot);
        true
    }

    /// Remove a player's token from a slot, returning whether one was there
    pub fn remove_token(&mut self, player: PlayerId, slot: Slot) -> bool {
        let Some(tokens) = self.tokens.get_mut(player) else {
            return false;
        };
        match tokens.iter().position(|&s| s == slot) {
            Some(index) => {
                tokens.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove all of a player's tokens, returning the slots they were on
    pub fn clear_tokens(&mut self, player: PlayerId) -> Vec<Slot> {
        self.tokens
            .get_mut(player)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    pub fn card_at(&self, slot: Slot) -> Option<Card> {
        self.slot_to_card.get(slot).copied().flatten()
    }

    pub fn slot_of(&self, card: Card) -> Option<Slot> {
        self.card_to_slot.get(card).copied().flatten()
    }

    pub fn tokens(&self, player: PlayerId) -> &[Slot] {
        self.tokens.get(player).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn token_count(&self, player: PlayerId) -> usize {
        self.tokens(player).len()
    }

    pub fn has_token(&self, player: PlayerId, slot: Slot) -> bool {
        self.tokens(player).contains(&slot)
    }

    /// Cards under a player's tokens, if the player holds exactly [`MAX_TOKENS`]
    pub fn claimed_cards(&self, player: PlayerId) -> Option<[Card; MAX_TOKENS]> {
        let &[a, b, c] = self.tokens(player) else {
            return None;
        };
        Some([self.card_at(a)?, self.card_at(b)?, self.card_at(c)?])
    }

    /// Empty slots in row-major order
    pub fn empty_slots(&self) -> Vec<Slot> {
        self.slot_to_card
            .iter()
            .enumerate()
            .filter(|(_, card)| card.is_none())
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Cards currently on the table, in slot order
    pub fn cards(&self) -> Vec<Card> {
        self.slot_to_card.iter().flatten().copied().collect()
    }

    pub fn count_cards(&self) -> usize {
        self.slot_to_card.iter().flatten().count()
    }

    pub fn is_full(&self) -> bool {
        self.slot_to_card.iter().all(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dealt_table() -> Table {
        let mut table = Table::new(3, 4, 81, 2);
        for slot in 0..12 {
            table.place_card(slot + 10, slot).unwrap();
        }
        table
    }

    #[test]
    fn test_place_card_sets_both_mappings() {
        let mut table = Table::new(3, 4, 81, 2);
        table.place_card(42, 5).unwrap();

        assert_eq!(table.card_at(5), Some(42));
        assert_eq!(table.slot_of(42), Some(5));
        assert_eq!(table.count_cards(), 1);
        assert_eq!(table.position(5), (1, 1));
    }

    #[test]
    fn test_place_card_rejects_occupied_slot() {
        let mut table = Table::new(3, 4, 81, 2);
        table.place_card(1, 0).unwrap();

        let err = table.place_card(2, 0).unwrap_err();
        assert_eq!(err, GameError::SlotOccupied { slot: 0, card: 1 });
        assert_eq!(table.slot_of(2), None);
    }

    #[test]
    fn test_place_card_rejects_duplicate_card() {
        let mut table = Table::new(3, 4, 81, 2);
        table.place_card(1, 0).unwrap();

        let err = table.place_card(1, 3).unwrap_err();
        assert_eq!(err, GameError::CardAlreadyPlaced { card: 1, slot: 0 });
    }

    #[test]
    fn test_place_card_out_of_range() {
        let mut table = Table::new(3, 4, 81, 2);
        assert!(matches!(
            table.place_card(1, 12),
            Err(GameError::SlotOutOfRange { slot: 12, size: 12 })
        ));
        assert!(matches!(
            table.place_card(81, 0),
            Err(GameError::CardOutOfRange { card: 81, .. })
        ));
    }

    #[test]
    fn test_token_requires_card() {
        let mut table = Table::new(3, 4, 81, 2);
        assert!(!table.place_token(0, 3));

        table.place_card(7, 3).unwrap();
        assert!(table.place_token(0, 3));
        assert_eq!(table.tokens(0), &[3]);
    }

    #[test]
    fn test_at_most_three_tokens() {
        let mut table = dealt_table();
        assert!(table.place_token(0, 0));
        assert!(table.place_token(0, 1));
        assert!(table.place_token(0, 2));
        assert!(!table.place_token(0, 3));
        assert_eq!(table.token_count(0), MAX_TOKENS);
    }

    #[test]
    fn test_remove_token_is_idempotent() {
        let mut table = dealt_table();
        table.place_token(1, 4);

        assert!(table.remove_token(1, 4));
        assert!(!table.remove_token(1, 4));
        assert!(!table.remove_token(0, 4));
    }

    #[test]
    fn test_players_may_share_a_slot() {
        let mut table = dealt_table();
        assert!(table.place_token(0, 6));
        assert!(table.place_token(1, 6));
        assert!(table.has_token(0, 6));
        assert!(table.has_token(1, 6));
    }

    #[test]
    fn test_remove_card_drops_tokens_of_every_player() {
        let mut table = dealt_table();
        table.place_token(0, 6);
        table.place_token(0, 7);
        table.place_token(1, 6);

        assert_eq!(table.remove_card(6), Some(16));
        assert_eq!(table.tokens(0), &[7]);
        assert!(table.tokens(1).is_empty());
        assert_eq!(table.slot_of(16), None);
        assert_eq!(table.remove_card(6), None);
    }

    #[test]
    fn test_claimed_cards_needs_exactly_three() {
        let mut table = dealt_table();
        table.place_token(0, 0);
        table.place_token(0, 5);
        assert_eq!(table.claimed_cards(0), None);

        table.place_token(0, 11);
        assert_eq!(table.claimed_cards(0), Some([10, 15, 21]));
    }

    #[test]
    fn test_clear_returns_cards_and_drops_tokens() {
        let mut table = dealt_table();
        table.place_token(0, 2);
        table.place_token(1, 3);

        let removed = table.clear();
        assert_eq!(removed.len(), 12);
        assert_eq!(removed[0], (0, 10));
        assert_eq!(table.count_cards(), 0);
        assert_eq!(table.empty_slots(), (0..12).collect::<Vec<_>>());
        assert!(table.tokens(0).is_empty());
        assert!(table.tokens(1).is_empty());
        assert_eq!(table.slot_of(10), None);
    }

    #[test]
    fn test_clear_tokens_only_touches_one_player() {
        let mut table = dealt_table();
        table.place_token(0, 1);
        table.place_token(0, 2);
        table.place_token(1, 2);

        assert_eq!(table.clear_tokens(0), vec![1, 2]);
        assert!(table.tokens(0).is_empty());
        assert_eq!(table.tokens(1), &[2]);
    }

    #[test]
    fn test_unknown_player_is_a_no_op() {
        let mut table = dealt_table();
        assert!(!table.place_token(9, 0));
        assert!(!table.remove_token(9, 0));
        assert!(table.tokens(9).is_empty());
        assert!(table.clear_tokens(9).is_empty());
    }
}
