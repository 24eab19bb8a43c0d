//! Card, slot and deck primitives.

use rand::{Rng, seq::SliceRandom};

/// Card identifier in `[0, deck_size)`
pub type Card = usize;

/// Grid position in row-major order
pub type Slot = usize;

/// Player identifier, starting from 0
pub type PlayerId = usize;

/// Pool of cards not currently on the table.
///
/// The top of the deck is the end of the vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create an ordered deck holding every card id below `size`
    pub fn new(size: usize) -> Self {
        Self {
            cards: (0..size).collect(),
        }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Take the top card
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Put cards back into the deck
    pub fn put_back(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
