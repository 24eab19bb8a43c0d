//! Shared fixtures for the game integration tests.

#![allow(dead_code)]

use set_game::{Card, GameConfig, GameUi, PlayerId, SetValidator, Slot, Table};
use std::{sync::Mutex, time::Duration};

/// One display callback as seen by [`RecordingUi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    PlaceCard(Card, Slot),
    RemoveCard(Slot),
    PlaceToken(PlayerId, Slot),
    RemoveToken(PlayerId, Slot),
    Countdown(Duration, bool),
    Score(PlayerId, u32),
    Freeze(PlayerId, Duration),
    Winners(Vec<PlayerId>),
}

/// Display sink recording every callback in arrival order
#[derive(Debug, Default)]
pub struct RecordingUi {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingUi {
    fn push(&self, event: UiEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&UiEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| matches(e)).count()
    }

    pub fn freezes_of(&self, player: PlayerId) -> Vec<Duration> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                UiEvent::Freeze(p, remaining) if *p == player => Some(*remaining),
                _ => None,
            })
            .collect()
    }
}

impl GameUi for RecordingUi {
    fn place_card(&self, card: Card, slot: Slot) {
        self.push(UiEvent::PlaceCard(card, slot));
    }

    fn remove_card(&self, slot: Slot) {
        self.push(UiEvent::RemoveCard(slot));
    }

    fn place_token(&self, player: PlayerId, slot: Slot) {
        self.push(UiEvent::PlaceToken(player, slot));
    }

    fn remove_token(&self, player: PlayerId, slot: Slot) {
        self.push(UiEvent::RemoveToken(player, slot));
    }

    fn set_countdown(&self, remaining: Duration, warning: bool) {
        self.push(UiEvent::Countdown(remaining, warning));
    }

    fn set_score(&self, player: PlayerId, score: u32) {
        self.push(UiEvent::Score(player, score));
    }

    fn set_freeze(&self, player: PlayerId, remaining: Duration) {
        self.push(UiEvent::Freeze(player, remaining));
    }

    fn announce_winners(&self, winners: &[PlayerId]) {
        self.push(UiEvent::Winners(winners.to_vec()));
    }
}

/// Validator accepting exactly the listed triples, in any order
#[derive(Debug, Clone, Default)]
pub struct ListedSets {
    sets: Vec<[Card; 3]>,
}

impl ListedSets {
    pub fn new(sets: &[[Card; 3]]) -> Self {
        let sets = sets
            .iter()
            .map(|set| {
                let mut set = *set;
                set.sort_unstable();
                set
            })
            .collect();
        Self { sets }
    }
}

impl SetValidator for ListedSets {
    fn is_set(&self, cards: &[Card; 3]) -> bool {
        let mut cards = *cards;
        cards.sort_unstable();
        self.sets.contains(&cards)
    }
}

/// Standard 3x4 table with a small deck and no configured players
pub fn config(deck_size: usize) -> GameConfig {
    GameConfig {
        deck_size,
        human_players: 0,
        computer_players: 0,
        seed: Some(42),
        ..GameConfig::default()
    }
}

/// Slots currently holding `cards`, panicking if one is not on the table
pub fn slots_of(table: &Table, cards: &[Card]) -> Vec<Slot> {
    cards
        .iter()
        .map(|&card| {
            table
                .slot_of(card)
                .unwrap_or_else(|| panic!("card {card} is not on the table"))
        })
        .collect()
}
