//! Dealer actor: deals, runs the countdown, and resolves claims.

use super::{
    countdown::Countdown,
    messages::{Claim, ClaimQueue, Verdict},
    outcome::GameOutcome,
};
use crate::{
    cards::{Card, Deck, Slot},
    config::GameConfig,
    player::PlayerHandle,
    rules::SetValidator,
    table::{BlockGuard, SharedTable},
    ui::GameUi,
};
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Everything the dealer is wired to
pub(crate) struct DealerParts {
    pub table: Arc<SharedTable>,
    pub players: Vec<PlayerHandle>,
    pub player_tasks: Vec<JoinHandle<()>>,
    pub claims: ClaimQueue,
    pub rules: Arc<dyn SetValidator>,
    pub ui: Arc<dyn GameUi>,
    pub rng: StdRng,
    pub cancel: CancellationToken,
}

/// The single task allowed to touch the deck and the cards on the table
pub struct Dealer {
    table: Arc<SharedTable>,
    players: Vec<PlayerHandle>,
    player_tasks: Vec<JoinHandle<()>>,
    deck: Deck,
    claims: ClaimQueue,
    rules: Arc<dyn SetValidator>,
    ui: Arc<dyn GameUi>,
    rng: StdRng,
    countdown: Countdown,
    cancel: CancellationToken,
    /// No set left among deck and table
    finished: bool,
    /// Cards moved since the last check for remaining sets
    cards_changed: bool,
}

impl Dealer {
    pub(crate) fn new(config: &GameConfig, parts: DealerParts) -> Self {
        Self {
            table: parts.table,
            players: parts.players,
            player_tasks: parts.player_tasks,
            deck: Deck::new(config.deck_size),
            claims: parts.claims,
            rules: parts.rules,
            ui: parts.ui,
            rng: parts.rng,
            countdown: Countdown::start(config.turn_timeout(), config.turn_timeout_warning()),
            cancel: parts.cancel,
            finished: false,
            cards_changed: true,
        }
    }

    /// Run rounds until shutdown or until no set remains, then announce winners
    pub async fn run(mut self) -> GameOutcome {
        log::info!("Dealer starting with {} players", self.players.len());

        while !self.should_finish() {
            self.place_cards_on_table();
            self.timer_loop().await;
            self.update_timer_display(true);
            self.remove_all_cards_from_table();
        }

        self.terminate();
        self.join_players().await;
        let outcome = self.announce_winners();
        log::info!("Dealer terminated");
        outcome
    }

    /// Stop the game and every player
    fn terminate(&mut self) {
        self.finished = true;
        self.cancel.cancel();
    }

    fn is_terminated(&self) -> bool {
        self.finished || self.cancel.is_cancelled()
    }

    fn should_finish(&mut self) -> bool {
        if !self.is_terminated() && !self.any_set_remains() {
            self.terminate();
        }
        self.is_terminated()
    }

    /// Cards not yet won: the deck plus whatever lies on the table
    fn remaining_cards(&self) -> Vec<Card> {
        let mut cards = self.table.lock().cards();
        cards.extend_from_slice(self.deck.cards());
        cards
    }

    fn any_set_remains(&mut self) -> bool {
        if !self.cards_changed {
            return true;
        }
        self.cards_changed = false;

        let cards = self.remaining_cards();
        let found = self.rules.has_any_set(&cards);
        if !found {
            log::info!("No set left among {} remaining cards", cards.len());
        }
        found
    }

    /// Countdown phase: poll claims and top up slots until the deadline
    async fn timer_loop(&mut self) {
        self.update_timer_display(true);

        while !self.is_terminated() && !self.countdown.is_expired() {
            self.sleep_until_woken_or_timeout().await;
            self.update_timer_display(false);
            self.remove_claimed_cards();
            self.place_cards_on_table();
        }
    }

    /// Sleep one poll interval, waking early on a claim or shutdown
    async fn sleep_until_woken_or_timeout(&self) {
        let interval = self.countdown.poll_interval();
        tokio::select! {
            _ = self.cancel.cancelled() => {}
            woken = self.claims.wait(interval) => {
                if woken {
                    log::trace!("Dealer woken by a claim");
                }
            }
        }
    }

    fn update_timer_display(&mut self, reset: bool) {
        if reset {
            self.countdown.reset();
        }
        let warning = !reset && self.countdown.is_warning();
        self.ui.set_countdown(self.countdown.remaining(), warning);
    }

    /// Deal onto every empty slot, then end the game if no set remains
    fn place_cards_on_table(&mut self) {
        if self.is_terminated() {
            return;
        }

        let needs_cards = !self.table.lock().is_full();
        if needs_cards && !self.deck.is_empty() {
            let shared = Arc::clone(&self.table);
            let mut table = shared.block();
            self.deck.shuffle(&mut self.rng);

            let mut dealt = 0;
            for slot in table.empty_slots() {
                let Some(card) = self.deck.draw() else {
                    break;
                };
                if self.deal(&mut table, card, slot) {
                    dealt += 1;
                }
            }
            if dealt > 0 {
                self.cards_changed = true;
                log::debug!("Dealt {} cards, {} left in deck", dealt, self.deck.len());
            }
        }

        if !self.any_set_remains() {
            self.terminate();
        }
    }

    /// Put one card on a slot, returning it to the deck on failure
    fn deal(&mut self, table: &mut BlockGuard<'_>, card: Card, slot: Slot) -> bool {
        match table.place_card(card, slot) {
            Ok(()) => {
                self.ui.place_card(card, slot);
                true
            }
            Err(e) => {
                log::error!("Failed to deal card {} to slot {}: {}", card, slot, e);
                self.deck.put_back([card]);
                false
            }
        }
    }

    /// Drain every pending claim in submission order
    fn remove_claimed_cards(&mut self) {
        while let Some(claim) = self.claims.try_next() {
            self.resolve_claim(claim);
        }
    }

    fn resolve_claim(&mut self, claim: Claim) {
        let player = claim.player;
        let shared = Arc::clone(&self.table);
        let mut table = shared.block();

        let Some(cards) = table.claimed_cards(player) else {
            drop(table);
            log::debug!("Skipping claim of player {}: tokens changed", player);
            claim.resolve(Verdict::Void);
            return;
        };

        if self.rules.is_set(&cards) {
            for card in cards {
                let Some(slot) = table.slot_of(card) else {
                    continue;
                };
                table.remove_card(slot);
                self.ui.remove_card(slot);
                if let Some(next) = self.deck.draw() {
                    self.deal(&mut table, next, slot);
                }
            }
            drop(table);
            self.cards_changed = true;

            // Credited here so a shutdown racing the verdict cannot lose it
            if let Some(handle) = self.players.get(player) {
                let score = handle.award_point();
                self.ui.set_score(player, score);
            }
            log::info!("Player {} found a set: {:?}", player, cards);
            claim.resolve(Verdict::Point);
            self.update_timer_display(true);
        } else {
            for slot in table.clear_tokens(player) {
                self.ui.remove_token(player, slot);
            }
            drop(table);

            log::debug!("Player {} claimed {:?}, not a set", player, cards);
            claim.resolve(Verdict::Penalty);
        }
    }

    /// Reshuffle: every card back to the deck, every token cleared
    fn remove_all_cards_from_table(&mut self) {
        {
            let mut table = self.table.block();
            let removed = table.clear();
            for &(slot, _) in &removed {
                self.ui.remove_card(slot);
            }
            self.deck.put_back(removed.into_iter().map(|(_, card)| card));
            let round = table.start_new_round();
            log::debug!(
                "Table cleared for round {}, {} cards in deck",
                round,
                self.deck.len()
            );
        }
        self.cards_changed = true;

        // Claims queued before the clear refer to tokens that are gone
        self.remove_claimed_cards();
    }

    async fn join_players(&mut self) {
        for task in self.player_tasks.drain(..) {
            if let Err(e) = task.await {
                log::error!("Player task failed: {}", e);
            }
        }
    }

    /// Every player with the maximum score wins
    fn announce_winners(&self) -> GameOutcome {
        let scores = self.players.iter().map(PlayerHandle::score).collect();
        let outcome = GameOutcome::from_scores(scores);
        log::info!(
            "Game over: winners {:?} with {} points",
            outcome.winners,
            outcome.max_score
        );
        self.ui.announce_winners(&outcome.winners);
        outcome
    }
}
