//! Wiring a dealer, its players and the shared table into a running game.

use crate::{
    cards::{PlayerId, Slot},
    config::GameConfig,
    dealer::{Dealer, GameOutcome, actor::DealerParts, claim_channel},
    errors::{GameError, GameResult},
    player::{ChannelInput, InputSource, PlayerActor, PlayerHandle, PlayerTimings, RandomInput},
    rules::{SetValidator, StandardRules},
    table::{SharedTable, Table},
    ui::{GameUi, LogUi},
};
use rand::{SeedableRng, rngs::StdRng};
use std::sync::Arc;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

/// A game being set up: configuration, rules, display and seated players
pub struct Game {
    config: GameConfig,
    rules: Arc<dyn SetValidator>,
    ui: Arc<dyn GameUi>,
    inputs: Vec<Box<dyn InputSource>>,
}

impl Game {
    /// Create a game with standard rules and a logging display
    pub fn new(config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        let rules = StandardRules::new(config.features, config.feature_size);
        Ok(Self {
            config,
            rules: Arc::new(rules),
            ui: Arc::new(LogUi),
            inputs: Vec::new(),
        })
    }

    pub fn with_rules(mut self, rules: Arc<dyn SetValidator>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_ui(mut self, ui: Arc<dyn GameUi>) -> Self {
        self.ui = ui;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seat a player fed by `input`, returning its id
    pub fn add_player(&mut self, input: impl InputSource + 'static) -> PlayerId {
        self.inputs.push(Box::new(input));
        self.inputs.len() - 1
    }

    /// Seat the configured human and computer players.
    ///
    /// Humans come first; the returned senders feed their presses, in seat order.
    pub fn add_configured_players(&mut self) -> Vec<mpsc::UnboundedSender<Slot>> {
        let mut keyboards = Vec::with_capacity(self.config.human_players);
        for _ in 0..self.config.human_players {
            let (input, keyboard) = ChannelInput::new();
            self.add_player(input);
            keyboards.push(keyboard);
        }

        for _ in 0..self.config.computer_players {
            let seat = self.inputs.len() as u64;
            let input = RandomInput::new(
                self.config.table_size(),
                self.config.computer_press_interval(),
                self.config.seed.map(|seed| seed.wrapping_add(seat + 1)),
            );
            self.add_player(input);
        }

        keyboards
    }

    /// Spawn the dealer and every player on the current tokio runtime
    pub fn start(self) -> GameResult<GameHandle> {
        if self.inputs.is_empty() {
            return Err(GameError::NoPlayers);
        }

        let config = self.config;
        let table = Arc::new(SharedTable::new(Table::new(
            config.rows,
            config.columns,
            config.deck_size,
            self.inputs.len(),
        )));
        let cancel = CancellationToken::new();
        let (claim_sender, claims) = claim_channel();
        let timings = PlayerTimings::from(&config);

        let mut players = Vec::with_capacity(self.inputs.len());
        let mut player_tasks = Vec::with_capacity(self.inputs.len());
        for (id, input) in self.inputs.into_iter().enumerate() {
            let (handle, presses) = PlayerHandle::new(id, table.clone(), self.ui.clone());
            let actor = PlayerActor::new(
                handle.clone(),
                presses,
                claim_sender.clone(),
                timings,
                cancel.clone(),
            );
            player_tasks.push(tokio::spawn(actor.run(input)));
            players.push(handle);
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let dealer = Dealer::new(
            &config,
            DealerParts {
                table: table.clone(),
                players: players.clone(),
                player_tasks,
                claims,
                rules: self.rules,
                ui: self.ui,
                rng,
                cancel: cancel.clone(),
            },
        );
        let dealer = tokio::spawn(dealer.run());

        log::info!(
            "Game started: {}x{} table, {} cards, {} players",
            config.rows,
            config.columns,
            config.deck_size,
            players.len()
        );

        Ok(GameHandle {
            players,
            table,
            cancel,
            dealer,
        })
    }
}

/// A running game
pub struct GameHandle {
    players: Vec<PlayerHandle>,
    table: Arc<SharedTable>,
    cancel: CancellationToken,
    dealer: JoinHandle<GameOutcome>,
}

impl GameHandle {
    pub fn players(&self) -> &[PlayerHandle] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerHandle> {
        self.players.get(id)
    }

    pub fn table(&self) -> &Arc<SharedTable> {
        &self.table
    }

    /// Ask every actor to stop; the dealer still announces winners
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Token that shuts the game down when cancelled, for signal handlers
    pub fn shutdown_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.dealer.is_finished()
    }

    /// Wait for the dealer to announce the winners
    pub async fn wait(self) -> GameResult<GameOutcome> {
        Ok(self.dealer.await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ManualInput;

    #[tokio::test]
    async fn test_start_without_players() {
        let game = Game::new(GameConfig::default()).unwrap();
        assert_eq!(game.start().err(), Some(GameError::NoPlayers));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            deck_size: 2,
            ..GameConfig::default()
        };
        assert!(Game::new(config).is_err());
    }

    #[test]
    fn test_configured_players_are_seated_humans_first() {
        let config = GameConfig {
            human_players: 2,
            computer_players: 3,
            ..GameConfig::default()
        };
        let mut game = Game::new(config).unwrap();
        let keyboards = game.add_configured_players();
        assert_eq!(keyboards.len(), 2);
        assert_eq!(game.add_player(ManualInput), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_announces_winners() {
        let mut game = Game::new(GameConfig::default()).unwrap();
        game.add_player(ManualInput);
        game.add_player(ManualInput);
        let handle = game.start().unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(handle.table().lock().count_cards(), 12);

        handle.shutdown();
        let outcome = handle.wait().await.unwrap();
        assert_eq!(outcome.winners, vec![0, 1]);
        assert_eq!(outcome.scores, vec![0, 0]);
    }
}
