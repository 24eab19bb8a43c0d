//! Hinted Game Example
//!
//! Runs a short game between two random computer players and one "hinted"
//! player that looks up a set on the table and presses its slots.

use set_game::{Game, GameConfig, ManualInput, SetValidator, StandardRules};
use std::{sync::Arc, time::Duration};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== Set Hinted Game Example ===\n");

    let config = GameConfig {
        deck_size: 27,
        computer_players: 2,
        turn_timeout_ms: 10_000,
        turn_timeout_warning_ms: 3_000,
        seed: Some(2024),
        ..GameConfig::default()
    };
    let rules = StandardRules::new(config.features, config.feature_size);

    let mut game = Game::new(config)?.with_rules(Arc::new(rules));
    let hinted = game.add_player(ManualInput);
    game.add_configured_players();
    let handle = game.start()?;

    while !handle.is_finished() {
        tokio::time::sleep(Duration::from_secs(2)).await;

        let slots = {
            let table = handle.table().lock();
            rules
                .find_sets(&table.cards(), 1)
                .first()
                .map(|&set| set.map(|card| table.slot_of(card)))
        };
        let Some([Some(a), Some(b), Some(c)]) = slots else {
            continue;
        };

        let Some(player) = handle.player(hinted) else {
            break;
        };
        println!("Hint: pressing slots {a}, {b}, {c}");
        for slot in [a, b, c] {
            player.key_pressed(slot);
        }
    }

    let outcome = handle.wait().await?;
    println!("\nScores: {:?}", outcome.scores);
    println!("Winners: {:?}", outcome.winners);
    Ok(())
}
