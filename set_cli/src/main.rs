//! Console runner for the Set card game.
//!
//! Seats human players on stdin and computer players on random input, prints
//! the table as the dealer changes it, and announces the winners when no set
//! remains or on Ctrl+C.

mod config;
mod console;
mod keyboard;
mod logging;

use std::{path::PathBuf, sync::Arc};

use anyhow::Error;
use config::{CliConfig, CliOverrides};
use console::ConsoleUi;
use log::info;
use pico_args::Arguments;
use set_game::{Game, StandardRules};

const HELP: &str = "\
Play the Set card game in the terminal

USAGE:
  set_cli [OPTIONS]

OPTIONS:
  --config     PATH        JSON game configuration      [default: env SET_CONFIG or built-in defaults]
  --humans     N           Human players on stdin       [default: env SET_HUMANS or 0]
  --computers  N           Computer players             [default: env SET_COMPUTERS or 2]
  --timeout-ms MS          Reshuffle countdown          [default: env SET_TIMEOUT_MS or 60000]
  --seed       N           Seed for shuffles and bots   [default: env SET_SEED or random]

FLAGS:
  --json                   Print the final outcome as JSON
  -h, --help               Print help information

INPUT:
  One press per line: SLOT for the first human, or PLAYER:SLOT.

ENVIRONMENT:
  SET_ROWS, SET_COLUMNS, SET_DECK_SIZE, SET_FEATURES, SET_FEATURE_SIZE,
  SET_WARNING_MS, SET_POINT_FREEZE_MS, SET_PENALTY_FREEZE_MS, SET_COMPUTER_INTERVAL_MS
  (A .env file in the working directory is loaded first)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let json = pargs.contains("--json");
    let overrides = CliOverrides {
        config_path: pargs.opt_value_from_os_str("--config", |s| {
            Ok::<_, std::convert::Infallible>(PathBuf::from(s))
        })?,
        humans: pargs.opt_value_from_str("--humans")?,
        computers: pargs.opt_value_from_str("--computers")?,
        timeout_ms: pargs.opt_value_from_str("--timeout-ms")?,
        seed: pargs.opt_value_from_str("--seed")?,
    };

    logging::init();

    let config = CliConfig::from_env(overrides)?.game;
    let rules = StandardRules::new(config.features, config.feature_size);
    let ui = Arc::new(ConsoleUi::new(config.rows, config.columns, rules));

    let mut game = Game::new(config.clone())?
        .with_rules(Arc::new(rules))
        .with_ui(ui);
    let keyboards = game.add_configured_players();
    let handle = game.start()?;

    info!(
        "Playing with {} human and {} computer player(s). Press Ctrl+C to stop.",
        config.human_players, config.computer_players
    );

    if !keyboards.is_empty() {
        tokio::spawn(keyboard::read_presses(keyboards, config.table_size()));
    }

    // Catching signals for exit.
    let shutdown = handle.shutdown_token();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutting down game...");
                shutdown.cancel();
            }
            Err(e) => log::error!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    let outcome = handle.wait().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("Final scores: {:?}", outcome.scores);
    }

    // Stdin reads block a runtime thread; don't wait for them on the way out.
    std::process::exit(0);
}
