//! Reading human key presses from stdin.
//!
//! Each line is one press: either a slot (`7`), pressed by the first human
//! player, or `player:slot` (`1:7`).

use set_game::{PlayerId, Slot};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc::UnboundedSender,
};

/// Parse one input line into the pressing player and slot
pub fn parse_press(line: &str, humans: usize, table_size: usize) -> Option<(PlayerId, Slot)> {
    let line = line.trim();
    let (player, slot) = match line.split_once(':') {
        Some((player, slot)) => (player.trim().parse().ok()?, slot.trim().parse().ok()?),
        None => (0, line.parse().ok()?),
    };
    (player < humans && slot < table_size).then_some((player, slot))
}

/// Forward stdin presses to the human players until stdin closes
pub async fn read_presses(keyboards: Vec<UnboundedSender<Slot>>, table_size: usize) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log::error!("Failed to read stdin: {}", e);
                break;
            }
        };

        let Some((player, slot)) = parse_press(&line, keyboards.len(), table_size) else {
            if !line.trim().is_empty() {
                println!("Unrecognized press {:?}, expected SLOT or PLAYER:SLOT", line.trim());
            }
            continue;
        };
        if keyboards[player].send(slot).is_err() {
            log::debug!("Player {} no longer takes input", player);
        }
    }
    log::debug!("Keyboard input closed");
}
