//! Terminal display for a running game.

use set_game::{Card, GameUi, PlayerId, Slot, StandardRules};
use std::{collections::BTreeSet, fmt::Write, sync::Mutex, time::Duration};

#[derive(Debug, Default)]
struct Board {
    cards: Vec<Option<Card>>,
    tokens: Vec<BTreeSet<PlayerId>>,
    /// Cards moved since the grid was last printed
    dirty: bool,
    /// Last whole second of countdown printed
    shown_secs: Option<u64>,
}

/// Prints the table grid, scores and freezes to stdout.
///
/// Cards are shown as their feature digits, followed by the ids of the
/// players holding a token on the slot.
pub struct ConsoleUi {
    columns: usize,
    rules: StandardRules,
    board: Mutex<Board>,
}

impl ConsoleUi {
    pub fn new(rows: usize, columns: usize, rules: StandardRules) -> Self {
        let size = rows * columns;
        Self {
            columns,
            rules,
            board: Mutex::new(Board {
                cards: vec![None; size],
                tokens: vec![BTreeSet::new(); size],
                ..Board::default()
            }),
        }
    }

    fn board(&self) -> std::sync::MutexGuard<'_, Board> {
        self.board
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Render the grid, one table row per line
    pub fn render(&self) -> String {
        let board = self.board();
        self.render_board(&board)
    }

    fn render_board(&self, board: &Board) -> String {
        let mut out = String::new();
        for (slot, card) in board.cards.iter().enumerate() {
            let label = match card {
                Some(card) => self
                    .rules
                    .features_of(*card)
                    .iter()
                    .map(|value| value.to_string())
                    .collect::<String>(),
                None => "-".repeat(self.rules_width()),
            };
            let tokens: String = board.tokens[slot]
                .iter()
                .map(|player| player.to_string())
                .collect();
            let _ = write!(out, "[{slot:>2}] {label} {tokens:<3} ");
            if (slot + 1) % self.columns == 0 {
                out.push('\n');
            }
        }
        out
    }

    fn rules_width(&self) -> usize {
        self.rules.features_of(0).len()
    }
}

impl GameUi for ConsoleUi {
    fn place_card(&self, card: Card, slot: Slot) {
        let mut board = self.board();
        if let Some(entry) = board.cards.get_mut(slot) {
            *entry = Some(card);
            board.dirty = true;
        }
    }

    fn remove_card(&self, slot: Slot) {
        let mut board = self.board();
        if let Some(entry) = board.cards.get_mut(slot) {
            *entry = None;
            board.tokens[slot].clear();
            board.dirty = true;
        }
    }

    fn place_token(&self, player: PlayerId, slot: Slot) {
        if let Some(tokens) = self.board().tokens.get_mut(slot) {
            tokens.insert(player);
        }
    }

    fn remove_token(&self, player: PlayerId, slot: Slot) {
        if let Some(tokens) = self.board().tokens.get_mut(slot) {
            tokens.remove(&player);
        }
    }

    fn set_countdown(&self, remaining: Duration, warning: bool) {
        let mut board = self.board();
        if board.dirty {
            board.dirty = false;
            println!("{}", self.render_board(&board));
        }

        let secs = remaining.as_secs();
        if warning && board.shown_secs != Some(secs) {
            board.shown_secs = Some(secs);
            println!("Reshuffle in {}.{:02}s", secs, remaining.subsec_millis() / 10);
        } else if !warning {
            board.shown_secs = None;
        }
    }

    fn set_score(&self, player: PlayerId, score: u32) {
        println!("Player {player} scores! Total: {score}");
    }

    fn set_freeze(&self, player: PlayerId, remaining: Duration) {
        if !remaining.is_zero() {
            println!("Player {player} frozen for {}s", remaining.as_secs_f32());
        }
    }

    fn announce_winners(&self, winners: &[PlayerId]) {
        match winners {
            [winner] => println!("Player {winner} wins!"),
            _ => println!("It's a tie between players {winners:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_shows_cards_and_tokens() {
        let ui = ConsoleUi::new(1, 2, StandardRules::default());
        ui.place_card(80, 0);
        ui.place_token(1, 0);
        ui.place_token(0, 0);

        let grid = ui.render();
        assert!(grid.contains("2222 01"));
        assert!(grid.contains("----"));
        assert!(grid.ends_with('\n'));
    }

    #[test]
    fn test_removed_card_drops_tokens() {
        let ui = ConsoleUi::new(1, 1, StandardRules::default());
        ui.place_card(4, 0);
        ui.place_token(2, 0);
        ui.remove_card(0);

        assert!(!ui.render().contains('2'));
    }

    #[test]
    fn test_out_of_range_slot_is_ignored() {
        let ui = ConsoleUi::new(1, 1, StandardRules::default());
        ui.place_card(4, 7);
        ui.place_token(0, 7);
        assert_eq!(ui.render().matches("----").count(), 1);
    }
}
