//! Bounded undo/redo history of serialized snapshots.

use std::collections::VecDeque;

use crate::config::storage::HISTORY_LIMIT;
use crate::game::state::Game;
use crate::store::StoreError;

/// Drivers call [`History::record`] with the snapshot a transition started
/// from, then hand the result of `undo`/`redo` back to the engine as a load.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<String>,
    future: Vec<String>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Remember `previous` as an undo point. Clears the redo stack.
    pub fn record(&mut self, previous: &Game) -> Result<(), StoreError> {
        self.past.push_back(serde_json::to_string(previous)?);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
        self.future.clear();
        Ok(())
    }

    /// Step back from `current`. `None` when there is nothing to undo.
    pub fn undo(&mut self, current: &Game) -> Result<Option<Game>, StoreError> {
        let Some(raw) = self.past.pop_back() else {
            return Ok(None);
        };
        let game = serde_json::from_str(&raw)?;
        self.future.push(serde_json::to_string(current)?);
        Ok(Some(game))
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: &Game) -> Result<Option<Game>, StoreError> {
        let Some(raw) = self.future.pop() else {
            return Ok(None);
        };
        let game = serde_json::from_str(&raw)?;
        self.past.push_back(serde_json::to_string(current)?);
        Ok(Some(game))
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::setup::{SetupConfig, build_game};
    use crate::game::types::PieceColor;

    fn game_with_round(round: u32) -> Game {
        let config = SetupConfig::default()
            .with_player("Ana", PieceColor::Red, None)
            .with_player("Bo", PieceColor::Blue, None);
        let mut game = build_game(&config).expect("valid setup");
        game.round_number = round;
        game
    }

    #[test]
    fn test_undo_redo() {
        let mut history = History::new(10);
        let first = game_with_round(1);
        let second = game_with_round(2);
        history.record(&first).expect("record");

        let undone = history.undo(&second).expect("undo").expect("undo point");
        assert_eq!(undone.round_number, 1);
        assert!(history.can_redo());

        let redone = history.redo(&undone).expect("redo").expect("redo point");
        assert_eq!(redone.round_number, 2);
        assert!(history.can_undo());
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new(10);
        history.record(&game_with_round(1)).expect("record");
        history.undo(&game_with_round(2)).expect("undo");
        history.record(&game_with_round(3)).expect("record");
        assert!(!history.can_redo());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::new(2);
        for round in 1..=3 {
            history.record(&game_with_round(round)).expect("record");
        }
        let current = game_with_round(4);
        let a = history.undo(&current).expect("undo").expect("undo point");
        let b = history.undo(&a).expect("undo").expect("undo point");
        assert_eq!((a.round_number, b.round_number), (3, 2));
        assert!(history.undo(&b).expect("undo").is_none());
    }
}
