use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::grid::{create_empty_board, get_valid_cells};
use crate::game::systems::round::determine_winner;
use crate::game::types::{
    Board, GameStatus, LogEntry, LogKind, Player, Position, ScoreEvent,
};

/// The whole game at one point in time.
///
/// Every engine transition clones the previous snapshot and returns the
/// modified copy, so a published `Game` is never edited again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub status: GameStatus,
    pub players: Vec<Player>,
    pub current_player_index: usize,
    pub round_number: u32,
    pub victory_points: i32,
    pub board: Board,
    pub dice_roll: Option<u8>,
    pub topple_occurred: bool,
    pub topple_player_id: Option<Uuid>,
    pub dice_rolled_in_round: bool,
    /// Players tied on the last turn-order roll. They alone roll again.
    #[serde(default)]
    pub order_tie: Vec<Uuid>,
    #[serde(default)]
    pub log: Vec<LogEntry>,
    #[serde(default)]
    pub score_events: Vec<ScoreEvent>,
    #[serde(default)]
    pub log_seq: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    /// Fresh snapshot for round 1. Nobody is active until the turn order is rolled.
    pub fn new(players: Vec<Player>, victory_points: i32) -> Self {
        let now = Utc::now();
        Game {
            id: Uuid::new_v4(),
            status: GameStatus::Playing,
            players,
            current_player_index: 0,
            round_number: 1,
            victory_points,
            board: create_empty_board(),
            dice_roll: None,
            topple_occurred: false,
            topple_player_id: None,
            dice_rolled_in_round: false,
            order_tie: Vec::new(),
            log: Vec::new(),
            score_events: Vec::new(),
            log_seq: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    pub fn player(&self, id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_index(&self, id: Uuid) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Cells the current roll allows, empty when no roll is pending.
    pub fn valid_cells(&self) -> Vec<Position> {
        self.dice_roll
            .map(|die| get_valid_cells(die, &self.board))
            .unwrap_or_default()
    }

    pub fn winner(&self) -> Option<&Player> {
        determine_winner(self)
    }

    pub fn pieces_exhausted(&self) -> bool {
        self.players.iter().all(|p| p.pieces_remaining == 0)
    }

    /// Mark exactly one player active.
    pub(crate) fn activate(&mut self, index: usize) {
        self.current_player_index = index;
        for (i, player) in self.players.iter_mut().enumerate() {
            player.is_active = i == index;
        }
    }

    pub(crate) fn deactivate_all(&mut self) {
        for player in self.players.iter_mut() {
            player.is_active = false;
        }
    }

    /// Apply the event's points to its player and keep the event.
    pub(crate) fn book_score(&mut self, event: ScoreEvent) {
        if let Some(player) = self.players.iter_mut().find(|p| p.id == event.player_id) {
            player.add_points(event.color, event.points);
        }
        self.score_events.push(event);
    }

    /// Clock value for the next log entry: at least 1ms after the previous one.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        match self.log.last() {
            Some(last) if now < last.timestamp + Duration::milliseconds(1) => {
                last.timestamp + Duration::milliseconds(1)
            }
            _ => now,
        }
    }

    pub(crate) fn push_log(&mut self, draft: LogDraft) {
        let timestamp = self.next_timestamp();
        self.log_seq += 1;
        self.log.push(LogEntry {
            id: Uuid::new_v4(),
            seq: self.log_seq,
            kind: draft.kind,
            message: draft.message,
            player_id: draft.player_id,
            player_name: draft.player_name,
            points: draft.points,
            position: draft.position,
            timestamp,
            round_number: self.round_number,
        });
    }
}

/// Log entry under construction, stamped by [`Game::push_log`].
#[derive(Debug, Clone)]
pub(crate) struct LogDraft {
    kind: LogKind,
    message: String,
    player_id: Option<Uuid>,
    player_name: Option<String>,
    points: Option<i32>,
    position: Option<Position>,
}

impl LogDraft {
    pub(crate) fn new(kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            player_id: None,
            player_name: None,
            points: None,
            position: None,
        }
    }

    pub(crate) fn player(mut self, player: &Player) -> Self {
        self.player_id = Some(player.id);
        self.player_name = Some(player.name.clone());
        self
    }

    pub(crate) fn points(mut self, points: i32) -> Self {
        self.points = Some(points);
        self
    }

    pub(crate) fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}
