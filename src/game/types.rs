use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::game::{BOARD_SIZE, PIECES_PER_PLAYER};

/////////////////////////////////////////////
// ************* GENERAL *****************//

/// A cell coordinate. Rows are labelled A-E, columns 1-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Parse a label such as `C3` (row letter, column number).
    pub fn parse(label: &str) -> Option<Self> {
        let mut chars = label.trim().chars();
        let row_char = chars.next()?.to_ascii_uppercase();
        let col: usize = chars.as_str().parse().ok()?;
        if !('A'..='E').contains(&row_char) || !(1..=BOARD_SIZE).contains(&col) {
            return None;
        }
        Some(Self::new(row_char as usize - 'A' as usize, col - 1))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_on_board() {
            return write!(f, "({},{})", self.row, self.col);
        }
        write!(f, "{}{}", row_letter(self.row), self.col + 1)
    }
}

/// Letter for a row index, `?` past `Z`.
pub fn row_letter(row: usize) -> char {
    u8::try_from(row)
        .ok()
        .filter(|r| *r < 26)
        .map_or('?', |r| (b'A' + r) as char)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl PieceColor {
    pub const ALL: [PieceColor; 4] = [
        PieceColor::Red,
        PieceColor::Blue,
        PieceColor::Green,
        PieceColor::Yellow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PieceColor::Red => "red",
            PieceColor::Blue => "blue",
            PieceColor::Green => "green",
            PieceColor::Yellow => "yellow",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/////////////////////////////////////////////
// ************* BOARD *********************//

/// A placed piece. Never modified after placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub color: PieceColor,
    pub placed_at: DateTime<Utc>,
    pub round_number: u32,
}

impl Piece {
    pub fn new(owner_id: Uuid, color: PieceColor, round_number: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            color,
            placed_at: Utc::now(),
            round_number,
        }
    }

    pub fn belongs_to(&self, player_id: Uuid, color: PieceColor) -> bool {
        self.owner_id == player_id && self.color == color
    }
}

/// One board cell. `stack` is bottom to top, in placement order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub level: u8,
    pub stack: Vec<Piece>,
}

impl Cell {
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    pub fn top(&self) -> Option<&Piece> {
        self.stack.last()
    }

    pub fn height(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub cells: Vec<Vec<Cell>>,
    pub level_layout: [[u8; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.cells.get(pos.row).and_then(|row| row.get(pos.col))
    }

    pub fn level_at(&self, pos: Position) -> Option<u8> {
        self.cell(pos).map(|c| c.level)
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    /// Number of pieces of `player_id` on the board, optionally restricted to one color.
    pub fn count_pieces(&self, player_id: Uuid, color: Option<PieceColor>) -> u32 {
        self.iter_cells()
            .flat_map(|c| c.stack.iter())
            .filter(|p| p.owner_id == player_id && color.is_none_or(|col| p.color == col))
            .count() as u32
    }
}

/////////////////////////////////////////////
// ************* PLAYER ********************//

/// Score and piece bookkeeping for one color of a dual-color player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorLedger {
    pub color: PieceColor,
    pub score: i32,
    pub pieces_remaining: u32,
}

impl ColorLedger {
    pub fn new(color: PieceColor) -> Self {
        Self {
            color,
            score: 0,
            pieces_remaining: PIECES_PER_PLAYER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PlayerMode {
    SingleColor {
        color: PieceColor,
    },
    DualColor {
        primary: ColorLedger,
        secondary: ColorLedger,
    },
}

/// A seat at the table. `score` and `pieces_remaining` are the totals over
/// both ledgers when the player controls two colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub mode: PlayerMode,
    pub score: i32,
    pub pieces_remaining: u32,
    pub total_pieces: u32,
    pub order: u8,
    pub is_active: bool,
}

impl Player {
    pub fn new(name: String, color: PieceColor, color2: Option<PieceColor>, order: u8) -> Self {
        let (mode, total_pieces) = match color2 {
            Some(second) => (
                PlayerMode::DualColor {
                    primary: ColorLedger::new(color),
                    secondary: ColorLedger::new(second),
                },
                PIECES_PER_PLAYER * 2,
            ),
            None => (PlayerMode::SingleColor { color }, PIECES_PER_PLAYER),
        };
        Self {
            id: Uuid::new_v4(),
            name,
            mode,
            score: 0,
            pieces_remaining: total_pieces,
            total_pieces,
            order,
            is_active: false,
        }
    }
}

/////////////////////////////////////////////
// ************* SCORING *******************//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreReason {
    RowCompletion,
    CompletedRowBonus,
    TallStack,
    TopplePenalty,
    ToppleBonus,
    LastPlacementPenalty,
}

/// A single point change. `color` is the ledger the points were booked to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub id: Uuid,
    pub player_id: Uuid,
    pub points: i32,
    pub reason: ScoreReason,
    pub color: PieceColor,
    pub round_number: u32,
    pub details: String,
}

impl ScoreEvent {
    pub fn new(
        player_id: Uuid,
        points: i32,
        reason: ScoreReason,
        color: PieceColor,
        round_number: u32,
        details: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_id,
            points,
            reason,
            color,
            round_number,
            details: details.into(),
        }
    }
}

/////////////////////////////////////////////
// ************* GAME **********************//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Setup,
    Playing,
    RoundEnd,
    GameEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    GameStart,
    TurnOrder,
    DiceRoll,
    Placement,
    Score,
    Penalty,
    Topple,
    ToppleBonus,
    RoundEnd,
    RoundStart,
    GameEnd,
}

/// Audit trail entry. `seq` and `timestamp` both increase strictly along the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub seq: u64,
    pub kind: LogKind,
    pub message: String,
    pub player_id: Option<Uuid>,
    pub player_name: Option<String>,
    pub points: Option<i32>,
    pub position: Option<Position>,
    pub timestamp: DateTime<Utc>,
    pub round_number: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_labels() {
        assert_eq!(Position::new(2, 2).to_string(), "C3");
        assert_eq!(Position::parse("e5"), Some(Position::new(4, 4)));
        assert_eq!(Position::parse("F1"), None);
        assert_eq!(Position::new(191, 0).to_string(), "(191,0)");
        assert_eq!(Position::new(usize::MAX, 3).to_string(), format!("({},3)", usize::MAX));
    }

    #[test]
    fn test_row_letter_is_total() {
        assert_eq!(row_letter(0), 'A');
        assert_eq!(row_letter(25), 'Z');
        assert_eq!(row_letter(26), '?');
        assert_eq!(row_letter(300), '?');
    }
}
