//! Board construction, piece placement and line geometry.

use crate::config::game::{BOARD_SIZE, LEVEL_LAYOUT};
use crate::game::types::{Board, Cell, Piece, Position, row_letter};

/// An empty board with the fixed level layout.
pub fn create_empty_board() -> Board {
    let cells = (0..BOARD_SIZE)
        .map(|row| {
            (0..BOARD_SIZE)
                .map(|col| Cell {
                    row,
                    col,
                    level: LEVEL_LAYOUT[row][col],
                    stack: Vec::new(),
                })
                .collect()
        })
        .collect();

    Board {
        cells,
        level_layout: LEVEL_LAYOUT,
    }
}

/// Return a copy of `board` with `piece` on top of the stack at `position`.
/// Legality is checked by the caller. An off-board position returns an unchanged copy.
pub fn place_piece(board: &Board, position: Position, piece: Piece) -> Board {
    let mut next = board.clone();
    if let Some(cell) = next
        .cells
        .get_mut(position.row)
        .and_then(|row| row.get_mut(position.col))
    {
        cell.stack.push(piece);
    }
    next
}

/// One of the twelve scoring lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Row(usize),
    Column(usize),
    /// Top-left to bottom-right.
    MainDiagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Line {
    pub fn all() -> Vec<Line> {
        let mut lines: Vec<Line> = (0..BOARD_SIZE).map(Line::Row).collect();
        lines.extend((0..BOARD_SIZE).map(Line::Column));
        lines.push(Line::MainDiagonal);
        lines.push(Line::AntiDiagonal);
        lines
    }

    pub fn positions(&self) -> Vec<Position> {
        (0..BOARD_SIZE)
            .map(|i| match self {
                Line::Row(r) => Position::new(*r, i),
                Line::Column(c) => Position::new(i, *c),
                Line::MainDiagonal => Position::new(i, i),
                Line::AntiDiagonal => Position::new(i, BOARD_SIZE - 1 - i),
            })
            .collect()
    }

    pub fn contains(&self, pos: Position) -> bool {
        match self {
            Line::Row(r) => pos.row == *r && pos.col < BOARD_SIZE,
            Line::Column(c) => pos.col == *c && pos.row < BOARD_SIZE,
            Line::MainDiagonal => pos.row == pos.col && pos.row < BOARD_SIZE,
            Line::AntiDiagonal => pos.row < BOARD_SIZE && pos.row + pos.col == BOARD_SIZE - 1,
        }
    }

    /// Every cell of the line holds at least one piece.
    pub fn is_complete(&self, board: &Board) -> bool {
        self.positions()
            .into_iter()
            .all(|pos| board.cell(pos).is_some_and(|c| !c.is_empty()))
    }

    pub fn label(&self) -> String {
        match self {
            Line::Row(r) => format!("row {}", row_letter(*r)),
            Line::Column(c) => format!("column {}", c + 1),
            Line::MainDiagonal => "diagonal A1-E5".to_string(),
            Line::AntiDiagonal => "diagonal A5-E1".to_string(),
        }
    }
}

pub fn complete_lines(board: &Board) -> Vec<Line> {
    Line::all()
        .into_iter()
        .filter(|line| line.is_complete(board))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::PieceColor;
    use uuid::Uuid;

    #[test]
    fn test_empty_board_layout() {
        for _ in 0..3 {
            let board = create_empty_board();
            assert_eq!(board.cells.len(), BOARD_SIZE);
            assert_eq!(board.iter_cells().count(), 25);
            assert!(board.iter_cells().all(|c| c.is_empty()));
            assert!(board.iter_cells().all(|c| c.level == LEVEL_LAYOUT[c.row][c.col]));
        }
        let board = create_empty_board();
        assert_eq!(board.level_at(Position::new(2, 2)), Some(1));
        assert_eq!(board.level_at(Position::new(0, 0)), Some(5));
        assert_eq!(board.level_at(Position::new(4, 3)), Some(4));
    }

    #[test]
    fn test_place_piece_leaves_original_untouched() {
        let board = create_empty_board();
        let owner = Uuid::new_v4();
        let first = place_piece(&board, Position::new(1, 1), Piece::new(owner, PieceColor::Red, 1));
        let second = place_piece(&first, Position::new(1, 1), Piece::new(owner, PieceColor::Blue, 1));

        assert!(board.iter_cells().all(|c| c.is_empty()));
        assert_eq!(first.cell(Position::new(1, 1)).map(|c| c.height()), Some(1));
        let cell = second.cell(Position::new(1, 1)).expect("cell on board");
        assert_eq!(cell.height(), 2);
        assert_eq!(cell.top().map(|p| p.color), Some(PieceColor::Blue));
    }

    #[test]
    fn test_twelve_lines() {
        let lines = Line::all();
        assert_eq!(lines.len(), 12);
        for line in &lines {
            let positions = line.positions();
            assert_eq!(positions.len(), BOARD_SIZE);
            assert!(positions.iter().all(|p| line.contains(*p)));
        }
        assert!(Line::AntiDiagonal.contains(Position::new(0, 4)));
        assert!(!Line::AntiDiagonal.contains(Position::new(0, 0)));
    }

    #[test]
    fn test_line_completion_ignores_color() {
        let mut board = create_empty_board();
        let colors = [
            PieceColor::Red,
            PieceColor::Blue,
            PieceColor::Green,
            PieceColor::Yellow,
            PieceColor::Red,
        ];
        for (col, color) in colors.into_iter().enumerate() {
            board = place_piece(&board, Position::new(3, col), Piece::new(Uuid::new_v4(), color, 1));
        }
        assert_eq!(complete_lines(&board), vec![Line::Row(3)]);
        assert_eq!(Line::Row(3).label(), "row D");
        assert_eq!(Line::Column(0).label(), "column 1");
    }
}
