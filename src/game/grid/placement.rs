//! Which cells a die value allows.

use crate::config::game::BOARD_SIZE;
use crate::game::types::{Board, Position};

const CENTER: Position = Position { row: BOARD_SIZE / 2, col: BOARD_SIZE / 2 };

/// Legal cells for a die value: 1 is the center, 2-5 match the cell level, 6 is anywhere.
pub fn get_valid_cells(dice_value: u8, board: &Board) -> Vec<Position> {
    match dice_value {
        1 => vec![CENTER],
        2..=5 => board
            .iter_cells()
            .filter(|c| c.level == dice_value)
            .map(|c| c.position())
            .collect(),
        6 => board.iter_cells().map(|c| c.position()).collect(),
        _ => Vec::new(),
    }
}

pub fn can_place_piece(position: Position, dice_value: u8, board: &Board) -> bool {
    position.is_on_board() && get_valid_cells(dice_value, board).contains(&position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::create_empty_board;

    #[test]
    fn test_one_is_center_only() {
        let board = create_empty_board();
        assert_eq!(get_valid_cells(1, &board), vec![Position::new(2, 2)]);
    }

    #[test]
    fn test_levels_match_die() {
        let board = create_empty_board();
        for (die, expected) in [(2u8, 4), (3, 8), (4, 8), (5, 4)] {
            let cells = get_valid_cells(die, &board);
            assert_eq!(cells.len(), expected, "die {die}");
            assert!(cells.iter().all(|p| board.level_at(*p) == Some(die)));
        }
        assert_eq!(get_valid_cells(6, &board).len(), 25);
        assert!(get_valid_cells(0, &board).is_empty());
        assert!(get_valid_cells(7, &board).is_empty());
    }

    #[test]
    fn test_can_place_piece() {
        let board = create_empty_board();
        assert!(can_place_piece(Position::new(0, 0), 5, &board));
        assert!(!can_place_piece(Position::new(0, 0), 4, &board));
        assert!(can_place_piece(Position::new(4, 4), 6, &board));
        assert!(!can_place_piece(Position::new(5, 0), 6, &board));
        assert!(!can_place_piece(Position::new(2, 2), 2, &board));
    }
}
