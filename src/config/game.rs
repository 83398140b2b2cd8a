/// Game configuration constants.
///
/// This module defines the board geometry, piece allotment and every fixed
/// point value used by scoring and the round lifecycle.

/// Number of rows (and columns) of the board.
pub const BOARD_SIZE: usize = 5;

/// Height tier of every cell. Center is level 1, corners are level 5.
pub const LEVEL_LAYOUT: [[u8; BOARD_SIZE]; BOARD_SIZE] = [
    [5, 4, 3, 4, 5],
    [4, 3, 2, 3, 4],
    [3, 2, 1, 2, 3],
    [4, 3, 2, 3, 4],
    [5, 4, 3, 4, 5],
];

/// Pieces each player (and each color of a dual-color player) starts a round with.
pub const PIECES_PER_PLAYER: u32 = 12;

/// Minimum number of players required to start a game.
pub const MIN_PLAYERS: usize = 2;

/// Maximum number of players allowed in a game.
pub const MAX_PLAYERS: usize = 4;

/// Player count in which each player may control two colors.
pub const DUAL_COLOR_PLAYERS: usize = 2;

/// Victory threshold offered by the setup screen.
pub const DEFAULT_VICTORY_POINTS: i32 = 30;

/// Base points for every line completed by a placement.
pub const LINE_BASE_POINTS: i32 = 3;

/// A stack this tall before a placement makes the placement a tall stack.
pub const TALL_STACK_THRESHOLD: usize = 3;

/// Points removed from the player who toppled the board.
pub const TOPPLE_PENALTY: i32 = 10;

/// Points given to the player seated before the toppler.
pub const TOPPLE_BONUS: i32 = 3;

/// Points removed from the player who placed the last piece of a round.
pub const LAST_PLACEMENT_PENALTY: i32 = 3;

/// Faces of the die.
pub const DIE_FACES: u8 = 6;
