//! Terminal rendering of a snapshot.

use crate::game::state::Game;
use crate::game::types::{Board, PieceColor, Player, PlayerMode, row_letter};

fn color_initial(color: PieceColor) -> char {
    color.name().chars().next().map_or('?', |c| c.to_ascii_uppercase())
}

/// One line per row. Each cell shows `level:height` and the top color initial,
/// e.g. `3:2R`, or `3:-` when empty.
pub fn format_board(board: &Board) -> String {
    let mut out = String::from("    1      2      3      4      5\n");
    for (r, row) in board.cells.iter().enumerate() {
        out.push(row_letter(r));
        out.push(' ');
        for cell in row {
            let symbol = match cell.top() {
                Some(top) => format!("{}:{}{}", cell.level, cell.height(), color_initial(top.color)),
                None => format!("{}:-", cell.level),
            };
            out.push_str(&format!("{:<7}", symbol));
        }
        out.push('\n');
    }
    out
}

/// Score line for a single player.
pub fn format_player(player: &Player) -> String {
    let marker = if player.is_active { ">" } else { " " };
    let colors = match player.mode {
        PlayerMode::SingleColor { color } => color.to_string(),
        PlayerMode::DualColor { primary, secondary } => format!(
            "{} {}pts/{}pc, {} {}pts/{}pc",
            primary.color,
            primary.score,
            primary.pieces_remaining,
            secondary.color,
            secondary.score,
            secondary.pieces_remaining
        ),
    };
    format!(
        "{} {} [{}] score {} pieces {}/{}",
        marker, player.name, colors, player.score, player.pieces_remaining, player.total_pieces
    )
}

pub fn print_board(board: &Board) {
    println!("{}", format_board(board));
}

pub fn print_game_state(game: &Game, recent_log: usize) {
    println!(
        "--- Round {} ({:?}) first to {} ---",
        game.round_number, game.status, game.victory_points
    );
    print_board(&game.board);
    for player in &game.players {
        println!("{}", format_player(player));
    }
    if let Some(die) = game.dice_roll {
        let cells: Vec<String> = game.valid_cells().iter().map(|p| p.to_string()).collect();
        println!("Die: {} -> {}", die, cells.join(" "));
    }
    let skip = game.log.len().saturating_sub(recent_log);
    for entry in game.log.iter().skip(skip) {
        println!("  #{} {}", entry.seq, entry.message);
    }
    println!();
}
