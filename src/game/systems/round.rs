//! Round lifecycle.
//!
//! A round is one board-filling episode. Scores carry over from round to round
//! and the game only ends at a round boundary.

use log::info;

use crate::game::grid::create_empty_board;
use crate::game::state::{Game, LogDraft};
use crate::game::types::{GameStatus, LogKind, Player};

/// The round is over and somebody has reached the victory threshold.
pub fn check_game_end(game: &Game) -> bool {
    game.status == GameStatus::RoundEnd
        && game.players.iter().any(|p| p.score >= game.victory_points)
}

/// Highest score among players at or above the threshold. The first such
/// player in turn order wins an exact tie. `None` unless the game has ended.
pub fn determine_winner(game: &Game) -> Option<&Player> {
    if game.status != GameStatus::GameEnd {
        return None;
    }
    game.players
        .iter()
        .filter(|p| p.score >= game.victory_points)
        .fold(None, |best: Option<&Player>, p| match best {
            Some(b) if b.score >= p.score => Some(b),
            _ => Some(p),
        })
}

/// Close the current round, ending the game if the threshold has been reached.
pub fn end_round(game: &mut Game) {
    game.status = GameStatus::RoundEnd;
    game.dice_roll = None;

    if check_game_end(game) {
        game.status = GameStatus::GameEnd;
        let draft = match determine_winner(game) {
            Some(winner) => LogDraft::new(
                LogKind::GameEnd,
                format!("{} wins with {} points", winner.name, winner.score),
            )
            .player(winner)
            .points(winner.score),
            None => LogDraft::new(LogKind::GameEnd, "Game over, no single winner"),
        };
        info!("[Round] game {} over after round {}", game.id, game.round_number);
        game.push_log(draft);
        return;
    }

    let how = if game.topple_occurred {
        let toppler = game
            .topple_player_id
            .and_then(|id| game.player(id))
            .map_or_else(|| "a player".to_string(), |p| p.name.clone());
        format!("the board was toppled by {toppler}")
    } else if game.pieces_exhausted() {
        "all pieces were placed".to_string()
    } else {
        "it was ended early".to_string()
    };
    info!("[Round] game {} round {} ended: {}", game.id, game.round_number, how);
    let message = format!("Round {} ended: {}", game.round_number, how);
    game.push_log(LogDraft::new(LogKind::RoundEnd, message));
}

/// Fresh board and full piece allotments. Scores are kept.
pub fn start_new_round(game: &mut Game) {
    game.board = create_empty_board();
    for player in game.players.iter_mut() {
        player.reset_pieces();
    }
    game.topple_occurred = false;
    game.topple_player_id = None;
    game.dice_rolled_in_round = false;
    game.dice_roll = None;
    game.round_number += 1;
    game.activate(0);
    game.status = GameStatus::Playing;

    info!("[Round] game {} round {} started", game.id, game.round_number);
    let message = format!("Round {} started", game.round_number);
    game.push_log(LogDraft::new(LogKind::RoundStart, message));
}
