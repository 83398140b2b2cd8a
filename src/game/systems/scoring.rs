//! Scoring system.
//!
//! Computes the score events triggered by a single placement by comparing the
//! board before and after it.

use log::debug;

use crate::config::game::{LINE_BASE_POINTS, TALL_STACK_THRESHOLD};
use crate::game::grid::{Line, complete_lines};
use crate::game::types::{Board, PieceColor, Player, Position, ScoreEvent, ScoreReason};

/// Top-of-stack pieces in `line` owned by `player_id` in `color`.
fn count_top_pieces(board: &Board, line: Line, player_id: uuid::Uuid, color: PieceColor) -> i32 {
    line.positions()
        .into_iter()
        .filter_map(|pos| board.cell(pos).and_then(|c| c.top()))
        .filter(|piece| piece.belongs_to(player_id, color))
        .count() as i32
}

/// Score events for a placement at `position`.
///
/// `active_color` defaults to the player's primary color.
///
/// - newly completed lines score 3 each plus 1 per matching top piece, summed
///   into one `RowCompletion` event;
/// - lines already complete before the placement that contain `position` give
///   one `CompletedRowBonus` event each, 1 per matching top piece;
/// - a piece landing on a stack of 3 or more gives a `TallStack` event, 1 per
///   matching piece in that stack.
pub fn score_placement(
    board_after: &Board,
    position: Position,
    player: &Player,
    board_before: &Board,
    active_color: Option<PieceColor>,
    round_number: u32,
) -> Vec<ScoreEvent> {
    let color = active_color.unwrap_or_else(|| player.primary_color());
    let complete_before = complete_lines(board_before);
    let complete_after = complete_lines(board_after);
    let mut events = Vec::new();

    let newly_completed: Vec<Line> = complete_after
        .iter()
        .copied()
        .filter(|line| !complete_before.contains(line))
        .collect();

    if !newly_completed.is_empty() {
        let points: i32 = newly_completed
            .iter()
            .map(|line| LINE_BASE_POINTS + count_top_pieces(board_after, *line, player.id, color))
            .sum();
        let labels: Vec<String> = newly_completed.iter().map(Line::label).collect();
        events.push(ScoreEvent::new(
            player.id,
            points,
            ScoreReason::RowCompletion,
            color,
            round_number,
            format!("Completed {}", labels.join(", ")),
        ));
    }

    for line in complete_before
        .iter()
        .filter(|line| line.contains(position) && complete_after.contains(line))
    {
        let points = count_top_pieces(board_after, *line, player.id, color);
        if points > 0 {
            events.push(ScoreEvent::new(
                player.id,
                points,
                ScoreReason::CompletedRowBonus,
                color,
                round_number,
                format!("Built on completed {}", line.label()),
            ));
        }
    }

    let height_before = board_before.cell(position).map_or(0, |c| c.height());
    if height_before >= TALL_STACK_THRESHOLD {
        let points = board_after
            .cell(position)
            .map_or(0, |c| c.stack.iter().filter(|p| p.belongs_to(player.id, color)).count())
            as i32;
        if points > 0 {
            events.push(ScoreEvent::new(
                player.id,
                points,
                ScoreReason::TallStack,
                color,
                round_number,
                format!("Tall stack of {} at {}", height_before + 1, position),
            ));
        }
    }

    debug!(
        "[Scoring] player={} position={} color={} events={:?}",
        player.name,
        position,
        color,
        events.iter().map(|e| (e.reason, e.points)).collect::<Vec<_>>()
    );
    events
}
