//! Game state engine.
//!
//! [`apply`] is the only writer of game snapshots. It takes the current
//! snapshot (or none) and an [`Action`], and returns the next snapshot. A
//! transition that isn't allowed in the current state leaves the snapshot
//! unchanged; [`try_apply`] exposes the reason for tests and diagnostics.

use chrono::Utc;
use log::{debug, info};
use thiserror::Error;
use uuid::Uuid;

use crate::config::game::{LAST_PLACEMENT_PENALTY, TOPPLE_BONUS, TOPPLE_PENALTY};
use crate::game::dice::DiceSource;
use crate::game::grid::{can_place_piece, place_piece};
use crate::game::setup::{SetupConfig, SetupError, build_game};
use crate::game::state::{Game, LogDraft};
use crate::game::systems::round::{end_round, start_new_round};
use crate::game::systems::scoring::score_placement;
use crate::game::types::{
    GameStatus, LogKind, Piece, PieceColor, Player, Position, ScoreEvent, ScoreReason,
};

#[derive(Debug, Clone)]
pub enum Action {
    /// Start a new game, replacing any current one.
    Setup(SetupConfig),
    /// Round 1 turn-order roll. `rolls` pairs player ids with their die.
    /// `order_override` seats players in the given order whatever the rolls say.
    InitialOrder {
        rolls: Vec<(Uuid, u8)>,
        order_override: Option<Vec<Uuid>>,
    },
    RollDice,
    /// Place a piece for the current player. `color` defaults to the primary color.
    PlacePiece {
        position: Position,
        color: Option<PieceColor>,
    },
    /// Declare a topple. `player_id` defaults to the current player.
    ToggleTopple {
        player_id: Option<Uuid>,
    },
    /// End the round now. Rejected once the game has ended.
    EndRound,
    StartNewRound,
    Reset,
    Load(Box<Game>),
}

/// Why an action left the snapshot unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no game in progress")]
    NoGame,
    #[error("not allowed while the game is {0:?}")]
    WrongStatus(GameStatus),
    #[error("turn order can only be rolled in round 1")]
    NotFirstRound,
    #[error("no turn-order rolls given")]
    NoRolls,
    #[error("unknown player {0}")]
    UnknownPlayer(Uuid),
    #[error("order override must list every player exactly once")]
    InvalidOrderOverride,
    #[error("no current player")]
    NoCurrentPlayer,
    #[error("{0} is not the active player")]
    PlayerNotActive(String),
    #[error("roll the die first")]
    DiceNotRolled,
    #[error("{player} does not play {color}")]
    ColorNotOwned { player: String, color: PieceColor },
    #[error("{player} has no {color} pieces left")]
    NoPiecesRemaining { player: String, color: PieceColor },
    #[error("{position} is not allowed for a roll of {die}")]
    IllegalCell { position: Position, die: u8 },
    #[error("invalid setup: {}", join_errors(.0))]
    InvalidSetup(Vec<SetupError>),
}

fn join_errors(errors: &[SetupError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Apply `action`, returning the unchanged input when it is rejected.
pub fn apply(state: Option<Game>, action: Action, dice: &mut dyn DiceSource) -> Option<Game> {
    match try_apply(state.as_ref(), action, dice) {
        Ok(next) => next,
        Err(reason) => {
            debug!("[Engine] action ignored: {}", reason);
            state
        }
    }
}

/// Apply `action`, reporting why it was rejected.
pub fn try_apply(
    state: Option<&Game>,
    action: Action,
    dice: &mut dyn DiceSource,
) -> Result<Option<Game>, Rejection> {
    match action {
        Action::Setup(config) => setup(&config).map(Some),
        Action::Reset => {
            info!("[Engine] game reset");
            Ok(None)
        }
        Action::Load(game) => {
            info!("[Engine] loaded game {} ({:?})", game.id, game.status);
            Ok(Some(*game))
        }
        Action::InitialOrder {
            rolls,
            order_override,
        } => transition(state, |game| initial_order(game, &rolls, order_override.as_deref())),
        Action::RollDice => transition(state, |game| roll_dice(game, dice)),
        Action::PlacePiece { position, color } => {
            transition(state, |game| place(game, position, color))
        }
        Action::ToggleTopple { player_id } => transition(state, |game| topple(game, player_id)),
        Action::EndRound => transition(state, |game| {
            if game.status == GameStatus::GameEnd {
                return Err(Rejection::WrongStatus(game.status));
            }
            end_round(game);
            Ok(())
        }),
        Action::StartNewRound => transition(state, |game| {
            require_status(game, GameStatus::RoundEnd)?;
            start_new_round(game);
            Ok(())
        }),
    }
}

/// Run `step` on a copy of the current snapshot.
fn transition(
    state: Option<&Game>,
    step: impl FnOnce(&mut Game) -> Result<(), Rejection>,
) -> Result<Option<Game>, Rejection> {
    let mut next = state.ok_or(Rejection::NoGame)?.clone();
    step(&mut next)?;
    next.updated_at = Utc::now();
    Ok(Some(next))
}

/// One die per player, for the round 1 turn-order roll.
pub fn roll_for_order(players: &[Uuid], dice: &mut dyn DiceSource) -> Vec<(Uuid, u8)> {
    players.iter().map(|id| (*id, dice.roll_die())).collect()
}

fn require_status(game: &Game, status: GameStatus) -> Result<(), Rejection> {
    if game.status != status {
        return Err(Rejection::WrongStatus(game.status));
    }
    Ok(())
}

fn setup(config: &SetupConfig) -> Result<Game, Rejection> {
    let mut game = build_game(config).map_err(Rejection::InvalidSetup)?;
    let names: Vec<&str> = game.players.iter().map(|p| p.name.as_str()).collect();
    let message = format!(
        "New game: {} playing to {} points",
        names.join(", "),
        game.victory_points
    );
    info!("[Engine] game {} created with {} players", game.id, game.players.len());
    game.push_log(LogDraft::new(LogKind::GameStart, message));
    Ok(game)
}

fn initial_order(
    game: &mut Game,
    rolls: &[(Uuid, u8)],
    order_override: Option<&[Uuid]>,
) -> Result<(), Rejection> {
    require_status(game, GameStatus::Playing)?;
    if game.round_number != 1 {
        return Err(Rejection::NotFirstRound);
    }
    if rolls.is_empty() && order_override.is_none() {
        return Err(Rejection::NoRolls);
    }
    if let Some((id, _)) = rolls.iter().find(|(id, _)| game.player(*id).is_none()) {
        return Err(Rejection::UnknownPlayer(*id));
    }
    if let Some(order) = order_override {
        let mut sorted = order.to_vec();
        sorted.sort();
        sorted.dedup();
        if order.len() != game.players.len()
            || sorted.len() != order.len()
            || order.iter().any(|id| game.player(*id).is_none())
        {
            return Err(Rejection::InvalidOrderOverride);
        }
    }

    let max = rolls.iter().map(|(_, roll)| *roll).max();
    let leaders: Vec<Uuid> = rolls
        .iter()
        .filter(|(_, roll)| Some(*roll) == max)
        .map(|(id, _)| *id)
        .collect();

    let seating: Option<Vec<Uuid>> = match (order_override, leaders.as_slice()) {
        (Some(order), _) => Some(order.to_vec()),
        (None, [winner]) => {
            // Clockwise from the winner.
            let start = game.player_index(*winner).unwrap_or(0);
            let mut ids: Vec<Uuid> = game.players.iter().map(|p| p.id).collect();
            ids.rotate_left(start);
            Some(ids)
        }
        (None, _) => None,
    };

    match seating {
        Some(ids) => {
            let mut players = Vec::with_capacity(ids.len());
            for id in &ids {
                if let Some(player) = game.player(*id) {
                    players.push(player.clone());
                }
            }
            for (i, player) in players.iter_mut().enumerate() {
                player.order = i as u8 + 1;
            }
            game.players = players;
            game.order_tie.clear();
            game.activate(0);
            if let Some(first) = game.players.first() {
                let message = match max {
                    Some(roll) if order_override.is_none() => {
                        format!("{} rolled {} and goes first", first.name, roll)
                    }
                    _ => format!("Turn order set, {} goes first", first.name),
                };
                let draft = LogDraft::new(LogKind::TurnOrder, message).player(first);
                game.push_log(draft);
            }
        }
        None => {
            game.deactivate_all();
            game.order_tie = leaders.clone();
            let names: Vec<String> = leaders
                .iter()
                .filter_map(|id| game.player(*id))
                .map(|p| p.name.clone())
                .collect();
            let message = format!(
                "Tie at {} between {}, roll again",
                max.unwrap_or_default(),
                names.join(", ")
            );
            game.push_log(LogDraft::new(LogKind::TurnOrder, message));
        }
    }
    Ok(())
}

fn roll_dice(game: &mut Game, dice: &mut dyn DiceSource) -> Result<(), Rejection> {
    require_status(game, GameStatus::Playing)?;
    let index = game.current_player_index;
    let player = game.players.get(index).ok_or(Rejection::NoCurrentPlayer)?;
    if !player.is_active {
        debug!("[Engine] activating {} before rolling", player.name);
        game.activate(index);
    }

    let value = dice.roll_die();
    game.dice_roll = Some(value);
    game.dice_rolled_in_round = true;

    let player = &game.players[index];
    let draft = LogDraft::new(LogKind::DiceRoll, format!("{} rolled {}", player.name, value))
        .player(player);
    game.push_log(draft);
    Ok(())
}

fn score_log_kind(reason: ScoreReason) -> LogKind {
    match reason {
        ScoreReason::RowCompletion | ScoreReason::CompletedRowBonus | ScoreReason::TallStack => {
            LogKind::Score
        }
        ScoreReason::LastPlacementPenalty => LogKind::Penalty,
        ScoreReason::TopplePenalty => LogKind::Topple,
        ScoreReason::ToppleBonus => LogKind::ToppleBonus,
    }
}

/// Book a placement score event and log it.
fn record_score(game: &mut Game, player: &Player, event: ScoreEvent, position: Position) {
    let message = format!("{}: {:+} ({})", player.name, event.points, event.details);
    let draft = LogDraft::new(score_log_kind(event.reason), message)
        .player(player)
        .points(event.points)
        .position(position);
    game.push_log(draft);
    game.book_score(event);
}

fn place(game: &mut Game, position: Position, color: Option<PieceColor>) -> Result<(), Rejection> {
    require_status(game, GameStatus::Playing)?;
    let index = game.current_player_index;
    let player = game
        .players
        .get(index)
        .cloned()
        .ok_or(Rejection::NoCurrentPlayer)?;
    let die = game.dice_roll.ok_or(Rejection::DiceNotRolled)?;
    if !player.is_active {
        return Err(Rejection::PlayerNotActive(player.name));
    }
    let color = color.unwrap_or_else(|| player.primary_color());
    if !player.controls(color) {
        return Err(Rejection::ColorNotOwned {
            player: player.name,
            color,
        });
    }
    if player.pieces_remaining_for(color) == 0 {
        return Err(Rejection::NoPiecesRemaining {
            player: player.name,
            color,
        });
    }
    if !can_place_piece(position, die, &game.board) {
        return Err(Rejection::IllegalCell { position, die });
    }

    let round = game.round_number;
    let board_before = game.board.clone();
    game.board = place_piece(&board_before, position, Piece::new(player.id, color, round));
    let events = score_placement(&game.board, position, &player, &board_before, Some(color), round);
    game.players[index].take_piece(color);

    let message = format!("{} placed {} on {}", player.name, color, position);
    game.push_log(
        LogDraft::new(LogKind::Placement, message)
            .player(&player)
            .position(position),
    );
    for event in events {
        record_score(game, &player, event, position);
    }

    let exhausted = game.pieces_exhausted();
    if exhausted && !game.topple_occurred && game.dice_rolled_in_round {
        let event = ScoreEvent::new(
            player.id,
            -LAST_PLACEMENT_PENALTY,
            ScoreReason::LastPlacementPenalty,
            color,
            round,
            "Placed the last piece of the round",
        );
        record_score(game, &player, event, position);
    }

    game.activate((index + 1) % game.players.len());
    game.dice_roll = None;

    if exhausted {
        end_round(game);
    }
    Ok(())
}

fn topple(game: &mut Game, player_id: Option<Uuid>) -> Result<(), Rejection> {
    require_status(game, GameStatus::Playing)?;
    let index = match player_id {
        Some(id) => game.player_index(id).ok_or(Rejection::UnknownPlayer(id))?,
        None => {
            game.current_player()
                .ok_or(Rejection::NoCurrentPlayer)?;
            game.current_player_index
        }
    };
    let round = game.round_number;
    let toppler = game.players[index].clone();

    for (color, share) in toppler.split_penalty(TOPPLE_PENALTY) {
        game.book_score(ScoreEvent::new(
            toppler.id,
            -share,
            ScoreReason::TopplePenalty,
            color,
            round,
            format!("Toppled the board ({color} share)"),
        ));
    }
    game.push_log(
        LogDraft::new(
            LogKind::Topple,
            format!("{} toppled the board: {:+}", toppler.name, -TOPPLE_PENALTY),
        )
        .player(&toppler)
        .points(-TOPPLE_PENALTY),
    );

    let previous_index = (index + game.players.len() - 1) % game.players.len();
    if previous_index != index {
        let previous = game.players[previous_index].clone();
        game.book_score(ScoreEvent::new(
            previous.id,
            TOPPLE_BONUS,
            ScoreReason::ToppleBonus,
            previous.leading_color(),
            round,
            format!("Played before {} toppled", toppler.name),
        ));
        game.push_log(
            LogDraft::new(
                LogKind::ToppleBonus,
                format!("{} gains {:+} from the topple", previous.name, TOPPLE_BONUS),
            )
            .player(&previous)
            .points(TOPPLE_BONUS),
        );
    }

    game.topple_occurred = true;
    game.topple_player_id = Some(toppler.id);
    game.dice_roll = None;
    game.status = GameStatus::RoundEnd;
    end_round(game);
    Ok(())
}
