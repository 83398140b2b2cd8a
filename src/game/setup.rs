//! Game setup and its validation.
//!
//! Validation is pure: it reports every problem at once and never builds a
//! snapshot unless the list comes back empty.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::game::{DEFAULT_VICTORY_POINTS, DUAL_COLOR_PLAYERS, MAX_PLAYERS, MIN_PLAYERS};
use crate::game::state::Game;
use crate::game::types::{PieceColor, Player};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    pub color: PieceColor,
    /// Second color, two-player games only.
    pub color2: Option<PieceColor>,
    /// Seat order, 1-based.
    pub order: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupConfig {
    pub players: Vec<PlayerSetup>,
    pub victory_points: i32,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            victory_points: DEFAULT_VICTORY_POINTS,
        }
    }
}

impl SetupConfig {
    /// Add a player seated after the ones already added.
    pub fn with_player(mut self, name: &str, color: PieceColor, color2: Option<PieceColor>) -> Self {
        let order = self.players.len() as u8 + 1;
        self.players.push(PlayerSetup {
            name: name.to_string(),
            color,
            color2,
            order,
        });
        self
    }

    pub fn with_victory_points(mut self, victory_points: i32) -> Self {
        self.victory_points = victory_points;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("a game needs {min} to {max} players, got {0}", min = MIN_PLAYERS, max = MAX_PLAYERS)]
    PlayerCount(usize),
    #[error("player {0} needs a name")]
    EmptyName(usize),
    #[error("color {0} is taken more than once")]
    DuplicateColor(PieceColor),
    #[error("turn order {0} is taken more than once")]
    DuplicateOrder(u8),
    #[error("victory points must be positive, got {0}")]
    NonPositiveVictoryPoints(i32),
    #[error("a second color is only allowed with exactly {count} players", count = DUAL_COLOR_PLAYERS)]
    SecondColorNeedsTwoPlayers,
    #[error("either both players pick a second color or neither does")]
    MixedColorModes,
}

/// Every problem with `config`, in a stable order. Empty means valid.
pub fn validate_setup(config: &SetupConfig) -> Vec<SetupError> {
    let mut errors = Vec::new();
    let count = config.players.len();

    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
        errors.push(SetupError::PlayerCount(count));
    }

    for (i, player) in config.players.iter().enumerate() {
        if player.name.trim().is_empty() {
            errors.push(SetupError::EmptyName(i + 1));
        }
    }

    let mut seen_colors = HashSet::new();
    for color in config
        .players
        .iter()
        .flat_map(|p| std::iter::once(p.color).chain(p.color2))
    {
        if !seen_colors.insert(color) {
            let error = SetupError::DuplicateColor(color);
            if !errors.contains(&error) {
                errors.push(error);
            }
        }
    }

    let mut seen_orders = HashSet::new();
    for player in &config.players {
        if !seen_orders.insert(player.order) {
            let error = SetupError::DuplicateOrder(player.order);
            if !errors.contains(&error) {
                errors.push(error);
            }
        }
    }

    if config.victory_points <= 0 {
        errors.push(SetupError::NonPositiveVictoryPoints(config.victory_points));
    }

    let dual = config.players.iter().filter(|p| p.color2.is_some()).count();
    if dual > 0 {
        if count != DUAL_COLOR_PLAYERS {
            errors.push(SetupError::SecondColorNeedsTwoPlayers);
        } else if dual != count {
            errors.push(SetupError::MixedColorModes);
        }
    }

    errors
}

/// Build the round-1 snapshot, players sorted by seat order.
pub fn build_game(config: &SetupConfig) -> Result<Game, Vec<SetupError>> {
    let errors = validate_setup(config);
    if !errors.is_empty() {
        return Err(errors);
    }

    let mut seats = config.players.clone();
    seats.sort_by_key(|p| p.order);
    let players = seats
        .into_iter()
        .map(|p| Player::new(p.name.trim().to_string(), p.color, p.color2, p.order))
        .collect();

    Ok(Game::new(players, config.victory_points))
}
