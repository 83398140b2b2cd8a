//! Player ledger operations.
//!
//! Keeps the aggregate score and piece counts in step with the per-color
//! ledgers of dual-color players.

use crate::config::game::PIECES_PER_PLAYER;
use crate::game::types::{ColorLedger, Player, PlayerMode, PieceColor};

impl Player {
    pub fn primary_color(&self) -> PieceColor {
        match self.mode {
            PlayerMode::SingleColor { color } => color,
            PlayerMode::DualColor { primary, .. } => primary.color,
        }
    }

    pub fn secondary_color(&self) -> Option<PieceColor> {
        match self.mode {
            PlayerMode::SingleColor { .. } => None,
            PlayerMode::DualColor { secondary, .. } => Some(secondary.color),
        }
    }

    /// Primary color first.
    pub fn colors(&self) -> Vec<PieceColor> {
        std::iter::once(self.primary_color())
            .chain(self.secondary_color())
            .collect()
    }

    pub fn is_dual_color(&self) -> bool {
        matches!(self.mode, PlayerMode::DualColor { .. })
    }

    pub fn controls(&self, color: PieceColor) -> bool {
        self.colors().contains(&color)
    }

    pub fn ledger(&self, color: PieceColor) -> Option<&ColorLedger> {
        match &self.mode {
            PlayerMode::SingleColor { .. } => None,
            PlayerMode::DualColor { primary, secondary } => {
                [primary, secondary].into_iter().find(|l| l.color == color)
            }
        }
    }

    pub fn pieces_remaining_for(&self, color: PieceColor) -> u32 {
        match self.mode {
            PlayerMode::SingleColor { color: own } if own == color => self.pieces_remaining,
            PlayerMode::SingleColor { .. } => 0,
            PlayerMode::DualColor { .. } => self.ledger(color).map_or(0, |l| l.pieces_remaining),
        }
    }

    pub fn score_for(&self, color: PieceColor) -> i32 {
        match self.mode {
            PlayerMode::SingleColor { color: own } if own == color => self.score,
            PlayerMode::SingleColor { .. } => 0,
            PlayerMode::DualColor { .. } => self.ledger(color).map_or(0, |l| l.score),
        }
    }

    /// Book points to `color`. A color the player doesn't control falls back to the primary ledger.
    pub fn add_points(&mut self, color: PieceColor, points: i32) {
        self.score += points;
        if let PlayerMode::DualColor { primary, secondary } = &mut self.mode {
            if secondary.color == color {
                secondary.score += points;
            } else {
                primary.score += points;
            }
        }
    }

    /// Use up one piece of `color`. Returns false when none is left.
    pub fn take_piece(&mut self, color: PieceColor) -> bool {
        if self.pieces_remaining_for(color) == 0 {
            return false;
        }
        if let PlayerMode::DualColor { primary, secondary } = &mut self.mode {
            let ledger = if primary.color == color { primary } else { secondary };
            ledger.pieces_remaining -= 1;
        }
        self.pieces_remaining -= 1;
        true
    }

    /// Refill every color to a full allotment for a new round.
    pub fn reset_pieces(&mut self) {
        if let PlayerMode::DualColor { primary, secondary } = &mut self.mode {
            primary.pieces_remaining = PIECES_PER_PLAYER;
            secondary.pieces_remaining = PIECES_PER_PLAYER;
        }
        self.pieces_remaining = self.total_pieces;
    }

    /// Color with the higher score, primary on a tie. Single-color players have one color.
    pub fn leading_color(&self) -> PieceColor {
        match self.mode {
            PlayerMode::SingleColor { color } => color,
            PlayerMode::DualColor { primary, secondary } => {
                if secondary.score > primary.score {
                    secondary.color
                } else {
                    primary.color
                }
            }
        }
    }

    /// Split a penalty across colors by each color's share of the current score.
    ///
    /// Negative ledger scores weigh nothing. When no color has a positive score
    /// the whole penalty goes to the primary color. Shares always sum to `penalty`
    /// and zero shares are left out.
    pub fn split_penalty(&self, penalty: i32) -> Vec<(PieceColor, i32)> {
        let PlayerMode::DualColor { primary, secondary } = self.mode else {
            return vec![(self.primary_color(), penalty)];
        };

        let primary_weight = primary.score.max(0);
        let secondary_weight = secondary.score.max(0);
        let total = primary_weight + secondary_weight;
        if total == 0 {
            return vec![(primary.color, penalty)];
        }

        let primary_share =
            (f64::from(penalty) * f64::from(primary_weight) / f64::from(total)).round() as i32;
        [
            (primary.color, primary_share),
            (secondary.color, penalty - primary_share),
        ]
        .into_iter()
        .filter(|(_, share)| *share != 0)
        .collect()
    }
}
