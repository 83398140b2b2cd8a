//! Dice.
//!
//! The engine asks a [`DiceSource`] for every roll so tests can script the
//! faces while real games draw from the thread-local CSPRNG.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::config::game::DIE_FACES;

pub trait DiceSource {
    /// A face in `1..=6`.
    fn roll_die(&mut self) -> u8;
}

/// Uniform draws from any `rand` generator.
pub struct RngDice<R: Rng> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDice<ThreadRng> {
    pub fn system() -> Self {
        Self::new(rand::rng())
    }
}

impl RngDice<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DiceSource for RngDice<R> {
    fn roll_die(&mut self) -> u8 {
        self.rng.random_range(1..=DIE_FACES)
    }
}

/// Replays a fixed list of faces, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    next: usize,
}

impl ScriptedDice {
    /// Faces outside `1..=6` are clamped into range. An empty list always rolls 6.
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        Self {
            faces: faces.into_iter().map(|f| f.clamp(1, DIE_FACES)).collect(),
            next: 0,
        }
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        if self.faces.is_empty() {
            return DIE_FACES;
        }
        let face = self.faces[self.next % self.faces.len()];
        self.next += 1;
        face
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_dice_in_range() {
        let mut dice = RngDice::seeded(42);
        let mut seen = [0u32; 6];
        for _ in 0..6000 {
            let face = dice.roll_die();
            assert!((1..=6).contains(&face));
            seen[face as usize - 1] += 1;
        }
        assert!(seen.iter().all(|&n| n > 800), "{seen:?}");
    }

    #[test]
    fn test_seeded_dice_repeat() {
        let a: Vec<u8> = {
            let mut d = RngDice::seeded(7);
            (0..20).map(|_| d.roll_die()).collect()
        };
        let b: Vec<u8> = {
            let mut d = RngDice::seeded(7);
            (0..20).map(|_| d.roll_die()).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_scripted_dice_cycle_and_clamp() {
        let mut dice = ScriptedDice::new([1, 9, 0]);
        let faces: Vec<u8> = (0..4).map(|_| dice.roll_die()).collect();
        assert_eq!(faces, vec![1, 6, 1, 1]);
        assert_eq!(ScriptedDice::new(Vec::new()).roll_die(), 6);
    }
}
