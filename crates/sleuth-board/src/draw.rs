//! Injected uniform-draw service and uniform selection.
//!
//! The game never touches a process-wide generator. Every component that
//! needs randomness receives a [`RandomDraw`], so tests can substitute the
//! deterministic [`MidpointDraw`] or a fixed-seed [`SeededDraw`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::BoardError;

/// Source of uniform real-valued draws.
pub trait RandomDraw {
    /// Draw a value uniformly from `[low, high)`.
    ///
    /// Implementations return `low` when the range is empty.
    fn draw_uniform(&mut self, low: f64, high: f64) -> f64;
}

/// [`RandomDraw`] backed by a seeded [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededDraw {
    rng: StdRng,
    seed: u64,
}

impl SeededDraw {
    /// Create a reproducible draw source from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a draw source with a seed taken from the thread RNG.
    ///
    /// The chosen seed is available through [`SeededDraw::seed`] so the run
    /// can be replayed.
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    /// The seed this source was created with.
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomDraw for SeededDraw {
    fn draw_uniform(&mut self, low: f64, high: f64) -> f64 {
        if low < high {
            self.rng.random_range(low..high)
        } else {
            low
        }
    }
}

/// Deterministic [`RandomDraw`] that always returns the range midpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidpointDraw;

impl RandomDraw for MidpointDraw {
    fn draw_uniform(&mut self, low: f64, high: f64) -> f64 {
        if low < high { (low + high) / 2.0 } else { low }
    }
}

/// Pick one element of `options` with equal probability.
///
/// A single option is returned without consuming a draw. The draw is
/// converted to an index with `floor`, clamped into range.
///
/// # Errors
///
/// Returns [`BoardError::EmptyChoice`] if `options` is empty.
pub fn choose_uniformly<T: Clone>(
    draw: &mut dyn RandomDraw,
    options: &[T],
) -> Result<T, BoardError> {
    match options {
        [] => Err(BoardError::EmptyChoice),
        [only] => Ok(only.clone()),
        _ => {
            let count = u32::try_from(options.len())
                .ok()
                .ok_or(BoardError::ArithmeticOverflow)?;
            let value = draw.draw_uniform(0.0, f64::from(count)).floor();
            let index = (0..count)
                .rev()
                .find(|i| f64::from(*i) <= value)
                .unwrap_or(0);
            let index = usize::try_from(index)
                .ok()
                .ok_or(BoardError::ArithmeticOverflow)?;
            options.get(index).cloned().ok_or(BoardError::EmptyChoice)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    /// Replays a fixed list of draws, then repeats the last one.
    struct ScriptedDraw {
        values: Vec<f64>,
        calls: usize,
    }

    impl RandomDraw for ScriptedDraw {
        fn draw_uniform(&mut self, _low: f64, _high: f64) -> f64 {
            let value = self
                .values
                .get(self.calls)
                .or_else(|| self.values.last())
                .copied()
                .unwrap_or_default();
            self.calls += 1;
            value
        }
    }

    #[test]
    fn empty_choice_is_insufficient_data() {
        let options: [u8; 0] = [];
        let err = choose_uniformly(&mut MidpointDraw, &options).unwrap_err();
        assert!(matches!(err, BoardError::EmptyChoice));
        assert_eq!(err.kind(), sleuth_types::ErrorKind::InsufficientData);
    }

    #[test]
    fn singleton_does_not_consume_a_draw() {
        let mut draw = ScriptedDraw {
            values: vec![0.0],
            calls: 0,
        };
        assert_eq!(choose_uniformly(&mut draw, &["only"]).unwrap(), "only");
        assert_eq!(draw.calls, 0);
    }

    #[test]
    fn draw_floors_to_index() {
        let mut draw = ScriptedDraw {
            values: vec![0.2, 1.99, 2.0, 7.5, -1.0],
            calls: 0,
        };
        let options = ['a', 'b', 'c'];
        assert_eq!(choose_uniformly(&mut draw, &options).unwrap(), 'a');
        assert_eq!(choose_uniformly(&mut draw, &options).unwrap(), 'b');
        assert_eq!(choose_uniformly(&mut draw, &options).unwrap(), 'c');
        // Out-of-range draws clamp instead of failing.
        assert_eq!(choose_uniformly(&mut draw, &options).unwrap(), 'c');
        assert_eq!(choose_uniformly(&mut draw, &options).unwrap(), 'a');
        assert_eq!(draw.calls, 5);
    }

    #[test]
    fn midpoint_picks_the_middle_option() {
        let options = [10, 20, 30, 40];
        assert_eq!(choose_uniformly(&mut MidpointDraw, &options).unwrap(), 30);
    }

    #[test]
    fn seeded_draw_is_reproducible_and_in_range() {
        let mut a = SeededDraw::new(42);
        let mut b = SeededDraw::new(42);
        for _ in 0..100 {
            let x = a.draw_uniform(0.0, 6.0);
            assert!((0.0..6.0).contains(&x));
            assert!((x - b.draw_uniform(0.0, 6.0)).abs() < f64::EPSILON);
        }
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn seeded_choice_reaches_every_option() {
        let mut draw = SeededDraw::new(7);
        let options = [1, 2, 3];
        let seen: BTreeSet<i32> = (0..200)
            .map(|_| choose_uniformly(&mut draw, &options).unwrap())
            .collect();
        assert_eq!(seen.len(), 3);
    }
}
