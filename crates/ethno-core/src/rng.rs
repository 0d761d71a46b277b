//! Random Sources
//!
//! Every stochastic decision in a generation goes through a single
//! [`RandomSource`]. The order of draws is part of the observable behavior:
//! two sources producing the same sequence drive identical grid evolution.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Supplier of the primitive draws the simulation needs.
pub trait RandomSource: Send + Sync {
    /// Uniform float in [0, 1).
    fn uniform(&mut self) -> f64;

    /// Uniform integer in [0, n). `n` is always at least 1.
    fn below(&mut self, n: usize) -> usize;

    /// A random ordering of `0..n`.
    fn permutation(&mut self, n: usize) -> Vec<usize>;

    /// Fair coin, drawn as `below(2) == 1`.
    fn coin(&mut self) -> bool {
        self.below(2) == 1
    }
}

/// Seeded pseudo-random source backed by [`SmallRng`].
#[derive(Debug, Clone)]
pub struct SeededSource {
    seed: u64,
    rng: SmallRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Picks a seed from the thread RNG. The seed stays readable through
    /// [`SeededSource::seed`] so the run can be replayed.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededSource {
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn below(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut self.rng);
        order
    }
}

/// A single scripted draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Draw {
    Uniform(f64),
    Below(usize),
    Permutation(Vec<usize>),
}

/// Replays a fixed sequence of draws.
///
/// Used to pin down exact grid evolution in tests and to replay recorded
/// runs.
///
/// # Panics
///
/// Running out of draws, or finding a draw of the wrong kind or shape, is a
/// fatal failure of the random source and panics with a description of the
/// expected draw.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: VecDeque<Draw>,
    consumed: usize,
}

impl ScriptedSource {
    pub fn new(draws: impl IntoIterator<Item = Draw>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Appends more draws to the end of the script.
    pub fn extend(&mut self, draws: impl IntoIterator<Item = Draw>) {
        self.draws.extend(draws);
    }

    /// Draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }

    /// Draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    fn next(&mut self, expected: &str) -> Draw {
        match self.draws.pop_front() {
            Some(draw) => {
                self.consumed += 1;
                draw
            }
            None => panic!(
                "scripted random source exhausted after {} draws (expected {})",
                self.consumed, expected
            ),
        }
    }
}

impl RandomSource for ScriptedSource {
    fn uniform(&mut self) -> f64 {
        match self.next("uniform") {
            Draw::Uniform(u) if (0.0..1.0).contains(&u) => u,
            other => panic!("draw {}: expected uniform in [0, 1), got {:?}", self.consumed, other),
        }
    }

    fn below(&mut self, n: usize) -> usize {
        match self.next("below") {
            Draw::Below(v) if v < n => v,
            other => panic!("draw {}: expected integer below {}, got {:?}", self.consumed, n, other),
        }
    }

    fn permutation(&mut self, n: usize) -> Vec<usize> {
        match self.next("permutation") {
            Draw::Permutation(order) if is_permutation(&order, n) => order,
            other => panic!("draw {}: expected permutation of 0..{}, got {:?}", self.consumed, n, other),
        }
    }
}

fn is_permutation(order: &[usize], n: usize) -> bool {
    if order.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &i in order {
        if i >= n || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}
