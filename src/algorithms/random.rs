//! Randomised search.
//!
//! Every discovered state gets a fresh random rank, so expansion order is
//! unrelated to discovery order. Reproducible given a seeded [`Rng`].

use rand::Rng;

use crate::algorithms::ranked::RankedFrontier;
use crate::search::Frontier;
use crate::space::Cost;
use crate::space::State;

/// Ranks are drawn uniformly from `1..=RANDOM_RANK_MAX`.
pub const RANDOM_RANK_MAX: u32 = 10_000;

pub struct RandomFrontier<'r, St, C, R>
where
    St: State,
    C: Cost,
    R: Rng,
{
    open: RankedFrontier<St, C, u32>,
    rng: &'r mut R,
}

impl<'r, St, C, R> RandomFrontier<'r, St, C, R>
where
    St: State,
    C: Cost,
    R: Rng,
{
    #[must_use]
    pub fn new(rng: &'r mut R) -> Self {
        Self {
            open: RankedFrontier::new(),
            rng,
        }
    }
}

impl<St, C, R> std::fmt::Debug for RandomFrontier<'_, St, C, R>
where
    St: State,
    C: Cost,
    R: Rng,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "RandomFrontier{{({} open)}}", self.open.len())
    }
}

impl<St, C, R> Frontier<St, C> for RandomFrontier<'_, St, C, R>
where
    St: State,
    C: Cost,
    R: Rng,
{
    #[inline(always)]
    fn push(&mut self, s: St, g: C) {
        let rank = self.rng.random_range(1..=RANDOM_RANK_MAX);
        self.open.push(s, g, rank);
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<(St, C)> {
        self.open.pop()
    }
    fn len(&self) -> usize {
        self.open.len()
    }
}
