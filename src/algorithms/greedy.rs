//! Greedy best-first search.
//!
//! Expands the state that looks closest to the goal, ignoring the cost paid to
//! reach it. Fast on open spaces, but paths may be far from shortest.

use std::marker::PhantomData;

use crate::algorithms::ranked::RankedFrontier;
use crate::problem::ObjectiveHeuristic;
use crate::search::Frontier;
use crate::space::Cost;
use crate::space::State;

#[derive(Debug)]
pub struct GreedyFrontier<OH, St, C>
where
    OH: ObjectiveHeuristic<St, C>,
    St: State,
    C: Cost,
{
    open: RankedFrontier<St, C, C>,
    goal: St,
    _phantom_heuristic: PhantomData<OH>,
}

impl<OH, St, C> GreedyFrontier<OH, St, C>
where
    OH: ObjectiveHeuristic<St, C>,
    St: State,
    C: Cost,
{
    #[must_use]
    pub fn new(goal: St) -> Self {
        Self {
            open: RankedFrontier::new(),
            goal,
            _phantom_heuristic: PhantomData,
        }
    }
}

impl<OH, St, C> Frontier<St, C> for GreedyFrontier<OH, St, C>
where
    OH: ObjectiveHeuristic<St, C>,
    St: State,
    C: Cost,
{
    #[inline(always)]
    fn push(&mut self, s: St, g: C) {
        let h = OH::h(&s, &self.goal);
        self.open.push(s, g, h);
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<(St, C)> {
        self.open.pop()
    }
    fn len(&self) -> usize {
        self.open.len()
    }
}
