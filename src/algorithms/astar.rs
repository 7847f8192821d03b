//! A* search.
//!
//! Expands states by `f = g + h`, where `g` is the number of steps taken from
//! the start and `h` the heuristic estimate to the goal.
//!
//! States still in the frontier are re-pushed when reached through a cheaper
//! path, so with a consistent heuristic the path found is a shortest one.

use std::marker::PhantomData;

use crate::algorithms::ranked::RankedFrontier;
use crate::problem::ObjectiveHeuristic;
use crate::search::Frontier;
use crate::space::Cost;
use crate::space::State;

/// The ranking tuple for A*
///
/// We prefer better f-values, and tie break for lower h.
///
/// Intuition around higher g-value might be slightly easier, but keeping the
/// raw h value avoids having to store g in the rank too.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AStarRank<C: Cost> {
    f: C,
    h: C,
}

impl<C> AStarRank<C>
where
    C: Cost,
{
    pub fn new(g: C, h: C) -> Self {
        Self {
            f: g.saturating_add(&h),
            h,
        }
    }

    #[inline(always)]
    pub fn f(&self) -> C {
        self.f
    }
    #[inline(always)]
    pub fn h(&self) -> C {
        self.h
    }
}

#[derive(Debug)]
pub struct AStarFrontier<OH, St, C>
where
    OH: ObjectiveHeuristic<St, C>,
    St: State,
    C: Cost,
{
    open: RankedFrontier<St, C, AStarRank<C>>,
    goal: St,
    _phantom_heuristic: PhantomData<OH>,
}

impl<OH, St, C> AStarFrontier<OH, St, C>
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

impl<OH, St, C> Frontier<St, C> for AStarFrontier<OH, St, C>
where
    OH: ObjectiveHeuristic<St, C>,
    St: State,
    C: Cost,
{
    #[inline(always)]
    fn push(&mut self, s: St, g: C) {
        let h = OH::h(&s, &self.goal);
        self.open.push(s, g, AStarRank::new(g, h));
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<(St, C)> {
        self.open.pop()
    }
    fn len(&self) -> usize {
        self.open.len()
    }

    const IMPROVES_PATHS: bool = true;
}
