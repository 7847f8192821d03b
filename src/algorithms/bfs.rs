//! Breadth-first search.
//!
//! Expands states in discovery order, so on unit-cost spaces the first path
//! found to any state is a shortest one.

use std::collections::VecDeque;

use crate::search::Frontier;
use crate::space::Cost;
use crate::space::State;

/// A FIFO queue.
#[derive(Debug)]
pub struct BfsFrontier<St, C>
where
    St: State,
    C: Cost,
{
    queue: VecDeque<(St, C)>,
}

impl<St, C> BfsFrontier<St, C>
where
    St: State,
    C: Cost,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: VecDeque::with_capacity(256),
        }
    }
}

impl<St, C> Default for BfsFrontier<St, C>
where
    St: State,
    C: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<St, C> Frontier<St, C> for BfsFrontier<St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    fn push(&mut self, s: St, g: C) {
        self.queue.push_back((s, g));
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<(St, C)> {
        self.queue.pop_front()
    }
    fn len(&self) -> usize {
        self.queue.len()
    }
}
