//! Depth-first search.
//!
//! Expands the most recently discovered state first. States are still marked
//! when discovered, so each one is opened by a single parent.

use crate::search::Frontier;
use crate::space::Cost;
use crate::space::State;

/// A LIFO stack.
#[derive(Debug)]
pub struct DfsFrontier<St, C>
where
    St: State,
    C: Cost,
{
    stack: Vec<(St, C)>,
}

impl<St, C> DfsFrontier<St, C>
where
    St: State,
    C: Cost,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: Vec::with_capacity(256),
        }
    }
}

impl<St, C> Default for DfsFrontier<St, C>
where
    St: State,
    C: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<St, C> Frontier<St, C> for DfsFrontier<St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    fn push(&mut self, s: St, g: C) {
        self.stack.push((s, g));
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<(St, C)> {
        self.stack.pop()
    }
    fn len(&self) -> usize {
        self.stack.len()
    }
}
