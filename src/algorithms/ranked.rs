//! A priority frontier shared by the ranked strategies.
//!
//! Lower ranks are expanded first. States with equal rank come out in the order
//! they were pushed.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

use crate::space::Cost;
use crate::space::State;

#[derive(Debug)]
pub struct RankedNode<St, C, R>
where
    St: State,
    C: Cost,
    R: Ord + Copy + Debug,
{
    /// The rank of this node that defines how good it is.
    pub rank: R,
    /// Insertion sequence number, breaks ties in FIFO order.
    pub seq: u64,
    pub state: St,
    pub g: C,
}

impl<St: State, C: Cost, R: Ord + Copy + Debug> RankedNode<St, C, R> {
    #[inline(always)]
    fn key(&self) -> (R, u64) {
        (self.rank, self.seq)
    }
}

impl<St: State, C: Cost, R: Ord + Copy + Debug> PartialEq for RankedNode<St, C, R> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.key().eq(&other.key())
    }
}
impl<St: State, C: Cost, R: Ord + Copy + Debug> Eq for RankedNode<St, C, R> {}

impl<St: State, C: Cost, R: Ord + Copy + Debug> PartialOrd for RankedNode<St, C, R> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<St: State, C: Cost, R: Ord + Copy + Debug> Ord for RankedNode<St, C, R> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

/// A min-heap of states keyed by `(rank, insertion sequence)`.
#[derive(Debug)]
pub struct RankedFrontier<St, C, R>
where
    St: State,
    C: Cost,
    R: Ord + Copy + Debug,
{
    open: BinaryHeap<Reverse<RankedNode<St, C, R>>>,
    next_seq: u64,
}

impl<St, C, R> RankedFrontier<St, C, R>
where
    St: State,
    C: Cost,
    R: Ord + Copy + Debug,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            open: BinaryHeap::with_capacity(256),
            next_seq: 0,
        }
    }

    #[inline(always)]
    pub fn push(&mut self, state: St, g: C, rank: R) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.open.push(Reverse(RankedNode {
            rank,
            seq,
            state,
            g,
        }));
    }

    #[inline(always)]
    pub fn pop(&mut self) -> Option<(St, C)> {
        self.open.pop().map(|Reverse(n)| (n.state, n.g))
    }

    /// The rank of the next state to pop.
    pub fn peek_rank(&self) -> Option<R> {
        self.open.peek().map(|Reverse(n)| n.rank)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.open.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

impl<St, C, R> Default for RankedFrontier<St, C, R>
where
    St: State,
    C: Cost,
    R: Ord + Copy + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
