//! Implementation of search algorithms.
//!
//! These algorithms can do path-finding on generic search problems. All of
//! them share [`crate::search::traverse`] and only bring their own frontier.

use std::str::FromStr;

use derive_more::Display;
use rand::Rng;
use thiserror::Error;

use crate::problem::ObjectiveHeuristic;
use crate::problem::Problem;
use crate::search::SearchRun;
use crate::search::traverse;
use crate::space::Cost;
use crate::space::Space;
use crate::space::State;

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod greedy;
pub mod random;
pub mod ranked;

use astar::AStarFrontier;
use bfs::BfsFrontier;
use dfs::DfsFrontier;
use greedy::GreedyFrontier;
use random::RandomFrontier;

/// The available search strategies.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Algorithm {
    #[display("bfs")]
    Bfs,
    #[display("dfs")]
    Dfs,
    #[display("random")]
    Random,
    #[display("greedy")]
    Greedy,
    #[display("astar")]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Random,
        Algorithm::Greedy,
        Algorithm::AStar,
    ];

    /// Whether two runs over the same problem always record the same trace.
    pub fn is_deterministic(&self) -> bool {
        *self != Algorithm::Random
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown algorithm '{token}', expected one of bfs, dfs, random, greedy, astar")]
pub struct UnknownAlgorithmError {
    pub token: String,
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| s.eq_ignore_ascii_case(&a.to_string()))
            .ok_or_else(|| UnknownAlgorithmError {
                token: s.to_string(),
            })
    }
}

/// Runs `algorithm` on `problem`.
///
/// `OH` ranks states for the informed strategies, and `rng` is only drawn
/// from by [`Algorithm::Random`].
pub fn run<OH, P, Sp, St, C, R>(algorithm: Algorithm, problem: &P, rng: &mut R) -> SearchRun<St>
where
    OH: ObjectiveHeuristic<St, C>,
    P: Problem<Sp, St>,
    Sp: Space<St>,
    St: State,
    C: Cost,
    R: Rng,
{
    let space = problem.space();
    let start = problem.start();
    let end = problem.end();

    match algorithm {
        Algorithm::Bfs => traverse(space, start, end, &mut BfsFrontier::<St, C>::new()),
        Algorithm::Dfs => traverse(space, start, end, &mut DfsFrontier::<St, C>::new()),
        Algorithm::Random => traverse(space, start, end, &mut RandomFrontier::<St, C, R>::new(rng)),
        Algorithm::Greedy => traverse(space, start, end, &mut GreedyFrontier::<OH, St, C>::new(end)),
        Algorithm::AStar => traverse(space, start, end, &mut AStarFrontier::<OH, St, C>::new(end)),
    }
}
