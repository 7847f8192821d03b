use crate::space::Cost;
use crate::space::Space;
use crate::space::State;

/// A single-start, single-goal search problem over a Space.
pub trait Problem<Sp, St>: std::fmt::Debug
where
    Sp: Space<St>,
    St: State,
{
    fn space(&self) -> &Sp;
    fn start(&self) -> St;
    fn end(&self) -> St;

    /// Whether the start already is the goal, so there's nothing to search.
    fn is_trivial(&self) -> bool {
        self.start() == self.end()
    }
}

/// A heuristic estimating the cost between two states.
pub trait ObjectiveHeuristic<St, C>: std::fmt::Debug
where
    St: State,
    C: Cost,
{
    fn h(a: &St, b: &St) -> C;
}
