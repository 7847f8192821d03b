//! A maze together with the result of searching it.
//!
//! [`Graph`] owns the parsed problem, the selected [`Algorithm`] and the
//! artifacts recorded by the last run, so they can be replayed at leisure
//! through a [`GraphView`].

use derive_more::Display;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use thousands::Separable;

use crate::algorithms;
use crate::algorithms::Algorithm;
use crate::problem::Problem;
use crate::problems::maze_2d::Maze2DCell;
use crate::problems::maze_2d::Maze2DCost;
use crate::problems::maze_2d::Maze2DHeuristicManhattan;
use crate::problems::maze_2d::Maze2DProblem;
use crate::problems::maze_2d::Maze2DSpace;
use crate::problems::maze_2d::Maze2DState;
use crate::search::Trace;
use crate::space::Neighbours;
use crate::space::Path;
use crate::space::Space;

/// How the last run ended.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Nothing ran since construction or the last reset.
    #[display("not run")]
    NotRun,
    /// Start and end are the same cell, there was nothing to search.
    #[display("trivial")]
    Trivial,
    #[display("found")]
    Found,
    /// The search exhausted every reachable cell without finding the end.
    #[display("no path")]
    NoPath,
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        *self != Outcome::NotRun
    }
}

#[derive(Debug)]
pub struct Graph {
    problem: Maze2DProblem,
    algorithm: Algorithm,
    /// Seed for [`Algorithm::Random`], drawn from the thread RNG when unset.
    seed: Option<u64>,

    trace: Trace<Maze2DState>,
    path: Path<Maze2DState>,
    outcome: Outcome,
}

impl Graph {
    pub fn new(problem: Maze2DProblem, algorithm: Algorithm) -> Self {
        Self {
            problem,
            algorithm,
            seed: None,
            trace: Trace::new(),
            path: Path::empty(),
            outcome: Outcome::NotRun,
        }
    }

    /// Loads the maze at `p`.
    pub fn from_path(algorithm: Algorithm, p: &std::path::Path) -> crate::Result<Self> {
        let problem = Maze2DProblem::try_from(p)?;
        Ok(Self::new(problem, algorithm))
    }

    /// Makes random searches reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn problem(&self) -> &Maze2DProblem {
        &self.problem
    }
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Runs the search, optionally switching to another algorithm first.
    ///
    /// Results from a previous run are dropped before searching. When start
    /// and end are the same cell nothing runs, the algorithm is left as it
    /// was and the outcome is [`Outcome::Trivial`].
    pub fn set_up(&mut self, algorithm: Option<Algorithm>) -> Outcome {
        self.reset();

        if self.problem.is_trivial() {
            log::debug!("Start and end are both {}, skipping search", self.problem.start());
            self.outcome = Outcome::Trivial;
            return self.outcome;
        }

        if let Some(algorithm) = algorithm {
            self.algorithm = algorithm;
        }

        log::debug!(
            "Running {} from {} to {}",
            self.algorithm,
            self.problem.start(),
            self.problem.end()
        );
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        let run = algorithms::run::<Maze2DHeuristicManhattan, _, _, _, Maze2DCost, _>(
            self.algorithm,
            &self.problem,
            &mut rng,
        );

        self.trace = run.trace;
        (self.path, self.outcome) = match run.path {
            Some(path) => (path, Outcome::Found),
            None => (Path::empty(), Outcome::NoPath),
        };
        log::debug!(
            "{} {}: {} visited, {} expanded, {}",
            self.algorithm,
            self.outcome,
            self.trace.len(),
            run.expanded,
            self.path
        );

        self.outcome
    }

    /// Drops the results of the last run.
    pub fn reset(&mut self) {
        self.trace.clear();
        self.path = Path::empty();
        self.outcome = Outcome::NotRun;
    }

    /// The traversable neighbours of `s`, left, right, up and down.
    pub fn adjacent(&self, s: &Maze2DState) -> Neighbours<Maze2DState> {
        self.problem.space().adjacent(s)
    }

    pub fn view(&self) -> GraphView<'_> {
        GraphView { graph: self }
    }

    /// Writes how many cells were opened and how long the path is.
    pub fn write_path_info<W: std::io::Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(
            w,
            "Opened vertices: {}",
            self.trace.len().separate_with_commas()
        )?;
        writeln!(w, "Path length: {}", self.path.len().separate_with_commas())
    }
}

/// Renders the maze with the last run overlaid.
///
/// `S` and `G` mark the start and end, `*` the path and `.` every other
/// visited cell. Walls are `x` and trees `#`.
impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let start = self.problem.start();
        let end = self.problem.end();
        let on_path: FxHashSet<_> = self.path.states().iter().collect();
        let visited: FxHashSet<_> = self.trace.visited_in_order().iter().collect();

        for (y, row) in self.problem.space().rows().iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let Some(s) = Maze2DState::new_from_usize(x, y) else {
                    continue;
                };
                let c = if s == start {
                    'S'
                } else if s == end {
                    'G'
                } else if on_path.contains(&s) {
                    '*'
                } else if visited.contains(&s) {
                    '.'
                } else {
                    match cell {
                        Maze2DCell::Wall => 'x',
                        Maze2DCell::Empty => ' ',
                        Maze2DCell::Tree => '#',
                    }
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "Start: ({}, {})", start.x(), start.y())?;
        write!(f, "End: ({}, {})", end.x(), end.y())
    }
}

/// Read-only access to a [`Graph`] and its last run, for replaying it.
#[derive(Copy, Clone, Debug)]
pub struct GraphView<'g> {
    graph: &'g Graph,
}

impl<'g> GraphView<'g> {
    pub fn grid(&self) -> &'g Maze2DSpace {
        self.graph.problem.space()
    }
    pub fn start(&self) -> Maze2DState {
        self.graph.problem.start()
    }
    pub fn end(&self) -> Maze2DState {
        self.graph.problem.end()
    }
    pub fn algorithm(&self) -> Algorithm {
        self.graph.algorithm
    }
    pub fn outcome(&self) -> Outcome {
        self.graph.outcome
    }

    /// Cells in the order they were first discovered, start first.
    pub fn visited_in_order(&self) -> &'g [Maze2DState] {
        self.graph.trace.visited_in_order()
    }
    /// For each cell, the cells it discovered.
    pub fn opened(&self) -> &'g FxHashMap<Maze2DState, Vec<Maze2DState>> {
        self.graph.trace.opened()
    }
    pub fn opened_by(&self, s: &Maze2DState) -> &'g [Maze2DState] {
        self.graph.trace.opened_by(s)
    }
    /// The path from start to end, empty when none was found.
    pub fn path(&self) -> &'g [Maze2DState] {
        self.graph.path.states()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    fn s(x: u32, y: u32) -> Maze2DState {
        Maze2DState::new(x, y).unwrap()
    }

    fn graph(maze_str: &str, algorithm: Algorithm) -> Graph {
        Graph::new(Maze2DProblem::try_from(maze_str).unwrap(), algorithm)
    }

    const OPEN_3X3: &str = "   \n   \n   \nstart 0, 0\nend 2, 2\n";

    const ENCLOSED_END: &str = indoc! {"
        xxxxxxx
        x     x
        x xxx x
        x x x x
        x xxx x
        x     x
        xxxxxxx
        start 1, 1
        end 3, 3
    "};

    #[test]
    fn not_run_until_set_up() {
        let graph = graph(OPEN_3X3, Algorithm::Bfs);
        let view = graph.view();

        assert_eq!(view.outcome(), Outcome::NotRun);
        assert!(!view.outcome().is_completed());
        assert!(view.visited_in_order().is_empty());
        assert!(view.opened().is_empty());
        assert!(view.path().is_empty());
    }

    #[test]
    fn bfs_3x3() {
        let mut graph = graph(OPEN_3X3, Algorithm::Bfs);
        assert_eq!(graph.set_up(None), Outcome::Found);

        let view = graph.view();
        assert_eq!(view.path(), &[s(0, 0), s(1, 0), s(2, 0), s(2, 1), s(2, 2)]);
        assert_eq!(view.visited_in_order().len(), 9);
        assert_eq!(view.visited_in_order()[0], view.start());
        assert_eq!(view.opened_by(&s(0, 0)), &[s(1, 0), s(0, 1)]);
    }

    #[test]
    fn switching_algorithms() {
        let mut graph = graph(OPEN_3X3, Algorithm::Bfs);
        graph.set_up(None);
        let bfs_visited = graph.view().visited_in_order().to_vec();

        assert_eq!(graph.set_up(Some(Algorithm::Dfs)), Outcome::Found);
        assert_eq!(graph.algorithm(), Algorithm::Dfs);
        assert_eq!(
            graph.view().path(),
            &[s(0, 0), s(0, 1), s(0, 2), s(1, 2), s(2, 2)]
        );
        // Nothing from the bfs run is left behind.
        assert_ne!(graph.view().visited_in_order(), bfs_visited.as_slice());
        assert_eq!(graph.view().visited_in_order().len(), 7);
        assert!(graph.view().opened_by(&s(1, 0)).is_empty());
    }

    #[test]
    fn reset_then_rerun_is_identical() {
        let maze_str = indoc! {"
            x       x
              xx x
            x  x  x x
                 x
            start 0, 1
            end 4, 3
        "};

        for algorithm in Algorithm::ALL {
            let mut graph = graph(maze_str, algorithm).with_seed(1234);
            graph.set_up(None);
            let first_visited = graph.view().visited_in_order().to_vec();
            let first_opened = graph.view().opened().clone();
            let first_path = graph.view().path().to_vec();

            graph.reset();
            assert_eq!(graph.outcome(), Outcome::NotRun);
            assert!(graph.view().visited_in_order().is_empty());

            graph.set_up(None);
            assert_eq!(graph.view().visited_in_order(), first_visited, "{algorithm}");
            assert_eq!(graph.view().opened(), &first_opened, "{algorithm}");
            assert_eq!(graph.view().path(), first_path, "{algorithm}");
        }
    }

    #[test]
    fn reset_is_idempotent() {
        let mut graph = graph(OPEN_3X3, Algorithm::Greedy);
        graph.set_up(None);
        graph.reset();
        graph.reset();
        assert_eq!(graph.outcome(), Outcome::NotRun);
        assert!(graph.view().path().is_empty());
        assert!(graph.view().opened().is_empty());
    }

    #[test]
    fn start_is_end() {
        for algorithm in Algorithm::ALL {
            let mut graph = graph("   \n   \nstart 1, 1\nend 1, 1\n", algorithm);
            assert_eq!(graph.set_up(None), Outcome::Trivial);

            let view = graph.view();
            assert!(view.outcome().is_completed());
            assert!(view.visited_in_order().is_empty());
            assert!(view.opened().is_empty());
            assert!(view.path().is_empty());
        }
    }

    #[test]
    fn start_is_end_keeps_the_algorithm() {
        let mut graph = graph("   \n   \nstart 1, 1\nend 1, 1\n", Algorithm::Bfs);
        assert_eq!(graph.set_up(Some(Algorithm::Dfs)), Outcome::Trivial);
        assert_eq!(graph.algorithm(), Algorithm::Bfs);
        assert_eq!(graph.view().algorithm(), Algorithm::Bfs);
    }

    #[test]
    fn enclosed_end() {
        for algorithm in Algorithm::ALL {
            let mut graph = graph(ENCLOSED_END, algorithm).with_seed(7);
            assert_eq!(graph.set_up(None), Outcome::NoPath, "{algorithm}");

            let view = graph.view();
            assert!(view.outcome().is_completed());
            assert!(view.path().is_empty());
            // The whole ring around the enclosure.
            assert_eq!(view.visited_in_order().len(), 16, "{algorithm}");
        }
    }

    #[test]
    fn adjacent_cells() {
        let graph = graph(ENCLOSED_END, Algorithm::Bfs);
        assert_eq!(graph.adjacent(&s(1, 1)).as_slice(), &[s(2, 1), s(1, 2)]);
        assert!(graph.adjacent(&s(3, 3)).is_empty());
    }

    #[test]
    fn path_info() {
        let mut graph = graph(OPEN_3X3, Algorithm::AStar);
        graph.set_up(None);

        let mut out = vec![];
        graph.write_path_info(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Opened vertices: 7\nPath length: 5\n"
        );
    }

    #[test]
    fn display_overlay() {
        let mut graph = graph("    \n xx \n    \nstart 0, 0\nend 3, 2\n", Algorithm::Bfs);
        assert_eq!(
            graph.to_string(),
            "S   \n xx \n   G\nStart: (0, 0)\nEnd: (3, 2)"
        );

        graph.set_up(None);
        assert_eq!(
            graph.to_string(),
            "S***\n.xx*\n...G\nStart: (0, 0)\nEnd: (3, 2)"
        );
    }

    fn fixture(name: &str, algorithm: Algorithm) -> Graph {
        let p = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("data/mazes")
            .join(name);
        Graph::from_path(algorithm, &p).unwrap().with_seed(0)
    }

    #[test]
    fn perfect_maze_has_a_single_path() {
        for algorithm in Algorithm::ALL {
            let mut graph = fixture("perfect.txt", algorithm);
            assert_eq!(graph.set_up(None), Outcome::Found, "{algorithm}");
            assert_eq!(graph.view().path().len(), 145, "{algorithm}");
        }
    }

    #[test]
    fn rooms_maze() {
        let path_len = |algorithm: Algorithm| {
            let mut graph = fixture("rooms.txt", algorithm);
            assert_eq!(graph.set_up(None), Outcome::Found, "{algorithm}");
            assert!(graph.problem().space().valid_path(&graph.path));
            graph.view().path().len()
        };

        assert_eq!(path_len(Algorithm::Bfs), 40);
        assert_eq!(path_len(Algorithm::AStar), 40);
        assert_eq!(path_len(Algorithm::Greedy), 40);
        assert_eq!(path_len(Algorithm::Dfs), 150);
        assert!(path_len(Algorithm::Random) >= 40);
    }

    #[test]
    fn enclosed_maze() {
        for algorithm in Algorithm::ALL {
            let mut graph = fixture("enclosed.txt", algorithm);
            assert_eq!(graph.set_up(None), Outcome::NoPath, "{algorithm}");
            assert_eq!(graph.view().visited_in_order().len(), 24, "{algorithm}");
        }
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Graph::from_path(Algorithm::Bfs, &dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidInput(_)));
    }
}
