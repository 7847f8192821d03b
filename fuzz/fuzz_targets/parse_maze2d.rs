#![no_main]

use libfuzzer_sys::fuzz_target;

use maze_search::algorithms::Algorithm;
use maze_search::graph::Graph;
use maze_search::problems::maze_2d::Maze2DProblem;

fuzz_target!(|data: &str| {
    // Whatever parses must also be searchable.
    if let Ok(problem) = Maze2DProblem::try_from(data) {
        let mut graph = Graph::new(problem, Algorithm::Bfs).with_seed(0);
        graph.set_up(None);
    }
});
