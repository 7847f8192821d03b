use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use glob::glob;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use maze_search::algorithms::Algorithm;
use maze_search::algorithms::run;
use maze_search::problem::Problem;
use maze_search::problems::maze_2d::Maze2DCost;
use maze_search::problems::maze_2d::Maze2DHeuristicManhattan;
use maze_search::problems::maze_2d::Maze2DProblem;

fn search(algorithm: Algorithm, problem: &Maze2DProblem) -> usize {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let run = run::<Maze2DHeuristicManhattan, _, _, _, Maze2DCost, _>(algorithm, problem, &mut rng);
    run.trace.len()
}

fn compare_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Maze2D Search");

    for path in glob("data/mazes/*.txt")
        .unwrap()
        .filter_map(std::result::Result::ok)
    {
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        let problem = Maze2DProblem::try_from(path.as_path()).unwrap();
        let (x, y) = problem.space().dimensions();
        let instance_name = format!("{name}[{x}x{y}]");

        for algorithm in Algorithm::ALL {
            group.bench_with_input(
                BenchmarkId::new(algorithm.to_string(), &instance_name),
                &problem,
                |b, p| b.iter(|| search(algorithm, p)),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, compare_search);
criterion_main!(benches);
