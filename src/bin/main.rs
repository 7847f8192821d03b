use std::io::Write;
use std::path::PathBuf;

use anstream::println;
use clap::Parser;
use owo_colors::OwoColorize;
use thousands::Separable;

use maze_search::algorithms::Algorithm;
use maze_search::graph::Graph;
use maze_search::graph::Outcome;
use maze_search::problem::Problem;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Searches a maze and shows how the search went
#[derive(Parser, Debug)]
#[clap(long_version = maze_search::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Search strategy: bfs, dfs, random, greedy or astar
    #[arg(env = "MAZE_ALGORITHM")]
    pub algorithm: Algorithm,

    /// Maze file
    #[arg()]
    pub maze: PathBuf,

    /// Seed for the random search, fresh on every run when unset
    #[arg(long, env = "MAZE_SEED")]
    pub seed: Option<u64>,

    /// Run every strategy on the maze and compare them
    #[arg(long)]
    pub compare: bool,

    /// Print the order cells were visited in and what each one opened
    #[arg(long)]
    pub trace: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

fn print_maze(graph: &Graph) {
    for line in graph.to_string().lines() {
        let mut colored = String::with_capacity(line.len() * 4);
        for c in line.chars() {
            let cell = match c {
                'S' => c.green().bold().to_string(),
                'G' => c.red().bold().to_string(),
                '*' => c.yellow().to_string(),
                '.' => c.blue().to_string(),
                'x' => '█'.dimmed().to_string(),
                _ => c.to_string(),
            };
            colored.push_str(&cell);
        }
        println!("{colored}");
    }
}

fn print_trace(graph: &Graph) {
    let view = graph.view();
    println!("{}", "Visited in order".bold());
    for (i, s) in view.visited_in_order().iter().enumerate() {
        let opened = view.opened_by(s);
        if opened.is_empty() {
            println!("{i:>6} {s}");
        } else {
            let opened: Vec<_> = opened.iter().map(ToString::to_string).collect();
            println!("{i:>6} {s} -> {}", opened.join(" "));
        }
    }
}

fn compare(graph: &mut Graph) {
    println!(
        "| {:10} | {:8} | {:>10} | {:>10} |",
        "Algorithm".bold(),
        "Outcome".bold(),
        "Visited".bold(),
        "Path".bold()
    );
    for algorithm in Algorithm::ALL {
        let outcome = graph.set_up(Some(algorithm));
        let view = graph.view();
        let outcome = match outcome {
            Outcome::NoPath => format!("{:8}", outcome.to_string()).red().to_string(),
            _ => format!("{:8}", outcome.to_string()).green().to_string(),
        };
        println!(
            "| {:10} | {} | {:>10} | {:>10} |",
            algorithm.to_string(),
            outcome,
            view.visited_in_order().len().separate_with_commas(),
            view.path().len().separate_with_commas(),
        );
    }
}

fn main() -> maze_search::Result<()> {
    let args = Args::parse();
    args.color.write_global();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut graph = Graph::from_path(args.algorithm, &args.maze)?;
    if let Some(seed) = args.seed {
        graph = graph.with_seed(seed);
    }
    log::info!("Loaded {:?} from {:?}", graph.problem().space(), args.maze);

    if args.compare {
        compare(&mut graph);
        return Ok(());
    }

    let outcome = graph.set_up(None);
    print_maze(&graph);
    if args.trace {
        print_trace(&graph);
    }

    let mut out = anstream::stdout().lock();
    match outcome {
        Outcome::NoPath => writeln!(out, "{}", "No path found".red())?,
        Outcome::Trivial => writeln!(out, "{}", "Start is the end".yellow())?,
        Outcome::Found | Outcome::NotRun => {}
    }
    graph.write_path_info(&mut out)?;
    out.flush()?;

    Ok(())
}
