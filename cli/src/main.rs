use std::time::Instant;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::eyre;
use itertools::Itertools;
use owo_colors::OwoColorize;
use pocket_core::{cube::Cube, move_set::MoveSet};
use pocket_solver::{
    backtrack::BacktrackSolver,
    best_first::BestFirstSolver,
    graph::{FrontierDiscipline, GraphSolver},
    report::{SearchReport, Solution},
};

/// Searches the pocket cube state space for solving move sequences
#[derive(Parser)]
#[command(version, about)]
enum Commands {
    /// Solve a configuration and print the trace that reaches the goal
    Solve {
        /// 24 color symbols (W R G Y O B) in any whitespace grouping, or `-` for the default scramble
        config: Option<String>,
        /// Search strategy to run
        #[arg(long, value_enum, default_value = "bfs")]
        strategy: Strategy,
        /// Stop backtracking instead of escalating the depth bound past this many moves
        #[arg(long)]
        max_bound: Option<usize>,
    },
    /// Print a configuration as a flattened net
    Show {
        /// 24 color symbols, or `-` for the default scramble
        config: Option<String>,
    },
    /// List the built-in move table
    Rules,
    /// Apply random moves to the solved cube and print the result
    Scramble {
        /// How many random moves to apply
        #[arg(long, default_value_t = 11)]
        moves: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    /// Breadth-first over the state graph
    Bfs,
    /// Depth-first over the state graph
    Dfs,
    /// Greedy best-first, ranked by face disorder
    BestFirst,
    /// Iterative-deepening backtracking
    Backtrack,
}

/// The configuration used when none is given: a fixed mixed layout pushed
/// three quarter turns farther.
const DEFAULT_SCRAMBLE_BASE: &str = "GRGR YYYY OGOG BOBO WWWW BRBR";
const DEFAULT_SCRAMBLE_MOVES: [&str; 3] = ["D", "F", "B"];

fn main() -> color_eyre::Result<()> {
    pretty_env_logger::init();
    let args = Commands::parse();
    let moves = MoveSet::pocket_cube();

    match args {
        Commands::Solve {
            config,
            strategy,
            max_bound,
        } => {
            let root = initial_cube(&moves, config.as_deref())?;
            println!("Solving {root}");
            let start = Instant::now();
            match strategy {
                Strategy::Bfs => {
                    let report = GraphSolver::new(&moves, FrontierDiscipline::Fifo).solve(root);
                    print_search(&report, start);
                }
                Strategy::Dfs => {
                    let report = GraphSolver::new(&moves, FrontierDiscipline::Lifo).solve(root);
                    print_search(&report, start);
                }
                Strategy::BestFirst => {
                    let report = BestFirstSolver::new(&moves).solve(root);
                    print_search(&report, start);
                }
                Strategy::Backtrack => {
                    let mut solver = BacktrackSolver::new(&moves);
                    if let Some(bound) = max_bound {
                        solver = solver.with_max_bound(bound);
                    }
                    let report = solver.solve(root)?;
                    println!(
                        "{} at bound {} in {:.3}s",
                        "SOLVED".green(),
                        report.bound,
                        start.elapsed().as_secs_f64()
                    );
                    print_solution(&report.solution);
                    println!(
                        "{} calls, {} cycle prunes, {} bound prunes, {} dead ends",
                        report.stats.calls,
                        report.stats.cycle_prunes,
                        report.stats.bound_prunes,
                        report.stats.dead_ends
                    );
                }
            }
        }
        Commands::Show { config } => {
            let cube = initial_cube(&moves, config.as_deref())?;
            print!("{}", cube.grid());
        }
        Commands::Rules => {
            for mv in moves.moves() {
                println!("{:>2}: {:?}", mv.name(), mv.permutation().mapping());
            }
        }
        Commands::Scramble { moves: count } => {
            let mut cube = Cube::solved();
            let mut names = Vec::with_capacity(count);
            let mut previous: Option<usize> = None;
            while names.len() < count {
                let pick = fastrand::usize(..moves.len());
                // Skip a move that would undo the one before it.
                if previous.is_some_and(|last| moves.inverse_of(last) == Some(pick)) {
                    continue;
                }
                cube = cube.apply(&moves.moves()[pick]);
                names.push(moves.moves()[pick].name());
                previous = Some(pick);
            }
            println!("Scramble: {}", names.iter().join(" "));
            println!("{cube}");
            print!("{}", cube.grid());
        }
    }

    Ok(())
}

/// Parses `config`, or builds the default scramble when it is absent or
/// the `-` placeholder.
fn initial_cube(moves: &MoveSet, config: Option<&str>) -> color_eyre::Result<Cube> {
    match config {
        Some(text) if text != "-" => Ok(text.parse()?),
        _ => {
            let base: Cube = DEFAULT_SCRAMBLE_BASE.parse()?;
            moves
                .apply_all(base, DEFAULT_SCRAMBLE_MOVES)
                .ok_or_else(|| eyre!("The built-in table is missing a default scramble move"))
        }
    }
}

fn print_search(report: &SearchReport, start: Instant) {
    match report.outcome.solution() {
        Some(solution) => {
            println!(
                "{} in {} moves after {:.3}s",
                "SOLVED".green(),
                solution.len(),
                start.elapsed().as_secs_f64()
            );
            print_solution(solution);
        }
        None => println!(
            "{} after {:.3}s, the goal is not reachable",
            "EXHAUSTED".red(),
            start.elapsed().as_secs_f64()
        ),
    }
    println!(
        "{} nodes generated, {} expanded",
        report.stats.generated, report.stats.expanded
    );
}

fn print_solution(solution: &Solution) {
    if solution.is_empty() {
        println!("Already solved");
        return;
    }
    println!("Moves: {solution}");
    for state in solution.states() {
        println!("  {state}");
    }
}
