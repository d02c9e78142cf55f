use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use ricochet::{Difficulty, Direction, Game, Layout};

/// Generate, solve and replay ricochet puzzles.
///
/// Layouts on stdin are ASCII drawings: `+` corners, `-` and `|` walls,
/// `S` start, `G` goal, `1` and `2` the collectibles.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a random puzzle that is solvable within the difficulty's move band
    Generate {
        /// Difficulty level for the puzzle
        #[arg(value_enum, short, long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,

        /// Seed for a reproducible puzzle, random if not given
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the puzzle as JSON instead of a drawing
        #[arg(short, long, default_value_t = false)]
        json: bool,
    },

    /// Read a layout from stdin and print an optimal solution
    Solve,

    /// Read a layout from stdin and play a string of moves like `ESWN` on it
    Play { moves: String },
}

fn read_layout() -> Result<Layout> {
    Layout::read(&mut std::io::stdin().lock())
}

fn stringify_path(path: &[Direction]) -> String {
    path.iter().map(|d| char::from(*d)).collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Generate {
            difficulty,
            seed,
            json,
        } => {
            let seed = seed.unwrap_or_else(rand::random);
            log::info!("Generating a {difficulty} puzzle with seed {seed}");

            let game = Game::generate(difficulty, &mut StdRng::seed_from_u64(seed));
            let puzzle = game.puzzle();

            if json {
                println!("{}", serde_json::to_string_pretty(puzzle)?);
                return Ok(());
            }

            println!("{}", puzzle.layout);
            match puzzle.optimal_moves {
                Some(moves) => println!("Optimal: {moves} moves"),
                None => println!("Optimal: unknown"),
            }
            if puzzle.from_fallback {
                println!("Fallback puzzle after {} attempts", puzzle.attempts);
                if !puzzle.fits(difficulty) {
                    println!(
                        "Note: the fallback is outside the {difficulty} band of {:?} moves",
                        difficulty.band()
                    );
                }
            } else {
                println!("Found on attempt {}", puzzle.attempts);
            }
        }

        Command::Solve => {
            let game = Game::new(read_layout()?);
            log::info!("Initial state:\n{}", game.stringify());

            let path = game
                .solution_path()
                .ok_or_else(|| anyhow!("No solution found"))?;
            println!("{}", stringify_path(&path));
        }

        Command::Play { moves } => {
            let mut game = Game::new(read_layout()?);

            for direction in Direction::parse_moves(&moves)? {
                let result = game.apply_move(direction);
                if !result.moved {
                    log::warn!("{direction} did nothing: {:?}", result.rejected);
                }
                log::info!("After {direction}:\n{}", game.stringify());
            }

            println!("{}", game.stringify());
            if !game.state().won() {
                if let Some(direction) = game.hint() {
                    println!("Hint: {direction}");
                }
                bail!("Puzzle not solved after {} moves", game.state().moves());
            }
        }
    }

    Ok(())
}
