// 一手詰め将棋問題 CLI

mod render;
mod storage;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use log::{info, warn};
use render::Diagram;
use serde::Serialize;
use std::path::PathBuf;
use storage::{NewPuzzle, PuzzleStorage};
use tsume_core::quality::{count_pieces, evaluate};
use tsume_core::{
    Board, Difficulty, GenerateError, Move, RandomConfig, RandomGenerator, ReverseConfig,
    ReverseGenerator, VerificationResult, verify,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Mate-in-1 shogi puzzle generator", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate puzzles
    Generate(GenerateArgs),

    /// Solve a position and print the verification result
    Verify {
        #[arg(long)]
        sfen: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print a diagram of a position
    Render {
        #[arg(long)]
        sfen: String,
    },

    /// Manage saved puzzles
    Puzzles {
        /// Storage directory
        #[arg(long, default_value = "puzzles")]
        dir: PathBuf,

        #[command(subcommand)]
        action: PuzzleAction,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Method {
    Reverse,
    Random,
}

#[derive(ClapArgs, Debug)]
struct GenerateArgs {
    /// Number of puzzles
    #[arg(long = "n", default_value_t = 1)]
    n: usize,

    #[arg(long, value_enum, default_value_t = Method::Reverse)]
    method: Method,

    /// Material limit for random generation (kings included)
    #[arg(long, default_value_t = 10)]
    max_pieces: usize,

    /// Seed (defaults to the clock; the chosen seed is logged)
    #[arg(long)]
    seed: Option<u64>,

    /// Accept puzzles with more than one mating move
    #[arg(long)]
    allow_multiple: bool,

    /// Attempt budget per random puzzle
    #[arg(long, default_value_t = 10000)]
    max_attempts: usize,

    /// Evaluate random attempts on all cores
    #[arg(long)]
    parallel: bool,

    /// Save generated puzzles to the storage directory
    #[arg(long)]
    save: bool,

    /// Storage directory used with --save
    #[arg(long, default_value = "puzzles")]
    dir: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum PuzzleAction {
    /// Validate and store a position
    Save {
        #[arg(long)]
        sfen: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// List stored puzzles
    List,
    /// Show one puzzle with its diagram and solution
    Show { index: usize },
    /// Delete one puzzle
    Delete { index: usize },
    /// Search by text or tag
    Search {
        query: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
}

#[derive(Serialize)]
struct PuzzleReport {
    index: usize,
    sfen: String,
    mate_moves: Vec<Move>,
    difficulty: Difficulty,
}

#[derive(Serialize)]
struct VerifyReport<'a> {
    sfen: String,
    #[serde(flatten)]
    result: &'a VerificationResult,
    difficulty: Difficulty,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    use std::io::Write;
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| {
        writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
    })
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();

    if let Err(e) = run(args.command) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Generate(args) => run_generate(args),
        Command::Verify { sfen, json } => run_verify(&sfen, json),
        Command::Render { sfen } => {
            let board = parse_sfen(&sfen)?;
            println!("{}", Diagram(&board));
            println!("\nSFEN: {}", board.to_sfen());
            Ok(())
        }
        Command::Puzzles { dir, action } => run_puzzles(&dir, action),
    }
}

fn parse_sfen(sfen: &str) -> Result<Board> {
    Board::from_sfen(sfen).with_context(|| format!("cannot parse SFEN {sfen:?}"))
}

fn clock_seed() -> u64 {
    chrono::Utc::now().timestamp_micros().unsigned_abs()
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(clock_seed);
    info!("generating {} puzzle(s), method={:?}, seed={seed}", args.n, args.method);

    let (puzzles, failure) = match args.method {
        Method::Reverse => {
            let generator = ReverseGenerator::new(ReverseConfig {
                n_problems: args.n,
                seed,
                ..ReverseConfig::default()
            })?;
            collect_partial(generator.puzzles())
        }
        Method::Random => {
            let generator = RandomGenerator::new(RandomConfig {
                n_problems: args.n,
                max_pieces: args.max_pieces,
                require_unique: !args.allow_multiple,
                seed,
                max_attempts: args.max_attempts,
            })?;
            let stream = if args.parallel {
                generator.par_puzzles()
            } else {
                generator.puzzles()
            };
            collect_partial(stream)
        }
    };

    let reports: Vec<PuzzleReport> = puzzles
        .iter()
        .enumerate()
        .map(|(i, board)| PuzzleReport {
            index: i + 1,
            sfen: board.to_sfen(),
            mate_moves: verify(board).mate_moves,
            difficulty: evaluate(board),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for (report, board) in reports.iter().zip(&puzzles) {
            print_puzzle(report, board);
        }
    }

    if args.save && !puzzles.is_empty() {
        let storage = PuzzleStorage::open(&args.dir)?;
        let method = format!("{:?}", args.method).to_lowercase();
        for board in &puzzles {
            storage.save(NewPuzzle {
                sfen: board.to_sfen(),
                name: None,
                description: format!("generated with seed {seed}"),
                author: String::new(),
                tags: vec!["generated".to_string(), method.clone()],
            })?;
        }
        info!("saved {} puzzle(s) to {}", puzzles.len(), storage.path().display());
    }

    match failure {
        Some(e) => Err(e).context("generation stopped early"),
        None => Ok(()),
    }
}

/// Puzzles up to the first error
fn collect_partial(
    iter: impl Iterator<Item = Result<Board, GenerateError>>,
) -> (Vec<Board>, Option<GenerateError>) {
    let mut puzzles = Vec::new();
    for result in iter {
        match result {
            Ok(board) => puzzles.push(board),
            Err(e) => {
                warn!("{e}");
                return (puzzles, Some(e));
            }
        }
    }
    (puzzles, None)
}

fn print_puzzle(report: &PuzzleReport, board: &Board) {
    let d = &report.difficulty;
    println!("=== Puzzle {} ===", report.index);
    println!("{}", Diagram(board));
    println!("\nSFEN: {}", report.sfen);
    println!("Difficulty score: {:.1}", d.difficulty_score);
    println!("  - Total pieces: {}", d.total_pieces);
    println!("  - Legal moves: {}", d.legal_moves);
    println!("  - Checking moves: {}", d.checking_moves);
    println!("  - Mate moves: {}", d.mate_moves);
    println!();
}

fn run_verify(sfen: &str, json: bool) -> Result<()> {
    let board = parse_sfen(sfen)?;
    let result = verify(&board);
    let difficulty = tsume_core::score(&result, count_pieces(&board));

    if json {
        let report = VerifyReport {
            sfen: board.to_sfen(),
            result: &result,
            difficulty,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Position:\n{}\n", Diagram(&board));
    println!("Verification results:");
    println!("  Is mate-in-1: {}", result.is_mate);
    println!("  Unique solution: {}", result.is_unique);
    println!("  Number of mate moves: {}", result.mate_count);
    if !result.mate_moves.is_empty() {
        println!("\nMate move(s):");
        for mv in &result.mate_moves {
            println!("  - {mv}");
        }
    }
    println!("\nStatistics:");
    println!("  Total legal moves: {}", result.total_legal_moves);
    println!("  Checking moves: {}", result.checking_moves);
    println!("  Average responses: {:.1}", result.average_responses);
    println!("  Difficulty score: {:.1}", difficulty.difficulty_score);
    Ok(())
}

fn run_puzzles(dir: &std::path::Path, action: PuzzleAction) -> Result<()> {
    let storage = PuzzleStorage::open(dir)?;
    match action {
        PuzzleAction::Save {
            sfen,
            name,
            description,
            author,
            tags,
        } => {
            let saved = storage.save(NewPuzzle {
                sfen,
                name,
                description,
                author,
                tags,
            })?;
            let index = storage.count()? - 1;
            println!("Saved #{index}: {} ({})", saved.name, saved.sfen);
        }
        PuzzleAction::List => {
            let puzzles = storage.load_all()?;
            if puzzles.is_empty() {
                println!("No saved puzzles in {}", storage.path().display());
            }
            for (i, p) in puzzles.iter().enumerate() {
                println!("{i:>3}  {}  [{}]  {}", p.name, p.tags.join(", "), p.sfen);
            }
        }
        PuzzleAction::Show { index } => {
            let puzzle = storage
                .get(index)?
                .with_context(|| format!("no puzzle at index {index}"))?;
            let board = parse_sfen(&puzzle.sfen)?;
            println!("#{index} {}", puzzle.name);
            if !puzzle.author.is_empty() {
                println!("Author: {}", puzzle.author);
            }
            if !puzzle.description.is_empty() {
                println!("{}", puzzle.description);
            }
            println!("Created: {}", puzzle.created_at);
            println!("{}", Diagram(&board));
            let result = verify(&board);
            let solution: Vec<String> = result.mate_moves.iter().map(|m| m.to_string()).collect();
            println!("\nSFEN: {}", puzzle.sfen);
            if solution.is_empty() {
                println!("Mate move(s): none");
            } else {
                println!("Mate move(s): {}", solution.join(" "));
            }
        }
        PuzzleAction::Delete { index } => {
            if storage.delete(index)? {
                println!("Deleted #{index}");
            } else {
                anyhow::bail!("no puzzle at index {index}");
            }
        }
        PuzzleAction::Search { query, tags } => {
            let hits = storage.search(query.as_deref().unwrap_or(""), &tags)?;
            if hits.is_empty() {
                println!("No matching puzzles");
            }
            for (i, p) in hits {
                println!("{i:>3}  {}  [{}]  {}", p.name, p.tags.join(", "), p.sfen);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_and_sequential_keep_the_same_puzzles() {
        for seed in [2, 8] {
            let generator = RandomGenerator::new(RandomConfig {
                n_problems: 10,
                max_pieces: 8,
                max_attempts: 30,
                seed,
                ..RandomConfig::default()
            })
            .unwrap();
            let (sequential, seq_failure) = collect_partial(generator.puzzles());
            let (parallel, par_failure) = collect_partial(generator.par_puzzles());
            assert_eq!(parallel, sequential);
            assert_eq!(par_failure, seq_failure);
            if let Some(GenerateError::Exhausted { found, .. }) = par_failure {
                assert_eq!(found, parallel.len());
            }
        }
    }
}
