//! Command-line front end: perft, divide, board display and search.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rampart_core::{Board, Move, STARTING_FEN, divide, perft, san};
use rampart_engine::{SearchConfig, SearchLimits, SearchReport, Searcher, spawn_search};
use tracing::{debug, info};

/// How often the foreground checks on a background search.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Parser)]
#[command(name = "rampart", version, about = "Chess move generation and search")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count leaf nodes of the legal move tree.
    Perft {
        #[command(flatten)]
        position: PositionArgs,
        /// Tree depth in plies.
        #[arg(short, long, default_value_t = 4)]
        depth: usize,
    },
    /// Perft broken down by root move.
    Divide {
        #[command(flatten)]
        position: PositionArgs,
        /// Tree depth in plies.
        #[arg(short, long, default_value_t = 3)]
        depth: usize,
    },
    /// Print the board, its FEN and hash.
    Show {
        #[command(flatten)]
        position: PositionArgs,
    },
    /// Search for the best move.
    Search {
        #[command(flatten)]
        position: PositionArgs,
        #[command(flatten)]
        engine: EngineArgs,
        /// Deepest iteration to run.
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..))]
        depth: Option<u8>,
        /// Time budget in milliseconds.
        #[arg(short, long)]
        movetime: Option<u64>,
    },
}

#[derive(Debug, Args)]
struct PositionArgs {
    /// Position in Forsyth-Edwards Notation.
    #[arg(short, long, default_value = STARTING_FEN)]
    fen: String,
    /// Coordinate moves to play from the position first, e.g. `e2e4 e7e5`.
    #[arg(long, num_args = 1.., value_delimiter = ' ')]
    moves: Vec<String>,
}

impl PositionArgs {
    fn board(&self) -> Result<Board> {
        let mut board = Board::from_fen(&self.fen).with_context(|| format!("bad FEN \"{}\"", self.fen))?;
        for text in &self.moves {
            let mv = Move::from_uci_str(text, &mut board)?;
            board.make_move(mv);
        }
        Ok(board)
    }
}

#[derive(Debug, Args)]
struct EngineArgs {
    /// Disable the transposition table.
    #[arg(long)]
    no_table: bool,
    /// Disable quiescence search.
    #[arg(long)]
    no_quiescence: bool,
    /// Transposition table slots.
    #[arg(long, default_value_t = SearchConfig::default().table_size)]
    table_size: usize,
    /// Extra plies quiescence may search.
    #[arg(long, default_value_t = SearchConfig::default().quiescence_max_depth)]
    quiescence_depth: u8,
    /// Non-king material below which the endgame king table applies.
    #[arg(long, default_value_t = SearchConfig::default().endgame_material)]
    endgame_material: i32,
}

impl EngineArgs {
    fn config(&self) -> SearchConfig {
        SearchConfig {
            use_transpositions: !self.no_table,
            use_quiescence: !self.no_quiescence,
            table_size: self.table_size,
            quiescence_max_depth: self.quiescence_depth,
            endgame_material: self.endgame_material,
            ..SearchConfig::default()
        }
    }
}

impl Cli {
    /// Execute the parsed command.
    pub fn run(self) -> Result<()> {
        match self.command {
            Command::Perft { position, depth } => {
                let mut board = position.board()?;
                let start = Instant::now();
                let nodes = perft(&mut board, depth);
                let elapsed = start.elapsed();
                info!(depth, nodes, ?elapsed, "perft complete");
                println!("{nodes}");
            }
            Command::Divide { position, depth } => {
                let mut board = position.board()?;
                let rows = divide(&mut board, depth);
                let total: u64 = rows.iter().map(|(_, n)| n).sum();
                for (mv, nodes) in &rows {
                    println!("{mv}: {nodes}");
                }
                println!();
                println!("Moves: {}", rows.len());
                println!("Nodes: {total}");
            }
            Command::Show { position } => {
                let board = position.board()?;
                println!("{}", board.pretty());
            }
            Command::Search { position, engine, depth, movetime } => {
                let board = position.board()?;
                let limits = SearchLimits {
                    depth: if depth.is_none() && movetime.is_none() { Some(6) } else { depth },
                    time: movetime.map(Duration::from_millis),
                };
                let searcher = Searcher::new(engine.config());
                let handle = spawn_search(searcher, board.clone(), limits);
                while !handle.is_finished() {
                    std::thread::sleep(POLL_INTERVAL);
                }
                let (searcher, result) = handle.join();
                debug!(hashfull = searcher.table().hashfull(), "table usage");
                print_report(&board, &result?);
            }
        }
        Ok(())
    }
}

/// Print the best move and principal line in SAN, then the counters.
fn print_report(board: &Board, report: &SearchReport) {
    let mut board = board.clone();
    let mut line = Vec::with_capacity(report.evaluation.line.len());
    for &mv in &report.evaluation.line {
        line.push(san(&mut board, mv));
        board.make_move(mv);
    }

    match line.first() {
        Some(best) => println!("bestmove {best}"),
        None => println!("bestmove (none)"),
    }
    println!("score {:+}", report.evaluation.score);
    println!("depth {}", report.depth);
    println!("line {}", line.join(" "));

    let d = &report.diagnostics;
    println!(
        "nodes {} quiescence {} evals {} leaves {} cutoffs {} delta-prunes {} qs-cap {}",
        d.nodes, d.quiescence_nodes, d.static_evals, d.leaves, d.cutoffs, d.delta_prunes,
        d.quiescence_cap_stops,
    );
    println!(
        "table exact {} bound {} hints {}",
        d.exact_hits, d.bound_hits, d.hint_moves
    );
    println!("time {} ms", report.elapsed.as_millis());
}
