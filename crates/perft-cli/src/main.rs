//! Perft runner - counts leaf nodes of the legal move tree.
//!
//! Sets up a position from a FEN string (or the standard start), optionally
//! plays a list of UCI moves, then counts nodes to the requested depth.

use std::io::{self, Write};
use std::time::Instant;

use anyhow::{bail, Context};
use chess_core::Fen;
use chess_movegen::{
    find_legal_move, make_move, perft_divide, perft_parallel, perft_stats, Position,
};
use clap::Parser;
use tracing::Level;

/// Perft runner - counts leaf nodes of the legal move tree.
#[derive(Parser, Debug)]
#[command(name = "perft")]
#[command(about = "Counts leaf nodes of the legal move tree to a fixed depth")]
struct PerftOptions {
    /// Search depth in plies
    depth: u32,

    /// Starting position in FEN
    #[arg(long, default_value = Fen::STARTPOS)]
    fen: String,

    /// UCI moves to play from the starting position before counting
    #[arg(long, num_args = 1..)]
    moves: Vec<String>,

    /// Print the node count below each root move
    #[arg(long)]
    divide: bool,

    /// Break leaf nodes down by captures, en passant, castles, promotions and checks
    #[arg(long, conflicts_with = "divide")]
    stats: bool,

    /// Worker threads for the root moves (0 or 1 runs single-threaded)
    #[arg(long, default_value = "1")]
    threads: usize,

    /// Print the board before counting
    #[arg(long)]
    board: bool,

    /// Log debug events to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let options = PerftOptions::parse();

    tracing_subscriber::fmt()
        .with_max_level(if options.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    run(&options, &mut stdout.lock())
}

/// Builds the position described by the options.
fn setup(options: &PerftOptions) -> anyhow::Result<Position> {
    let mut position = Position::from_fen(&options.fen)
        .with_context(|| format!("invalid FEN: {}", options.fen))?;

    for uci in &options.moves {
        let Some(m) = find_legal_move(&position, uci) else {
            bail!("illegal move {} in {}", uci, position.to_fen());
        };
        tracing::debug!("playing {}", m);
        make_move(&mut position, m);
    }

    Ok(position)
}

fn run(options: &PerftOptions, out: &mut impl Write) -> anyhow::Result<()> {
    let position = setup(options)?;
    tracing::debug!("perft depth {} from {}", options.depth, position.to_fen());

    if options.board {
        write!(out, "{}", position)?;
        writeln!(out, "Fen: {}", position.to_fen())?;
        writeln!(out)?;
    }

    let start = Instant::now();
    let nodes = if options.divide {
        let divide = perft_divide(&position, options.depth);
        for (m, count) in &divide {
            writeln!(out, "{}: {}", m, count)?;
        }
        writeln!(out)?;
        // Depth 0 has no root moves but still counts the root itself.
        if options.depth == 0 {
            1
        } else {
            divide.iter().map(|(_, count)| count).sum()
        }
    } else if options.stats {
        let stats = perft_stats(&position, options.depth);
        writeln!(out, "Captures   : {}", stats.captures)?;
        writeln!(out, "E.p.       : {}", stats.en_passant)?;
        writeln!(out, "Castles    : {}", stats.castles)?;
        writeln!(out, "Promotions : {}", stats.promotions)?;
        writeln!(out, "Checks     : {}", stats.checks)?;
        stats.nodes
    } else {
        perft_parallel(&position, options.depth, options.threads)
    };
    let elapsed = start.elapsed().as_secs_f64();

    writeln!(
        out,
        "Perft({}) : {} nodes in {:.3} seconds",
        options.depth, nodes, elapsed
    )?;
    Ok(())
}
