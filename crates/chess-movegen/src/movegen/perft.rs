//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use std::ops::AddAssign;
use std::thread;

use tracing::{debug, trace};

use super::{generate_legal_moves, is_king_attacked, make_move};
use crate::Position;
use chess_core::Move;

/// Leaf counts broken down by the kind of move that reached each leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftStats {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
}

impl AddAssign for PerftStats {
    fn add_assign(&mut self, rhs: PerftStats) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }
}

/// Counts the number of leaf nodes at the given depth.
///
/// Depth 0 counts the position itself. Each child is explored on its own
/// copy, so `position` is never modified.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for &m in &moves {
        let mut child = *position;
        make_move(&mut child, m);
        nodes += perft(&child, depth - 1);
    }
    nodes
}

/// Perft with divide: the node count below each root move, sorted by UCI text.
///
/// Useful for debugging to identify which moves have incorrect counts.
/// Depth 0 has no root moves and yields an empty list.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let moves = generate_legal_moves(position);
    let mut results = Vec::with_capacity(moves.len());

    for &m in &moves {
        let mut child = *position;
        make_move(&mut child, m);
        let nodes = perft(&child, depth - 1);
        trace!(mv = %m, nodes, "divide");
        results.push((m, nodes));
    }

    results.sort_by_key(|(m, _)| m.to_uci());
    results
}

/// Counts leaves like [`perft`] and classifies the move leading to each one.
///
/// A leaf counts as a check when the side to move there is in check.
/// Depth 0 is a single node with nothing to classify.
pub fn perft_stats(position: &Position, depth: u32) -> PerftStats {
    let mut stats = PerftStats::default();
    if depth == 0 {
        stats.nodes = 1;
    } else {
        collect_stats(position, depth, &mut stats);
    }
    stats
}

fn collect_stats(position: &Position, depth: u32, stats: &mut PerftStats) {
    for &m in &generate_legal_moves(position) {
        let mut child = *position;
        make_move(&mut child, m);

        if depth > 1 {
            collect_stats(&child, depth - 1, stats);
            continue;
        }

        stats.nodes += 1;
        if m.is_capture() {
            stats.captures += 1;
        }
        if m.is_en_passant() {
            stats.en_passant += 1;
        }
        if m.is_castling() {
            stats.castles += 1;
        }
        if m.is_promotion() {
            stats.promotions += 1;
        }
        if is_king_attacked(&child, child.side_to_move) {
            stats.checks += 1;
        }
    }
}

/// Perft with the root moves shared out across `threads` worker threads.
///
/// Every worker plays its moves on its own copies of the position; the
/// per-worker totals are summed. `threads` of 0 or 1 runs [`perft`] directly.
pub fn perft_parallel(position: &Position, depth: u32, threads: usize) -> u64 {
    if threads <= 1 || depth <= 1 {
        return perft(position, depth);
    }

    let moves = generate_legal_moves(position);
    let workers = threads.min(moves.len());
    debug!(depth, root_moves = moves.len(), workers, "starting parallel perft");

    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let moves = &moves;
                scope.spawn(move || {
                    let mut nodes = 0u64;
                    for &m in moves.iter().skip(worker).step_by(workers) {
                        let mut child = *position;
                        make_move(&mut child, m);
                        nodes += perft(&child, depth - 1);
                    }
                    trace!(worker, nodes, "perft worker finished");
                    nodes
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(nodes) => nodes,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .sum()
    })
}
