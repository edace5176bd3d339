//! Perft suites for the standard reference positions.
//!
//! Every count below is a published value. A mismatch at any depth means a
//! bug in move generation, move execution or the legality filter.
//!
//! Reference: <https://www.chessprogramming.org/Perft_Results>

use chess_movegen::{perft, perft_divide, perft_parallel, perft_stats, Position};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
const POSITION_4_MIRRORED: &str =
    "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

fn check(fen: &str, expected: &[u64]) {
    let position = Position::from_fen(fen).unwrap();
    for (index, &nodes) in expected.iter().enumerate() {
        let depth = index as u32 + 1;
        assert_eq!(perft(&position, depth), nodes, "{} at depth {}", fen, depth);
    }
}

// =====================================================================
// Position 1: Starting position
// =====================================================================

#[test]
fn perft_startpos_depth_1() {
    assert_eq!(perft(&Position::startpos(), 1), 20);
}

#[test]
fn perft_startpos_depth_2() {
    assert_eq!(perft(&Position::startpos(), 2), 400);
}

#[test]
fn perft_startpos_depth_3() {
    assert_eq!(perft(&Position::startpos(), 3), 8_902);
}

#[test]
fn perft_startpos_depth_4() {
    assert_eq!(perft(&Position::startpos(), 4), 197_281);
}

// Depth 5 is slower, only run in release mode
#[test]
#[ignore]
fn perft_startpos_depth_5() {
    assert_eq!(perft(&Position::startpos(), 5), 4_865_609);
}

// =====================================================================
// Position 2: "Kiwipete": castling, en passant, pins
// =====================================================================

#[test]
fn perft_kiwipete() {
    check(KIWIPETE, &[48, 2_039, 97_862]);
}

#[test]
#[ignore]
fn perft_kiwipete_depth_4() {
    let position = Position::from_fen(KIWIPETE).unwrap();
    assert_eq!(perft(&position, 4), 4_085_603);
}

// =====================================================================
// Position 3: sparse endgame: check evasion, en passant, promotion
// =====================================================================

#[test]
fn perft_position_3() {
    check(POSITION_3, &[14, 191, 2_812, 43_238]);
}

// =====================================================================
// Position 4: promotions and captures, and its colour-flipped twin
// =====================================================================

#[test]
fn perft_position_4() {
    check(POSITION_4, &[6, 264, 9_467]);
}

#[test]
fn perft_position_4_mirrored() {
    check(POSITION_4_MIRRORED, &[6, 264, 9_467]);
}

// =====================================================================
// Position 5
// =====================================================================

#[test]
fn perft_position_5() {
    check(POSITION_5, &[44, 1_486, 62_379]);
}

// =====================================================================
// Drivers agree with each other
// =====================================================================

#[test]
fn divide_sums_to_perft() {
    let position = Position::from_fen(POSITION_5).unwrap();
    let divide = perft_divide(&position, 3);
    assert_eq!(divide.len(), 44);
    assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 62_379);
}

#[test]
fn parallel_matches_sequential() {
    let position = Position::from_fen(POSITION_4).unwrap();
    assert_eq!(perft_parallel(&position, 3, 4), 9_467);
    let position = Position::from_fen(KIWIPETE).unwrap();
    assert_eq!(perft_parallel(&position, 3, 6), 97_862);
}

#[test]
fn stats_startpos_depth_4() {
    let stats = perft_stats(&Position::startpos(), 4);
    assert_eq!(stats.nodes, 197_281);
    assert_eq!(stats.captures, 1_576);
    assert_eq!(stats.en_passant, 0);
    assert_eq!(stats.castles, 0);
    assert_eq!(stats.promotions, 0);
    assert_eq!(stats.checks, 469);
}

#[test]
fn stats_position_3() {
    let stats = perft_stats(&Position::from_fen(POSITION_3).unwrap(), 3);
    assert_eq!(stats.nodes, 2_812);
    assert_eq!(stats.captures, 209);
    assert_eq!(stats.en_passant, 2);
    assert_eq!(stats.castles, 0);
    assert_eq!(stats.promotions, 0);
    assert_eq!(stats.checks, 267);
}

#[test]
fn stats_position_4() {
    let stats = perft_stats(&Position::from_fen(POSITION_4).unwrap(), 2);
    assert_eq!(stats.nodes, 264);
    assert_eq!(stats.captures, 87);
    assert_eq!(stats.en_passant, 0);
    assert_eq!(stats.castles, 6);
    assert_eq!(stats.promotions, 48);
    assert_eq!(stats.checks, 10);
}
