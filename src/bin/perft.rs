//! Perft testing binary: verifies move generation against the published
//! node counts for the standard opening and the Kiwipete position (spec §8).
use std::env;
use std::time::Instant;

use chess_engine::board::Board;
use chess_engine::perft::{perft, perft_divide};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn main() {
    let mut args = env::args().skip(1);
    let fen = args.next();
    let depth: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(5);

    println!("Chess Engine Perft Testing");
    println!("==========================");

    let mut board = match fen.as_deref() {
        Some("startpos") | None => Board::new(),
        Some("kiwipete") => Board::from_fen(KIWIPETE),
        Some(fen) => Board::from_fen(fen),
    };

    for d in 1..=depth {
        let start = Instant::now();
        let nodes = perft(&mut board, d);
        println!("perft({d}) = {nodes} ({:?})", start.elapsed());
    }

    println!("\ndivide at depth {depth}:");
    let mut rows = perft_divide(&mut board, depth);
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    let mut total = 0u64;
    for (mv, nodes) in &rows {
        println!("  {mv}: {nodes}");
        total += nodes;
    }
    println!("total: {total}");
}
