//! Zobrist hashing (spec §4.6, component C4).
//!
//! Keys are generated once behind a `LazyLock` and never mutate afterwards;
//! `Board` XORs them incrementally on every `make_move`/`unmake_move`/null
//! move. [`crate::board::Board::compute_hash`] recomputes from scratch purely
//! to satisfy the hash-consistency property test of spec §8 — the search hot
//! path never calls it.

use std::sync::LazyLock;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::types::{Color, Piece};

/// Fixed seed: the hash values must be stable across process runs so that
/// perft/TT-determinism tests are reproducible (spec §9 RNG-seed note applies
/// equally well here, even though Zobrist keys aren't config-visible).
const ZOBRIST_SEED: u64 = 0x5EED_5EED_5EED_5EED;

pub struct ZobristKeys {
    /// `piece_key[colour][piece][square]`
    piece_key: [[[u64; 64]; 6]; 2],
    pub side_to_move_key: u64,
    /// One independent key per castling-right bit (WK, WQ, BK, BQ).
    pub castling_key: [u64; 4],
    pub ep_file_key: [u64; 8],
}

impl ZobristKeys {
    fn generate() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut piece_key = [[[0u64; 64]; 6]; 2];
        for colour in &mut piece_key {
            for piece in colour.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.next_u64();
                }
            }
        }
        let side_to_move_key = rng.next_u64();
        let mut castling_key = [0u64; 4];
        for key in &mut castling_key {
            *key = rng.next_u64();
        }
        let mut ep_file_key = [0u64; 8];
        for key in &mut ep_file_key {
            *key = rng.next_u64();
        }
        ZobristKeys { piece_key, side_to_move_key, castling_key, ep_file_key }
    }

    #[inline]
    #[must_use]
    pub fn piece(&self, colour: Color, piece: Piece, sq_index: usize) -> u64 {
        self.piece_key[colour.index()][piece.index()][sq_index]
    }
}

pub static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::generate);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_distinct() {
        let a = ZOBRIST.piece(Color::White, Piece::Pawn, 0);
        let b = ZOBRIST.piece(Color::White, Piece::Pawn, 1);
        assert_ne!(a, b);
        assert_ne!(ZOBRIST.side_to_move_key, 0);
    }
}
