//! Opening book lookup (spec §6.5, component C11).
//!
//! The book itself holds only `{hash -> moves[]}` — loading the actual
//! opening data (file format, payload) is an explicit Non-goal (spec.md §1).
//! What lives here is the lookup and the board-patching step: a stored move
//! knows its own from/to/promotion but not which piece it captures or
//! whether it is an en-passant/castle move on whatever position currently has
//! that hash, so `get_move` with a live board re-derives those fields.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::Board;
use crate::moves::Move;
use crate::types::{CastlingSide, Piece, Square};

/// `{positionHash -> candidate moves}` with a seeded RNG for choosing among
/// several book moves at the same position (spec §5: "opening-book move
/// selection uses a seeded RNG; for reproducibility the seed MUST be
/// configurable" — resolved in SPEC_FULL.md §4 by injecting `StdRng` rather
/// than the original's nondeterministic global RNG).
pub struct OpeningBook {
    entries: HashMap<u64, Vec<Move>>,
    rng: StdRng,
}

impl OpeningBook {
    /// Build an empty book seeded deterministically; `get_move` always
    /// returns [`Move::NULL`] until [`OpeningBook::load`] populates it.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        OpeningBook { entries: HashMap::new(), rng: StdRng::seed_from_u64(seed) }
    }

    /// Load `{hash -> moves}` pairs (spec §6.5). Later entries for the same
    /// hash extend rather than replace the candidate list.
    pub fn load<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (u64, Vec<Move>)>,
    {
        for (hash, moves) in entries {
            self.entries.entry(hash).or_default().extend(moves);
        }
    }

    /// Pick a candidate move for `hash`, or [`Move::NULL`] if the book has
    /// nothing (spec §6.5). Does not touch the board, so the returned move's
    /// captured/en-passant/castle fields may be stale relative to how it was
    /// originally stored.
    #[must_use]
    pub fn get_move(&mut self, hash: u64) -> Move {
        match self.entries.get(&hash) {
            Some(candidates) if !candidates.is_empty() => {
                *candidates.choose(&mut self.rng).expect("candidates is non-empty")
            }
            _ => Move::NULL,
        }
    }

    /// Like [`OpeningBook::get_move`], but re-derives captured-piece,
    /// en-passant and castle-side fields from `board` so the returned move
    /// is valid to hand straight to [`crate::board::Board::make_move`] (spec
    /// §6.5 "patches castle/en-passant/captured-piece fields from the live
    /// board").
    #[must_use]
    pub fn get_move_for_board(&mut self, hash: u64, board: &Board) -> Move {
        let candidate = self.get_move(hash);
        if candidate.is_null() {
            return candidate;
        }
        patch_against_board(candidate, board)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn patch_against_board(mv: Move, board: &Board) -> Move {
    let from = mv.from();
    let to = mv.to();
    let mover = board.side_to_move();

    let is_en_passant = board.piece_at(from).map(|(_, p)| p) == Some(Piece::Pawn)
        && Some(to) == board.ep_square()
        && from.file() != to.file();

    let castle = if board.piece_at(from).map(|(_, p)| p) == Some(Piece::King) {
        let rank = from.rank();
        if from.file() == 4 && to.rank() == rank {
            match to.file() {
                6 => Some(CastlingSide::Kingside),
                2 => Some(CastlingSide::Queenside),
                _ => None,
            }
        } else {
            None
        }
    } else {
        None
    };

    let captured_sq = if is_en_passant {
        Square::new(from.rank(), to.file())
    } else {
        to
    };
    let captured = board.piece_at(captured_sq).map(|(_, p)| p);
    let _ = mover;

    Move::new(from, to, captured, mv.promotion(), castle, is_en_passant)
}
