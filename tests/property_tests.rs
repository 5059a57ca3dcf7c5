//! Property-based tests over random legal-move walks (spec §8): hash
//! consistency, undo-inverts-make, and bounded evaluation.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use chess_engine::board::Board;
use chess_engine::evaluation::evaluate;
use chess_engine::movegen::generate_legal_moves;
use chess_engine::moves::MoveList;
use chess_engine::transposition_table::{Bound, TranspositionTable};

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=40usize
}

proptest! {
    /// Spec §8 property 1: the incrementally-updated hash always matches a
    /// from-scratch recomputation after a random walk of legal moves.
    #[test]
    fn hash_consistency(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut scratch = MoveList::new();
        let mut legal = MoveList::new();

        for _ in 0..num_moves {
            generate_legal_moves(&mut board, &mut scratch, &mut legal);
            if legal.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..legal.len());
            let mv = legal.as_slice()[idx];
            board.make_move(mv);
            prop_assert_eq!(board.hash(), board.compute_hash());
        }
    }

    /// Spec §8 property 2: undo(make(P, m)) == P for every legal move along a
    /// random walk, bit-for-bit across bitboards, caches, rights, ep and hash.
    #[test]
    fn undo_inverts_make(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut scratch = MoveList::new();
        let mut legal = MoveList::new();

        for _ in 0..num_moves {
            generate_legal_moves(&mut board, &mut scratch, &mut legal);
            if legal.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..legal.len());
            let mv = legal.as_slice()[idx];

            let before = board.clone();
            let info = board.make_move(mv);
            board.unmake_move(mv, info);

            prop_assert_eq!(board.hash(), before.hash());
            prop_assert_eq!(board.castling_rights(), before.castling_rights());
            prop_assert_eq!(board.ep_square(), before.ep_square());
            prop_assert_eq!(board.halfmove_clock(), before.halfmove_clock());
            for sq_index in 0..64 {
                let sq = chess_engine::types::Square::from_index(sq_index);
                prop_assert_eq!(board.piece_at(sq), before.piece_at(sq));
            }

            board.make_move(mv);
        }
    }

    /// Spec §4.9: evaluation never blows up to an unreasonable magnitude
    /// along realistic random play.
    #[test]
    fn eval_stays_bounded(seed in seed_strategy(), num_moves in 0..40usize) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut scratch = MoveList::new();
        let mut legal = MoveList::new();

        for _ in 0..num_moves {
            generate_legal_moves(&mut board, &mut scratch, &mut legal);
            if legal.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..legal.len());
            board.make_move(legal.as_slice()[idx]);
        }

        let eval = evaluate(&board);
        prop_assert!(eval.abs() < 10_000, "evaluation {} is unreasonably large", eval);
    }

    /// Spec §4.7: a stored entry, once probed back, always carries the
    /// exact depth/score/bound it was stored with (no corruption across the
    /// bucket-replacement policy for a single key).
    #[test]
    fn tt_store_then_probe_is_exact(
        hash in any::<u64>(),
        depth in 0u8..64,
        score in -9000i16..9000,
    ) {
        let mut tt = TranspositionTable::new(1);
        tt.store(hash, depth, score, Bound::Exact, None);
        let entry = tt.probe(hash).expect("just-stored key must be found");
        prop_assert_eq!(entry.depth, depth);
        prop_assert_eq!(entry.score, score);
        prop_assert_eq!(entry.bound, Bound::Exact);
    }
}
