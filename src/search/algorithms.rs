//! Negamax with PVS, null-move pruning, LMR and check extensions, plus
//! delta-pruned quiescence (spec §4.10, component C10).

use std::collections::HashMap;

use crate::board::Board;
use crate::check::{evaluate_check_state, is_in_check, CheckState};
use crate::evaluation::{evaluate, terminal_score};
use crate::game::is_insufficient_material;
use crate::movegen::{generate_legal_moves, generate_tactical_moves};
use crate::moves::{Move, MoveList};
use crate::transposition_table::{Bound, TranspositionTable};
use crate::types::Piece;

use super::control::SearchControl;
use super::ordering::{order_moves, order_tactical_moves, OrderingTables};
use super::{extensions, lmr, pruning};

/// Amount by which `standPat + captured value + promo bonus` must still
/// clear `alpha` to bother searching a quiescence capture (SPEC_FULL.md §4,
/// pinned from `backend/include/engine/engine.h`).
const DELTA_MARGIN: i32 = 150;

/// Promotion bonus folded into the quiescence delta-pruning margin (spec
/// §4.10 quiescence step 4).
const PROMOTION_DELTA_BONUS: i32 = 800;

/// Everything a search node needs beyond the board itself: the tables it
/// reads and writes (spec §9: these live on the owning `Engine`, not a
/// process-wide `static`), the root's pre-search repetition counts, and the
/// path of hashes visited so far in this tree (for in-search repetition
/// detection).
pub struct SearchContext<'a> {
    pub tt: &'a mut TranspositionTable,
    pub ordering: &'a mut OrderingTables,
    pub control: &'a mut SearchControl,
    quiescence_depth: u8,
    root_repetition: &'a HashMap<u64, u32>,
    path_hashes: Vec<u64>,
    /// Set once the time/node budget is exhausted; once true every node
    /// unwinds immediately without searching further (spec §5 cancellation).
    pub aborted: bool,
}

impl<'a> SearchContext<'a> {
    #[must_use]
    pub fn new(
        tt: &'a mut TranspositionTable,
        ordering: &'a mut OrderingTables,
        control: &'a mut SearchControl,
        quiescence_depth: u8,
        root_repetition: &'a HashMap<u64, u32>,
    ) -> Self {
        SearchContext {
            tt,
            ordering,
            control,
            quiescence_depth,
            root_repetition,
            path_hashes: Vec::with_capacity(64),
            aborted: false,
        }
    }

    fn push_path(&mut self, hash: u64) {
        self.path_hashes.push(hash);
    }

    fn pop_path(&mut self) {
        self.path_hashes.pop();
    }

    /// A position repeats once it has been seen before, either earlier in
    /// the real game or earlier along this search line — engines commit to
    /// the draw score at the first recurrence rather than waiting for a
    /// literal third occurrence, since the side facing it can force the
    /// repetition either way.
    fn is_repetition(&self, hash: u64) -> bool {
        let root_count = self.root_repetition.get(&hash).copied().unwrap_or(0);
        let path_count = self.path_hashes.iter().filter(|&&h| h == hash).count() as u32;
        root_count + path_count >= 1
    }

    fn should_abort(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        if self.control.should_stop() {
            self.aborted = true;
        }
        self.aborted
    }
}

/// Negamax search of one node (spec §4.10). `depth` may be driven negative by
/// reductions/extensions arithmetic upstream of the recursive call; any
/// `depth <= 0` node falls through to quiescence.
#[allow(clippy::too_many_arguments)]
pub fn negamax(
    board: &mut Board,
    ctx: &mut SearchContext,
    depth: i32,
    ply: i32,
    alpha: i32,
    beta: i32,
    is_pv: bool,
    allow_null: bool,
    extensions_used: u32,
) -> i32 {
    ctx.control.node_visited();

    if ctx.should_abort() {
        return evaluate(board);
    }

    if depth <= 0 {
        return quiescence(board, ctx, alpha, beta, ctx.quiescence_depth, ply);
    }

    let hash = board.hash();
    if ply > 0 {
        if ctx.is_repetition(hash) || board.halfmove_clock() >= 100 || is_insufficient_material(board) {
            return 0;
        }
    } else if board.halfmove_clock() >= 100 || is_insufficient_material(board) {
        return 0;
    }

    let original_alpha = alpha;
    let colour = board.side_to_move();
    let in_check = is_in_check(board, colour);

    let tt_entry = ctx.tt.probe(hash).copied();
    if let Some(entry) = tt_entry {
        if i32::from(entry.depth) >= depth {
            let score = i32::from(entry.score);
            let usable = match entry.bound {
                Bound::Exact => true,
                Bound::Lower => score >= beta,
                Bound::Upper => score <= alpha,
            };
            if usable {
                return score;
            }
        }
    }
    let tt_best = tt_entry.and_then(|e| e.best_move);

    if pruning::null_move_eligible(allow_null, is_pv, depth as u32, in_check, board, colour) {
        let reduction = pruning::null_move_reduction(depth as u32) as i32;
        let null_info = board.make_null_move();
        ctx.push_path(board.hash());
        let score = -negamax(board, ctx, depth - 1 - reduction, ply + 1, -beta, -beta + 1, false, false, extensions_used);
        ctx.pop_path();
        board.unmake_null_move(null_info);
        if !ctx.aborted && score >= beta {
            return beta;
        }
    }

    let extension = extensions::check_extension(in_check, extensions_used);
    let depth = depth + extension as i32;
    let extensions_used = extensions_used + extension;

    let mut scratch = MoveList::new();
    let mut legal = MoveList::new();
    generate_legal_moves(board, &mut scratch, &mut legal);

    if legal.is_empty() {
        return match evaluate_check_state(board, false) {
            CheckState::Checkmate => terminal_score(true, ply),
            _ => 0,
        };
    }

    order_moves(board, &mut legal, tt_best, ctx.ordering, ply as usize);

    let mut best_score = i32::MIN;
    let mut best_move: Option<Move> = None;
    let mut alpha = alpha;

    for (i, &mv) in legal.as_slice().iter().enumerate() {
        let is_quiet = mv.is_quiet();
        let info = board.make_move(mv);
        ctx.push_path(board.hash());

        let score = if i == 0 {
            -negamax(board, ctx, depth - 1, ply + 1, -beta, -alpha, is_pv, true, extensions_used)
        } else {
            let reduction = lmr::reduction(depth as u32, i, in_check, is_quiet) as i32;
            let mut s = -negamax(board, ctx, depth - 1 - reduction, ply + 1, -alpha - 1, -alpha, false, true, extensions_used);
            if s > alpha && reduction > 0 {
                s = -negamax(board, ctx, depth - 1, ply + 1, -alpha - 1, -alpha, false, true, extensions_used);
            }
            if s > alpha && s < beta {
                s = -negamax(board, ctx, depth - 1, ply + 1, -beta, -alpha, true, true, extensions_used);
            }
            s
        };

        ctx.pop_path();
        board.unmake_move(mv, info);

        if ctx.aborted {
            return best_score.max(alpha);
        }

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            if is_quiet {
                ctx.ordering.record_killer(ply as usize, mv);
                let (mover_colour, mover_piece) = board.piece_at(mv.from()).unwrap_or((colour, Piece::Pawn));
                ctx.ordering.record_history(mover_colour, mover_piece, mv.from().index(), mv.to().index(), depth);
            }
            break;
        }
    }

    let bound = if alpha >= beta {
        Bound::Lower
    } else if alpha > original_alpha {
        Bound::Exact
    } else {
        Bound::Upper
    };
    ctx.tt.store(
        hash,
        depth.max(0) as u8,
        best_score.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16,
        bound,
        best_move,
    );

    best_score
}

/// Tactical-only continuation at leaves (spec §4.10 quiescence).
pub fn quiescence(board: &mut Board, ctx: &mut SearchContext, alpha: i32, beta: i32, qdepth: u8, ply: i32) -> i32 {
    ctx.control.node_visited();
    if ctx.should_abort() {
        return evaluate(board);
    }

    let colour = board.side_to_move();
    let in_check = is_in_check(board, colour);
    let stand_pat = evaluate(board);

    let mut alpha = alpha;
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }
    if qdepth == 0 {
        return alpha;
    }

    let mut tactical = MoveList::new();
    generate_tactical_moves(board, &mut tactical);
    order_tactical_moves(board, &mut tactical);

    for &mv in tactical.as_slice() {
        if !in_check {
            let captured_value = mv.captured().map_or(0, Piece::value);
            let promo_bonus = if mv.is_queen_promotion() { PROMOTION_DELTA_BONUS } else { 0 };
            if stand_pat + captured_value + promo_bonus + DELTA_MARGIN < alpha {
                continue;
            }
        }
        let info = board.make_move(mv);
        let score = -quiescence(board, ctx, -beta, -alpha, qdepth - 1, ply + 1);
        board.unmake_move(mv, info);

        if ctx.aborted {
            return alpha;
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            return beta;
        }
    }

    alpha
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::control::SearchControl;
    use crate::search::ordering::OrderingTables;
    use crate::transposition_table::TranspositionTable;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::time::Duration;

    fn run(board: &mut Board, depth: i32) -> i32 {
        let mut tt = TranspositionTable::new(1);
        let mut ordering = OrderingTables::new(64);
        let mut control = SearchControl::new(Arc::new(AtomicBool::new(false)), Duration::from_secs(30));
        let repetition = HashMap::new();
        let mut ctx = SearchContext::new(&mut tt, &mut ordering, &mut control, 6, &repetition);
        negamax(board, &mut ctx, depth, 0, -30_000, 30_000, true, true, 0)
    }

    #[test]
    fn finds_mate_in_one() {
        let mut board = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        let score = run(&mut board, 2);
        assert!(score < -20_000, "expected a detected mate, got {score}");
    }

    #[test]
    fn material_advantage_scores_positive() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/4Q3/4K3 w - - 0 1");
        let score = run(&mut board, 3);
        assert!(score > 200, "expected a clearly winning score, got {score}");
    }

    #[test]
    fn quiescence_alone_does_not_blunder_a_hanging_queen() {
        let mut board = Board::from_fen("4k3/8/8/4q3/8/8/4R3/4K3 w - - 0 1");
        let mut tt = TranspositionTable::new(1);
        let mut ordering = OrderingTables::new(8);
        let mut control = SearchControl::new(Arc::new(AtomicBool::new(false)), Duration::from_secs(30));
        let repetition = HashMap::new();
        let mut ctx = SearchContext::new(&mut tt, &mut ordering, &mut control, 6, &repetition);
        let score = quiescence(&mut board, &mut ctx, -30_000, 30_000, 6, 0);
        assert!(score > 0);
    }
}
