//! Pseudo-legal and legal move generation (spec §4.3, component C5).

use crate::attack_tables::{
    bishop_attacks, double_push_target, king_attacks, knight_attacks, pawn_attacks, queen_attacks,
    rook_attacks, single_push_target,
};
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::check::is_in_danger;
use crate::moves::{Move, MoveList};
use crate::types::{CastlingSide, Color, Piece, Square, PROMOTION_PIECES};

/// Append every pseudo-legal move for the side to move into `out`
/// (spec §4.3). Pseudo-legal: castling obeys the "cannot pass through
/// check" rule explicitly, but leaving one's own king in check is filtered
/// later by [`generate_legal_moves`].
pub fn generate_pseudo_legal_moves(board: &Board, out: &mut MoveList) {
    let us = board.side_to_move();
    let them = us.opponent();
    let own = board.colour_bb(us);
    let occ = board.all_bb();

    generate_pawn_moves(board, us, them, occ, out);

    for sq in board.piece_bb(us, Piece::Knight).iter() {
        push_targets(out, sq, knight_attacks(sq) & !own, board);
    }
    for sq in board.piece_bb(us, Piece::Bishop).iter() {
        push_targets(out, sq, bishop_attacks(sq, occ) & !own, board);
    }
    for sq in board.piece_bb(us, Piece::Rook).iter() {
        push_targets(out, sq, rook_attacks(sq, occ) & !own, board);
    }
    for sq in board.piece_bb(us, Piece::Queen).iter() {
        push_targets(out, sq, queen_attacks(sq, occ) & !own, board);
    }
    let king_sq = board.king_square(us);
    push_targets(out, king_sq, king_attacks(king_sq) & !own, board);

    generate_castling_moves(board, us, out);
}

fn push_targets(out: &mut MoveList, from: Square, targets: Bitboard, board: &Board) {
    for to in targets.iter() {
        let captured = board.piece_at(to).map(|(_, p)| p);
        out.push(Move::new(from, to, captured, None, None, false));
    }
}

fn generate_pawn_moves(board: &Board, us: Color, them: Color, occ: Bitboard, out: &mut MoveList) {
    let final_rank = match us {
        Color::White => 7,
        Color::Black => 0,
    };
    for from in board.piece_bb(us, Piece::Pawn).iter() {
        if let Some(single) = single_push_target(us, from) {
            if !occ.contains(single) {
                push_pawn_move(out, from, single, None, false, final_rank);
                if let Some(double) = double_push_target(us, from) {
                    if !occ.contains(double) {
                        out.push(Move::new(from, double, None, None, None, false));
                    }
                }
            }
        }
        for to in (pawn_attacks(us, from) & board.colour_bb(them)).iter() {
            let captured = board.piece_at(to).map(|(_, p)| p);
            push_pawn_move(out, from, to, captured, false, final_rank);
        }
        if let Some(ep) = board.ep_square() {
            if pawn_attacks(us, from).contains(ep) {
                out.push(Move::new(from, ep, Some(Piece::Pawn), None, None, true));
            }
        }
    }
}

fn push_pawn_move(
    out: &mut MoveList,
    from: Square,
    to: Square,
    captured: Option<Piece>,
    _is_ep: bool,
    final_rank: usize,
) {
    if to.rank() == final_rank {
        for &promo in &PROMOTION_PIECES {
            out.push(Move::new(from, to, captured, Some(promo), None, false));
        }
    } else {
        out.push(Move::new(from, to, captured, None, None, false));
    }
}

fn generate_castling_moves(board: &Board, us: Color, out: &mut MoveList) {
    let rank = match us {
        Color::White => 0,
        Color::Black => 7,
    };
    let occ = board.all_bb();
    let king_sq = Square::new(rank, 4);
    if board.king_square(us) != king_sq || is_in_danger(board, us) {
        return;
    }

    if board.has_castling_right(us, CastlingSide::Kingside) {
        let f = Square::new(rank, 5);
        let g = Square::new(rank, 6);
        if !occ.contains(f) && !occ.contains(g) && !is_in_danger_after_move(board, us, f) {
            out.push(Move::new(king_sq, g, None, None, Some(CastlingSide::Kingside), false));
        }
    }
    if board.has_castling_right(us, CastlingSide::Queenside) {
        let d = Square::new(rank, 3);
        let c = Square::new(rank, 2);
        let b = Square::new(rank, 1);
        if !occ.contains(d) && !occ.contains(c) && !occ.contains(b) && !is_in_danger_after_move(board, us, d) {
            out.push(Move::new(king_sq, c, None, None, Some(CastlingSide::Queenside), false));
        }
    }
}

/// Whether `sq` (a square the king passes through while castling) is
/// attacked — spec §4.3's explicit "cannot pass through check" rule, distinct
/// from the generic post-move legality filter that covers the final square.
fn is_in_danger_after_move(board: &Board, us: Color, sq: Square) -> bool {
    crate::check::is_square_attacked(board, sq, us.opponent())
}

/// Filter pseudo-legal moves down to legal ones by actually playing each
/// move and checking whether it leaves the mover's own king attacked (spec
/// §4.3/§4.4). Uses `scratch` as the pseudo-legal buffer so callers can reuse
/// per-ply allocations.
pub fn generate_legal_moves(board: &mut Board, scratch: &mut MoveList, out: &mut MoveList) {
    scratch.clear();
    generate_pseudo_legal_moves(board, scratch);
    out.clear();
    let mover = board.side_to_move();
    for &mv in scratch.iter() {
        let info = board.make_move(mv);
        if !is_in_danger(board, mover) {
            out.push(mv);
        }
        board.unmake_move(mv, info);
    }
}

/// True iff the side to move has at least one legal move, without
/// collecting the full list (spec §4.4 checkmate/stalemate detection can
/// short-circuit on the first legal move found).
#[must_use]
pub fn has_legal_move(board: &mut Board, scratch: &mut MoveList) -> bool {
    scratch.clear();
    generate_pseudo_legal_moves(board, scratch);
    let mover = board.side_to_move();
    for &mv in scratch.iter() {
        let info = board.make_move(mv);
        let legal = !is_in_danger(board, mover);
        board.unmake_move(mv, info);
        if legal {
            return true;
        }
    }
    false
}

/// Pseudo-legal captures, queen promotions, and check-giving quiet moves, for
/// quiescence search (spec §4.3/§4.10: "captures, queen-promotes, or gives
/// check"). Legality is still filtered by the caller via make/unmake.
/// "Gives check" is determined by making the move, testing
/// `is_in_danger` on the opponent's king, then unmaking it (spec §4.3).
pub fn generate_tactical_moves(board: &mut Board, out: &mut MoveList) {
    let mut all = MoveList::new();
    generate_pseudo_legal_moves(board, &mut all);
    out.clear();
    let them = board.side_to_move().opponent();
    for &mv in all.iter() {
        if mv.is_capture() || mv.is_queen_promotion() {
            out.push(mv);
            continue;
        }
        let info = board.make_move(mv);
        let gives_check = is_in_danger(board, them);
        board.unmake_move(mv, info);
        if gives_check {
            out.push(mv);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_twenty_moves() {
        let mut board = Board::new();
        let mut scratch = MoveList::new();
        let mut legal = MoveList::new();
        generate_legal_moves(&mut board, &mut scratch, &mut legal);
        assert_eq!(legal.len(), 20);
    }

    #[test]
    fn en_passant_capture_is_generated() {
        let mut board = Board::from_fen("rnbqkb1r/ppp1pppp/5n2/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
        let mut scratch = MoveList::new();
        let mut legal = MoveList::new();
        generate_legal_moves(&mut board, &mut scratch, &mut legal);
        let ep = Move::new(Square::new(4, 4), Square::new(5, 3), Some(Piece::Pawn), None, None, true);
        assert!(legal.contains(ep));
    }

    #[test]
    fn both_castles_available() {
        let mut board =
            Board::from_fen("r3k2r/p1pp1ppp/bpnb1n2/1B2p1B1/1q1PP3/2N2N2/PPPQ1PPP/R3K2R w KQkq - 6 9");
        let mut scratch = MoveList::new();
        let mut legal = MoveList::new();
        generate_legal_moves(&mut board, &mut scratch, &mut legal);
        let ks = Move::new(Square::new(0, 4), Square::new(0, 6), None, None, Some(CastlingSide::Kingside), false);
        let qs = Move::new(Square::new(0, 4), Square::new(0, 2), None, None, Some(CastlingSide::Queenside), false);
        assert!(legal.contains(ks));
        assert!(legal.contains(qs));
    }

    #[test]
    fn a7_pawn_has_four_promotion_choices() {
        let mut board = Board::from_fen("3q1rk1/P4ppp/2np4/1p3b2/2NP4/4B3/5PPP/Q4RK1 w - - 0 25");
        let mut scratch = MoveList::new();
        let mut legal = MoveList::new();
        generate_legal_moves(&mut board, &mut scratch, &mut legal);
        let from_a7: Vec<_> = legal.iter().filter(|m| m.from() == Square::new(6, 0)).collect();
        assert_eq!(from_a7.len(), 4);
        assert!(from_a7.iter().all(|m| m.to() == Square::new(7, 0)));
    }

    #[test]
    fn tactical_moves_include_quiet_check_giving_moves() {
        let mut board = Board::from_fen("k7/8/8/8/8/8/8/4K2R w - - 0 1");
        let mut tactical = MoveList::new();
        generate_tactical_moves(&mut board, &mut tactical);
        let quiet_check = Move::new(Square::new(0, 7), Square::new(0, 0), None, None, None, false);
        assert!(tactical.contains(quiet_check));
    }

    #[test]
    fn tactical_moves_exclude_quiet_non_check_moves() {
        let mut board = Board::from_fen("k7/8/8/8/8/8/8/4K2R w - - 0 1");
        let mut tactical = MoveList::new();
        generate_tactical_moves(&mut board, &mut tactical);
        let quiet_non_check = Move::new(Square::new(4, 4), Square::new(4, 3), None, None, None, false);
        assert!(!tactical.contains(quiet_non_check));
    }

    #[test]
    fn no_legal_moves_in_checkmate() {
        let mut board =
            Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        let mut scratch = MoveList::new();
        assert!(!has_legal_move(&mut board, &mut scratch));
    }
}
