//! Null-move pruning eligibility and reduction (spec §4.10 step 4).

use crate::board::Board;
use crate::types::{Color, Piece};

/// `R = 2` below depth 6, `R = 3` at or above it — the common dynamic-R
/// scheme spec.md leaves as a free choice between 2 and 3 (see DESIGN.md).
#[must_use]
pub fn null_move_reduction(depth: u32) -> u32 {
    if depth >= 6 {
        3
    } else {
        2
    }
}

/// True unless the side to move has only pawns and a king, in which case a
/// null move risks a zugzwang-induced false cutoff (spec §4.10: "not
/// near-zugzwang: side has non-pawn material").
#[must_use]
pub fn has_non_pawn_material(board: &Board, colour: Color) -> bool {
    for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
        if !board.piece_bb(colour, piece).is_empty() {
            return true;
        }
    }
    false
}

/// Whether a null move may be tried at this node at all (spec §4.10 step 4:
/// `allowNull`, not in check, non-PV, `d >= 3`, side has non-pawn material).
#[must_use]
pub fn null_move_eligible(
    allow_null: bool,
    is_pv: bool,
    depth: u32,
    in_check: bool,
    board: &Board,
    colour: Color,
) -> bool {
    let eligible =
        allow_null && !is_pv && depth >= 3 && !in_check && has_non_pawn_material(board, colour);
    #[cfg(feature = "logging")]
    if eligible {
        log::trace!("null-move try at depth={depth} reduction={}", null_move_reduction(depth));
    }
    eligible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shallow_depth_uses_reduction_two() {
        assert_eq!(null_move_reduction(3), 2);
    }

    #[test]
    fn deep_nodes_use_reduction_three() {
        assert_eq!(null_move_reduction(6), 3);
    }

    #[test]
    fn starting_position_has_non_pawn_material() {
        let board = Board::new();
        assert!(has_non_pawn_material(&board, Color::White));
    }

    #[test]
    fn bare_kings_and_pawns_have_no_non_pawn_material() {
        let board = Board::from_fen("8/4p3/8/8/8/8/4P3/4K2k w - - 0 1");
        assert!(!has_non_pawn_material(&board, Color::White));
    }

    #[test]
    fn pv_nodes_never_try_null_move() {
        let board = Board::new();
        assert!(!null_move_eligible(true, true, 5, false, &board, Color::White));
    }

    #[test]
    fn shallow_nodes_do_not_try_null_move() {
        let board = Board::new();
        assert!(!null_move_eligible(true, false, 2, false, &board, Color::White));
    }
}
