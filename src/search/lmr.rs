//! Late-move reduction (spec §4.10 step 8).

/// How much to reduce the remaining depth for a late quiet move, or `None`
/// if the move doesn't qualify (captures, promotions, and the first few
/// moves at a node always search at full depth).
///
/// Reduction is 1 ply, or `1 + log2(move_index)` at deeper nodes, and never
/// drops the searched depth below 1 (spec §4.10: "never reduce below 1").
#[must_use]
pub fn reduction(depth: u32, move_index: usize, in_check: bool, is_quiet: bool) -> u32 {
    if in_check || !is_quiet || move_index < 3 || depth < 3 {
        return 0;
    }
    let log_term = (move_index as f64).log2().floor() as u32;
    let reduction = (if depth >= 6 { 1 + log_term } else { 1 }).min(depth - 1);
    #[cfg(feature = "logging")]
    log::trace!("lmr reduce move #{move_index} at depth={depth} by {reduction}");
    reduction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_reduction_before_move_index_three() {
        assert_eq!(reduction(5, 2, false, true), 0);
    }

    #[test]
    fn no_reduction_for_captures_or_checks() {
        assert_eq!(reduction(5, 4, false, false), 0);
        assert_eq!(reduction(5, 4, true, true), 0);
    }

    #[test]
    fn reduction_never_exceeds_depth_minus_one() {
        assert!(reduction(3, 10, false, true) <= 2);
    }

    #[test]
    fn deeper_nodes_scale_with_log_move_index() {
        assert!(reduction(8, 8, false, true) >= reduction(8, 4, false, true));
    }
}
