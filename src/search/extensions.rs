//! Check extension (spec §4.10 step 5).

/// Cap on how many plies a single search line may be extended (SPEC_FULL.md
/// §4, pinned from `backend/include/engine/engine.h`'s `MAX_EXTENSION_COUNT`).
pub const MAX_EXTENSION_COUNT: u32 = 5;

/// Extend the remaining depth by one ply when the side to move is in check
/// and the line hasn't already used up its extension budget.
#[must_use]
pub fn check_extension(in_check: bool, extensions_used: u32) -> u32 {
    if in_check && extensions_used < MAX_EXTENSION_COUNT {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extends_when_in_check_and_under_budget() {
        assert_eq!(check_extension(true, 0), 1);
    }

    #[test]
    fn does_not_extend_past_the_budget() {
        assert_eq!(check_extension(true, MAX_EXTENSION_COUNT), 0);
    }

    #[test]
    fn does_not_extend_when_not_in_check() {
        assert_eq!(check_extension(false, 0), 0);
    }
}
