//! Bucketed transposition table (spec §4.7, component C9).
//!
//! Indexed by the low bits of the Zobrist key; each bucket holds [`BUCKET_SIZE`]
//! entries searched linearly. Replacement prefers the same position, then the
//! slot with the lowest `(depth, generation, bound)` score — grounded on the
//! teacher's single-entry-per-slot `transposition_table.rs`, generalized to
//! the 4-way bucket spec.md calls for.

use crate::moves::Move;

pub const BUCKET_SIZE: usize = 4;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug)]
pub struct TTEntry {
    pub key: u64,
    pub score: i16,
    pub depth: u8,
    pub generation: u16,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

impl TTEntry {
    /// Replacement-priority score (spec §4.7): deeper and more-recent entries,
    /// and exact bounds, are worth more to keep.
    fn priority(&self, current_gen: u16) -> i32 {
        let age = current_gen.wrapping_sub(self.generation) as i32;
        let exact_bonus = if self.bound == Bound::Exact { 128 } else { 0 };
        ((self.depth as i32) << 8) - (age << 6) + exact_bonus
    }
}

#[derive(Clone, Copy, Default)]
struct Slot(Option<TTEntry>);

struct Bucket {
    slots: [Slot; BUCKET_SIZE],
}

impl Bucket {
    fn empty() -> Self {
        Bucket { slots: [Slot::default(); BUCKET_SIZE] }
    }
}

/// Power-of-two-sized, bucketed, open-addressed-by-index position cache.
pub struct TranspositionTable {
    buckets: Vec<Bucket>,
    mask: u64,
    generation: u16,
}

#[must_use]
fn floor_to_pow2(n: usize) -> usize {
    if n == 0 {
        1
    } else {
        1usize << (usize::BITS - 1 - n.leading_zeros())
    }
}

impl TranspositionTable {
    /// Size the table to roughly `size_mb` megabytes (spec §4.7). Resource
    /// constraints (§7) are clamped rather than rejected: a request of zero
    /// or negative megabytes still yields a usable one-bucket table.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let bucket_bytes = std::mem::size_of::<Bucket>();
        let requested_bytes = size_mb.saturating_mul(1024 * 1024);
        let num_buckets = floor_to_pow2((requested_bytes / bucket_bytes).max(1));
        let mut buckets = Vec::with_capacity(num_buckets);
        buckets.resize_with(num_buckets, Bucket::empty);
        TranspositionTable { buckets, mask: (num_buckets - 1) as u64, generation: 0 }
    }

    #[inline]
    fn bucket_index(&self, key: u64) -> usize {
        (key & self.mask) as usize
    }

    #[must_use]
    pub fn probe(&self, key: u64) -> Option<&TTEntry> {
        let bucket = &self.buckets[self.bucket_index(key)];
        let found = bucket.slots.iter().find_map(|slot| slot.0.as_ref().filter(|e| e.key == key));
        #[cfg(feature = "logging")]
        match found {
            Some(entry) => log::trace!("tt probe {key:016x} hit depth={} bound={:?}", entry.depth, entry.bound),
            None => log::trace!("tt probe {key:016x} miss"),
        }
        found
    }

    pub fn store(
        &mut self,
        key: u64,
        depth: u8,
        score: i16,
        bound: Bound,
        best_move: Option<Move>,
    ) {
        let generation = self.generation;
        let bucket = &mut self.buckets[self.bucket_index(key)];

        if let Some(slot) = bucket.slots.iter_mut().find(|s| matches!(s.0, Some(e) if e.key == key)) {
            #[cfg(feature = "logging")]
            log::trace!("tt store {key:016x} depth={depth} bound={bound:?} (same-key overwrite)");
            slot.0 = Some(TTEntry { key, score, depth, generation, bound, best_move });
            return;
        }

        let victim = bucket
            .slots
            .iter_mut()
            .min_by_key(|s| match &s.0 {
                None => i32::MIN,
                Some(e) => e.priority(generation),
            })
            .expect("bucket is never empty of slots");
        #[cfg(feature = "logging")]
        log::trace!("tt store {key:016x} depth={depth} bound={bound:?} (replaces priority victim)");
        victim.0 = Some(TTEntry { key, score, depth, generation, bound, best_move });
    }

    /// Age the table between top-level `get_move` invocations (spec §4.10
    /// step 1); newer stores now outrank every previously-stored entry.
    pub fn new_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = Bucket::empty();
        }
        self.generation = 0;
    }

    #[must_use]
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_to_pow2_rounds_down() {
        assert_eq!(floor_to_pow2(1), 1);
        assert_eq!(floor_to_pow2(5), 4);
        assert_eq!(floor_to_pow2(1024), 1024);
        assert_eq!(floor_to_pow2(0), 1);
    }

    #[test]
    fn store_and_probe_roundtrip() {
        let mut tt = TranspositionTable::new(1);
        tt.store(0xdead_beef, 5, 123, Bound::Exact, None);
        let entry = tt.probe(0xdead_beef).expect("entry missing");
        assert_eq!(entry.depth, 5);
        assert_eq!(entry.score, 123);
    }

    #[test]
    fn probe_miss_returns_none() {
        let tt = TranspositionTable::new(1);
        assert!(tt.probe(42).is_none());
    }

    #[test]
    fn same_key_always_overwrites() {
        let mut tt = TranspositionTable::new(1);
        tt.store(7, 1, 1, Bound::Exact, None);
        tt.store(7, 1, 99, Bound::Upper, None);
        assert_eq!(tt.probe(7).unwrap().score, 99);
    }

    #[test]
    fn new_generation_prefers_fresh_entries_on_collision() {
        // Force a tiny table (1 bucket) so distinct keys collide.
        let mut tt = TranspositionTable::new(1);
        assert_eq!(tt.num_buckets(), 1);
        for i in 0..BUCKET_SIZE as u64 {
            tt.store(i, 3, 0, Bound::Exact, None);
        }
        tt.new_generation();
        // All four slots are from generation 0, depth 3. A new shallow entry
        // from generation 1 should still be able to displace the lowest-depth
        // generation-0 entry once depths tie, since age counts against it.
        tt.store(100, 3, 0, Bound::Exact, None);
        assert!(tt.probe(100).is_some());
    }
}
