//! The in-process search façade (spec §6.1, component C10's driver).
//!
//! `Engine` owns everything a search needs across calls — the transposition
//! table, move-ordering heuristics, opening book, and cancellation flag —
//! the way the teacher's `SearchState` bundles its own `tt`/`killer_moves`/
//! `history` (spec §9: "per-engine mutable caches... strategy: put mutable
//! caches on the Engine owning-struct").

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::evaluation::{evaluate, MATE};
use crate::game::Game;
use crate::moves::Move;
use crate::opening_book::OpeningBook;
use crate::search::{negamax, OrderingTables, SearchContext, SearchControl};
use crate::transposition_table::TranspositionTable;

/// Bundles the constructor parameters of [`Engine::new`] plus the TT size
/// and opening-book RNG seed spec.md's Open Questions require to be
/// injectable (SPEC_FULL.md §4.13, component C14).
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    pub time_limit_ms: u64,
    pub max_depth: u8,
    pub quiescence_depth: u8,
    pub tt_size_mb: usize,
    pub book_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            time_limit_ms: 1000,
            max_depth: 64,
            quiescence_depth: 8,
            tt_size_mb: 64,
            book_seed: 0xC0FFEE,
        }
    }
}

/// Iterative-deepening negamax engine (spec §6.1). Long-lived: construct
/// once per game, reuse across `get_move` calls so the transposition table
/// keeps accumulating value.
pub struct Engine {
    config: EngineConfig,
    tt: TranspositionTable,
    ordering: OrderingTables,
    book: OpeningBook,
    stop: Arc<AtomicBool>,
    /// Optional sink a host can poll between iterations for incremental UI
    /// updates (spec §5, grounded on the teacher's
    /// `SearchOptions::sink: Option<Arc<Mutex<Option<Move>>>>`).
    sink: Option<Arc<Mutex<Option<Move>>>>,
    max_depth_searched: u8,
    current_evaluation: i16,
}

impl Engine {
    /// Construct an engine with spec.md §6.1's three parameters; TT size and
    /// book seed take [`EngineConfig::default`] values. Use
    /// [`Engine::with_config`] to set those explicitly.
    #[must_use]
    pub fn new(time_limit_ms: u64, max_depth: u8, quiescence_depth: u8) -> Self {
        Self::with_config(EngineConfig {
            time_limit_ms,
            max_depth,
            quiescence_depth,
            ..EngineConfig::default()
        })
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Engine {
            config,
            tt: TranspositionTable::new(config.tt_size_mb.max(1)),
            ordering: OrderingTables::new(config.max_depth as usize + 1),
            book: OpeningBook::new(config.book_seed),
            stop: Arc::new(AtomicBool::new(false)),
            sink: None,
            max_depth_searched: 0,
            current_evaluation: 0,
        }
    }

    /// Override the time budget and depth ceiling for the next [`Engine::get_move`]
    /// call, independent of the values `new`/`with_config` were constructed
    /// with (spec §6.1: a UCI `go` command carries its own per-move limits).
    pub fn set_search_limits(&mut self, time_limit_ms: u64, max_depth: u8) {
        self.config.time_limit_ms = time_limit_ms;
        self.config.max_depth = max_depth;
    }

    /// Load opening-book entries (spec §6.5). Data loading itself is a
    /// Non-goal; the caller parses `{hash -> moves[]}` pairs however it
    /// likes and hands them here.
    pub fn load_book<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (u64, Vec<Move>)>,
    {
        self.book.load(entries);
    }

    /// A clonable handle a host can flip to cancel an in-flight search from
    /// another thread (spec §5 cancellation).
    #[must_use]
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Register a sink the engine publishes its current best move to after
    /// every completed iteration, for a host polling between depths.
    pub fn set_sink(&mut self, sink: Option<Arc<Mutex<Option<Move>>>>) {
        self.sink = sink;
    }

    #[must_use]
    pub fn max_depth_searched(&self) -> u8 {
        self.max_depth_searched
    }

    /// White-perspective centipawn score from the most recently completed
    /// search (spec §6.1).
    #[must_use]
    pub fn current_evaluation(&self) -> i16 {
        self.current_evaluation
    }

    /// Find the best move for `game`'s current position within the
    /// configured time budget (spec §4.10 entry point / §6.1).
    pub fn get_move(&mut self, game: &mut Game) -> Move {
        self.stop.store(false, Ordering::Relaxed);
        self.tt.new_generation();
        self.ordering.reset_killers();
        self.ordering.age_history();
        self.max_depth_searched = 0;

        let root_hash = game.board().hash();
        let book_move = self.book.get_move_for_board(root_hash, game.board());
        if !book_move.is_null() {
            self.current_evaluation = evaluate(game.board()) as i16;
            return book_move;
        }

        let deadline_budget = Duration::from_millis(self.config.time_limit_ms);
        let mut best_move = Move::NULL;
        // One shared clock for the whole iterative-deepening loop (spec §4.10
        // step 2 "abort deepening when the wall-clock budget is exhausted"):
        // a fresh `SearchControl` per depth would reset the deadline every
        // iteration and let total search time grow unbounded.
        let mut control = SearchControl::new(Arc::clone(&self.stop), deadline_budget);
        let search_started = Instant::now();

        for depth in 1..=self.config.max_depth {
            let (board, repetition) = game.split_for_search();
            let mut ctx = SearchContext::new(
                &mut self.tt,
                &mut self.ordering,
                &mut control,
                self.config.quiescence_depth,
                repetition,
            );

            let score = negamax(board, &mut ctx, depth as i32, 0, -MATE, MATE, true, true, 0);

            if ctx.aborted {
                break;
            }

            let depth_best = self.tt.probe(root_hash).and_then(|e| e.best_move);
            let Some(mv) = depth_best else { break };
            best_move = mv;
            self.max_depth_searched = depth;
            self.current_evaluation = score.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;

            if let Some(sink) = &self.sink {
                *sink.lock() = Some(best_move);
            }

            #[cfg(feature = "logging")]
            log::debug!(
                "depth {depth} score {score} move {best_move} nodes {} elapsed {:?}",
                ctx.control.nodes(),
                search_started.elapsed()
            );

            if score.abs() >= MATE - i32::from(self.config.max_depth) {
                break;
            }
        }

        best_move
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    #[test]
    fn finds_mate_in_one() {
        let mut game = Game::from_board(crate::board::Board::from_fen(
            "rnbqkbnr/ppppp2p/5p2/6p1/4P3/2N5/PPPP1PPP/R1BQKBNR w KQkq - 0 3",
        ));
        let mut engine = Engine::new(2000, 4, 4);
        let mv = engine.get_move(&mut game);
        assert_eq!(mv.from(), Square::new(0, 3));
        assert_eq!(mv.to(), Square::new(4, 7));
    }

    #[test]
    fn always_returns_a_legal_move_from_the_start_position() {
        let mut game = Game::new();
        let mut engine = Engine::new(200, 3, 4);
        let mv = engine.get_move(&mut game);
        assert!(!mv.is_null());
        assert!(game.make_move(mv.from(), mv.to(), mv.promotion()));
    }

    #[test]
    fn default_config_has_sane_values() {
        let config = EngineConfig::default();
        assert!(config.time_limit_ms > 0);
        assert!(config.max_depth > 0);
    }
}
