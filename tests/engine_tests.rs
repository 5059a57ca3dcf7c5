//! Integration tests for the `Engine`/`Game` façade (spec §6.1, §8).

use chess_engine::engine::{Engine, EngineConfig};
use chess_engine::game::Game;
use chess_engine::types::Square;

#[test]
fn engine_depth_search_returns_move() {
    let mut game = Game::new();
    let mut engine = Engine::new(5000, 1, 2);
    let mv = engine.get_move(&mut game);
    assert!(!mv.is_null(), "depth-1 search from the start position must find a move");
}

#[test]
fn engine_time_limited_search_returns_move_within_time() {
    use std::time::Instant;

    let mut game = Game::new();
    let mut engine = Engine::new(50, 64, 4);
    let start = Instant::now();
    let mv = engine.get_move(&mut game);
    assert!(!mv.is_null(), "a legal move exists so the search must return one");
    assert!(start.elapsed().as_millis() < 5000, "search should respect its time budget");
}

#[test]
fn get_move_is_deterministic_for_a_fixed_depth() {
    // Spec §8 property 6: cleared tables, identical heuristic state, fixed
    // depth and an effectively-infinite time budget give a deterministic move.
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    let mut game_a = Game::from_board(chess_engine::board::Board::from_fen(fen));
    let mut engine_a = Engine::with_config(EngineConfig {
        time_limit_ms: 60_000,
        max_depth: 3,
        quiescence_depth: 4,
        ..EngineConfig::default()
    });
    let move_a = engine_a.get_move(&mut game_a);

    let mut game_b = Game::from_board(chess_engine::board::Board::from_fen(fen));
    let mut engine_b = Engine::with_config(EngineConfig {
        time_limit_ms: 60_000,
        max_depth: 3,
        quiescence_depth: 4,
        ..EngineConfig::default()
    });
    let move_b = engine_b.get_move(&mut game_b);

    assert_eq!(move_a, move_b);
}

#[test]
fn set_search_limits_overrides_constructor_defaults() {
    let mut engine = Engine::new(1000, 64, 4);
    engine.set_search_limits(25, 2);
    let mut game = Game::new();
    let mv = engine.get_move(&mut game);
    assert!(!mv.is_null());
    assert!(engine.max_depth_searched() <= 2);
}

#[test]
fn engine_reports_white_up_a_queen_as_strongly_positive() {
    let board = chess_engine::board::Board::from_fen(
        "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    );
    let mut game = Game::from_board(board);
    let mut engine = Engine::new(200, 3, 4);
    let _ = engine.get_move(&mut game);
    assert!(engine.current_evaluation() > 500);
}

#[test]
fn opening_book_move_is_preferred_over_search() {
    let mut game = Game::new();
    let mut engine = Engine::new(1000, 64, 4);
    let root_hash = game.board().hash();
    let e2e4 = chess_engine::Move::new(Square::new(1, 4), Square::new(3, 4), None, None, None, false);
    engine.load_book([(root_hash, vec![e2e4])]);
    let mv = engine.get_move(&mut game);
    assert_eq!(mv, e2e4, "a book hit must short-circuit search");
}
