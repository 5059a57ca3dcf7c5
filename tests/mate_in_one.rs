//! Mate-in-one end-to-end scenarios (spec §8 scenario S6 and related
//! mating positions), driven through the `Engine`/`Game` façade the way a
//! host actually calls it rather than through internal search helpers.

use chess_engine::board::Board;
use chess_engine::engine::Engine;
use chess_engine::game::{Game, GameStateEval};

fn assert_finds_mate(fen: &str, expected_uci: &str) {
    let mut game = Game::from_board(Board::from_fen(fen));
    let mut engine = Engine::new(2000, 4, 4);
    let mv = engine.get_move(&mut game);
    assert_eq!(mv.to_string(), expected_uci, "wrong mating move for {fen}");

    assert!(game.make_move(mv.from(), mv.to(), mv.promotion()));
    assert_eq!(game.current_game_state_evaluation(), GameStateEval::Checkmate);
}

#[test]
fn foolsmate_in_one_is_found() {
    // Spec §8 S6: Fool's-mate-in-one, black has just played g5; Qh5# mates.
    assert_finds_mate(
        "rnbqkbnr/ppppp2p/5p2/6p1/4P3/2N5/PPPP1PPP/R1BQKBNR w KQkq - 0 3",
        "d1h5",
    );
}

#[test]
fn back_rank_mate_is_found() {
    assert_finds_mate("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1", "e1e8");
}

#[test]
fn engine_returns_null_move_in_checkmate() {
    let mut game = Game::from_board(Board::from_fen(
        "rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1",
    ));
    assert_eq!(game.current_game_state_evaluation(), GameStateEval::Checkmate);

    let mut engine = Engine::new(500, 4, 4);
    let mv = engine.get_move(&mut game);
    assert!(mv.is_null(), "no legal move exists in checkmate");
}
