//! Board-level integration tests: perft totals, FEN round-trips, make/unmake
//! inversion, and the transposition table (spec §8 testable properties).

use chess_engine::board::Board;
use chess_engine::perft::perft;
use chess_engine::transposition_table::{Bound, TranspositionTable};
use chess_engine::types::{Color, Square};

struct TestPosition {
    name: &'static str,
    fen: &'static str,
    depths: &'static [(u32, u64)],
}

const TEST_POSITIONS: &[TestPosition] = &[
    TestPosition {
        name: "Initial Position",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        depths: &[(1, 20), (2, 400), (3, 8902)],
    },
    TestPosition {
        name: "Kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depths: &[(1, 48), (2, 2039), (3, 97_862)],
    },
    TestPosition {
        name: "Castling-only endgame",
        fen: "r3k3/8/8/8/8/8/8/R3K2R w KQ - 0 1",
        depths: &[(1, 26), (2, 331)],
    },
];

#[test]
fn perft_positions() {
    for position in TEST_POSITIONS {
        let mut board = Board::from_fen(position.fen);
        for &(depth, expected) in position.depths {
            let nodes = perft(&mut board, depth);
            assert_eq!(nodes, expected, "perft failed for {} at depth {}", position.name, depth);
        }
    }
}

#[test]
fn fen_round_trips_through_board_fields() {
    let fen = "rnbqkb1r/ppp1pppp/5n2/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2";
    let board = Board::from_fen(fen);
    assert_eq!(board.side_to_move(), Color::White);
    assert_eq!(board.ep_square(), Some("d6".parse().unwrap()));
    assert_eq!(board.fullmove_number(), 2);
    assert_eq!(board.halfmove_clock(), 0);
}

#[test]
fn every_legal_move_from_startpos_inverts_under_unmake() {
    let mut board = Board::new();
    let before = board.clone();
    let mut scratch = chess_engine::moves::MoveList::new();
    let mut legal = chess_engine::moves::MoveList::new();
    chess_engine::movegen::generate_legal_moves(&mut board, &mut scratch, &mut legal);

    for &mv in legal.as_slice() {
        let info = board.make_move(mv);
        board.unmake_move(mv, info);
        assert_eq!(board.hash(), before.hash(), "undo did not restore hash for {mv}");
        assert_eq!(board.piece_at(mv.from()), before.piece_at(mv.from()));
        assert_eq!(board.piece_at(mv.to()), before.piece_at(mv.to()));
        assert_eq!(board.castling_rights(), before.castling_rights());
        assert_eq!(board.ep_square(), before.ep_square());
    }
}

#[test]
fn draw_by_fifty_move_rule_is_detected() {
    use chess_engine::game::{Game, GameStateEval};

    let board = Board::from_fen("8/8/8/8/8/8/8/K6k w - - 99 50");
    let mut game = Game::from_board(board);
    assert!(game.make_move(Square::new(0, 0), Square::new(0, 1), None));
    assert_eq!(game.current_game_state_evaluation(), GameStateEval::DrawByFiftyMoveRule);
}

#[test]
fn transposition_table_store_probe_depth_preference() {
    let mut tt = TranspositionTable::new(1);
    let hash = 0xdead_beef_u64;

    tt.store(hash, 1, 100, Bound::Exact, None);
    let entry = tt.probe(hash).expect("entry missing");
    assert_eq!(entry.depth, 1);

    tt.store(hash, 0, 50, Bound::Exact, None);
    let entry = tt.probe(hash).expect("entry missing after same-key store");
    assert_eq!(entry.score, 50, "same-position store always overwrites regardless of depth");

    tt.store(hash, 5, 200, Bound::Exact, None);
    let entry = tt.probe(hash).expect("entry missing after deeper store");
    assert_eq!(entry.depth, 5);
}
