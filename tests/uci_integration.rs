//! End-to-end UCI adapter test: spawn the `uci` binary and drive it over
//! stdin/stdout exactly as a GUI host would (spec §1 "a UCI adapter is a
//! separate thin shim").

use std::io::Write;
use std::process::{Command, Stdio};

use chess_engine::game::Game;
use chess_engine::uci::parse_position_command;

#[test]
fn uci_smoke_test_returns_legal_move() {
    let exe = env!("CARGO_BIN_EXE_uci");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn engine binary");

    let input = b"uci\nisready\nposition startpos moves e2e4\ngo movetime 50\nquit\n";
    child.stdin.as_mut().unwrap().write_all(input).unwrap();

    let output = child.wait_with_output().expect("failed to read output");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("uciok"));
    assert!(stdout.contains("readyok"));

    let bestmove_line = stdout
        .lines()
        .filter(|line| line.starts_with("bestmove"))
        .last()
        .expect("no bestmove found");
    let parts: Vec<&str> = bestmove_line.split_whitespace().collect();
    assert!(parts.len() >= 2, "bestmove missing move: {bestmove_line}");
    let mv_text = parts[1];
    assert_ne!(mv_text, "0000", "engine returned null move from a position with legal moves");

    let mut game = Game::new();
    let setup_parts = ["position", "startpos", "moves", "e2e4"];
    parse_position_command(&mut game, &setup_parts);

    let from: chess_engine::types::Square = mv_text[0..2].parse().expect("bad from-square");
    let legal = game.legal_moves(from).iter().any(|m| m.to_string() == mv_text);
    assert!(legal, "bestmove {mv_text} is not legal in the resulting position");
}
