//! UCI entry point: runs the protocol loop in [`chess_engine::uci`] (spec §1
//! Non-goals — the adapter is a thin shim, not part of the scored core).
fn main() {
    chess_engine::uci::run_uci_loop();
}
