// Nim engine: rules, exact alpha-beta search, nim-sum heuristic, turn arbitration
pub mod advisor;
pub mod arbiter;
pub mod board;
pub mod config;
pub mod error;
pub mod perft;
pub mod search;
pub mod selfplay;

pub use board::{GameState, Move, Piles, Player};
pub use error::{NimError, Result};

/// Starting position with `first_to_move` on move.
pub fn new_game(piles: Piles, first_to_move: Player) -> GameState {
    GameState::new(piles, first_to_move)
}

pub fn legal_moves(state: &GameState) -> &[Move] {
    state.legal_moves()
}

pub fn apply_move(state: &GameState, mv: Move) -> Result<GameState> {
    board::successor(state, mv)
}

pub fn search_best_move(state: &GameState) -> Result<Move> {
    search::search_best_move(state)
}

/// Nim-sum left on the board after `mv`.
pub fn evaluate_move(state: &GameState, mv: Move) -> Result<u32> {
    search::evaluate_move(state.piles(), mv)
}

pub fn is_terminal(state: &GameState) -> bool {
    state.is_terminal()
}
