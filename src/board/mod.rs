pub mod piles;
pub mod state;

pub use piles::{Move, Piles, Player};
pub use state::{apply, is_terminal, legal_moves, successor, validate, GameState};
