pub mod alphabeta;
pub mod eval;
pub mod tt;

pub use alphabeta::{best_move_for, search_best_move, SearchParams, SearchResult, Searcher};
pub use eval::{evaluate_move, nim_sum, winning_move};
