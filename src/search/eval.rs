use crate::board::{apply, GameState, Move, Piles};
use crate::error::Result;

// Search scores, from the searching side's point of view.
pub const WIN_SCORE: i32 = 1;
pub const LOSS_SCORE: i32 = -1;

/// XOR of all pile counts. Zero means the side to move loses against
/// perfect play.
pub fn nim_sum(piles: &Piles) -> u32 {
    piles.iter().fold(0, |acc, c| acc ^ c)
}

/// Nim-sum left for the opponent after `mv`. Advisory only: the search
/// never consults it.
pub fn evaluate_move(piles: &Piles, mv: Move) -> Result<u32> {
    let next = apply(piles, mv)?;
    Ok(nim_sum(&next))
}

/// First move (in rules order) that leaves a zero nim-sum, if one exists.
pub fn winning_move(state: &GameState) -> Option<Move> {
    let piles = state.piles();
    let total = nim_sum(piles);
    if total == 0 {
        return None;
    }
    state.legal_moves().iter().copied().find(|mv| {
        // a legal move always applies cleanly
        evaluate_move(piles, *mv).map_or(false, |s| s == 0)
    })
}
