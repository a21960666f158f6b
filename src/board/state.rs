use crate::board::piles::{Move, Piles, Player};
use crate::error::{NimError, Result};
use serde::Serialize;

/// Utility stored on a position that has just become terminal.
pub const TERMINAL_UTILITY: i32 = 1;

/// An immutable position. Legal moves and the terminal utility are computed
/// once, at construction, and never change afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameState {
    to_move: Player,
    piles: Piles,
    legal_moves: Vec<Move>,
    utility: i32,
}

impl GameState {
    pub fn new(piles: Piles, first_to_move: Player) -> Self {
        Self::build(piles, first_to_move)
    }

    fn build(piles: Piles, to_move: Player) -> Self {
        let legal_moves = legal_moves(&piles);
        let utility = if legal_moves.is_empty() { TERMINAL_UTILITY } else { 0 };
        Self { to_move, piles, legal_moves, utility }
    }

    pub fn to_move(&self) -> Player { self.to_move }

    pub fn piles(&self) -> &Piles { &self.piles }

    /// Ascending by row, then by count.
    pub fn legal_moves(&self) -> &[Move] { &self.legal_moves }

    pub fn utility(&self) -> i32 { self.utility }

    pub fn is_terminal(&self) -> bool { self.legal_moves.is_empty() }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves.binary_search(&mv).is_ok()
    }

    /// The side that made the move leading here.
    pub fn last_mover(&self) -> Player { self.to_move.opponent() }

    /// In a terminal position the side to move cannot move and has lost.
    pub fn winner(&self) -> Option<Player> {
        if self.is_terminal() { Some(self.last_mover()) } else { None }
    }

    /// +1 if `perspective` has won, -1 if it has lost, 0 while play continues.
    pub fn outcome_for(&self, perspective: Player) -> i32 {
        match self.winner() {
            Some(w) if w == perspective => self.utility,
            Some(_) => -self.utility,
            None => 0,
        }
    }

    pub fn play(&self, mv: Move) -> Result<GameState> {
        successor(self, mv)
    }

    /// Successor for a move taken from `legal_moves()`; skips validation.
    pub(crate) fn advance(&self, mv: Move) -> GameState {
        GameState::build(self.piles.with_taken(mv.row, mv.count), self.to_move.opponent())
    }
}

/// Every legal move for `piles`, ordered by row and then by count.
pub fn legal_moves(piles: &Piles) -> Vec<Move> {
    let mut moves = Vec::with_capacity(piles.total().min(256) as usize);
    for (row, size) in piles.iter().enumerate() {
        for count in 1..=size {
            moves.push(Move::new(row, count));
        }
    }
    moves
}

/// Checks the move invariants: row in range, count in `1..=piles[row]`.
pub fn validate(piles: &Piles, mv: Move) -> Result<()> {
    let Some(size) = piles.get(mv.row) else {
        return Err(NimError::invalid_move(
            mv.row,
            mv.count,
            format!("row out of range (board has {} rows)", piles.len()),
        ));
    };
    if mv.count == 0 {
        return Err(NimError::invalid_move(mv.row, mv.count, "must take at least one object"));
    }
    if mv.count > size {
        return Err(NimError::invalid_move(
            mv.row,
            mv.count,
            format!("row {} only has {} objects", mv.row, size),
        ));
    }
    Ok(())
}

/// New configuration with only the targeted row reduced.
pub fn apply(piles: &Piles, mv: Move) -> Result<Piles> {
    validate(piles, mv)?;
    Ok(piles.with_taken(mv.row, mv.count))
}

pub fn successor(state: &GameState, mv: Move) -> Result<GameState> {
    if !state.is_legal(mv) {
        validate(&state.piles, mv)?;
        return Err(NimError::invalid_move(mv.row, mv.count, "not a legal move in this position"));
    }
    Ok(state.advance(mv))
}

pub fn is_terminal(state: &GameState) -> bool {
    state.is_terminal()
}
