use crate::board::GameState;

/// Leaf count of the game tree `depth` plies below `state`. Terminal
/// positions reached early count as leaves.
pub fn perft(state: &GameState, depth: u32) -> u64 {
    if depth == 0 || state.is_terminal() { return 1; }
    let mut nodes = 0u64;
    for &mv in state.legal_moves() {
        let child = state.advance(mv);
        nodes += perft(&child, depth - 1);
    }
    nodes
}

/// Number of distinct move sequences from `state` to the end of the game.
pub fn count_games(state: &GameState) -> u64 {
    let depth = u32::try_from(state.piles().total()).unwrap_or(u32::MAX);
    perft(state, depth)
}
