use nimbot::perft::{count_games, perft};
use nimbot::{GameState, Piles, Player};

fn state(piles: Vec<u32>) -> GameState {
    GameState::new(Piles::new(piles), Player::One)
}

#[test]
fn perft_small_depths() {
    let s = state(vec![0, 5, 3, 1]);
    assert_eq!(perft(&s, 0), 1);
    assert_eq!(perft(&s, 1), 9);
    assert_eq!(perft(&s, 2), 59);
    assert_eq!(perft(&state(vec![3, 4, 5]), 2), 113);
}

#[test]
fn terminal_nodes_count_as_leaves() {
    // [3, 1] runs out before depth 4 on most lines
    assert_eq!(perft(&state(vec![3, 1]), 4), 12);
    assert_eq!(count_games(&state(vec![2])), 2);
    assert_eq!(count_games(&state(vec![1, 1])), 2);
    assert_eq!(count_games(&state(vec![0])), 1);
}
