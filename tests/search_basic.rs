use nimbot::search::{best_move_for, evaluate_move, nim_sum, SearchParams, Searcher};
use nimbot::{apply_move, is_terminal, legal_moves, new_game, search_best_move, GameState, Move, NimError, Piles, Player};

fn state(piles: Vec<u32>) -> GameState {
    GameState::new(Piles::new(piles), Player::One)
}

fn all_boards(rows: usize, max: u32) -> Vec<Vec<u32>> {
    let mut out = vec![vec![]];
    for _ in 0..rows {
        out = out.into_iter().flat_map(|b| (0..=max).map(move |c| { let mut n = b.clone(); n.push(c); n })).collect();
    }
    out
}

#[test]
fn finds_the_balancing_move() {
    let s = state(vec![3, 1]);
    let mv = search_best_move(&s).unwrap();
    assert_eq!(mv, Move::new(0, 2));
    let next = apply_move(&s, mv).unwrap();
    assert_eq!(next.piles(), &Piles::new(vec![1, 1]));
    assert_eq!(nim_sum(next.piles()), 0);
}

#[test]
fn balanced_position_offers_no_escape() {
    let s = state(vec![1, 1]);
    for &mv in legal_moves(&s) {
        assert_ne!(evaluate_move(s.piles(), mv).unwrap(), 0, "{mv} should leave a non-zero nim-sum");
    }
    let r = Searcher::default().search(&s).unwrap();
    assert_eq!(r.value, -1);
}

#[test]
fn terminal_position_has_no_best_move() {
    let s = state(vec![0, 0]);
    assert_eq!(search_best_move(&s), Err(NimError::NoLegalMove));
}

#[test]
fn search_agrees_with_nim_theory() {
    for b in all_boards(3, 4) {
        let s = state(b.clone());
        if is_terminal(&s) { continue; }
        let r = Searcher::default().search(&s).unwrap();
        if nim_sum(s.piles()) != 0 {
            assert_eq!(r.value, 1, "board {b:?} should be a win");
            assert_eq!(evaluate_move(s.piles(), r.best_move).unwrap(), 0, "board {b:?} move {}", r.best_move);
        } else {
            assert_eq!(r.value, -1, "board {b:?} should be a loss");
            for &mv in legal_moves(&s) {
                assert_ne!(evaluate_move(s.piles(), mv).unwrap(), 0);
            }
        }
    }
}

#[test]
fn replaying_search_moves_ends_within_object_count() {
    for b in [vec![3, 4, 5], vec![7, 5, 3, 1], vec![1, 2, 3], vec![6]] {
        let mut s = new_game(Piles::new(b.clone()), Player::One);
        let budget = s.piles().total();
        let mut plies = 0u64;
        while !is_terminal(&s) {
            let mv = search_best_move(&s).unwrap();
            s = apply_move(&s, mv).unwrap();
            plies += 1;
        }
        assert!(plies <= budget, "{b:?} took {plies} plies");
    }
}

#[test]
fn search_is_deterministic() {
    let s = state(vec![7, 5, 3, 1]);
    let first = search_best_move(&s).unwrap();
    for _ in 0..5 {
        assert_eq!(search_best_move(&s).unwrap(), first);
    }
}

#[test]
fn toggles_do_not_change_the_move() {
    let configs = [
        SearchParams { use_tt: false, use_pruning: false, threads: 1 },
        SearchParams { use_tt: false, use_pruning: true, threads: 1 },
        SearchParams { use_tt: true, use_pruning: false, threads: 1 },
        SearchParams { use_tt: true, use_pruning: true, threads: 4 },
    ];
    for b in [vec![3, 4, 5], vec![2, 2, 1], vec![1, 2, 3], vec![4, 1]] {
        let s = state(b.clone());
        let reference = Searcher::default().search(&s).unwrap();
        for p in configs {
            let r = Searcher::new(p).search(&s).unwrap();
            assert_eq!((r.best_move, r.value), (reference.best_move, reference.value), "{b:?} with {p:?}");
        }
    }
}

#[test]
fn explicit_perspective_matches_side_to_move() {
    let s = GameState::new(Piles::new(vec![3, 4, 5]), Player::Two);
    assert_eq!(best_move_for(&s, Player::Two).unwrap(), search_best_move(&s).unwrap());
}
