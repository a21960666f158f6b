use nimbot::search::{SearchParams, Searcher};
use nimbot::{GameState, Piles, Player};

#[test]
fn alpha_beta_visits_fewer_nodes_than_minimax() {
    let s = GameState::new(Piles::new(vec![3, 3, 2]), Player::One);
    let plain = SearchParams { use_tt: false, use_pruning: false, threads: 1 };
    let r1 = Searcher::new(plain).search(&s).unwrap();
    let r2 = Searcher::new(SearchParams { use_pruning: true, ..plain }).search(&s).unwrap();
    assert_eq!(r1.best_move, r2.best_move);
    assert!(r2.nodes < r1.nodes, "pruning should reduce nodes: {} vs {}", r2.nodes, r1.nodes);
}

#[test]
fn transposition_table_reduces_nodes() {
    let s = GameState::new(Piles::new(vec![4, 4, 3]), Player::One);
    let no_tt = SearchParams { use_tt: false, use_pruning: true, threads: 1 };
    let r1 = Searcher::new(no_tt).search(&s).unwrap();
    let r2 = Searcher::new(SearchParams { use_tt: true, ..no_tt }).search(&s).unwrap();
    assert_eq!(r1.best_move, r2.best_move);
    assert!(r2.nodes < r1.nodes, "tt should reduce nodes: {} vs {}", r2.nodes, r1.nodes);
}

#[test]
fn parallel_root_counts_all_workers() {
    let s = GameState::new(Piles::new(vec![2, 2]), Player::One);
    let p = SearchParams { use_tt: false, use_pruning: false, threads: 2 };
    let par = Searcher::new(p).search(&s).unwrap();
    let ser = Searcher::new(SearchParams { threads: 1, ..p }).search(&s).unwrap();
    // without cutoffs or a table both explore the full tree
    assert_eq!(par.nodes, ser.nodes);
    assert_eq!(par.best_move, ser.best_move);
}
