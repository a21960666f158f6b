use nimbot::{apply_move, is_terminal, legal_moves, new_game, GameState, Move, NimError, Piles, Player};
use pretty_assertions::assert_eq;

fn all_boards(rows: usize, max: u32) -> Vec<Vec<u32>> {
    let mut out = vec![vec![]];
    for _ in 0..rows {
        out = out.into_iter().flat_map(|b| (0..=max).map(move |c| { let mut n = b.clone(); n.push(c); n })).collect();
    }
    out
}

#[test]
fn legal_moves_match_reference_position() {
    let s = new_game(Piles::new(vec![0, 5, 3, 1]), Player::One);
    let expected: Vec<Move> = [(1, 1), (1, 2), (1, 3), (1, 4), (1, 5), (2, 1), (2, 2), (2, 3), (3, 1)]
        .iter().map(|&(r, c)| Move::new(r, c)).collect();
    assert_eq!(legal_moves(&s).to_vec(), expected);

    let next = apply_move(&s, Move::new(1, 2)).unwrap();
    assert_eq!(next.piles(), &Piles::new(vec![0, 3, 3, 1]));
    assert_eq!(next.to_move(), Player::Two);
}

#[test]
fn overdrawn_pile_is_invalid() {
    let s = new_game(Piles::new(vec![3, 1]), Player::One);
    let err = apply_move(&s, Move::new(1, 5)).unwrap_err();
    assert!(matches!(err, NimError::InvalidMove { row: 1, count: 5, .. }), "got {err:?}");
    assert!(matches!(apply_move(&s, Move::new(2, 1)), Err(NimError::InvalidMove { .. })));
    assert!(matches!(apply_move(&s, Move::new(0, 0)), Err(NimError::InvalidMove { .. })));
}

#[test]
fn no_moves_exactly_when_board_is_cleared() {
    for b in all_boards(3, 3) {
        let s = GameState::new(Piles::new(b.clone()), Player::One);
        assert_eq!(legal_moves(&s).is_empty(), b.iter().all(|&c| c == 0), "board {b:?}");
        assert_eq!(is_terminal(&s), legal_moves(&s).is_empty());
    }
}

#[test]
fn every_move_takes_exactly_count_from_one_row() {
    for b in all_boards(3, 3) {
        let s = GameState::new(Piles::new(b.clone()), Player::Two);
        for &mv in legal_moves(&s) {
            let next = apply_move(&s, mv).unwrap();
            assert_eq!(next.piles().total(), s.piles().total() - mv.count as u64);
            for (row, (&before, after)) in b.iter().zip(next.piles().iter()).enumerate() {
                if row == mv.row { assert_eq!(after, before - mv.count); } else { assert_eq!(after, before); }
            }
        }
    }
}

#[test]
fn turns_alternate_to_the_end() {
    let mut s = new_game(Piles::new(vec![2, 3]), Player::Two);
    let mut expected = Player::Two;
    while !is_terminal(&s) {
        assert_eq!(s.to_move(), expected);
        let mv = legal_moves(&s)[0];
        s = apply_move(&s, mv).unwrap();
        expected = expected.opponent();
    }
    assert_eq!(s.to_move(), expected);
    assert_eq!(s.winner(), Some(expected.opponent()));
}

#[test]
fn original_state_is_untouched_by_apply() {
    let s = new_game(Piles::new(vec![4]), Player::One);
    let before = s.clone();
    let _ = apply_move(&s, Move::new(0, 3)).unwrap();
    assert_eq!(s, before);
}
