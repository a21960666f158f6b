use crate::board::{GameState, Move, Player};
use crate::error::{NimError, Result};
use crate::search::eval::{LOSS_SCORE, WIN_SCORE};
use crate::search::tt::{Bound, Entry, Key, Tt};
use log::debug;
use rayon::prelude::*;
use std::sync::Arc;

/// Search toggles. None of them change the returned move: the search is
/// always full depth and exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    pub use_tt: bool,
    pub use_pruning: bool,
    pub threads: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { use_tt: true, use_pruning: true, threads: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Game value of `best_move` for the searching side: +1 win, -1 loss.
    pub value: i32,
    pub nodes: u64,
    /// Deepest ply visited. Never exceeds the number of objects on the board.
    pub max_ply: u32,
}

pub struct Searcher {
    tt: Arc<Tt>,
    params: SearchParams,
    pub(crate) nodes: u64,
    max_ply: u32,
}

impl Default for Searcher {
    fn default() -> Self { Self::new(SearchParams::default()) }
}

impl Searcher {
    pub fn new(params: SearchParams) -> Self {
        Self { tt: Arc::new(Tt::new()), params, nodes: 0, max_ply: 0 }
    }

    pub fn params(&self) -> SearchParams { self.params }

    pub fn set_params(&mut self, params: SearchParams) { self.params = params; }

    pub fn set_tt_capacity(&mut self, entries: usize) {
        self.tt = Arc::new(Tt::with_capacity(entries));
    }

    pub fn nodes(&self) -> u64 { self.nodes }

    /// Optimal move for the side to move.
    pub fn best_move(&mut self, state: &GameState) -> Result<Move> {
        self.search(state).map(|r| r.best_move)
    }

    pub fn search(&mut self, state: &GameState) -> Result<SearchResult> {
        self.search_for(state, state.to_move())
    }

    /// Root move maximizing the value for `perspective`; ties go to the
    /// earliest move in rules order.
    pub fn search_for(&mut self, state: &GameState, perspective: Player) -> Result<SearchResult> {
        if state.is_terminal() {
            return Err(NimError::NoLegalMove);
        }
        self.nodes = 0;
        self.max_ply = 0;
        // Entries are perspective-relative; never reuse them across searches
        self.tt.clear();

        let res = if self.params.threads > 1 && state.legal_moves().len() > 1 {
            self.search_root_parallel(state, perspective)
        } else {
            self.search_root(state, perspective)
        };
        debug!(
            "search piles={} to_move={} best={} value={} nodes={} max_ply={}",
            state.piles(), state.to_move(), res.best_move, res.value, res.nodes, res.max_ply
        );
        Ok(res)
    }

    fn search_root(&mut self, state: &GameState, perspective: Player) -> SearchResult {
        self.nodes += 1;
        let mut alpha = LOSS_SCORE;
        let beta = WIN_SCORE;
        let mut best: Option<(Move, i32)> = None;
        for &mv in state.legal_moves() {
            let child = state.advance(mv);
            let score = self.minimax(&child, perspective, alpha, beta, 1);
            if best.map_or(true, |(_, bs)| score > bs) { best = Some((mv, score)); }
            if score > alpha { alpha = score; }
            if self.params.use_pruning && alpha >= beta { break; }
        }
        // callers guarantee at least one legal move
        let (best_move, value) = best.unwrap_or((state.legal_moves()[0], LOSS_SCORE));
        if self.params.use_tt {
            self.tt.put(Key::of(state), Entry { value, bound: Bound::Exact });
        }
        SearchResult { best_move, value, nodes: self.nodes, max_ply: self.max_ply }
    }

    fn search_root_parallel(&mut self, state: &GameState, perspective: Player) -> SearchResult {
        // Each root move gets its own worker and a full window. The shared
        // table is the only state they have in common.
        let params = self.params;
        let shared_tt = self.tt.clone();
        let results: Vec<(Move, i32, u64, u32)> = state.legal_moves().par_iter().map(|&mv| {
            let child = state.advance(mv);
            let mut w = Searcher { tt: shared_tt.clone(), params, nodes: 0, max_ply: 0 };
            let score = w.minimax(&child, perspective, LOSS_SCORE, WIN_SCORE, 1);
            (mv, score, w.nodes, w.max_ply)
        }).collect();

        // Reduce in rules order so ties resolve exactly as the serial search
        let mut best: Option<(Move, i32)> = None;
        self.nodes = 1;
        for (mv, score, nodes, max_ply) in results {
            self.nodes += nodes;
            self.max_ply = self.max_ply.max(max_ply);
            if best.map_or(true, |(_, bs)| score > bs) { best = Some((mv, score)); }
        }
        let (best_move, value) = best.unwrap_or((state.legal_moves()[0], LOSS_SCORE));
        if params.use_tt {
            self.tt.put(Key::of(state), Entry { value, bound: Bound::Exact });
        }
        SearchResult { best_move, value, nodes: self.nodes, max_ply: self.max_ply }
    }

    /// Plain minimax over max nodes (`perspective` to move) and min nodes
    /// (opponent to move). Fail-soft: a returned value outside the window is
    /// a bound on the true value.
    fn minimax(&mut self, state: &GameState, perspective: Player, mut alpha: i32, mut beta: i32, ply: u32) -> i32 {
        self.nodes += 1;
        self.max_ply = self.max_ply.max(ply);
        if state.is_terminal() {
            return terminal_value(state, perspective);
        }

        let key = if self.params.use_tt { Some(Key::of(state)) } else { None };
        if let Some(k) = &key {
            if let Some(en) = self.tt.get(k) {
                match en.bound {
                    Bound::Exact => return en.value,
                    Bound::Lower => if en.value >= beta { return en.value; },
                    Bound::Upper => if en.value <= alpha { return en.value; },
                }
            }
        }

        let (orig_alpha, orig_beta) = (alpha, beta);
        let maximizing = state.to_move() == perspective;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for &mv in state.legal_moves() {
            let child = state.advance(mv);
            let score = self.minimax(&child, perspective, alpha, beta, ply + 1);
            if maximizing {
                if score > best { best = score; }
                if best > alpha { alpha = best; }
                if self.params.use_pruning && best >= beta { break; }
            } else {
                if score < best { best = score; }
                if best < beta { beta = best; }
                if self.params.use_pruning && best <= alpha { break; }
            }
        }

        if let Some(k) = key {
            let bound = if !self.params.use_pruning {
                Bound::Exact
            } else if best <= orig_alpha {
                Bound::Upper
            } else if best >= orig_beta {
                Bound::Lower
            } else {
                Bound::Exact
            };
            self.tt.put(k, Entry { value: best, bound });
        }
        best
    }

    pub fn tt_probe(&self, state: &GameState) -> Option<Entry> {
        self.tt.get(&Key::of(state))
    }

    pub fn tt_len(&self) -> usize { self.tt.len() }
}

/// The side to move in a terminal position has no move and has lost.
fn terminal_value(state: &GameState, perspective: Player) -> i32 {
    if state.to_move() == perspective { LOSS_SCORE } else { WIN_SCORE }
}

/// Optimal move for the side to move, with default parameters.
pub fn search_best_move(state: &GameState) -> Result<Move> {
    Searcher::default().best_move(state)
}

/// Like [`search_best_move`] but scored for an explicit `perspective`.
pub fn best_move_for(state: &GameState, perspective: Player) -> Result<Move> {
    Searcher::default().search_for(state, perspective).map(|r| r.best_move)
}
