use crate::board::{GameState, Move, Piles, Player};
use crate::search::alphabeta::{SearchParams, Searcher};
use anyhow::Context;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub piles: Piles,
    pub first: Player,
    pub seed: u64,
    pub random_plies: usize, // opening plies chosen uniformly at random
    pub threads: usize,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self { games: 1, piles: Piles::new(vec![3, 4, 5]), first: Player::One, seed: 42, random_plies: 0, threads: 1 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub piles: Piles,
    pub first: Player,
    pub moves: Vec<Move>,
    pub winner: Player,
}

pub fn generate_games(params: &SelfPlayParams) -> anyhow::Result<Vec<GameRecord>> {
    let mut rng = SmallRng::seed_from_u64(params.seed);
    let mut searcher = Searcher::new(SearchParams { threads: params.threads.max(1), ..SearchParams::default() });
    let mut games = Vec::with_capacity(params.games);
    for gi in 0..params.games {
        let mut state = GameState::new(params.piles.clone(), params.first);
        let mut moves = Vec::new();
        while !state.is_terminal() {
            let mv = if moves.len() < params.random_plies {
                *state.legal_moves().choose(&mut rng).context("live position without moves")?
            } else {
                searcher.best_move(&state)?
            };
            state = state.play(mv)?;
            moves.push(mv);
        }
        let winner = state.winner().context("finished game without a winner")?;
        log::debug!("game {} finished in {} plies, winner {}", gi, moves.len(), winner);
        games.push(GameRecord { piles: params.piles.clone(), first: params.first, moves, winner });
    }
    Ok(games)
}

/// One JSON object per line.
pub fn write_jsonl(games: &[GameRecord], path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() { create_dir_all(dir)?; }
    }
    let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(f);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        writeln!(w)?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_jsonl(path: &Path) -> anyhow::Result<Vec<GameRecord>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).context("bad game record"))
        .collect()
}
