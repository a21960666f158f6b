//! Seam for external move advisors.
//!
//! An advisor is anything that can look at a position and propose a move:
//! a language-model service adapter, a heuristic, a random player. Its
//! output is untrusted. [`Advice::from_untrusted`] re-validates every
//! suggestion against the position's legal moves before anything else
//! sees it, and an advisor that errors or proposes an illegal move simply
//! contributes no candidate.

use crate::board::{GameState, Move, Player};
use crate::error::{NimError, Result};
use crate::search::eval::winning_move;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

pub trait Advisor {
    fn name(&self) -> &str;

    /// May block; callers embedding a networked advisor impose their own
    /// timeout and report expiry as an error.
    fn suggest(&mut self, state: &GameState) -> Result<Move>;
}

/// Tagged result of one advisory request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advice {
    Candidate(Move),
    Failure(String),
}

impl Advice {
    pub fn from_untrusted(state: &GameState, suggested: Result<Move>) -> Advice {
        match suggested {
            Ok(mv) if state.is_legal(mv) => Advice::Candidate(mv),
            Ok(mv) => Advice::Failure(format!("suggested {mv}, which is not legal here")),
            Err(e) => Advice::Failure(e.to_string()),
        }
    }

    pub fn candidate(&self) -> Option<Move> {
        match self {
            Advice::Candidate(mv) => Some(*mv),
            Advice::Failure(_) => None,
        }
    }
}

/// Position payload handed to text-based advisors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvisorRequest {
    pub board: Vec<u32>,
    pub current_player: Player,
    pub moves: Vec<Move>,
}

impl AdvisorRequest {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            board: state.piles().as_slice().to_vec(),
            current_player: state.to_move(),
            moves: state.legal_moves().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| NimError::advisor(format!("encode request: {e}")))
    }
}

/// Pulls the move out of a reply shaped like
///
/// ```text
/// Move: (1, 2)
/// Explanation: ...
/// ```
pub fn parse_suggestion(reply: &str) -> Result<Move> {
    let line = reply
        .lines()
        .map(str::trim)
        .find_map(|l| l.strip_prefix("Move:"))
        .ok_or_else(|| NimError::advisor("reply has no 'Move:' line"))?;
    line.trim()
        .parse::<Move>()
        .map_err(|e| NimError::advisor(format!("unreadable move in reply: {e}")))
}

/// The `Explanation:` line of a reply, if any.
pub fn parse_explanation(reply: &str) -> Option<String> {
    reply
        .lines()
        .map(str::trim)
        .find_map(|l| l.strip_prefix("Explanation:"))
        .map(|e| e.trim().to_string())
}

/// Plays the zero nim-sum move when one exists, otherwise the first legal move.
#[derive(Debug, Default, Clone)]
pub struct NimSumAdvisor;

impl Advisor for NimSumAdvisor {
    fn name(&self) -> &str { "nim-sum" }

    fn suggest(&mut self, state: &GameState) -> Result<Move> {
        winning_move(state)
            .or_else(|| state.legal_moves().first().copied())
            .ok_or(NimError::NoLegalMove)
    }
}

/// Uniformly random legal moves from a seeded generator.
pub struct RandomAdvisor {
    rng: SmallRng,
}

impl RandomAdvisor {
    pub fn new(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }
}

impl Advisor for RandomAdvisor {
    fn name(&self) -> &str { "random" }

    fn suggest(&mut self, state: &GameState) -> Result<Move> {
        state.legal_moves().choose(&mut self.rng).copied().ok_or(NimError::NoLegalMove)
    }
}

/// Adapter for advisors that answer in free text. `ask` receives the
/// request and returns the raw reply, or an error message when the
/// service could not be reached.
pub struct TextAdvisor<F> {
    name: String,
    ask: F,
    last_explanation: Option<String>,
}

impl<F> TextAdvisor<F>
where
    F: FnMut(&AdvisorRequest) -> std::result::Result<String, String>,
{
    pub fn new(name: impl Into<String>, ask: F) -> Self {
        Self { name: name.into(), ask, last_explanation: None }
    }

    pub fn last_explanation(&self) -> Option<&str> {
        self.last_explanation.as_deref()
    }
}

impl<F> Advisor for TextAdvisor<F>
where
    F: FnMut(&AdvisorRequest) -> std::result::Result<String, String>,
{
    fn name(&self) -> &str { &self.name }

    fn suggest(&mut self, state: &GameState) -> Result<Move> {
        let req = AdvisorRequest::from_state(state);
        let reply = (self.ask)(&req).map_err(|e| NimError::advisor(e))?;
        self.last_explanation = parse_explanation(&reply);
        parse_suggestion(&reply)
    }
}
