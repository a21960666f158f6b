//! Per-turn move arbitration.
//!
//! A turn runs `AwaitCandidates -> AwaitSelection -> Apply`, then either
//! hands the next position back to the caller's loop or stops in
//! `Terminal`. Candidates come from the search engine (always present on a
//! live position) and from an optional advisor (dropped whenever it fails
//! or proposes an illegal move). The selection may also be a custom move,
//! which is checked against the position; a bad selection is reported to
//! the chooser and selection starts over with nothing applied.

use crate::advisor::{Advice, Advisor};
use crate::board::{GameState, Move, Player};
use crate::error::{NimError, Result};
use crate::search::alphabeta::{SearchParams, Searcher};
use crate::search::eval::evaluate_move;
use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitCandidates,
    AwaitSelection,
    Apply,
    Terminal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSource {
    Engine,
    Advisor(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub source: CandidateSource,
    pub mv: Move,
    /// Nim-sum left for the opponent; 0 means they face a lost position.
    pub nim_sum_after: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    pub candidates: Vec<Candidate>,
    /// Why the advisor contributed nothing, when it was asked and failed.
    pub advisor_failure: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Candidate(usize),
    Custom(Move),
}

/// The selecting side of a turn, usually a human front-end.
pub trait Chooser {
    /// `None` abandons the turn.
    fn choose(&mut self, state: &GameState, candidates: &[Candidate]) -> Option<Selection>;

    /// Called with the reason a selection was refused, before asking again.
    fn rejected(&mut self, _err: &NimError) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue(GameState),
    Finished { state: GameState, winner: Player, loser: Player },
}

impl TurnOutcome {
    pub fn state(&self) -> &GameState {
        match self {
            TurnOutcome::Continue(s) => s,
            TurnOutcome::Finished { state, .. } => state,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, TurnOutcome::Finished { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub mover: Player,
    pub chosen: Move,
    /// `None` for a custom move.
    pub source: Option<CandidateSource>,
    /// Selections refused before `chosen` was accepted.
    pub rejected: u32,
    pub outcome: TurnOutcome,
}

pub struct Arbiter {
    searcher: Searcher,
    advisor: Option<Box<dyn Advisor>>,
    phase: TurnPhase,
}

impl Default for Arbiter {
    fn default() -> Self { Self::new(SearchParams::default()) }
}

impl Arbiter {
    pub fn new(params: SearchParams) -> Self {
        Self { searcher: Searcher::new(params), advisor: None, phase: TurnPhase::AwaitCandidates }
    }

    pub fn with_advisor(mut self, advisor: Box<dyn Advisor>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    pub fn set_advisor(&mut self, advisor: Option<Box<dyn Advisor>>) { self.advisor = advisor; }

    pub fn has_advisor(&self) -> bool { self.advisor.is_some() }

    pub fn phase(&self) -> TurnPhase { self.phase }

    pub fn searcher(&self) -> &Searcher { &self.searcher }

    /// Engine candidate first, then the advisor's if it survived validation.
    pub fn gather_candidates(&mut self, state: &GameState) -> Result<CandidateSet> {
        self.phase = TurnPhase::AwaitCandidates;
        let engine = self.searcher.best_move(state)?;
        let mut set = CandidateSet::default();
        set.candidates.push(candidate(state, CandidateSource::Engine, engine)?);

        if let Some(advisor) = self.advisor.as_mut() {
            let name = advisor.name().to_string();
            match Advice::from_untrusted(state, advisor.suggest(state)) {
                Advice::Candidate(mv) => set.candidates.push(candidate(state, CandidateSource::Advisor(name), mv)?),
                Advice::Failure(reason) => {
                    warn!("advisor '{}' dropped: {}", name, reason);
                    set.advisor_failure = Some(reason);
                }
            }
        }
        self.phase = TurnPhase::AwaitSelection;
        Ok(set)
    }

    /// Resolves one selection to a move. Failing leaves the arbiter in
    /// `AwaitSelection` with nothing applied.
    pub fn select(
        &mut self,
        state: &GameState,
        set: &CandidateSet,
        selection: Selection,
    ) -> Result<(Move, Option<CandidateSource>)> {
        self.phase = TurnPhase::AwaitSelection;
        match selection {
            Selection::Candidate(i) => set
                .candidates
                .get(i)
                .map(|c| (c.mv, Some(c.source.clone())))
                .ok_or(NimError::InvalidSelection { index: i, available: set.candidates.len() }),
            Selection::Custom(mv) => {
                crate::board::validate(state.piles(), mv)?;
                if !state.is_legal(mv) {
                    return Err(NimError::invalid_move(mv.row, mv.count, "not a legal move in this position"));
                }
                Ok((mv, None))
            }
        }
    }

    pub fn apply(&mut self, state: &GameState, mv: Move) -> Result<TurnOutcome> {
        self.phase = TurnPhase::Apply;
        let next = state.play(mv)?;
        info!("{} plays {} -> {}", state.to_move(), mv, next.piles());
        if let Some(winner) = next.winner() {
            self.phase = TurnPhase::Terminal;
            return Ok(TurnOutcome::Finished { loser: next.to_move(), winner, state: next });
        }
        self.phase = TurnPhase::AwaitCandidates;
        Ok(TurnOutcome::Continue(next))
    }

    /// One full turn with a chooser picking among the candidates.
    pub fn play_turn(&mut self, state: &GameState, chooser: &mut dyn Chooser) -> Result<TurnReport> {
        let set = self.gather_candidates(state)?;
        let mut rejected = 0u32;
        let (chosen, source) = loop {
            let selection = chooser.choose(state, &set.candidates).ok_or(NimError::SelectionAbandoned)?;
            match self.select(state, &set, selection) {
                Ok(pick) => break pick,
                Err(e) => {
                    rejected += 1;
                    chooser.rejected(&e);
                }
            }
        };
        let outcome = self.apply(state, chosen)?;
        Ok(TurnReport { mover: state.to_move(), chosen, source, rejected, outcome })
    }

    /// The computer's turn: the search move, applied directly.
    pub fn engine_turn(&mut self, state: &GameState) -> Result<TurnReport> {
        self.phase = TurnPhase::AwaitCandidates;
        let chosen = self.searcher.best_move(state)?;
        let outcome = self.apply(state, chosen)?;
        Ok(TurnReport { mover: state.to_move(), chosen, source: Some(CandidateSource::Engine), rejected: 0, outcome })
    }
}

fn candidate(state: &GameState, source: CandidateSource, mv: Move) -> Result<Candidate> {
    let nim_sum_after = evaluate_move(state.piles(), mv)?;
    Ok(Candidate { source, mv, nim_sum_after })
}
