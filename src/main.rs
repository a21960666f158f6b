use anyhow::Result;
use clap::Parser;
use nimbot::arbiter::{Arbiter, Candidate, CandidateSource, Chooser, Selection, TurnOutcome};
use nimbot::config::{AdvisorKind, GameConfig};
use nimbot::{GameState, Move, NimError, Piles, Player};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Nim against the alpha-beta engine", long_about = None)]
struct Args {
    /// JSON config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting piles, e.g. "3,4,5"
    #[arg(long)]
    piles: Option<Piles>,

    /// Side that moves first: 1 or 2
    #[arg(long)]
    first: Option<Player>,

    /// Side you play: 1 or 2
    #[arg(long)]
    human: Option<Player>,

    /// Second opinion offered on your turns: none, nim-sum, random
    #[arg(long)]
    advisor: Option<AdvisorKind>,

    /// Root-parallel search threads
    #[arg(long)]
    threads: Option<usize>,
}

struct StdinChooser<R> {
    input: R,
}

impl<R: BufRead> StdinChooser<R> {
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl<R: BufRead> Chooser for StdinChooser<R> {
    fn choose(&mut self, _state: &GameState, candidates: &[Candidate]) -> Option<Selection> {
        println!("\nChoose a move:");
        for (i, c) in candidates.iter().enumerate() {
            let who = match &c.source {
                CandidateSource::Engine => "engine".to_string(),
                CandidateSource::Advisor(name) => format!("advisor ({name})"),
            };
            println!("  {}. {} from {}, leaves nim-sum {}", i + 1, c.mv, who, c.nim_sum_after);
        }
        println!("  c. custom move");
        loop {
            print!("> ");
            let _ = io::stdout().flush();
            let line = self.read_line()?;
            if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
                return None;
            }
            if line.eq_ignore_ascii_case("c") {
                print!("row count: ");
                let _ = io::stdout().flush();
                let text = self.read_line()?;
                match text.parse::<Move>() {
                    Ok(mv) => return Some(Selection::Custom(mv)),
                    Err(e) => { println!("{e}"); continue; }
                }
            }
            match line.parse::<usize>() {
                Ok(n) if n >= 1 => return Some(Selection::Candidate(n - 1)),
                _ => println!("Enter an option number, 'c' or 'q'"),
            }
        }
    }

    fn rejected(&mut self, err: &NimError) {
        println!("Rejected: {err}");
    }
}

fn print_board(piles: &Piles) {
    println!();
    for (row, count) in piles.iter().enumerate() {
        println!("  {row}: {}", "|".repeat(count as usize));
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(p) = args.piles { cfg.piles = p; }
    if let Some(f) = args.first { cfg.first = f; }
    if let Some(h) = args.human { cfg.human = h; }
    if let Some(a) = args.advisor { cfg.advisor = a; }
    if let Some(t) = args.threads { cfg.search.threads = t; }
    cfg.validate()?;

    let mut arbiter = Arbiter::new(cfg.search_params());
    arbiter.set_advisor(cfg.build_advisor());
    let mut chooser = StdinChooser { input: io::stdin().lock() };
    let mut state = nimbot::new_game(cfg.piles.clone(), cfg.first);

    loop {
        print_board(state.piles());
        let report = if state.to_move() == cfg.human {
            match arbiter.play_turn(&state, &mut chooser) {
                Ok(r) => r,
                Err(NimError::SelectionAbandoned) => {
                    println!("Game abandoned.");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
        } else {
            let r = arbiter.engine_turn(&state)?;
            println!("Computer plays {}", r.chosen);
            r
        };
        match report.outcome {
            TurnOutcome::Continue(next) => state = next,
            TurnOutcome::Finished { winner, .. } => {
                let who = if winner == cfg.human { "You" } else { "The computer" };
                println!("\n{who} won ({winner} took the last object).");
                return Ok(());
            }
        }
    }
}
