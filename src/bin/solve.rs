use clap::Parser;
use nimbot::search::{nim_sum, SearchParams, Searcher};
use nimbot::{GameState, Piles, Player};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "nimbot-solve", version, about = "Solve a Nim position with the exact search")]
struct Args {
    /// Piles, e.g. "7,5,3,1"
    #[arg(long, default_value = "7,5,3,1")]
    piles: Piles,

    /// Threads for the root-parallel search
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Disable the transposition table
    #[arg(long, default_value_t = false)]
    no_tt: bool,

    /// Disable alpha-beta cutoffs (plain minimax)
    #[arg(long, default_value_t = false)]
    no_pruning: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let state = GameState::new(args.piles.clone(), Player::One);

    let mut s = Searcher::new(SearchParams {
        use_tt: !args.no_tt,
        use_pruning: !args.no_pruning,
        threads: args.threads.max(1),
    });

    let t0 = Instant::now();
    let res = if args.threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads).build()?;
        pool.install(|| s.search(&state))?
    } else {
        s.search(&state)?
    };
    let dt = t0.elapsed();
    let nps = if dt.as_secs_f64() > 0.0 { res.nodes as f64 / dt.as_secs_f64() } else { 0.0 };
    let verdict = if res.value > 0 { "win" } else { "loss" };
    println!(
        "piles={} nim_sum={} bestmove={} value={} ({}) nodes={} max_ply={} elapsed={:.3}s nps={:.1}",
        args.piles, nim_sum(&args.piles), res.best_move, res.value, verdict, res.nodes, res.max_ply,
        dt.as_secs_f64(), nps
    );
    Ok(())
}
