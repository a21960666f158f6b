use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use nimbot::selfplay::{generate_games, write_jsonl, SelfPlayParams};
use nimbot::{Piles, Player};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nimbot-selfplay", about = "Generate self-play games and write them as JSON lines")]
struct Args {
    #[arg(long, default_value_t = 100)]
    games: usize,
    #[arg(long, default_value = "3,4,5")]
    piles: Piles,
    #[arg(long, default_value = "1")]
    first: Player,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 2)]
    random_plies: usize,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long, default_value = "out/selfplay.jsonl")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    eprintln!("Generating {} games from {} (random_plies={}, seed={})", a.games, a.piles, a.random_plies, a.seed);

    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games")?);
    let mut games = Vec::with_capacity(a.games);
    // One game per call so the bar advances; seeds derive from the base seed
    for gi in 0..a.games {
        let params = SelfPlayParams {
            games: 1,
            piles: a.piles.clone(),
            first: a.first,
            seed: a.seed.wrapping_add(gi as u64),
            random_plies: a.random_plies,
            threads: a.threads,
        };
        games.extend(generate_games(&params)?);
        pb.inc(1);
    }
    pb.finish();

    let first_wins = games.iter().filter(|g| g.winner == a.first).count();
    write_jsonl(&games, &a.out)?;
    eprintln!("Wrote {} games to {} ({} won by the first player)", games.len(), a.out.display(), first_wins);
    Ok(())
}
