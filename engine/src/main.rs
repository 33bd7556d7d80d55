use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;
use shut_box_engine::{bot, report, solve, BoardState, EngineError, StrategyOptions};
use tracing::{error, info, Level};
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser)]
#[command(about = "Write expected time-to-win and skip tables for shut-the-box")]
struct Cli {
    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity level (-v = ERROR, -vv = WARN, -vvv = INFO, -vvvv = DEBUG, -vvvvv = TRACE)")]
    verbose: u8,

    #[arg(long, help = "Choose split or sum by coin flip instead of the better continuation")]
    fixed_probability: bool,

    #[arg(long, help = "Play every legal roll; do not compute a skip table")]
    no_skip: bool,

    #[arg(long, default_value = ".", help = "Directory for the report files")]
    out_dir: PathBuf,

    #[arg(long, help = "Also write a JSON summary to this path")]
    json: Option<PathBuf>,

    #[arg(long, help = "Play this many simulated games with the solved policy")]
    simulate: Option<u32>,

    #[arg(long, default_value = "42", help = "Seed for simulated games")]
    seed: u64,

    #[arg(long, default_value = "{1,2,3,4,5,6,7,8,9,10,11,12}", help = "Start state for simulated games")]
    start: String,
}

fn run(cli: &Cli) -> Result<(), EngineError> {
    let start = BoardState::from_str(&cli.start)?;
    let options = StrategyOptions::default()
        .with_optimal_selection(!cli.fixed_probability)
        .with_optimal_skip(!cli.no_skip);
    let solution = solve(options);

    let (game_file, skips_file) = report::default_file_names(&solution);
    let game_path = cli.out_dir.join(game_file);
    report::save_game_table(&solution, &game_path)?;
    info!(path = %game_path.display(), "wrote game table");
    if options.optimal_skip {
        let skips_path = cli.out_dir.join(skips_file);
        report::save_skips_table(&solution, &skips_path)?;
        info!(path = %skips_path.display(), entries = solution.skip_count(), "wrote skips table");
    }
    if let Some(path) = &cli.json {
        report::save_json(&solution, path)?;
        info!(path = %path.display(), "wrote json summary");
    }

    if let Some(games) = cli.simulate {
        let summary = bot::simulate(&solution, start, games, cli.seed);
        println!(
            "{}: expected {:.5} rolls, simulated {:.5} ± {:.3} over {} games (min {}, max {})",
            start, solution.time(start), summary.mean_rolls, summary.std_dev, summary.games, summary.min, summary.max
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let verbosity = cli.verbose.saturating_add(2).clamp(1, 5);
    let level = match verbosity {
        1 => Level::ERROR,
        2 => Level::WARN,
        3 => Level::INFO,
        4 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
