use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;

use crate::model::{BoardState, Move, Solution, DIE_FACES};
use crate::rules::{apply_split, apply_sum};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Play(BoardState),
    /// No legal close for this roll.
    Bust,
    /// Legal, but the solution prefers to let the roll pass.
    Skip,
}

/// What the solved policy does with `roll` at `state`. `coin` settles split
/// versus sum when the solution was built with coin-flip selection.
pub fn decide(solution: &Solution, state: BoardState, roll: Move, coin: bool) -> Decision {
    let next = match (apply_split(state, roll), apply_sum(state, roll)) {
        (Some(s1), Some(s2)) if solution.options.optimal_selection => {
            if solution.time(s2) < solution.time(s1) { s2 } else { s1 }
        }
        (Some(s1), Some(s2)) => if coin { s1 } else { s2 },
        (Some(s), None) | (None, Some(s)) => s,
        (None, None) => return Decision::Bust,
    };
    if solution.is_skipped(state, roll) { Decision::Skip } else { Decision::Play(next) }
}

pub fn roll_dice(rng: &mut StdRng) -> Move {
    Move::new(rng.gen_range(1..=DIE_FACES), rng.gen_range(1..=DIE_FACES))
}

/// Roll until the board is clear, following the solved policy. Returns the roll count.
pub fn play_game(solution: &Solution, start: BoardState, rng: &mut StdRng) -> u32 {
    let mut state = start;
    let mut rolls = 0;
    while !state.is_won() {
        let roll = roll_dice(rng);
        rolls += 1;
        if let Decision::Play(next) = decide(solution, state, roll, rng.gen_bool(0.5)) { state = next; }
    }
    rolls
}

#[derive(Clone, Debug, Serialize)]
pub struct SimulationSummary {
    pub games: u32,
    pub mean_rolls: f64,
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
}

pub fn simulate(solution: &Solution, start: BoardState, games: u32, seed: u64) -> SimulationSummary {
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5EED);
    let rolls: Vec<u32> = (0..games).map(|_| play_game(solution, start, &mut rng)).collect();
    let n = games.max(1) as f64;
    let mean_rolls = rolls.iter().map(|&r| r as f64).sum::<f64>() / n;
    let var = rolls.iter().map(|&r| (r as f64 - mean_rolls).powi(2)).sum::<f64>() / n;
    SimulationSummary {
        games,
        mean_rolls,
        std_dev: var.sqrt(),
        min: rolls.iter().copied().min().unwrap_or(0),
        max: rolls.iter().copied().max().unwrap_or(0),
    }
}
