use tracing::{debug, info};

use crate::model::{BoardState, Move, Solution, SkipEntry, StrategyOptions, TimedMove, STATE_COUNT};
use crate::prune::{expected_time, prune_bad_moves};
use crate::rules::{apply_split, apply_sum};
use crate::schedule::calculation_order;

/// Time-to-win of `mv` from `pos`, or `None` when the roll is a bust.
/// Only reads entries for states with fewer open tiles than `pos`.
pub fn roll_time(times: &[f64], pos: BoardState, mv: Move, optimal_selection: bool) -> Option<f64> {
    match (apply_split(pos, mv), apply_sum(pos, mv)) {
        (Some(s1), Some(s2)) => {
            let (t1, t2) = (times[s1.index()], times[s2.index()]);
            Some(if optimal_selection { t1.min(t2) } else { 0.5 * t1 + 0.5 * t2 })
        }
        (Some(s), None) | (None, Some(s)) => Some(times[s.index()]),
        (None, None) => None,
    }
}

/// Candidate rolls from `pos` paired with their continuation times, plus the bust count.
pub fn timed_moves(times: &[f64], pos: BoardState, optimal_selection: bool) -> (Vec<TimedMove>, usize) {
    let mut next_moves = Vec::with_capacity(crate::model::ROLL_COUNT);
    let mut busts = 0;
    for mv in Move::all_rolls() {
        match roll_time(times, pos, mv, optimal_selection) {
            Some(time_to_win) => next_moves.push(TimedMove { time_to_win, mv }),
            None => busts += 1,
        }
    }
    (next_moves, busts)
}

fn evaluate(times: &[f64], pos: BoardState, options: StrategyOptions) -> (f64, Option<SkipEntry>) {
    let (mut next_moves, busts) = timed_moves(times, pos, options.optimal_selection);
    let sum_tm: f64 = next_moves.iter().map(|m| m.time_to_win).sum();
    let base = expected_time(sum_tm, busts);
    if !options.optimal_skip { return (base, None); }
    match prune_bad_moves(&mut next_moves, base) {
        Some(p) => (p.best_time, Some(SkipEntry { speedup: p.speedup, skipped_moves: p.skipped_moves })),
        None => (base, None),
    }
}

/// Expected rolls to clear the board from every state under `options`.
pub fn solve(options: StrategyOptions) -> Solution {
    info!(?options, "solving all board states");
    let mut times = vec![0.0f64; STATE_COUNT];
    let mut skips: Vec<Option<SkipEntry>> = vec![None; STATE_COUNT];

    let order = calculation_order();
    let mut level = 0;
    for &pos in &order[1..] {
        if pos.open_count() != level {
            if level > 0 { debug!(open_tiles = level, "level finalized"); }
            level = pos.open_count();
        }
        let (time, skip) = evaluate(&times, pos, options);
        times[pos.index()] = time;
        skips[pos.index()] = skip;
    }
    debug!(open_tiles = level, "level finalized");

    let solution = Solution { options, times, skips };
    info!(
        all_open = solution.time(BoardState::ALL_OPEN),
        skip_entries = solution.skip_count(),
        "solve complete"
    );
    solution
}
