//! Whole-table checks of the solver against hand and brute-force values.

use std::collections::HashMap;

use shut_box_engine::model::{ROLL_COUNT, STATE_COUNT};
use shut_box_engine::solver::timed_moves;
use shut_box_engine::{solve, BoardState, Move, StrategyOptions};

const CONFIGS: [StrategyOptions; 4] = [
    StrategyOptions { optimal_selection: true, optimal_skip: false },
    StrategyOptions { optimal_selection: false, optimal_skip: false },
    StrategyOptions { optimal_selection: true, optimal_skip: true },
    StrategyOptions { optimal_selection: false, optimal_skip: true },
];

fn st(tiles: &[u8]) -> BoardState { BoardState::from_tiles(tiles).unwrap() }

/// Solve T = 1 + (1/36) * sum over rolls of T(next), where a bust leaves
/// the board unchanged, directly on sets of tiles.
fn brute_force(open: &Vec<u8>, optimal: bool, memo: &mut HashMap<Vec<u8>, f64>) -> f64 {
    if open.is_empty() { return 0.0; }
    if let Some(&t) = memo.get(open) { return t; }
    let without = |tiles: &[u8]| -> Vec<u8> { open.iter().copied().filter(|t| !tiles.contains(t)).collect() };
    let mut sum = 0.0;
    let mut busts = 0.0;
    for a in 1..=6u8 {
        for b in 1..=6u8 {
            let split = (open.contains(&a) && open.contains(&b)).then(|| without(&[a, b]));
            let total = open.contains(&(a + b)).then(|| without(&[a + b]));
            match (split, total) {
                (Some(s1), Some(s2)) => {
                    let (t1, t2) = (brute_force(&s1, optimal, memo), brute_force(&s2, optimal, memo));
                    sum += if optimal { t1.min(t2) } else { (t1 + t2) / 2.0 };
                }
                (Some(s), None) | (None, Some(s)) => sum += brute_force(&s, optimal, memo),
                (None, None) => busts += 1.0,
            }
        }
    }
    let t = (36.0 + sum) / (36.0 - busts);
    memo.insert(open.clone(), t);
    t
}

#[test]
fn matches_brute_force_on_low_tiles() {
    for optimal in [true, false] {
        let sol = solve(StrategyOptions { optimal_selection: optimal, optimal_skip: false });
        let mut memo = HashMap::new();
        for bits in 0u16..8 {
            let state = BoardState(bits);
            let expected = brute_force(&state.tiles(), optimal, &mut memo);
            assert!((sol.time(state) - expected).abs() < 1e-12, "{state}: {} vs {expected}", sol.time(state));
        }
    }
}

#[test]
fn regression_values() {
    let expected_all_open = [48.306297019251595, 52.3341133215858, 46.56242030231527, 49.19919060570148];
    for (opts, want) in CONFIGS.iter().zip(expected_all_open) {
        let sol = solve(*opts);
        assert!((sol.time(BoardState::ALL_OPEN) - want).abs() < 1e-9, "{opts:?}");
    }
    let sol = solve(StrategyOptions::default());
    assert!((sol.time(st(&[1, 2, 3])) - 20.714285714285715).abs() < 1e-12);
    assert_eq!(sol.skip_count(), 3322);
    assert_eq!(solve(StrategyOptions::fixed_probability().with_optimal_skip(true)).skip_count(), 3000);
}

#[test]
fn times_are_non_negative_and_won_is_zero() {
    for opts in CONFIGS {
        let sol = solve(opts);
        assert_eq!(sol.times.len(), STATE_COUNT);
        assert_eq!(sol.time(BoardState::WON), 0.0);
        assert!(sol.times.iter().all(|&t| t.is_finite() && t >= 0.0));
        assert!(sol.times[1..].iter().all(|&t| t >= 1.0));
    }
}

#[test]
fn hardest_board_lacks_the_low_tiles() {
    // Tiles 2..6 give the most flexibility; the worst board keeps only
    // tile 1 and the high tiles, which every policy plays the same way.
    let hardest = st(&[1, 7, 8, 9, 10, 11, 12]);
    for opts in CONFIGS {
        let sol = solve(opts);
        let max = sol.times.iter().copied().fold(f64::MIN, f64::max);
        assert_eq!(sol.time(hardest), max, "{opts:?}");
        assert!(sol.time(BoardState::ALL_OPEN) < max);
    }
}

#[test]
fn deterministic() {
    for opts in CONFIGS {
        assert_eq!(solve(opts), solve(opts));
    }
}

#[test]
fn pruning_only_ever_helps() {
    let sol = solve(StrategyOptions::default());
    for state in BoardState::all() {
        let Some(entry) = sol.skip(state) else { continue };
        let (moves, busts) = timed_moves(&sol.times, state, true);
        let sum: f64 = moves.iter().map(|m| m.time_to_win).sum();
        let unpruned = (36.0 + sum) / (36 - busts) as f64;
        assert!(entry.speedup > 0.0);
        assert!(sol.time(state) < unpruned, "{state}");
        assert!((sol.time(state) + entry.speedup - unpruned).abs() < 1e-9, "{state}");

        let best = moves.iter().map(|m| m.time_to_win).fold(f64::MAX, f64::min);
        assert!(!entry.skipped_moves.is_empty());
        assert!(entry.skipped_moves.len() < moves.len());
        for mv in &entry.skipped_moves {
            let tm = moves.iter().find(|m| m.mv == *mv).unwrap();
            assert!(tm.time_to_win > best || moves.iter().filter(|m| m.time_to_win == best).count() > 1);
            assert!(entry.skipped_moves.contains(&mv.mirrored()), "{state}: {mv} without mirror");
        }
    }
}

#[test]
fn skipped_rolls_are_worse_than_the_result() {
    let sol = solve(StrategyOptions::default());
    for state in BoardState::all().filter(|s| sol.skip(*s).is_some()) {
        let (moves, _) = timed_moves(&sol.times, state, true);
        // rolls level with the final time may fall either side by rounding
        for m in moves {
            if sol.is_skipped(state, m.mv) {
                assert!(m.time_to_win > sol.time(state) - 1e-9, "{state}: {}", m.mv);
            } else {
                assert!(m.time_to_win < sol.time(state) + 1e-9, "{state}: {}", m.mv);
            }
        }
    }
}

#[test]
fn every_state_has_a_playable_roll() {
    let sol = solve(StrategyOptions::default());
    for state in BoardState::all().skip(1) {
        let (moves, busts) = timed_moves(&sol.times, state, true);
        assert!(busts < ROLL_COUNT);
        assert_eq!(moves.len() + busts, ROLL_COUNT);
        assert!(moves.iter().any(|m| !sol.is_skipped(state, m.mv)));
    }
    assert!(!sol.is_skipped(st(&[12]), Move::new(6, 6)));
}
