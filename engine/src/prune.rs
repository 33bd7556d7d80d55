use crate::model::{Move, TimedMove, ROLL_COUNT};

/// Outcome of a successful pruning pass for one state.
#[derive(Clone, Debug, PartialEq)]
pub struct Pruning {
    pub best_time: f64,
    pub speedup: f64,
    pub skipped_moves: Vec<Move>,
}

/// Expected rolls from a state where `busts` of the 36 rolls leave the board
/// unchanged and the rest lead to successors whose times sum to `sum_tm`.
#[inline]
pub fn expected_time(sum_tm: f64, busts: usize) -> f64 {
    (ROLL_COUNT as f64 + sum_tm) / (ROLL_COUNT - busts) as f64
}

/// Greedily turn the worst playable rolls into busts while that strictly
/// lowers the expected time. `moves` is sorted in place, best first. The best
/// roll is never removed, so at least one roll always stays playable.
pub fn prune_bad_moves(moves: &mut [TimedMove], base_time: f64) -> Option<Pruning> {
    moves.sort_by(|l, r| l.time_to_win.total_cmp(&r.time_to_win));

    let busts = ROLL_COUNT - moves.len();
    let sum_tm: f64 = moves.iter().map(|m| m.time_to_win).sum();

    let mut best_time = base_time;
    let mut skip_tm = 0.0;
    let mut skipped_moves = Vec::new();
    for (extra, m) in moves.iter().skip(1).rev().enumerate() {
        skip_tm += m.time_to_win;
        let cand = expected_time(sum_tm - skip_tm, busts + extra + 1);
        if cand >= best_time { break; }
        skipped_moves.push(m.mv);
        best_time = cand;
    }

    if skipped_moves.is_empty() { return None; }
    Some(Pruning { best_time, speedup: base_time - best_time, skipped_moves })
}
