//! Text and JSON renderings of a [`Solution`].
//!
//! The game table has one line per state, `{tiles}\t<time>` with five
//! decimals. The skips table lists only states with a skip entry:
//!
//! ```text
//! {1,2,3}	skip moves:[[2 3]]; speedup:24.11=>20.71
//! ```
//!
//! Mirrored rolls are printed once (as `a <= b`), most favourable first.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{json, Value};

use crate::error::EngineError;
use crate::model::{BoardState, Move, Solution};

/// `%g`-style formatting with `digits` significant digits, trailing zeros dropped.
/// Expected times are never tiny, so no exponent form is produced.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() { return format!("{}", value); }
    let magnitude = value.abs().log10().floor() as i64;
    let decimals = (digits as i64 - 1 - magnitude).max(0) as usize;
    let mut s = format!("{:.*}", decimals, value);
    if s.contains('.') {
        s.truncate(s.trim_end_matches('0').trim_end_matches('.').len());
    }
    s
}

/// Skipped rolls as printed: one of each mirrored pair, reversed.
pub fn printable_skips(skipped: &[Move]) -> Vec<Move> {
    skipped.iter().copied().filter(|m| m.is_canonical()).rev().collect()
}

fn moves_list(moves: &[Move]) -> String {
    let parts: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
    format!("[{}]", parts.join(" "))
}

pub fn write_game_table<W: Write>(solution: &Solution, out: &mut W) -> Result<(), EngineError> {
    for state in BoardState::all() {
        writeln!(out, "{}\t{:.5}", state, solution.time(state))?;
    }
    Ok(())
}

pub fn write_skips_table<W: Write>(solution: &Solution, out: &mut W) -> Result<(), EngineError> {
    for state in BoardState::all() {
        let Some(entry) = solution.skip(state) else { continue };
        let after = solution.time(state);
        writeln!(
            out,
            "{}\tskip moves:{}; speedup:{}=>{}",
            state,
            moves_list(&printable_skips(&entry.skipped_moves)),
            format_significant(after + entry.speedup, 4),
            format_significant(after, 4),
        )?;
    }
    Ok(())
}

/// Output file names used by a batch run for the given options.
pub fn default_file_names(solution: &Solution) -> (String, String) {
    let o = solution.options;
    let selection = if o.optimal_selection { "optimal" } else { "fixed" };
    let game = if o.optimal_skip { format!("game_{}[do_skips].txt", selection) } else { format!("game_{}.txt", selection) };
    (game, "do_skips.txt".to_string())
}

fn create(path: &Path) -> Result<BufWriter<File>, EngineError> {
    Ok(BufWriter::new(File::create(path)?))
}

pub fn save_game_table(solution: &Solution, path: &Path) -> Result<(), EngineError> {
    let mut out = create(path)?;
    write_game_table(solution, &mut out)?;
    out.flush()?;
    Ok(())
}

pub fn save_skips_table(solution: &Solution, path: &Path) -> Result<(), EngineError> {
    let mut out = create(path)?;
    write_skips_table(solution, &mut out)?;
    out.flush()?;
    Ok(())
}

pub fn to_json(solution: &Solution) -> Value {
    let skips: Vec<Value> = BoardState::all()
        .filter_map(|s| solution.skip(s).map(|e| (s, e)))
        .map(|(s, e)| json!({
            "state": s.to_string(),
            "time": solution.time(s),
            "speedup": e.speedup,
            "skip": printable_skips(&e.skipped_moves).iter().map(|m| [m.a, m.b]).collect::<Vec<_>>(),
        }))
        .collect();
    json!({
        "options": solution.options,
        "all_open": solution.time(BoardState::ALL_OPEN),
        "skips": skips,
    })
}

pub fn save_json(solution: &Solution, path: &Path) -> Result<(), EngineError> {
    let mut out = create(path)?;
    serde_json::to_writer_pretty(&mut out, &to_json(solution))?;
    out.flush()?;
    Ok(())
}
