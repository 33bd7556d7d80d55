use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const TILE_COUNT: u8 = 12;
pub const STATE_COUNT: usize = 1 << TILE_COUNT;
pub const DIE_FACES: u8 = 6;
pub const ROLL_COUNT: usize = (DIE_FACES as usize) * (DIE_FACES as usize);

/// Set of open tiles. Bit `p - 1` set means tile `p` is still open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardState(pub u16);

impl BoardState {
    pub const WON: BoardState = BoardState(0);
    pub const ALL_OPEN: BoardState = BoardState((STATE_COUNT - 1) as u16);

    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < STATE_COUNT);
        BoardState(index as u16)
    }

    pub fn from_tiles(tiles: &[u8]) -> Result<Self, EngineError> {
        let mut bits = 0u16;
        for &t in tiles {
            if t == 0 || t > TILE_COUNT { return Err(EngineError::InvalidTile(t)); }
            let bit = 1u16 << (t - 1);
            if bits & bit != 0 { return Err(EngineError::DuplicateTile(t)); }
            bits |= bit;
        }
        Ok(BoardState(bits))
    }

    #[inline] pub fn index(self) -> usize { self.0 as usize }
    #[inline] pub fn is_won(self) -> bool { self.0 == 0 }
    #[inline] pub fn open_count(self) -> u32 { self.0.count_ones() }

    #[inline]
    pub fn is_open(self, tile: u8) -> bool {
        (1..=TILE_COUNT).contains(&tile) && self.0 & (1 << (tile - 1)) != 0
    }

    pub fn tiles(self) -> Vec<u8> {
        (1..=TILE_COUNT).filter(|&t| self.is_open(t)).collect()
    }

    /// Every state, in numeric order.
    pub fn all() -> impl Iterator<Item = BoardState> {
        (0..STATE_COUNT).map(BoardState::from_index)
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tiles: Vec<String> = self.tiles().iter().map(|t| t.to_string()).collect();
        write!(f, "{{{}}}", tiles.join(","))
    }
}

impl FromStr for BoardState {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s.trim().strip_prefix('{').and_then(|r| r.strip_suffix('}'))
            .ok_or_else(|| EngineError::MalformedState(s.to_string()))?;
        if inner.trim().is_empty() { return Ok(BoardState::WON); }
        let mut tiles = Vec::new();
        for part in inner.split(',') {
            let t: u8 = part.trim().parse().map_err(|_| EngineError::MalformedState(s.to_string()))?;
            tiles.push(t);
        }
        BoardState::from_tiles(&tiles)
    }
}

/// One dice roll outcome. `(a, b)` and `(b, a)` are distinct rolls of equal weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move { pub a: u8, pub b: u8 }

impl Move {
    pub fn new(a: u8, b: u8) -> Self {
        debug_assert!((1..=DIE_FACES).contains(&a) && (1..=DIE_FACES).contains(&b));
        Move { a, b }
    }

    #[inline] pub fn sum(self) -> u8 { self.a + self.b }
    #[inline] pub fn is_canonical(self) -> bool { self.a <= self.b }
    #[inline] pub fn mirrored(self) -> Self { Move { a: self.b, b: self.a } }

    /// All 36 ordered rolls, first die outermost.
    pub fn all_rolls() -> impl Iterator<Item = Move> {
        (1..=DIE_FACES).flat_map(|a| (1..=DIE_FACES).map(move |b| Move::new(a, b)))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.a, self.b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedMove { pub time_to_win: f64, pub mv: Move }

/// How the player resolves rolls that allow both a split and a sum close,
/// and whether playable rolls may be deliberately passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyOptions {
    /// Take the better continuation; otherwise pick either with probability 1/2.
    pub optimal_selection: bool,
    /// Run the pruning pass that turns bad rolls into intentional busts.
    pub optimal_skip: bool,
}

impl Default for StrategyOptions {
    fn default() -> Self { Self { optimal_selection: true, optimal_skip: true } }
}

impl StrategyOptions {
    /// The simple variant: coin-flip selection, every legal roll played.
    pub fn fixed_probability() -> Self { Self { optimal_selection: false, optimal_skip: false } }

    pub fn with_optimal_selection(mut self, on: bool) -> Self { self.optimal_selection = on; self }
    pub fn with_optimal_skip(mut self, on: bool) -> Self { self.optimal_skip = on; self }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkipEntry {
    /// Expected rolls saved versus playing every legal roll from this state.
    pub speedup: f64,
    /// In removal order, worst roll first. Always a strict, non-empty subset of the 36 rolls.
    pub skipped_moves: Vec<Move>,
}

/// Result of one engine run; read-only once returned.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    pub options: StrategyOptions,
    pub times: Vec<f64>,
    pub skips: Vec<Option<SkipEntry>>,
}

impl Solution {
    #[inline] pub fn time(&self, state: BoardState) -> f64 { self.times[state.index()] }
    #[inline] pub fn skip(&self, state: BoardState) -> Option<&SkipEntry> { self.skips[state.index()].as_ref() }

    pub fn skip_count(&self) -> usize { self.skips.iter().filter(|s| s.is_some()).count() }

    pub fn is_skipped(&self, state: BoardState, mv: Move) -> bool {
        self.skip(state).map_or(false, |e| e.skipped_moves.contains(&mv))
    }
}
