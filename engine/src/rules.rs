use crate::model::{BoardState, Move, TILE_COUNT};

#[inline]
fn close(state: BoardState, mask: u16) -> Option<BoardState> {
    if state.0 & mask == mask { Some(BoardState(state.0 ^ mask)) } else { None }
}

/// Close tiles `a` and `b`. A double closes the single tile `a`.
#[inline]
pub fn apply_split(state: BoardState, mv: Move) -> Option<BoardState> {
    close(state, (1 << (mv.a - 1)) | (1 << (mv.b - 1)))
}

/// Close the one tile equal to `a + b`.
#[inline]
pub fn apply_sum(state: BoardState, mv: Move) -> Option<BoardState> {
    let tile = mv.sum();
    if tile == 0 || tile > TILE_COUNT { return None; }
    close(state, 1 << (tile - 1))
}

#[inline]
pub fn is_playable(state: BoardState, mv: Move) -> bool {
    apply_split(state, mv).is_some() || apply_sum(state, mv).is_some()
}
