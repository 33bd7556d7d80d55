use crate::model::BoardState;

/// All states ordered by open-tile count, ties in numeric order. Closing a
/// tile always lowers the count, so every successor precedes its source.
pub fn calculation_order() -> Vec<BoardState> {
    let mut queue: Vec<BoardState> = BoardState::all().collect();
    queue.sort_by_key(|s| s.open_count());
    queue
}
