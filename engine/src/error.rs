use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("tile {0} is outside 1..=12")]
    InvalidTile(u8),
    #[error("tile {0} listed more than once")]
    DuplicateTile(u8),
    #[error("malformed board state {0:?}, expected e.g. {{1,2,12}}")]
    MalformedState(String),
    #[error("report write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
