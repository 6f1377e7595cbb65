use super::r#move::Move;

/// Precondition violations reported by the core. The core never recovers from these;
/// adapters are expected to validate input before calling in.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("cell ({row}, {col}) is outside the 3x3 grid")]
    OutOfRange { row: usize, col: usize },
    #[error("cell {0} is already occupied")]
    CellOccupied(Move),
    #[error("no legal moves left on the board")]
    NoLegalMoves,
    #[error("game is already over")]
    GameOver,
    #[error("invalid board: {0}")]
    InvalidBoard(String),
}
