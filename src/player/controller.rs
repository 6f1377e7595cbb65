use crate::core::{Board, Move};

/// プレイヤー操作のtrait
pub trait PlayerController {
    /// `None` means the player quit.
    fn choose_move(&self, board: &Board, legal_moves: &[Move]) -> Option<Move>;
    fn name(&self) -> &str;
    /// Automated players get a "thinking" pause and a report of the position they played.
    fn is_human(&self) -> bool;
}
