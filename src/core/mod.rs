pub mod board;
pub mod error;
pub mod r#move;
pub mod types;

pub use board::{Board, Placed, SIZE};
pub use error::BoardError;
pub use r#move::Move;
pub use types::{Cell, Player, AI, HUMAN};
