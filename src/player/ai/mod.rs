pub mod minimax;
pub mod random;

pub use minimax::{best_move, score, MinimaxAI};
pub use random::RandomAI;
