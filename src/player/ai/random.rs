use crate::core::{Board, Move};
use crate::player::PlayerController;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cell::RefCell;

/// Picks uniformly among the legal moves. Used as the opponent in self-play.
pub struct RandomAI {
    pub name: String,
    rng: RefCell<StdRng>,
}

impl RandomAI {
    pub fn new(name: &str) -> Self {
        RandomAI {
            name: name.to_string(),
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(name: &str, seed: u64) -> Self {
        RandomAI {
            name: name.to_string(),
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl PlayerController for RandomAI {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, _board: &Board, legal_moves: &[Move]) -> Option<Move> {
        let mut rng = self.rng.borrow_mut();
        legal_moves.choose(&mut *rng).copied()
    }

    fn is_human(&self) -> bool {
        false
    }
}
