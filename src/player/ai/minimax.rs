use crate::core::{Board, BoardError, Move, AI, HUMAN};
use crate::logic::{empty_cells, winner};
use crate::player::PlayerController;
use tracing::debug;

/// Exhaustive minimax value of `board` from the automated player's point of view.
///
/// `+1` AI wins, `-1` human wins, `0` draw. No pruning, no depth weighting and no cache:
/// the whole remaining tree is walked every call. `board` is handed back unchanged.
pub fn score(board: &mut Board, maximizing: bool) -> i32 {
    match winner(board) {
        Some(p) if p == AI => return 1,
        Some(_) => return -1,
        None => {}
    }
    if board.is_full() {
        return 0;
    }

    let (mover, mut best) = if maximizing {
        (AI, i32::MIN)
    } else {
        (HUMAN, i32::MAX)
    };

    for mv in empty_cells(board) {
        let mut placed = board.place(mv, mover);
        let eval = score(&mut placed, !maximizing);
        best = if maximizing {
            best.max(eval)
        } else {
            best.min(eval)
        };
    }
    best
}

/// 最善手 (同点なら row-major で最初の手)
pub fn best_move(board: &Board) -> Result<Move, BoardError> {
    let mut scratch = *board;
    let mut best: Option<(Move, i32)> = None;

    for mv in empty_cells(&scratch) {
        let mut placed = scratch.place(mv, AI);
        // 自分が指した後は相手の手番 (minimizing)
        let value = score(&mut placed, false);
        drop(placed);

        if best.map_or(true, |(_, best_value)| value > best_value) {
            best = Some((mv, value));
        }
    }

    let (mv, value) = best.ok_or(BoardError::NoLegalMoves)?;
    debug!(%mv, value, "minimax picked move");
    Ok(mv)
}

pub struct MinimaxAI {
    pub name: String,
}

impl MinimaxAI {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl PlayerController for MinimaxAI {
    fn choose_move(&self, board: &Board, legal_moves: &[Move]) -> Option<Move> {
        if legal_moves.is_empty() {
            return None;
        }
        best_move(board).ok().filter(|mv| legal_moves.contains(mv))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_human(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Cell;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn mv(row: usize, col: usize) -> Move {
        Move::new(row, col).unwrap()
    }

    #[test]
    fn test_terminal_scores() {
        assert_eq!(score(&mut board("OOO/XX./X.."), true), 1);
        assert_eq!(score(&mut board("XXX/OO./O.."), false), -1);
        assert_eq!(score(&mut board("XXO/OOX/XOX"), true), 0);
    }

    #[test]
    fn test_score_is_pure() {
        let mut b = board("X../.O./...");
        let before = b;
        let first = score(&mut b, true);
        assert_eq!(b, before);
        let second = score(&mut b, true);
        assert_eq!(first, second);
        assert_eq!(b, before);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let mut b = Board::new();
        assert_eq!(score(&mut b, true), 0);
        assert_eq!(score(&mut b, false), 0);
    }

    #[test]
    fn test_takes_the_win() {
        // O は (1,2) で横一列が揃う
        assert_eq!(best_move(&board("XX./OO./X..")), Ok(mv(1, 2)));
    }

    #[test]
    fn test_block_that_forks_ties_with_immediate_win() {
        // (0,2) blocks X and leaves O two threats; with no depth weighting it scores the
        // same as completing the row at (1,2), and comes first in row-major order.
        let b = board("XX./OO./...");
        let chosen = best_move(&b).unwrap();
        assert_eq!(chosen, mv(0, 2));

        let mut after = b;
        after.put(chosen, Cell::O);
        assert_eq!(score(&mut after, false), 1);
    }

    #[test]
    fn test_blocks_the_loss() {
        assert_eq!(best_move(&board("XX./O../...")), Ok(mv(0, 2)));
        assert_eq!(best_move(&board("X../.O./X..")), Ok(mv(1, 0)));
    }

    #[test]
    fn test_first_move_tie_break() {
        assert_eq!(best_move(&Board::new()), Ok(mv(0, 0)));
    }

    #[test]
    fn test_tie_break_prefers_row_major() {
        // 角4つが空き, 中央は O: どの角を取っても結果は同じ
        let b = board(".X./XOX/.X.");
        let corner = best_move(&b).unwrap();
        assert_eq!(corner, mv(0, 0));

        for other in [mv(0, 2), mv(2, 0), mv(2, 2)] {
            let mut scratch = b;
            let mut placed = scratch.place(other, AI);
            let mut first = b;
            first.put(corner, Cell::O);
            assert_eq!(score(&mut placed, false), score(&mut first, false));
        }
    }

    #[test]
    fn test_best_move_leaves_board_untouched() {
        let b = board("X../.../...");
        let copy = b;
        best_move(&b).unwrap();
        assert_eq!(b, copy);
    }

    #[test]
    fn test_full_board_has_no_move() {
        assert_eq!(
            best_move(&board("XXO/OOX/XOX")),
            Err(BoardError::NoLegalMoves)
        );
    }

    #[test]
    fn test_controller_respects_legal_moves() {
        let ai = MinimaxAI::new("AI");
        let b = board("XX./OO./X..");
        let legal = empty_cells(&b);
        assert_eq!(ai.choose_move(&b, &legal), Some(mv(1, 2)));
        assert_eq!(ai.choose_move(&b, &[]), None);
    }
}
