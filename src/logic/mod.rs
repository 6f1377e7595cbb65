use crate::core::{Board, Cell, Move, Player};
use serde::{Deserialize, Serialize};

/// 勝利ライン: 横3本, 縦3本, 斜め2本 (この順で走査する)
pub const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// 局面の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Win(Player),
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

/// Owner of the first uniform line in scan order (rows, columns, diagonals).
///
/// Reports what it sees: a malformed board with several winning lines yields whichever
/// comes first, nothing more.
pub fn winner(board: &Board) -> Option<Player> {
    let rows = board.rows();
    LINES.iter().find_map(|line| {
        let [a, b, c] = line.map(|(r, c)| rows[r][c]);
        if a != Cell::Empty && a == b && b == c {
            a.owner()
        } else {
            None
        }
    })
}

/// 空きマス (row-major 順)
pub fn empty_cells(board: &Board) -> Vec<Move> {
    Move::all().filter(|&mv| board[mv].is_empty()).collect()
}

pub fn outcome(board: &Board) -> Outcome {
    if let Some(player) = winner(board) {
        Outcome::Win(player)
    } else if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_every_line_wins() {
        for player in [Player::X, Player::O] {
            for line in LINES {
                let mut b = Board::new();
                for (r, c) in line {
                    b.set(r, c, player.cell()).unwrap();
                }
                assert_eq!(winner(&b), Some(player), "line {:?}", line);
            }
        }
    }

    #[test]
    fn test_no_winner() {
        assert_eq!(winner(&Board::new()), None);
        assert_eq!(winner(&board("XXO/OOX/XOX")), None);
        // 2つ揃っただけでは勝ちではない
        assert_eq!(winner(&board("XX./.../...")), None);
        assert_eq!(winner(&board("XOX/.../...")), None);
    }

    #[test]
    fn test_malformed_board_scan_order() {
        // 行が列より先に見つかる
        assert_eq!(winner(&board("OOO/X../X..")), Some(Player::O));
        let b = board("X.O/X.O/X.O");
        assert_eq!(winner(&b), Some(Player::X));
    }

    #[test]
    fn test_empty_cells_row_major() {
        let b = board("X.O/.X./O..");
        let cells: Vec<usize> = empty_cells(&b).iter().map(|m| m.index()).collect();
        assert_eq!(cells, vec![1, 3, 5, 7, 8]);
        assert_eq!(empty_cells(&Board::new()).len(), 9);
    }

    #[test]
    fn test_is_full_iff_no_empty_cells() {
        for s in ["XXO/OOX/XOX", "XXO/OOX/XO.", "........."] {
            let b = board(s);
            assert_eq!(b.is_full(), empty_cells(&b).is_empty(), "{}", s);
        }
    }

    #[test]
    fn test_outcome() {
        assert_eq!(outcome(&Board::new()), Outcome::InProgress);
        assert_eq!(outcome(&board("XXX/OO./...")), Outcome::Win(Player::X));
        assert_eq!(outcome(&board("XXO/OOX/XOX")), Outcome::Draw);
        // 最後の一手で揃えば引き分けではなく勝ち
        assert_eq!(outcome(&board("XOX/OXO/OXX")), Outcome::Win(Player::X));
        assert!(!Outcome::InProgress.is_terminal());
        assert!(Outcome::Draw.is_terminal());
    }
}
