use super::board::SIZE;
use super::error::BoardError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 着手 (row, col)
///
/// Always within the grid: the constructors reject anything outside `0..3`.
/// Serialized as `[row, col]`; deserializing goes through `Move::new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Move {
    row: usize,
    col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Result<Self, BoardError> {
        if row >= SIZE || col >= SIZE {
            return Err(BoardError::OutOfRange { row, col });
        }
        Ok(Move { row, col })
    }

    /// Flat row-major index, `0..9`.
    pub fn from_index(index: usize) -> Result<Self, BoardError> {
        if index >= SIZE * SIZE {
            return Err(BoardError::OutOfRange {
                row: index / SIZE,
                col: index % SIZE,
            });
        }
        Ok(Move {
            row: index / SIZE,
            col: index % SIZE,
        })
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    pub fn index(self) -> usize {
        self.row * SIZE + self.col
    }

    /// 1-based position as shown in the console guide.
    pub fn position(self) -> usize {
        self.index() + 1
    }

    /// 9 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Move> {
        (0..SIZE * SIZE).map(|i| Move {
            row: i / SIZE,
            col: i % SIZE,
        })
    }
}

impl TryFrom<(usize, usize)> for Move {
    type Error = BoardError;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Move::new(row, col)
    }
}

impl From<Move> for (usize, usize) {
    fn from(mv: Move) -> Self {
        (mv.row, mv.col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_conversions() {
        let mv = Move::new(1, 2).unwrap();
        assert_eq!(mv.index(), 5);
        assert_eq!(mv.position(), 6);
        assert_eq!(Move::from_index(5).unwrap(), mv);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            Move::new(3, 0),
            Err(BoardError::OutOfRange { row: 3, col: 0 })
        );
        assert!(Move::new(0, 3).is_err());
        assert!(Move::from_index(9).is_err());
    }

    #[test]
    fn test_json_goes_through_range_check() {
        let mv: Move = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(mv, Move::new(1, 2).unwrap());
        assert_eq!(serde_json::to_string(&mv).unwrap(), "[1,2]");

        let err = serde_json::from_str::<Move>("[7, 1]").unwrap_err();
        assert!(err.to_string().contains("outside the 3x3 grid"), "{}", err);
        assert!(serde_json::from_str::<Move>(r#"{"row":7,"col":1}"#).is_err());
    }

    #[test]
    fn test_all_is_row_major() {
        let indices: Vec<usize> = Move::all().map(|m| m.index()).collect();
        assert_eq!(indices, (0..9).collect::<Vec<_>>());
    }
}
