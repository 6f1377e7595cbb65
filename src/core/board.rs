use super::error::BoardError;
use super::r#move::Move;
use super::types::{Cell, Player};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut, Index};
use std::str::FromStr;

/// 盤面の一辺
pub const SIZE: usize = 3;

/// 盤面
///
/// A plain `Copy` value. The search mutates one board in place and undoes every change, so
/// nothing here guards against overwriting an occupied cell; callers check `Empty` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    pub fn new() -> Self {
        Board::default()
    }

    pub fn rows(&self) -> &[[Cell; SIZE]; SIZE] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        let mv = Move::new(row, col)?;
        Ok(self[mv])
    }

    /// Overwrites unconditionally; used both to apply and to undo moves.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), BoardError> {
        let mv = Move::new(row, col)?;
        self.put(mv, cell);
        Ok(())
    }

    pub fn put(&mut self, mv: Move, cell: Cell) {
        self.cells[mv.row()][mv.col()] = cell;
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Cell::Empty))
    }

    /// Places `player` at `mv` for as long as the returned guard lives.
    /// Dropping the guard puts the cell back to `Empty`.
    pub fn place(&mut self, mv: Move, player: Player) -> Placed<'_> {
        self.put(mv, player.cell());
        Placed { board: self, mv }
    }
}

impl Index<Move> for Board {
    type Output = Cell;

    fn index(&self, mv: Move) -> &Cell {
        &self.cells[mv.row()][mv.col()]
    }
}

/// 仮置きした手 (drop で元に戻る)
pub struct Placed<'a> {
    board: &'a mut Board,
    mv: Move,
}

impl Deref for Placed<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placed<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placed<'_> {
    fn drop(&mut self) {
        self.board.put(self.mv, Cell::Empty);
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Nine cells in row-major order, `/` allowed between rows: `"XX./OO./..."`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().filter(|&c| c != '/').collect();
        if chars.len() != SIZE * SIZE {
            return Err(BoardError::InvalidBoard(format!(
                "expected 9 cells, got {}",
                chars.len()
            )));
        }

        let mut board = Board::new();
        for (mv, &c) in Move::all().zip(chars.iter()) {
            let cell = Cell::from_char(c)
                .ok_or_else(|| BoardError::InvalidBoard(format!("unexpected character {:?}", c)))?;
            board.put(mv, cell);
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            writeln!(
                f,
                "  {} | {} | {}",
                row[0].display_char(),
                row[1].display_char(),
                row[2].display_char()
            )?;
            if i < SIZE - 1 {
                writeln!(f, " ---+---+---")?;
            }
        }
        Ok(())
    }
}
