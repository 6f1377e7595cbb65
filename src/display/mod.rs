use crate::core::{Board, Cell, Move, SIZE};
use crossterm::{cursor, execute, style::Stylize, terminal};
use std::io::{self, stdout, Write};

pub const TITLE: &str = "=== Tic Tac Toe ===";

#[derive(Default)]
pub struct DisplayState {
    pub status_msg: Option<String>,
    pub info_msg: Option<String>,
    pub last_move: Option<Move>,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// 1-9 の番号表
pub fn guide_lines() -> Vec<String> {
    let mut lines = vec!["  Position guide:".to_string()];
    for row in 0..SIZE {
        let nums: Vec<String> = (0..SIZE).map(|col| (row * SIZE + col + 1).to_string()).collect();
        lines.push(format!("  {}", nums.join(" | ")));
        if row < SIZE - 1 {
            lines.push(" ---+---+---".to_string());
        }
    }
    lines
}

pub fn render_board(board: &Board, state: &DisplayState) -> io::Result<()> {
    let mut out = stdout();

    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    write!(out, "{}\r\n", TITLE.bold())?;
    if let Some(msg) = &state.info_msg {
        write!(out, "  {}\r\n", msg)?;
    }
    write!(out, "\r\n")?;

    for line in guide_lines() {
        write!(out, "{}\r\n", line)?;
    }
    write!(out, "\r\n")?;

    for (i, row) in board.rows().iter().enumerate() {
        write!(out, "  ")?;
        for (col, &cell) in row.iter().enumerate() {
            let mark = cell.display_char().to_string();
            let styled = match cell {
                Cell::X => mark.cyan(),
                Cell::O => mark.magenta(),
                Cell::Empty => mark.stylize(),
            };
            let is_last = state.last_move == Move::new(i, col).ok();
            if is_last {
                write!(out, "{}", styled.bold().underlined())?;
            } else {
                write!(out, "{}", styled)?;
            }
            if col < SIZE - 1 {
                write!(out, " | ")?;
            }
        }
        write!(out, "\r\n")?;
        if i < SIZE - 1 {
            write!(out, " ---+---+---\r\n")?;
        }
    }
    write!(out, "\r\n")?;

    if let Some(msg) = &state.status_msg {
        write!(out, "  {}\r\n", msg.clone().bold().yellow())?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_blank() {
        let state = DisplayState::new();
        assert!(state.status_msg.is_none());
        assert!(state.info_msg.is_none());
        assert!(state.last_move.is_none());
    }

    #[test]
    fn test_guide_lines() {
        let lines = guide_lines();
        assert_eq!(lines[1], "  1 | 2 | 3");
        assert_eq!(lines[3], "  4 | 5 | 6");
        assert_eq!(lines[5], "  7 | 8 | 9");
    }
}
