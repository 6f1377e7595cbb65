use crate::core::{Board, Move, Player};
use crate::display::{render_board, DisplayState};
use crate::player::PlayerController;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::time::Duration;
use tracing::warn;

/// キー入力の解釈
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Pick(Move),
    Quit,
    Ignored,
}

pub fn parse_key(code: KeyCode) -> KeyInput {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyInput::Quit,
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            match Move::from_index(index) {
                Ok(mv) => KeyInput::Pick(mv),
                Err(_) => KeyInput::Ignored,
            }
        }
        _ => KeyInput::Ignored,
    }
}

pub struct TuiController {
    player: Player,
    name: String,
    info: Option<String>,
}

impl TuiController {
    pub fn new(player: Player, name: &str) -> Self {
        Self {
            player,
            name: name.to_string(),
            info: None,
        }
    }

    /// Extra line shown under the title, e.g. "You are X, computer is O".
    pub fn with_info(mut self, info: &str) -> Self {
        self.info = Some(info.to_string());
        self
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    fn prompt(&self) -> String {
        format!(
            "{} turn ({}), pick a position (1-9) or [q] to quit",
            self.name, self.player
        )
    }
}

impl PlayerController for TuiController {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, board: &Board, legal_moves: &[Move]) -> Option<Move> {
        let mut state = DisplayState::new();
        state.info_msg = self.info.clone();
        state.status_msg = Some(self.prompt());

        loop {
            if let Err(e) = render_board(board, &state) {
                warn!(error = %e, "failed to render board");
                return None;
            }

            let key = match event::poll(Duration::from_millis(100)) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(KeyEvent {
                        code,
                        kind: KeyEventKind::Press,
                        ..
                    })) => code,
                    Ok(_) => continue,
                    Err(e) => {
                        warn!(error = %e, "failed to read terminal event");
                        return None;
                    }
                },
                Ok(false) => continue,
                Err(e) => {
                    warn!(error = %e, "failed to poll terminal");
                    return None;
                }
            };

            match parse_key(key) {
                KeyInput::Quit => return None,
                KeyInput::Pick(mv) if legal_moves.contains(&mv) => return Some(mv),
                KeyInput::Pick(_) => {
                    state.status_msg = Some(format!("That spot is taken. {}", self.prompt()));
                }
                KeyInput::Ignored => {
                    state.status_msg = Some(format!(
                        "Invalid input. Enter 1-9 or 'q' to quit. {}",
                        self.prompt()
                    ));
                }
            }
        }
    }

    fn is_human(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_digits() {
        assert_eq!(
            parse_key(KeyCode::Char('1')),
            KeyInput::Pick(Move::new(0, 0).unwrap())
        );
        assert_eq!(
            parse_key(KeyCode::Char('6')),
            KeyInput::Pick(Move::new(1, 2).unwrap())
        );
        assert_eq!(
            parse_key(KeyCode::Char('9')),
            KeyInput::Pick(Move::new(2, 2).unwrap())
        );
    }

    #[test]
    fn test_prompt_and_info() {
        let tui = TuiController::new(Player::O, "Player O").with_info("hello");
        assert_eq!(
            tui.prompt(),
            "Player O turn (O), pick a position (1-9) or [q] to quit"
        );
        assert_eq!(tui.info(), Some("hello"));
        assert!(tui.is_human());
    }

    #[test]
    fn test_parse_quit_and_garbage() {
        assert_eq!(parse_key(KeyCode::Char('q')), KeyInput::Quit);
        assert_eq!(parse_key(KeyCode::Esc), KeyInput::Quit);
        assert_eq!(parse_key(KeyCode::Char('0')), KeyInput::Ignored);
        assert_eq!(parse_key(KeyCode::Char('a')), KeyInput::Ignored);
        assert_eq!(parse_key(KeyCode::Enter), KeyInput::Ignored);
    }
}
