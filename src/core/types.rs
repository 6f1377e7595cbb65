use serde::{Deserialize, Serialize};
use std::fmt;

/// プレイヤー (X が先手)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

/// The human side of a game against the computer.
pub const HUMAN: Player = Player::X;
/// The automated side; the minimax search maximizes for this mark.
pub const AI: Player = Player::O;

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// マスの状態
///
/// Serialized as the single-character strings the web front end uses: `" "`, `"X"`, `"O"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    #[serde(rename = " ")]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn display_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// Accepts `X`/`O` (either case) and `.`, `_`, `-` or space for an empty cell.
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            '.' | '_' | '-' | ' ' => Some(Cell::Empty),
            _ => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        player.cell()
    }
}
