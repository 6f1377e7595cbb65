use crate::core::{Board, Player};
use serde::{Deserialize, Serialize};

/// Result of a move request, from the human's side of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Win,
    Lose,
    Draw,
    Ongoing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NetMessage {
    // Client -> Server
    MakeMove {
        board: Board,
        /// 0-8, row-major
        position: usize,
    },

    // Server -> Client
    Update {
        board: Board,
        winner: Option<Player>,
        ai_move: Option<usize>,
        status: Status,
    },
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let json = r#"{"MakeMove":{"board":[[" "," "," "],[" ","X"," "],[" "," ","O"]],"position":0}}"#;
        let msg: NetMessage = serde_json::from_str(json).unwrap();
        match msg {
            NetMessage::MakeMove { board, position } => {
                assert_eq!(position, 0);
                assert_eq!(board, ".../.X./..O".parse::<Board>().unwrap());
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_status_is_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Lose).unwrap(), r#""lose""#);
        assert_eq!(serde_json::to_string(&Status::Ongoing).unwrap(), r#""ongoing""#);
    }
}
