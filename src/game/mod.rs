use crate::config::UiConfig;
use crate::core::{Board, BoardError, Move, Player, AI, HUMAN};
use crate::display::{render_board, DisplayState};
use crate::logic::{empty_cells, outcome, Outcome};
use crate::network::{NetMessage, NetworkClient};
use crate::player::PlayerController;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    VsComputer,
    TwoPlayer,
}

/// 1局分の状態
///
/// `InProgress` is the only state that accepts moves; `Win` and `Draw` are final.
pub struct Game {
    pub board: Board,
    pub current_player: Player,
    pub status: Outcome,
    pub history: Vec<Move>,
    pub mode: GameMode,
    /// タイトル下の一行
    pub info: Option<String>,
}

impl Game {
    pub fn new(mode: GameMode) -> Self {
        Game {
            board: Board::new(),
            current_player: Player::X,
            status: Outcome::InProgress,
            history: Vec::new(),
            mode,
            info: match mode {
                GameMode::VsComputer => Some(format!("You are {}, computer is {}", HUMAN, AI)),
                GameMode::TwoPlayer => None,
            },
        }
    }

    pub fn with_info(mut self, info: Option<&str>) -> Self {
        self.info = info.map(str::to_string);
        self
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        empty_cells(&self.board)
    }

    /// Places the current player's mark after checking the game is live and the cell free.
    pub fn apply(&mut self, mv: Move) -> Result<Outcome, BoardError> {
        if self.status.is_terminal() {
            return Err(BoardError::GameOver);
        }
        if !self.board[mv].is_empty() {
            return Err(BoardError::CellOccupied(mv));
        }

        self.board.put(mv, self.current_player.cell());
        self.history.push(mv);
        self.status = outcome(&self.board);
        if self.status == Outcome::InProgress {
            self.current_player = self.current_player.opponent();
        }
        Ok(self.status)
    }

    pub fn result_message(&self) -> String {
        match (self.status, self.mode) {
            (Outcome::Win(p), GameMode::VsComputer) if p == HUMAN => "You win!".to_string(),
            (Outcome::Win(_), GameMode::VsComputer) => "Computer wins!".to_string(),
            (Outcome::Win(p), GameMode::TwoPlayer) => format!("Player {} wins!", p),
            (Outcome::Draw, _) => "It's a draw!".to_string(),
            (Outcome::InProgress, _) => "Game in progress".to_string(),
        }
    }

    fn show(&self, status: String, last_move: Option<Move>) -> anyhow::Result<()> {
        let mut state = DisplayState::new();
        state.info_msg = self.info.clone();
        state.status_msg = Some(status);
        state.last_move = last_move;
        render_board(&self.board, &state)?;
        Ok(())
    }

    /// ローカル対局. Returns `None` when a player quits.
    pub fn play(
        &mut self,
        x: &dyn PlayerController,
        o: &dyn PlayerController,
        ui: &UiConfig,
    ) -> anyhow::Result<Option<Outcome>> {
        while self.status == Outcome::InProgress {
            let controller = match self.current_player {
                Player::X => x,
                Player::O => o,
            };

            if !controller.is_human() {
                self.show("Computer is thinking...".to_string(), self.history.last().copied())?;
                std::thread::sleep(Duration::from_millis(ui.think_delay_ms));
            }

            let moves = self.legal_moves();
            let Some(mv) = controller.choose_move(&self.board, &moves) else {
                info!(player = %self.current_player, "player quit");
                return Ok(None);
            };

            let mover = self.current_player;
            self.apply(mv)?;
            info!(player = %mover, position = mv.position(), "move played");

            if !controller.is_human() && self.status == Outcome::InProgress {
                self.show(
                    format!("Computer plays position {}", mv.position()),
                    Some(mv),
                )?;
                std::thread::sleep(Duration::from_millis(ui.move_delay_ms));
            }
        }

        self.show(self.result_message(), self.history.last().copied())?;
        Ok(Some(self.status))
    }

    /// サーバー相手の対局: the human's move goes out, the server's reply carries the
    /// computer's answer and the new board.
    pub async fn play_remote(
        &mut self,
        human: &dyn PlayerController,
        client: &mut NetworkClient,
        ui: &UiConfig,
    ) -> anyhow::Result<Option<Outcome>> {
        while self.status == Outcome::InProgress {
            let moves = self.legal_moves();
            let Some(mv) = human.choose_move(&self.board, &moves) else {
                return Ok(None);
            };

            match client.send_move(self.board, mv.index()).await? {
                NetMessage::Update { board, ai_move, .. } => {
                    self.board = board;
                    self.history.push(mv);
                    self.status = outcome(&self.board);

                    if let Some(index) = ai_move {
                        let ai_mv = Move::from_index(index)?;
                        self.history.push(ai_mv);
                        if self.status == Outcome::InProgress {
                            self.show(
                                format!("Computer plays position {}", ai_mv.position()),
                                Some(ai_mv),
                            )?;
                            std::thread::sleep(Duration::from_millis(ui.move_delay_ms));
                        }
                    }
                }
                NetMessage::Error { message } => {
                    warn!(%message, "server rejected move");
                    self.show(format!("Server: {}", message), None)?;
                    std::thread::sleep(Duration::from_millis(ui.move_delay_ms));
                }
                other => anyhow::bail!("Unexpected reply from server: {:?}", other),
            }
        }

        self.show(self.result_message(), self.history.last().copied())?;
        Ok(Some(self.status))
    }
}
