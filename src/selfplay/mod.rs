use crate::core::{Board, BoardError, Player, AI, HUMAN};
use crate::game::{Game, GameMode};
use crate::logic::{empty_cells, outcome, Outcome};
use crate::player::ai::best_move;
use crate::player::{MinimaxAI, PlayerController, RandomAI};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

pub struct SelfPlayConfig {
    pub num_games: usize,
    pub seed: u64,
    /// 先手を交互に入れ替える
    pub alternate_first: bool,
    pub save_report: bool,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Option<Player>,
    pub ai_first: bool,
    pub moves: usize,
    pub time_ms: u128,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub ai_wins: usize,
    pub ai_losses: usize,
    pub draws: usize,
    pub avg_moves: f64,
    pub games: Vec<GameResult>,
}

impl SelfPlayStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: GameResult) {
        self.total_games += 1;
        match result.winner {
            Some(p) if p == AI => self.ai_wins += 1,
            Some(_) => self.ai_losses += 1,
            None => self.draws += 1,
        }
        self.games.push(result);

        let total_moves: usize = self.games.iter().map(|g| g.moves).sum();
        self.avg_moves = total_moves as f64 / self.games.len() as f64;
    }
}

/// Every opponent line against the minimax player, counted by result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyReport {
    pub ai_first: bool,
    pub games: usize,
    pub ai_wins: usize,
    pub draws: usize,
    pub ai_losses: usize,
}

impl VerifyReport {
    fn merge(mut self, other: VerifyReport) -> VerifyReport {
        self.games += other.games;
        self.ai_wins += other.ai_wins;
        self.draws += other.draws;
        self.ai_losses += other.ai_losses;
        self
    }
}

/// 全探索による検証: the AI answers with `best_move`, the opponent tries every reply.
pub fn verify_exhaustive(ai_first: bool) -> Result<VerifyReport, BoardError> {
    let mut board = Board::new();
    if ai_first {
        let mv = best_move(&board)?;
        board.put(mv, AI.cell());
    }

    // 相手の最初の応手ごとに並列探索
    let branches = empty_cells(&board)
        .into_par_iter()
        .map(|mv| {
            let mut next = board;
            next.put(mv, HUMAN.cell());
            explore(next, true)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let report = branches
        .into_iter()
        .fold(VerifyReport::default(), VerifyReport::merge);
    let report = VerifyReport { ai_first, ..report };
    info!(?report, "exhaustive verification finished");
    Ok(report)
}

fn explore(mut board: Board, ai_to_move: bool) -> Result<VerifyReport, BoardError> {
    match outcome(&board) {
        Outcome::Win(p) if p == AI => {
            return Ok(VerifyReport {
                games: 1,
                ai_wins: 1,
                ..VerifyReport::default()
            })
        }
        Outcome::Win(_) => {
            return Ok(VerifyReport {
                games: 1,
                ai_losses: 1,
                ..VerifyReport::default()
            })
        }
        Outcome::Draw => {
            return Ok(VerifyReport {
                games: 1,
                draws: 1,
                ..VerifyReport::default()
            })
        }
        Outcome::InProgress => {}
    }

    if ai_to_move {
        let mv = best_move(&board)?;
        board.put(mv, AI.cell());
        return explore(board, false);
    }

    let mut report = VerifyReport::default();
    for mv in empty_cells(&board) {
        let mut next = board;
        next.put(mv, HUMAN.cell());
        report = report.merge(explore(next, true)?);
    }
    Ok(report)
}

/// Minimax vs a seeded random opponent.
pub fn run_selfplay(config: SelfPlayConfig) -> anyhow::Result<SelfPlayStats> {
    let mut stats = SelfPlayStats::new();
    let minimax = MinimaxAI::new("Minimax AI");
    let random = RandomAI::with_seed("Random AI", config.seed);

    for game_num in 1..=config.num_games {
        let start_time = Instant::now();
        let ai_first = config.alternate_first && game_num % 2 == 0;

        let mut game = Game::new(GameMode::VsComputer);
        if ai_first {
            game.current_player = AI;
        }

        let (winner, moves) = run_game_silent(&mut game, &random, &minimax)?;
        let result = GameResult {
            winner,
            ai_first,
            moves,
            time_ms: start_time.elapsed().as_millis(),
        };
        info!(
            game = game_num,
            winner = ?result.winner,
            moves = result.moves,
            "self-play game finished"
        );
        stats.add_result(result);
    }

    if config.save_report {
        save_report(&stats)?;
    }
    Ok(stats)
}

/// `x` plays HUMAN's mark, `o` plays AI's.
fn run_game_silent(
    game: &mut Game,
    x: &dyn PlayerController,
    o: &dyn PlayerController,
) -> anyhow::Result<(Option<Player>, usize)> {
    let mut move_count = 0;

    loop {
        match game.status {
            Outcome::Win(p) => return Ok((Some(p), move_count)),
            Outcome::Draw => return Ok((None, move_count)),
            Outcome::InProgress => {}
        }

        let controller = if game.current_player == HUMAN { x } else { o };
        let legal_moves = game.legal_moves();
        let Some(mv) = controller.choose_move(&game.board, &legal_moves) else {
            // 投了扱い
            return Ok((Some(game.current_player.opponent()), move_count));
        };
        game.apply(mv)?;
        move_count += 1;
    }
}

fn save_report(stats: &SelfPlayStats) -> anyhow::Result<()> {
    let report_dir = "selfplay_reports";
    std::fs::create_dir_all(report_dir)?;

    let filename = format!(
        "{}/report_{}.json",
        report_dir,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );

    let file = std::fs::File::create(&filename)?;
    serde_json::to_writer_pretty(file, stats)?;
    info!(%filename, "self-play report saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_loses_moving_first() {
        let report = verify_exhaustive(true).unwrap();
        assert!(report.ai_first);
        assert_eq!(report.ai_losses, 0);
        assert!(report.games > 0);
        assert_eq!(report.games, report.ai_wins + report.draws);
    }

    #[test]
    fn test_never_loses_moving_second() {
        let report = verify_exhaustive(false).unwrap();
        assert!(!report.ai_first);
        assert_eq!(report.ai_losses, 0);
        assert!(report.draws > 0);
        assert!(report.ai_wins > 0);
    }

    #[test]
    fn test_random_opponent_never_wins() {
        let stats = run_selfplay(SelfPlayConfig {
            num_games: 12,
            seed: 3,
            alternate_first: true,
            save_report: false,
        })
        .unwrap();
        assert_eq!(stats.total_games, 12);
        assert_eq!(stats.ai_losses, 0);
        assert_eq!(stats.ai_wins + stats.draws, 12);
        assert!(stats.avg_moves >= 5.0);
        assert_eq!(stats.games.iter().filter(|g| g.ai_first).count(), 6);
    }

    #[test]
    fn test_stats_accumulate() {
        let mut stats = SelfPlayStats::new();
        stats.add_result(GameResult {
            winner: Some(AI),
            ai_first: true,
            moves: 7,
            time_ms: 1,
        });
        stats.add_result(GameResult {
            winner: None,
            ai_first: false,
            moves: 9,
            time_ms: 1,
        });
        assert_eq!(stats.total_games, 2);
        assert_eq!(stats.ai_wins, 1);
        assert_eq!(stats.draws, 1);
        assert_eq!(stats.avg_moves, 8.0);
    }
}
