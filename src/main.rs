use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::{execute, terminal};
use std::io::{self, Write};
use std::time::Duration;
use tictactoe_solver::config::AppConfig;
use tictactoe_solver::core::{AI, HUMAN};
use tictactoe_solver::game::{Game, GameMode};
use tictactoe_solver::logging::init_logging;
use tictactoe_solver::network::{start_server, NetworkClient};
use tictactoe_solver::player::{MinimaxAI, PlayerController, TuiController};
use tictactoe_solver::selfplay::{run_selfplay, verify_exhaustive, SelfPlayConfig};
use tracing::info;

enum Mode {
    Local,
    Server,
    Client,
    SelfPlay,
    Quit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load_or_default();
    let args: Vec<String> = std::env::args().collect();

    // `tictactoe-solver serve [addr]` はメニューを経由しない
    if args.get(1).map(String::as_str) == Some("serve") {
        init_logging(&config.log, false)?;
        let addr = args.get(2).cloned().unwrap_or(config.server.addr.clone());
        return start_server(&addr).await;
    }

    init_logging(&config.log, true)?;

    // ターミナル初期化
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;

    let res = run(&config).await;

    // ターミナル復帰
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    match res? {
        Mode::Server => {
            println!("Starting server on {}", config.server.addr);
            start_server(&config.server.addr).await
        }
        _ => Ok(()),
    }
}

fn read_choice(choices: &[char]) -> anyhow::Result<Option<char>> {
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
                    KeyCode::Char(c) if choices.contains(&c) => return Ok(Some(c)),
                    _ => {}
                }
            }
        }
    }
}

fn clear_screen() -> anyhow::Result<()> {
    execute!(
        io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        crossterm::cursor::MoveTo(0, 0)
    )?;
    Ok(())
}

async fn run(config: &AppConfig) -> anyhow::Result<Mode> {
    clear_screen()?;
    print!("=== Tic Tac Toe ===\r\n");
    print!("\r\nSelect mode:\r\n");
    print!("1. Local Play\r\n");
    print!("2. Start Server ({})\r\n", config.server.addr);
    print!("3. Connect to Server ({})\r\n", config.server.addr);
    print!("4. Self-play check\r\n");
    print!("q. Quit\r\n");
    io::stdout().flush()?;

    let mode = match read_choice(&['1', '2', '3', '4'])? {
        Some('1') => Mode::Local,
        Some('2') => Mode::Server,
        Some('3') => Mode::Client,
        Some('4') => Mode::SelfPlay,
        _ => Mode::Quit,
    };

    match mode {
        Mode::Local => run_local(config)?,
        Mode::Client => run_client(config).await?,
        Mode::SelfPlay => run_selfplay_check(config)?,
        Mode::Server | Mode::Quit => {}
    }
    Ok(mode)
}

fn run_local(config: &AppConfig) -> anyhow::Result<()> {
    clear_screen()?;
    print!("=== Tic Tac Toe ===\r\n");
    print!("\r\nGame modes:\r\n");
    print!("1. Player vs AI\r\n");
    print!("2. Player vs Player\r\n");
    io::stdout().flush()?;

    let game_mode = match read_choice(&['1', '2'])? {
        Some('1') => GameMode::VsComputer,
        Some(_) => GameMode::TwoPlayer,
        None => return Ok(()),
    };

    // 対局画面と入力画面で同じ見出しを使う
    let header = match game_mode {
        GameMode::VsComputer => Some(format!("You are {}, computer is {}", HUMAN, AI)),
        GameMode::TwoPlayer => None,
    };
    let (x, o): (Box<dyn PlayerController>, Box<dyn PlayerController>) = match &header {
        Some(header) => (
            Box::new(TuiController::new(HUMAN, "Your").with_info(header)),
            Box::new(MinimaxAI::new("Computer")),
        ),
        None => (
            Box::new(TuiController::new(HUMAN, "Player X")),
            Box::new(TuiController::new(AI, "Player O")),
        ),
    };

    loop {
        let mut game = Game::new(game_mode).with_info(header.as_deref());
        let Some(result) = game.play(x.as_ref(), o.as_ref(), &config.ui)? else {
            return Ok(());
        };
        info!(?result, moves = game.history.len(), "game over");

        if !ask_play_again()? {
            return Ok(());
        }
    }
}

async fn run_client(config: &AppConfig) -> anyhow::Result<()> {
    clear_screen()?;
    print!("Connecting to server...\r\n");
    io::stdout().flush()?;

    let mut client = NetworkClient::connect(&config.server.addr).await?;
    let header = format!("You are {}, server plays {}", HUMAN, AI);
    let human = TuiController::new(HUMAN, "Your").with_info(&header);

    loop {
        let mut game = Game::new(GameMode::VsComputer).with_info(human.info());
        let Some(result) = game.play_remote(&human, &mut client, &config.ui).await? else {
            return Ok(());
        };
        info!(?result, "remote game over");

        if !ask_play_again()? {
            return Ok(());
        }
    }
}

fn run_selfplay_check(config: &AppConfig) -> anyhow::Result<()> {
    clear_screen()?;
    print!("=== Self-Play Check ===\r\n\r\n");
    print!("Exhaustive search over every opponent reply...\r\n");
    io::stdout().flush()?;

    for ai_first in [true, false] {
        let report = verify_exhaustive(ai_first)?;
        print!(
            "AI {}: {} games, {} wins, {} draws, {} losses\r\n",
            if ai_first { "first" } else { "second" },
            report.games,
            report.ai_wins,
            report.draws,
            report.ai_losses
        );
    }

    print!(
        "\r\nPlaying {} games against a random opponent...\r\n",
        config.selfplay.num_games
    );
    io::stdout().flush()?;

    let stats = run_selfplay(SelfPlayConfig {
        num_games: config.selfplay.num_games,
        seed: config.selfplay.seed,
        alternate_first: true,
        save_report: config.selfplay.save_report,
    })?;

    let pct = |n: usize| {
        if stats.total_games == 0 {
            0.0
        } else {
            n as f64 / stats.total_games as f64 * 100.0
        }
    };
    print!("--- Statistics ---\r\n");
    print!("AI Wins: {} ({:.1}%)\r\n", stats.ai_wins, pct(stats.ai_wins));
    print!("AI Losses: {} ({:.1}%)\r\n", stats.ai_losses, pct(stats.ai_losses));
    print!("Draws: {} ({:.1}%)\r\n", stats.draws, pct(stats.draws));
    print!("Avg Moves: {:.1}\r\n", stats.avg_moves);
    print!("\r\nPress any key to exit.\r\n");
    io::stdout().flush()?;

    wait_for_key()
}

fn wait_for_key() -> anyhow::Result<()> {
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}

fn ask_play_again() -> anyhow::Result<bool> {
    print!("\r\n  Play again? (y/n): ");
    io::stdout().flush()?;
    Ok(read_choice(&['y', 'n', 'Y', 'N'])?.map_or(false, |c| c.eq_ignore_ascii_case(&'y')))
}
