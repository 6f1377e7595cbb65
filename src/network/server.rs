use crate::core::{Board, Move, AI, HUMAN};
use crate::logic::{outcome, Outcome};
use crate::network::protocol::{NetMessage, Status};
use crate::player::ai::best_move;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

pub async fn start_server(addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "server started");
    serve(listener).await
}

/// Accept loop. Every request carries its own board, so connections share nothing.
pub async fn serve(listener: TcpListener) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!(%peer, "client connected");

        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket).await {
                warn!(%peer, error = %e, "error handling connection");
            }
            info!(%peer, "client disconnected");
        });
    }
}

async fn handle_connection(socket: TcpStream) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = match serde_json::from_str::<NetMessage>(&line) {
            Ok(msg) => handle_message(msg),
            Err(e) => {
                warn!(error = %e, "malformed request");
                error_reply(format!("Malformed request: {}", e))
            }
        };
        let json = serde_json::to_string(&reply)? + "\n";
        writer.write_all(json.as_bytes()).await?;
    }
    Ok(())
}

pub fn handle_message(msg: NetMessage) -> NetMessage {
    match msg {
        NetMessage::MakeMove { board, position } => handle_move(board, position),
        other => {
            warn!(?other, "unexpected message from client");
            error_reply("Expected MakeMove".to_string())
        }
    }
}

/// 人間の手を適用し, 必要ならAIが応手する
pub fn handle_move(mut board: Board, position: usize) -> NetMessage {
    let mv = match Move::from_index(position) {
        Ok(mv) => mv,
        Err(_) => return error_reply("Position out of range".to_string()),
    };
    if outcome(&board).is_terminal() {
        return error_reply("Game is already over".to_string());
    }
    if !board[mv].is_empty() {
        return error_reply("Cell is occupied".to_string());
    }

    board.put(mv, HUMAN.cell());
    match outcome(&board) {
        Outcome::Win(player) => return update(board, Some(player), None, Status::Win),
        Outcome::Draw => return update(board, None, None, Status::Draw),
        Outcome::InProgress => {}
    }

    // InProgress なので空きマスは必ずある
    let ai_move = match best_move(&board) {
        Ok(mv) => mv,
        Err(e) => return error_reply(e.to_string()),
    };
    board.put(ai_move, AI.cell());
    debug!(human = position, ai = ai_move.index(), "move handled");

    let ai_index = Some(ai_move.index());
    match outcome(&board) {
        Outcome::Win(player) => update(board, Some(player), ai_index, Status::Lose),
        Outcome::Draw => update(board, None, ai_index, Status::Draw),
        Outcome::InProgress => update(board, None, ai_index, Status::Ongoing),
    }
}

fn update(
    board: Board,
    winner: Option<crate::core::Player>,
    ai_move: Option<usize>,
    status: Status,
) -> NetMessage {
    NetMessage::Update {
        board,
        winner,
        ai_move,
        status,
    }
}

fn error_reply(message: String) -> NetMessage {
    warn!(%message, "rejecting request");
    NetMessage::Error { message }
}
