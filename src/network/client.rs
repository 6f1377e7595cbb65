use crate::core::Board;
use crate::network::protocol::NetMessage;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, info};

pub struct NetworkClient {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl NetworkClient {
    pub async fn connect(addr: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        info!(%addr, "connected to server");
        let (reader, writer) = stream.into_split();
        Ok(Self {
            lines: BufReader::new(reader).lines(),
            writer,
        })
    }

    /// 手を送信し, サーバーの返答を1行待つ
    pub async fn send_move(&mut self, board: Board, position: usize) -> anyhow::Result<NetMessage> {
        let msg = NetMessage::MakeMove { board, position };
        let json = serde_json::to_string(&msg)? + "\n";
        self.writer.write_all(json.as_bytes()).await?;

        let line = self
            .lines
            .next_line()
            .await?
            .ok_or_else(|| anyhow::anyhow!("Server closed the connection"))?;
        let reply: NetMessage = serde_json::from_str(&line)?;
        debug!(?reply, "server reply");
        Ok(reply)
    }
}
