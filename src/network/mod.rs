pub mod client;
pub mod protocol;
pub mod server;

pub use client::NetworkClient;
pub use protocol::{NetMessage, Status};
pub use server::{handle_move, serve, start_server};
