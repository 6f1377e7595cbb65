pub mod config;
pub mod core;
pub mod display;
pub mod game;
pub mod logging;
pub mod logic;
pub mod network;
pub mod player;
pub mod selfplay;
