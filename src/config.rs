use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_PATH: &str = "tictactoe_config.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ui: UiConfig,
    pub log: LogConfig,
    pub selfplay: SelfPlaySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// "Computer is thinking..." の待ち時間
    pub think_delay_ms: u64,
    /// Pause after the computer's move is announced.
    pub move_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
    /// Console mode writes here so log lines don't land on the game screen.
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlaySettings {
    pub num_games: usize,
    pub seed: u64,
    pub save_report: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            think_delay_ms: 500,
            move_delay_ms: 300,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: "info".to_string(),
            file: Some("tictactoe.log".to_string()),
        }
    }
}

impl Default for SelfPlaySettings {
    fn default() -> Self {
        SelfPlaySettings {
            num_games: 100,
            seed: 42,
            save_report: false,
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.addr, "127.0.0.1:8080");
        assert_eq!(config.ui.think_delay_ms, 500);
        assert_eq!(config.log.filter, "info");
        assert_eq!(config.selfplay.seed, 42);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "server": { "addr": "0.0.0.0:9000" }, "ui": { "think_delay_ms": 0 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.addr, "0.0.0.0:9000");
        assert_eq!(config.ui.think_delay_ms, 0);
        assert_eq!(config.ui.move_delay_ms, 300);
        assert_eq!(config.log.file.as_deref(), Some("tictactoe.log"));
        assert_eq!(config.selfplay.num_games, 100);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let json = r#"{ "version": "1.0", "selfplay": { "seed": 7 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.selfplay.seed, 7);
        assert_eq!(config.server.addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        assert!(AppConfig::load_from("does/not/exist.json").is_err());
    }
}
