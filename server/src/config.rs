//! Process configuration consumed by the server

use crate::board::Board;
use crate::loader::{self, LoadError};
use log::info;
use std::path::PathBuf;

pub const DEFAULT_SIZE: usize = 10;

/// Where the single shared board comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardSource {
    Random { width: usize, height: usize },
    File(PathBuf),
}

impl Default for BoardSource {
    fn default() -> Self {
        BoardSource::Random {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub board: BoardSource,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: shared::DEFAULT_PORT,
            debug: false,
            board: BoardSource::default(),
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the board every client will share. Runs before the server
    /// accepts anyone, so a bad board file is a startup failure.
    pub fn build_board(&self) -> Result<Board, LoadError> {
        match &self.board {
            BoardSource::Random { width, height } => {
                info!("Generating random {}x{} board", width, height);
                Ok(Board::random(*width, *height))
            }
            BoardSource::File(path) => loader::load_board(path),
        }
    }
}
