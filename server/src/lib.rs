//! # Minesweeper Server Library
//!
//! This library provides a multiplayer Minesweeper server. Any number of
//! clients connect over TCP, share one mutable board and play it through a
//! line-based text protocol (`look`, `dig X Y`, `flag X Y`, `deflag X Y`,
//! `help`, `bye`).
//!
//! ## Core Responsibilities
//!
//! ### Shared Board
//! A single [`board::Board`] lives for the whole process. Its tiles move
//! through `Untouched -> Dug`, `Untouched -> Flagged` and
//! `Flagged -> Untouched`; digging a tile with no neighboring bombs reveals
//! the whole surrounding open region.
//!
//! ### Client Sessions
//! Every accepted connection runs in its own task. A session greets the
//! client, then answers one request per line until the client says `bye`,
//! disconnects, or digs a bomb while debug mode is off.
//!
//! ## Concurrency
//!
//! Each tile has its own lock, so flags and deflags on different tiles run
//! in parallel. Digs additionally take a board-wide lock for the whole
//! reveal cascade, which makes them run one at a time; `look` takes the same
//! lock in shared mode so it never renders a half-finished cascade.
//!
//! ## Module Organization
//!
//! - `tile`: per-cell state machine
//! - `board`: the shared board, reveal cascade and locking
//! - `loader`: board-file parsing
//! - `client_manager`: live client count and client ids
//! - `connection`: per-client protocol state machine
//! - `network`: TCP accept loop
//! - `config`: process configuration and board construction
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::board::Board;
//! use server::network::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Random 10x10 board, debug mode off
//!     let server = Server::bind("127.0.0.1:4444", Board::random(10, 10), false).await?;
//!
//!     // Runs until the listening socket fails
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod board;
pub mod client_manager;
pub mod config;
pub mod connection;
pub mod loader;
pub mod network;
pub mod tile;
