//! # Minesweeper Terminal Client Library
//!
//! A thin line relay for the Minesweeper text protocol. It forwards whatever
//! the player types to the server, one line per request, and prints every
//! line the server sends back. All game logic lives on the server; the client
//! only knows enough of the protocol to say `bye` when its input runs out.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::network::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::connect("127.0.0.1:4444").await?;
//!
//!     // Relays stdin/stdout until the server hangs up
//!     client.run().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod network;
