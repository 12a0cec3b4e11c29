//! Per-client protocol handling
//!
//! A [`Connection`] owns one client stream and walks it through
//! `Greeting -> Active -> Closed`. It owns no board state: every request is
//! turned into a call on the shared [`Board`] and the result is written back
//! as text.

use crate::board::{Board, DigOutcome};
use log::{debug, warn};
use shared::{Command, BOOM_MESSAGE, HELP_MESSAGE};
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Longest request line accepted, terminator excluded
pub const MAX_REQUEST_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Greeting,
    Active,
    Closed,
}

/// Why a session reached `Closed` without an I/O error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The client sent `bye`.
    Bye,
    /// The client dug a bomb while debug mode was off.
    Exploded,
    /// The client closed its end of the stream.
    Disconnected,
    /// The client sent a line longer than [`MAX_REQUEST_LEN`].
    RequestTooLong,
}

/// Server reaction to one request line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Boom,
    Bye,
}

/// Maps one request line to board operations and the text to send back.
///
/// Anything that does not parse gets the help text; the protocol never
/// reports parse details to the client.
pub fn respond(board: &Board, line: &str) -> Reply {
    let command = match line.parse::<Command>() {
        Ok(command) => command,
        Err(e) => {
            warn!("Unrecognized request {:?}: {}", line, e);
            return Reply::Text(HELP_MESSAGE.to_string());
        }
    };

    match command {
        Command::Look => Reply::Text(board.look()),
        Command::Help => Reply::Text(HELP_MESSAGE.to_string()),
        Command::Bye => Reply::Bye,
        Command::Dig { x, y } => match board.dig_at(x, y) {
            DigOutcome::Exploded => Reply::Boom,
            DigOutcome::OutOfBounds | DigOutcome::NoOp | DigOutcome::Revealed => {
                Reply::Text(board.look())
            }
        },
        Command::Flag { x, y } => {
            board.flag_at(x, y);
            Reply::Text(board.look())
        }
        Command::Deflag { x, y } => {
            board.deflag_at(x, y);
            Reply::Text(board.look())
        }
    }
}

/// One client session on the shared board
pub struct Connection<S> {
    stream: BufReader<S>,
    board: Arc<Board>,
    debug: bool,
    state: SessionState,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, board: Arc<Board>, debug: bool) -> Self {
        Self {
            stream: BufReader::new(stream),
            board,
            debug,
            state: SessionState::Greeting,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Runs the session to completion.
    ///
    /// `clients` is the connected-client count reported in the greeting. The
    /// session is `Closed` when this returns, whether it ended cleanly or
    /// through an I/O error.
    pub async fn run(&mut self, clients: usize) -> io::Result<SessionEnd> {
        let result = self.serve(clients).await;
        self.state = SessionState::Closed;

        if result.is_ok() {
            // The peer may already be gone; there is nothing left to tell it.
            let _ = self.stream.shutdown().await;
        }
        result
    }

    async fn serve(&mut self, clients: usize) -> io::Result<SessionEnd> {
        let greeting = shared::greeting(self.board.width(), self.board.height(), clients);
        self.send(&greeting).await?;
        self.state = SessionState::Active;

        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            let read = (&mut self.stream)
                .take(MAX_REQUEST_LEN as u64 + 2)
                .read_until(b'\n', &mut buffer)
                .await?;
            if read == 0 {
                return Ok(SessionEnd::Disconnected);
            }
            if buffer.len() > MAX_REQUEST_LEN + 1 && !buffer.ends_with(b"\n") {
                warn!("Request longer than {} bytes, closing", MAX_REQUEST_LEN);
                self.send(HELP_MESSAGE).await?;
                return Ok(SessionEnd::RequestTooLong);
            }

            let line = String::from_utf8_lossy(&buffer);
            let request = line.trim_end_matches(|c| c == '\n' || c == '\r');
            debug!("Request: {:?}", request);

            match respond(&self.board, request) {
                Reply::Text(text) => self.send(&text).await?,
                Reply::Boom => {
                    self.send(BOOM_MESSAGE).await?;
                    if !self.debug {
                        return Ok(SessionEnd::Exploded);
                    }
                }
                Reply::Bye => return Ok(SessionEnd::Bye),
            }
        }
    }

    async fn send(&mut self, text: &str) -> io::Result<()> {
        let mut message = String::with_capacity(text.len() + 1);
        message.push_str(text);
        message.push('\n');

        self.stream.write_all(message.as_bytes()).await?;
        self.stream.flush().await
    }
}
