//! Text protocol spoken between the Minesweeper server and its clients.
//!
//! Every message is a single newline-terminated ASCII line, except board
//! renderings which span one line per board row.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 4444;
pub const BOOM_MESSAGE: &str = "BOOM!";
pub const HELP_MESSAGE: &str =
    "Commands: look | dig X Y | flag X Y | deflag X Y | help | bye (X and Y are integers)";
pub const GREETING_PREFIX: &str = "Welcome";

/// A single client request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Look,
    Help,
    Bye,
    Dig { x: i64, y: i64 },
    Flag { x: i64, y: i64 },
    Deflag { x: i64, y: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),
    #[error("expected {expected} argument(s) for {command}, got {found}")]
    WrongArity {
        command: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("not a coordinate: {0:?}")]
    InvalidCoordinate(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Parses one protocol line (without its terminator).
    ///
    /// Tokens are separated by exactly one space, so `"dig  1 2"` or a
    /// trailing blank are rejected just like any other unknown input.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split(' ').collect();
        let (name, args) = tokens
            .split_first()
            .ok_or_else(|| ParseCommandError::UnknownCommand(line.to_string()))?;

        match *name {
            "look" => no_args("look", args).map(|_| Command::Look),
            "help" => no_args("help", args).map(|_| Command::Help),
            "bye" => no_args("bye", args).map(|_| Command::Bye),
            "dig" => coordinates("dig", args).map(|(x, y)| Command::Dig { x, y }),
            "flag" => coordinates("flag", args).map(|(x, y)| Command::Flag { x, y }),
            "deflag" => coordinates("deflag", args).map(|(x, y)| Command::Deflag { x, y }),
            _ => Err(ParseCommandError::UnknownCommand(line.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Look => write!(f, "look"),
            Command::Help => write!(f, "help"),
            Command::Bye => write!(f, "bye"),
            Command::Dig { x, y } => write!(f, "dig {} {}", x, y),
            Command::Flag { x, y } => write!(f, "flag {} {}", x, y),
            Command::Deflag { x, y } => write!(f, "deflag {} {}", x, y),
        }
    }
}

fn no_args(command: &'static str, args: &[&str]) -> Result<(), ParseCommandError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(ParseCommandError::WrongArity {
            command,
            expected: 0,
            found: args.len(),
        })
    }
}

fn coordinates(command: &'static str, args: &[&str]) -> Result<(i64, i64), ParseCommandError> {
    match args {
        [x, y] => Ok((parse_coordinate(x)?, parse_coordinate(y)?)),
        _ => Err(ParseCommandError::WrongArity {
            command,
            expected: 2,
            found: args.len(),
        }),
    }
}

/// Accepts `-?[0-9]+`. A leading `+` is not part of the grammar.
fn parse_coordinate(token: &str) -> Result<i64, ParseCommandError> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseCommandError::InvalidCoordinate(token.to_string()));
    }
    token
        .parse()
        .map_err(|_| ParseCommandError::InvalidCoordinate(token.to_string()))
}

/// Builds the line sent to a client right after it connects.
pub fn greeting(width: usize, height: usize, clients: usize) -> String {
    format!(
        "{} to Minesweeper. Board: {} columns by {} rows. Players: {} including you. Type 'help' for help.",
        GREETING_PREFIX, width, height, clients
    )
}
