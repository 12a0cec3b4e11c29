use clap::{ArgGroup, Parser};
use log::{error, info};
use server::config::{BoardSource, ServerConfig};
use server::network::Server;
use std::path::PathBuf;

/// Multiplayer Minesweeper server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("board_source").args(["size", "file"])))]
struct Args {
    /// Keep clients connected after they dig a bomb
    #[arg(long, overrides_with = "no_debug")]
    debug: bool,

    /// Disconnect clients that dig a bomb (default)
    #[arg(long, overrides_with = "debug")]
    no_debug: bool,

    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value_t = shared::DEFAULT_PORT)]
    port: u16,

    /// Random board size as WIDTH,HEIGHT
    #[arg(long, value_parser = parse_size)]
    size: Option<(usize, usize)>,

    /// Board file to load instead of a random board
    #[arg(long)]
    file: Option<PathBuf>,
}

fn parse_size(value: &str) -> Result<(usize, usize), String> {
    let (width, height) = value
        .split_once(',')
        .ok_or_else(|| format!("expected WIDTH,HEIGHT, got {:?}", value))?;
    let width = width
        .parse()
        .map_err(|_| format!("invalid width {:?}", width))?;
    let height = height
        .parse()
        .map_err(|_| format!("invalid height {:?}", height))?;
    Ok((width, height))
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        let board = match (args.size, args.file) {
            (_, Some(path)) => BoardSource::File(path),
            (Some((width, height)), None) => BoardSource::Random { width, height },
            (None, None) => BoardSource::default(),
        };

        ServerConfig {
            host: args.host,
            port: args.port,
            debug: args.debug && !args.no_debug,
            board,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let config = ServerConfig::from(Args::parse());
    let board = config.build_board()?;
    let server = Server::bind(&config.address(), board, config.debug).await?;

    tokio::select! {
        result = server.run() => {
            if let Err(e) = &result {
                error!("Server stopped: {}", e);
            }
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
