use log::{debug, info};
use shared::{Command, BOOM_MESSAGE};
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

pub struct Client {
    stream: TcpStream,
    server_addr: SocketAddr,
}

impl Client {
    pub async fn connect(server_addr: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let stream = TcpStream::connect(server_addr).await?;
        let server_addr = stream.peer_addr()?;
        info!("Connected to {}", server_addr);

        Ok(Client {
            stream,
            server_addr,
        })
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    /// Plays interactively on stdin/stdout until the server closes the
    /// connection.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let input = BufReader::new(tokio::io::stdin());
        relay(self.stream, input, tokio::io::stdout()).await?;
        info!("Server closed the connection");
        Ok(())
    }
}

/// Copies server lines to `output` and `input` lines to the server.
///
/// Returns once the server closes its side. When `input` ends first the
/// client says `bye` and keeps printing until the server hangs up.
pub async fn relay<S, I, O>(server: S, input: I, mut output: O) -> io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let (server_read, mut server_write) = tokio::io::split(server);
    let mut server_lines = BufReader::new(server_read).lines();
    let mut input_lines = input.lines();
    let mut input_open = true;

    loop {
        tokio::select! {
            line = server_lines.next_line() => {
                let Some(line) = line? else {
                    output.flush().await?;
                    return Ok(());
                };
                if line == BOOM_MESSAGE {
                    debug!("Dug a bomb");
                }
                output.write_all(line.as_bytes()).await?;
                output.write_all(b"\n").await?;
                output.flush().await?;
            }
            line = input_lines.next_line(), if input_open => {
                let request = match line? {
                    Some(line) => line,
                    None => {
                        input_open = false;
                        Command::Bye.to_string()
                    }
                };
                server_write.write_all(format!("{}\n", request).as_bytes()).await?;
                server_write.flush().await?;
            }
        }
    }
}
