//! Server network layer accepting TCP clients onto the shared board

use crate::board::Board;
use crate::client_manager::ClientManager;
use crate::connection::Connection;
use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

/// Accepts connections and runs one task per client, all sharing one board
pub struct Server {
    listener: TcpListener,
    board: Arc<Board>,
    clients: Arc<ClientManager>,
    debug: bool,
}

impl Server {
    pub async fn bind(
        addr: &str,
        board: Board,
        debug: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(addr).await?;
        info!(
            "Server listening on {} ({}x{} board, debug {})",
            listener.local_addr()?,
            board.width(),
            board.height(),
            if debug { "on" } else { "off" }
        );

        Ok(Server {
            listener,
            board: Arc::new(board),
            clients: Arc::new(ClientManager::new()),
            debug,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn board(&self) -> Arc<Board> {
        Arc::clone(&self.board)
    }

    pub fn clients(&self) -> Arc<ClientManager> {
        Arc::clone(&self.clients)
    }

    /// Accept loop. Only returns if the listening socket itself fails.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        info!("Server started successfully");

        loop {
            let (socket, addr) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                    return Err(e.into());
                }
            };
            self.spawn_client(socket, addr);
        }
    }

    /// Spawns task that serves a single client until it leaves
    fn spawn_client(&self, socket: TcpStream, addr: SocketAddr) {
        let ticket = self.clients.register(addr);
        let board = Arc::clone(&self.board);
        let debug = self.debug;

        tokio::spawn(async move {
            // Owned by the task so the client stays counted until it leaves.
            let ticket = ticket;
            if let Err(e) = socket.set_nodelay(true) {
                warn!("Client {}: cannot disable Nagle: {}", ticket.id, e);
            }

            let mut connection = Connection::new(socket, board, debug);
            match connection.run(ticket.clients).await {
                Ok(end) => info!("Client {} session ended: {:?}", ticket.id, end),
                Err(e) => warn!("Client {} connection error: {}", ticket.id, e),
            }
            drop(ticket);
        });
    }
}
