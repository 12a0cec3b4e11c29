//! Connected-client bookkeeping for the Minesweeper server
//!
//! This module tracks the clients attached to the shared board:
//! - Live connection count, reported in every greeting
//! - Unique client ids for log correlation
//! - Automatic cleanup when a session ends for any reason
//!
//! The count is informational only. It is updated atomically but no board
//! operation depends on it, so a greeting may race with a concurrent
//! disconnect and report a value that is one off.

use log::info;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

/// Tracks how many clients are connected and hands out client ids
///
/// Shared between the accept loop and every connection task through an
/// `Arc`. Client ids start from 1 and are never reused.
#[derive(Debug)]
pub struct ClientManager {
    /// Clients currently holding a ticket
    connected: AtomicUsize,
    /// Next id handed to a new connection
    next_client_id: AtomicU32,
}

impl ClientManager {
    pub fn new() -> Self {
        Self {
            connected: AtomicUsize::new(0),
            next_client_id: AtomicU32::new(1),
        }
    }

    /// Registers a new connection
    ///
    /// Returns a ticket whose `clients` field already counts the new client.
    /// The connection stays counted until the ticket is dropped.
    pub fn register(self: &Arc<Self>, addr: SocketAddr) -> ClientTicket {
        let id = self.next_client_id.fetch_add(1, Ordering::Relaxed);
        let clients = self.connected.fetch_add(1, Ordering::AcqRel) + 1;
        info!("Client {} connected from {} ({} connected)", id, addr, clients);

        ClientTicket {
            id,
            addr,
            clients,
            manager: Arc::clone(self),
        }
    }

    /// Number of clients connected right now
    pub fn len(&self) -> usize {
        self.connected.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ClientManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that a client is connected
///
/// Dropping the ticket unregisters the client, so the count stays right even
/// when a connection task ends through an error or a panic.
#[derive(Debug)]
pub struct ClientTicket {
    pub id: u32,
    pub addr: SocketAddr,
    /// Connected clients at registration time, this one included
    pub clients: usize,
    manager: Arc<ClientManager>,
}

impl Drop for ClientTicket {
    fn drop(&mut self) {
        let remaining = self.manager.connected.fetch_sub(1, Ordering::AcqRel) - 1;
        info!(
            "Client {} at {} disconnected ({} connected)",
            self.id, self.addr, remaining
        );
    }
}
