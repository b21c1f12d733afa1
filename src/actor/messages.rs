//! Messages exchanged inside the actor system.

use std::net::TcpStream;
use std::path::PathBuf;

/// Messages handled by the WsActor
#[derive(Debug)]
pub enum WsMsg {
    /// New subscriber from the acceptor thread (handshake still pending)
    AddClient(TcpStream),
    /// Push a reload notification for a changed path to every subscriber
    Reload { path: PathBuf },
    /// Close all connections and stop
    Shutdown,
}
