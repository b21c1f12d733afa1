//! WebSocket acceptor for live reload.
//!
//! Binds the pre-selected port and hands raw `TcpStream`s to the WsActor
//! over a channel; the actor owns the handshake and the subscriber set.

use std::net::TcpListener;

use anyhow::Result;

use crate::actor::messages::WsMsg;

/// Start the acceptor for the live reload channel on the caller-provided
/// port. Clients are sent through the channel for the WsActor to handle.
pub fn start_ws_server(port: u16, ws_tx: tokio::sync::mpsc::Sender<WsMsg>) -> Result<()> {
    let listener = TcpListener::bind(("127.0.0.1", port))
        .map_err(|e| anyhow::anyhow!("failed to bind live reload port {}: {}", port, e))?;
    listener.set_nonblocking(true)?;

    // Spawn acceptor thread
    std::thread::spawn(move || {
        loop {
            match listener.accept() {
                Ok((stream, addr)) => {
                    crate::debug!("reload"; "client connected: {}", addr);

                    // Set blocking for WebSocket handshake
                    let _ = stream.set_nonblocking(false);

                    if ws_tx.blocking_send(WsMsg::AddClient(stream)).is_err() {
                        // Actor shut down, stop accepting
                        break;
                    }
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    std::thread::sleep(std::time::Duration::from_millis(100));
                    continue;
                }
                Err(e) => {
                    crate::log!("reload"; "accept error: {}", e);
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
        }
    });

    Ok(())
}
