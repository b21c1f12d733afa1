//! WebSocket Actor - Live Reload Push Channel
//!
//! This actor is responsible for:
//! - Completing the handshake for streams handed over by the acceptor
//! - Owning the subscriber set (never exposed to other components)
//! - Broadcasting reload notifications to all connected clients

use std::net::TcpStream;

use tokio::sync::mpsc;
use tungstenite::WebSocket;
use tungstenite::protocol::Message;

use super::messages::WsMsg;
use crate::reload::message::ReloadMessage;

/// WebSocket Actor - manages client connections and broadcasts
pub struct WsActor {
    /// Channel to receive messages
    rx: mpsc::Receiver<WsMsg>,
    /// Connected clients
    clients: Vec<WebSocket<TcpStream>>,
}

impl WsActor {
    /// Create a new WsActor
    pub fn new(rx: mpsc::Receiver<WsMsg>) -> Self {
        Self {
            rx,
            clients: Vec::new(),
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                WsMsg::AddClient(stream) => self.add_client(stream),

                WsMsg::Reload { path } => {
                    let reload = ReloadMessage::reload(path.display().to_string());
                    self.broadcast(Message::Text(reload.to_json().into()));
                }

                WsMsg::Shutdown => {
                    crate::debug!("reload"; "shutting down");
                    for mut client in self.clients.drain(..) {
                        let _ = client.close(None);
                    }
                    break;
                }
            }
        }
    }

    /// Complete the handshake and register a new client
    fn add_client(&mut self, stream: TcpStream) {
        match tungstenite::accept(stream) {
            Ok(mut ws) => {
                let connected = ReloadMessage::connected();
                if let Err(e) = ws.send(Message::Text(connected.to_json().into())) {
                    crate::log!("reload"; "failed to send connected message: {}", e);
                    return;
                }
                crate::debug!("reload"; "client registered (total: {})", self.clients.len() + 1);
                self.clients.push(ws);
            }
            Err(e) => {
                crate::log!("reload"; "handshake failed: {}", e);
            }
        }
    }

    /// Broadcast a message to all connected clients, dropping dead ones
    fn broadcast(&mut self, msg: Message) {
        let count = self.clients.len();
        if count == 0 {
            crate::debug!("reload"; "no clients connected");
            return;
        }

        self.clients.retain_mut(|client| match client.send(msg.clone()) {
            Ok(_) => true,
            Err(e) => {
                crate::debug!("reload"; "client disconnected: {}", e);
                false
            }
        });
        crate::debug!("reload"; "broadcast to {} clients", count);
    }
}
