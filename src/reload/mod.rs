//! Live reload channel: port selection, wire protocol, acceptor.
//!
//! The channel itself is a WebSocket push server. Browsers subscribe from
//! `reload.js`; the file watcher triggers `Reload` frames through the
//! WsActor. Only the `WsMsg::Reload` message is exposed to the rest of the
//! process - the subscriber set stays inside the actor.

pub mod message;
pub mod port;
pub mod server;

use std::sync::atomic::{AtomicU16, Ordering};

/// Default WebSocket port for live reload.
pub const DEFAULT_WS_PORT: u16 = 35729;

/// Port the reload channel actually uses. Selected once at startup (may
/// differ from DEFAULT_WS_PORT when that one is taken) and immutable for
/// the process lifetime afterward; the template layer reads it when
/// emitting reload.js.
static WS_PORT: AtomicU16 = AtomicU16::new(DEFAULT_WS_PORT);

/// Publish the selected WebSocket port (called once, before serving).
pub fn set_ws_port(port: u16) {
    WS_PORT.store(port, Ordering::Relaxed);
}

/// Get the selected WebSocket port.
pub fn ws_port() -> u16 {
    WS_PORT.load(Ordering::Relaxed)
}
