//! Live-reload port selection.
//!
//! Probes TCP connectability instead of binding: a connection that
//! succeeds means another process (often a second dais instance) already
//! owns the port, so the next candidate is tried. Exhausting the
//! candidates is an environment problem the process cannot fix itself, so
//! it is a fatal configuration error rather than a retryable one.

use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use anyhow::Result;

/// Maximum port probe attempts
const MAX_PORT_ATTEMPTS: u16 = 10;

/// Bounded timeout per connectability probe
const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Find an available port starting at `default_port`, incrementing through
/// at most 10 candidates.
pub fn select_port(default_port: u16) -> Result<u16> {
    for offset in 0..MAX_PORT_ATTEMPTS {
        let port = default_port.saturating_add(offset);
        if is_port_available(port) {
            if offset > 0 {
                crate::log!("reload"; "using port {} instead of {}", port, default_port);
            }
            return Ok(port);
        }
        crate::log!("reload"; "can't use live reload port {} (already in use)", port);
    }

    Err(anyhow::anyhow!(
        "couldn't find a live reload port after {} attempts (ports {}-{})",
        MAX_PORT_ATTEMPTS,
        default_port,
        default_port.saturating_add(MAX_PORT_ATTEMPTS - 1),
    ))
}

/// A port is available when nothing accepts a connection on it.
fn is_port_available(port: u16) -> bool {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    match TcpStream::connect_timeout(&addr, PROBE_TIMEOUT) {
        // Connection established means the port is already in use
        Ok(_) => false,
        Err(_) => true,
    }
}
