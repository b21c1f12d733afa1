//! Actor Coordinator - Wires up the Watch/Reload Actor System
//!
//! # Responsibility
//!
//! The Coordinator is a **thin orchestrator** that:
//! - Creates communication channels
//! - Starts the live-reload acceptor and the actors
//! - Supervises them until shutdown or a fatal watcher error
//!
//! It does not decide what a fatal error means for the process; it reports
//! upward and the lifecycle layer decides (currently: crash visibly).

use std::path::PathBuf;

use anyhow::Result;
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::fs::FsActor;
use super::messages::WsMsg;
use super::ws::WsActor;

/// Channel buffer size
const CHANNEL_BUFFER: usize = 32;

/// Coordinator - wires up and runs the actor system
pub struct Coordinator {
    /// Presentation root, watched recursively
    root: PathBuf,
    /// Pre-selected live reload port
    ws_port: u16,
    /// Optional shutdown signal receiver
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    pub fn new(root: PathBuf, ws_port: u16) -> Self {
        Self {
            root,
            ws_port,
            shutdown_rx: None,
        }
    }

    /// Set shutdown signal receiver
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run the actor system.
    ///
    /// Returns an error when the reload channel cannot bind, when the
    /// watcher fails to initialize, or when the watch loop dies at runtime.
    pub async fn run(mut self) -> Result<()> {
        let (ws_tx, ws_rx) = mpsc::channel::<WsMsg>(CHANNEL_BUFFER);

        // Live reload acceptor on the pre-selected port
        crate::reload::server::start_ws_server(self.ws_port, ws_tx.clone())?;

        // Watcher init errors must surface before the loops start
        let fs_actor = FsActor::new(self.root.clone(), ws_tx.clone())
            .map_err(|e| anyhow::anyhow!("watcher failed on {}: {}", self.root.display(), e))?;

        crate::debug!("watch"; "observing {}", self.root.display());

        let ws_handle = tokio::spawn(WsActor::new(ws_rx).run());
        let fs_handle = tokio::spawn(fs_actor.run());

        let shutdown_rx = self.shutdown_rx.take();
        let result = supervise(fs_handle, shutdown_rx).await;

        // Let the WsActor close client connections before the runtime goes away
        let _ = ws_tx.send(WsMsg::Shutdown).await;
        let _ = tokio::time::timeout(std::time::Duration::from_millis(500), ws_handle).await;

        result
    }
}

/// Wait for the shutdown signal or a fatal watch-loop exit, whichever
/// comes first.
async fn supervise(
    fs_handle: JoinHandle<Result<()>>,
    shutdown_rx: Option<Receiver<()>>,
) -> Result<()> {
    let mut fs_handle = fs_handle;

    let Some(rx) = shutdown_rx else {
        return flatten(fs_handle.await);
    };

    loop {
        // Poll-based since the signal comes over a sync channel
        if rx.try_recv().is_ok() {
            crate::debug!("watch"; "shutdown signal received");
            fs_handle.abort();
            return Ok(());
        }

        tokio::select! {
            res = &mut fs_handle => return flatten(res),
            _ = tokio::time::sleep(std::time::Duration::from_millis(100)) => {}
        }
    }
}

fn flatten(res: Result<Result<()>, tokio::task::JoinError>) -> Result<()> {
    match res {
        Ok(inner) => inner,
        Err(e) if e.is_cancelled() => Ok(()),
        Err(e) => Err(anyhow::anyhow!("watch task panicked: {}", e)),
    }
}
