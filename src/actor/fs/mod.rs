//! FileSystem Actor
//!
//! Watches the presentation root recursively and forwards debounced change
//! notifications to the WsActor, one per affected path.
//!
//! Initialization failures (watcher construction, watch-path registration)
//! surface synchronously from `new`, before the loop starts. Runtime
//! watcher errors end the loop with an error: a silently broken watcher
//! would keep serving stale pages, so the failure has to be visible.

use std::path::PathBuf;

use anyhow::Result;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::messages::WsMsg;

mod debouncer;

#[cfg(test)]
mod tests;

use debouncer::Debouncer;

/// FileSystem Actor - watches the presentation root for changes
pub struct FsActor {
    /// Channel to receive notify events (sync -> async bridge)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    watcher: RecommendedWatcher,
    /// Channel to send reload triggers to the WsActor
    ws_tx: mpsc::Sender<WsMsg>,
    /// Debouncer state
    debouncer: Debouncer,
}

impl FsActor {
    /// Create a new FsActor watching `root` recursively.
    ///
    /// The watcher starts immediately and buffers events until `run` is
    /// called, so nothing is lost during the rest of startup.
    pub fn new(root: PathBuf, ws_tx: mpsc::Sender<WsMsg>) -> notify::Result<Self> {
        // Create sync channel for notify (it doesn't support async)
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;

        Ok(Self {
            notify_rx,
            watcher,
            ws_tx,
            debouncer: Debouncer::new(),
        })
    }

    /// Run the actor event loop until the watcher dies or the WsActor
    /// channel closes (shutdown).
    pub async fn run(self) -> Result<()> {
        // Extract fields before consuming self
        let notify_rx = self.notify_rx;
        let ws_tx = self.ws_tx;
        let mut debouncer = self.debouncer;
        // The watcher stops when dropped, so it lives as long as the loop
        let _watcher = self.watcher;

        let (async_tx, mut async_rx) =
            tokio::sync::mpsc::channel::<notify::Result<notify::Event>>(64);

        // Spawn a thread to poll notify events and send to async channel
        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                if async_tx.blocking_send(result).is_err() {
                    break; // Receiver dropped
                }
            }
        });

        loop {
            tokio::select! {
                biased;
                received = async_rx.recv() => match received {
                    Some(Ok(event)) => debouncer.add_event(&event),
                    Some(Err(e)) => {
                        return Err(anyhow::anyhow!("watcher error: {}", e));
                    }
                    None => return Ok(()), // watcher dropped, we are shutting down
                },
                _ = tokio::time::sleep(debouncer.sleep_duration()) => {
                    if forward_changes(&mut debouncer, &ws_tx).await.is_err() {
                        return Ok(()); // WsActor shut down
                    }
                }
            }
        }
    }
}

/// Forward debounced file changes to the reload channel.
///
/// Returns `Err(())` if the WsActor shut down.
async fn forward_changes(debouncer: &mut Debouncer, ws_tx: &mpsc::Sender<WsMsg>) -> Result<(), ()> {
    let Some(changes) = debouncer.take_if_ready() else {
        return Ok(());
    };

    for (path, kind) in changes {
        crate::log!("watch"; "{} {}", kind.label(), path.display());
        ws_tx.send(WsMsg::Reload { path }).await.map_err(|_| ())?;
    }

    Ok(())
}
