//! Watch/reload actor system.
//!
//! Two long-running actors wired by a thin coordinator:
//!
//! ```text
//! FsActor --[Reload { path }]--> WsActor --[broadcast]--> Browsers
//! ```
//!
//! The FsActor owns the filesystem watcher and the debouncer; the WsActor
//! owns the live-reload subscriber set. Both run for the process lifetime
//! and stop on the shutdown signal or a fatal watcher error.

mod coordinator;
mod fs;
pub mod messages;
mod ws;

pub use coordinator::Coordinator;
