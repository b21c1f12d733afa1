use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use rustc_hash::FxHashMap;

/// Fixed debounce interval. Externally observable timing contract: a burst
/// of low-level events for one path within the window produces a single
/// forwarded notification.
pub(super) const DEBOUNCE_MS: u64 = 100;

/// Kind of a filesystem change, as forwarded to the reload channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Written,
    Removed,
    Renamed,
    Moved,
}

impl ChangeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Written => "written",
            Self::Removed => "removed",
            Self::Renamed => "renamed",
            Self::Moved => "moved",
        }
    }
}

/// Pure debouncer: only handles timing and event deduplication.
/// No reload logic, no global state access.
pub(super) struct Debouncer {
    /// Path → ChangeKind (dedup is free via HashMap key uniqueness)
    pub(super) changes: FxHashMap<PathBuf, ChangeKind>,
    pub(super) last_event: Option<std::time::Instant>,
}

impl Debouncer {
    pub(super) fn new() -> Self {
        Self {
            changes: FxHashMap::default(),
            last_event: None,
        }
    }

    /// Add a notify event, applying dedup rules:
    /// - Removed + Created/Written → the restore event wins
    /// - Written + Removed → upgrade to Removed
    /// - Created + Removed → appeared then vanished, discard
    /// - otherwise: first event wins
    pub(super) fn add_event(&mut self, event: &notify::Event) {
        let Some(kind) = change_kind(event.kind) else {
            return;
        };

        crate::debug!("watch"; "raw notify: {:?} {:?}", event.kind, event.paths);

        for path in &event.paths {
            if is_vcs_metadata(path) {
                continue;
            }

            let path = path.clone();

            if let Some(&existing) = self.changes.get(&path) {
                match (existing, kind) {
                    (ChangeKind::Removed, ChangeKind::Created | ChangeKind::Written) => {
                        // File was deleted then restored → use the restore event
                        self.changes.insert(path, kind);
                    }
                    (ChangeKind::Written, ChangeKind::Removed) => {
                        // Tracked file was written then deleted → upgrade to Removed
                        self.changes.insert(path, ChangeKind::Removed);
                    }
                    (ChangeKind::Created, ChangeKind::Removed) => {
                        // New file appeared then vanished within window → no-op
                        self.changes.remove(&path);
                    }
                    _ => {
                        // Same kind or other combos → first wins
                        continue;
                    }
                }
                self.last_event = Some(std::time::Instant::now());
                continue;
            }

            self.changes.insert(path, kind);
            self.last_event = Some(std::time::Instant::now());
        }
    }

    /// Take the coalesced events if the debounce window elapsed.
    pub(super) fn take_if_ready(&mut self) -> Option<FxHashMap<PathBuf, ChangeKind>> {
        if !self.is_ready() {
            return None;
        }

        let changes = std::mem::take(&mut self.changes);
        self.last_event = None;

        if changes.is_empty() {
            return None;
        }
        Some(changes)
    }

    pub(super) fn is_ready(&self) -> bool {
        let Some(last_event) = self.last_event else {
            return false;
        };

        if last_event.elapsed() < Duration::from_millis(DEBOUNCE_MS) {
            return false;
        }

        !self.changes.is_empty()
    }

    /// Precise sleep duration until next possible ready time.
    pub(super) fn sleep_duration(&self) -> Duration {
        let Some(last_event) = self.last_event else {
            return Duration::from_secs(86400);
        };

        Duration::from_millis(DEBOUNCE_MS)
            .saturating_sub(last_event.elapsed())
            .max(Duration::from_millis(1))
    }
}

/// Map a notify event kind to the forwarded change kind.
/// Metadata-only modifications are mtime/chmod noise and dropped.
fn change_kind(kind: notify::EventKind) -> Option<ChangeKind> {
    use notify::EventKind;
    use notify::event::{ModifyKind, RenameMode};

    match kind {
        EventKind::Create(_) => Some(ChangeKind::Created),
        EventKind::Remove(_) => Some(ChangeKind::Removed),
        EventKind::Modify(ModifyKind::Metadata(_)) => None,
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => Some(ChangeKind::Moved),
        EventKind::Modify(ModifyKind::Name(_)) => Some(ChangeKind::Renamed),
        EventKind::Modify(_) => Some(ChangeKind::Written),
        _ => None,
    }
}

/// Version-control metadata is always excluded from observation.
pub(super) fn is_vcs_metadata(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == ".git"))
}
