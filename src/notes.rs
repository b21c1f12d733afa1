//! Shared step state backing the speaker-notes view.
//!
//! The notes view is a read-only rendering of whatever step the presenter
//! last displayed. It is the only mutable resource shared between the
//! render path (writer) and the notes handlers (readers); everything goes
//! through one mutex so a reader can never observe a step id paired with
//! another step's HTML.

use parking_lot::Mutex;

/// The exact interactivity script tag the render layer emits into every
/// step page. Notes must not be interactive, so it is stripped on record.
pub const STEP_SCRIPT_TAG: &[u8] = br#"<script src="/js/dais.js"></script>"#;

/// Stored when a recorded page does not carry the expected script tag.
/// Deliberate fail-safe: serving unmodified interactive content to the
/// notes screen would be worse than a visible diagnostic.
pub const MISSING_MARKER_NOTICE: &[u8] =
    b"Expected the exact dais.js script tag in the rendered step, couldn't find it.";

#[derive(Debug, Default)]
struct NotesState {
    step_id: usize,
    html: Option<Vec<u8>>,
}

/// Process-wide record of the current step, shared by Arc.
///
/// Constructed in main and injected into the request handlers; tests build
/// isolated instances.
#[derive(Debug, Default)]
pub struct SpeakerNotes {
    state: Mutex<NotesState>,
}

impl SpeakerNotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current step atomically. Both fields are updated in one
    /// critical section, never independently.
    pub fn record_current(&self, step_id: usize, html: &[u8]) {
        let stored = match strip_marker(html) {
            Some(stripped) => stripped,
            None => MISSING_MARKER_NOTICE.to_vec(),
        };

        let mut state = self.state.lock();
        state.step_id = step_id;
        state.html = Some(stored);
    }

    /// Consistent (id, html) snapshot under the lock.
    pub fn read_current(&self) -> (usize, Option<Vec<u8>>) {
        let state = self.state.lock();
        (state.step_id, state.html.clone())
    }

    /// Only the id, for the 1 Hz client poll.
    pub fn read_current_id(&self) -> usize {
        self.state.lock().step_id
    }
}

/// Remove every occurrence of the interactivity script tag.
/// Returns None when the tag is absent.
fn strip_marker(html: &[u8]) -> Option<Vec<u8>> {
    find_tag(html, 0)?;

    let mut out = Vec::with_capacity(html.len());
    let mut pos = 0;
    while let Some(at) = find_tag(html, pos) {
        out.extend_from_slice(&html[pos..at]);
        pos = at + STEP_SCRIPT_TAG.len();
    }
    out.extend_from_slice(&html[pos..]);
    Some(out)
}

fn find_tag(html: &[u8], from: usize) -> Option<usize> {
    html.get(from..)?
        .windows(STEP_SCRIPT_TAG.len())
        .position(|w| w == STEP_SCRIPT_TAG)
        .map(|i| from + i)
}
