//! Step store: turns the delimiter-separated source document into pages.
//!
//! The source document is a single file holding one HTML fragment per step,
//! separated by `---`. It is re-read on every request so edits show up
//! without any caching layer.

use std::path::{Path, PathBuf};

/// Token separating two steps in the source document.
pub const STEP_DELIMITER: &[u8] = b"---";

/// One slide-equivalent unit of the presentation.
#[derive(Debug, Clone)]
pub struct Page {
    /// Zero-based step id.
    pub id: usize,
    /// Raw HTML fragment for this step.
    pub html: Vec<u8>,
    /// Url of this step: `/` for step 0, `/{id}` otherwise.
    pub url: String,
    /// Url of the previous step, absent on the first page.
    pub prev_url: Option<String>,
    /// Url of the next step, absent on the last page.
    pub next_url: Option<String>,
    /// Number of transitions (pages minus one), same on every page.
    pub step_count: usize,
    /// Dev mode flag, forwarded to the template layer.
    pub dev_mode: bool,
}

/// Step store errors.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("unable to read steps from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read and split the source document into pages.
pub fn read_steps(file: &Path, dev_mode: bool) -> Result<Vec<Page>, StepError> {
    let content = std::fs::read(file).map_err(|source| StepError::Read {
        path: file.to_path_buf(),
        source,
    })?;

    let parts = split_on_delimiter(&content);
    let count = parts.len();

    let mut pages: Vec<Page> = parts
        .into_iter()
        .enumerate()
        .map(|(id, html)| Page {
            id,
            html,
            url: step_url(id),
            prev_url: None,
            next_url: None,
            step_count: count - 1,
            dev_mode,
        })
        .collect();

    for id in 1..count {
        let prev = pages[id - 1].url.clone();
        pages[id].prev_url = Some(prev);
        let next = pages[id].url.clone();
        pages[id - 1].next_url = Some(next);
    }

    Ok(pages)
}

/// Re-run the split purely to validate the document is parseable.
/// Returns the page count for the startup banner.
pub fn verify_steps(file: &Path) -> Result<usize, StepError> {
    read_steps(file, false).map(|pages| pages.len())
}

/// Url for a given step id.
fn step_url(id: usize) -> String {
    if id == 0 {
        "/".to_string()
    } else {
        format!("/{id}")
    }
}

/// Split raw bytes on every occurrence of the step delimiter.
///
/// A document with k delimiters always yields k + 1 fragments, including
/// empty ones, so step numbering stays stable while the author types.
fn split_on_delimiter(content: &[u8]) -> Vec<Vec<u8>> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i + STEP_DELIMITER.len() <= content.len() {
        if &content[i..i + STEP_DELIMITER.len()] == STEP_DELIMITER {
            parts.push(content[start..i].to_vec());
            i += STEP_DELIMITER.len();
            start = i;
        } else {
            i += 1;
        }
    }
    parts.push(content[start..].to_vec());
    parts
}
