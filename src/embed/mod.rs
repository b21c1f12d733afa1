//! Embedded static resources for Dais.
//!
//! Everything the browser needs besides the author's own fragments is
//! compiled into the binary and served from memory:
//!
//! - `PAGE_HTML` - page skeleton wrapping one step fragment
//! - `STEP_JS` - keyboard navigation and dev-mode counter
//! - `RELOAD_JS` - live reload WebSocket client (port injected at serve time)
//! - `NOTES_TRAILER` / `NOTES_PLACEHOLDER` - speaker-notes view fragments
//!
//! # Usage
//!
//! ```ignore
//! let html = embed::render_page(&page);
//! let js = embed::RELOAD_JS.render(&ReloadVars { ws_port: 35729 });
//! ```

mod template;

pub use template::{Template, TemplateVars};

use crate::steps::Page;

/// Variables for the page skeleton.
pub struct PageVars<'a> {
    pub page: &'a Page,
}

impl TemplateVars for PageVars<'_> {
    fn apply(&self, content: &str) -> String {
        content
            .replace(
                "__STEP_HTML__",
                &String::from_utf8_lossy(&self.page.html),
            )
            .replace("__STEP_ID__", &self.page.id.to_string())
            .replace("__STEP_COUNT__", &self.page.step_count.to_string())
            .replace("__PREV_URL__", &js_url(self.page.prev_url.as_deref()))
            .replace("__NEXT_URL__", &js_url(self.page.next_url.as_deref()))
            .replace(
                "__DEV_MODE__",
                if self.page.dev_mode { "true" } else { "false" },
            )
    }
}

/// Page skeleton wrapping one step fragment into a full document.
pub const PAGE_HTML: Template<PageVars<'static>> = Template::new(include_str!("page.html"));

/// Render a page record into the full HTML document served to the browser.
pub fn render_page(page: &Page) -> String {
    PAGE_HTML.render(&PageVars { page })
}

/// Variables for reload.js.
pub struct ReloadVars {
    pub ws_port: u16,
}

impl TemplateVars for ReloadVars {
    fn apply(&self, content: &str) -> String {
        content.replace("__WS_PORT__", &self.ws_port.to_string())
    }
}

/// Live reload client script with the WebSocket port injected.
pub const RELOAD_JS: Template<ReloadVars> = Template::new(include_str!("reload.js"));

/// Step interactivity script, referenced by the skeleton as /js/dais.js.
pub const STEP_JS: &str = include_str!("step.js");

/// Styling and poll script appended to every speaker-notes response.
pub const NOTES_TRAILER: &str = include_str!("notes_trailer.html");

/// Speaker-notes page served before any step has been viewed.
pub const NOTES_PLACEHOLDER: &str = include_str!("notes_placeholder.html");

/// Encode an optional url as a JS literal (string or null).
fn js_url(url: Option<&str>) -> String {
    match url {
        Some(url) => serde_json::to_string(url).unwrap_or_else(|_| "null".into()),
        None => "null".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> Page {
        Page {
            id: 1,
            html: b"<h1>middle</h1>".to_vec(),
            url: "/1".into(),
            prev_url: Some("/".into()),
            next_url: Some("/2".into()),
            step_count: 2,
            dev_mode: true,
        }
    }

    #[test]
    fn test_render_page_injects_fragment_and_nav() {
        let html = render_page(&sample_page());

        assert!(html.contains("<h1>middle</h1>"));
        assert!(html.contains("var currentStepId = 1;"));
        assert!(html.contains("var stepCount = 2;"));
        assert!(html.contains(r#"var prevUrl = "/";"#));
        assert!(html.contains(r#"var nextUrl = "/2";"#));
        assert!(html.contains("var devMode = true;"));
    }

    #[test]
    fn test_render_page_edges_are_null() {
        let mut page = sample_page();
        page.prev_url = None;
        page.next_url = None;
        page.dev_mode = false;

        let html = render_page(&page);
        assert!(html.contains("var prevUrl = null;"));
        assert!(html.contains("var nextUrl = null;"));
        assert!(html.contains("var devMode = false;"));
    }

    #[test]
    fn test_rendered_page_carries_script_marker() {
        // The notes view depends on finding this exact tag to strip it
        let html = render_page(&sample_page());
        let marker = std::str::from_utf8(crate::notes::STEP_SCRIPT_TAG).unwrap();
        assert!(html.contains(marker));
    }

    #[test]
    fn test_reload_js_port_injection() {
        let js = RELOAD_JS.render(&ReloadVars { ws_port: 35730 });
        assert!(js.contains("ws://localhost:35730"));
        assert!(!js.contains("__WS_PORT__"));
    }
}
