//! Presentation server with live reload support.

mod lifecycle;
mod response;

use crate::{
    core::ServeConfig,
    embed, log,
    notes::SpeakerNotes,
    reload, steps,
};
use anyhow::Result;
use crossbeam::channel;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tiny_http::{Request, Server};

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    shutdown_rx: channel::Receiver<()>,
}

/// Bind the HTTP server without starting the request loop.
pub fn bind_server(interface: IpAddr, port: u16) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(interface, port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    lifecycle::register_server_for_shutdown(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);
    log!("serve"; "speaker notes on http://{}/speakernotes", addr);

    Ok(BoundServer {
        server,
        addr,
        shutdown_rx,
    })
}

impl BoundServer {
    /// Get the bound address.
    #[allow(dead_code)]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the watch/reload actors and the request loop (blocking).
    pub fn run(self, config: Arc<ServeConfig>, notes: Arc<SpeakerNotes>) -> Result<()> {
        let actor_handle =
            lifecycle::spawn_actors(config.root.clone(), reload::ws_port(), self.shutdown_rx);
        run_request_loop(&self.server, config, notes);
        lifecycle::wait_for_shutdown(actor_handle);
        Ok(())
    }
}

fn run_request_loop(server: &Server, config: Arc<ServeConfig>, notes: Arc<SpeakerNotes>) {
    // Use thread pool to handle requests concurrently, so a slow client
    // cannot block the presenter's navigation
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .expect("failed to create thread pool");

    for request in server.incoming_requests() {
        let config = Arc::clone(&config);
        let notes = Arc::clone(&notes);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &config, &notes) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

/// Handle a single HTTP request
fn handle_request(request: Request, config: &ServeConfig, notes: &SpeakerNotes) -> Result<()> {
    // Early exit if shutdown requested
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or(&url);

    match path {
        "/js/dais.js" => response::respond_step_js(request),
        "/js/reload.js" => response::respond_reload_js(request, reload::ws_port()),
        "/currentstep" => response::respond_plain(request, notes.read_current_id().to_string()),
        "/speakernotes" => respond_speaker_notes(request, notes),
        _ => respond_step(request, path, config, notes),
    }
}

/// Render a numbered step page and record it as the current step.
fn respond_step(
    request: Request,
    path: &str,
    config: &ServeConfig,
    notes: &SpeakerNotes,
) -> Result<()> {
    let Some(id) = parse_step_id(path) else {
        return response::respond_not_found(request);
    };

    let pages = match steps::read_steps(&config.steps_file, config.dev_mode) {
        Ok(pages) => pages,
        Err(e) => {
            return response::respond_server_error(request, &format!("unable to read steps: {e}"));
        }
    };

    let Some(page) = pages.get(id) else {
        return response::respond_not_found(request);
    };

    let html = embed::render_page(page);
    notes.record_current(page.id, html.as_bytes());
    response::respond_html(request, html.into_bytes())
}

/// Serve the current shared step, script-stripped, for the presenter's
/// private screen.
fn respond_speaker_notes(request: Request, notes: &SpeakerNotes) -> Result<()> {
    let (id, html) = notes.read_current();

    let Some(html) = html else {
        return response::respond_html(request, embed::NOTES_PLACEHOLDER.into());
    };

    let mut body = html;
    body.extend_from_slice(format!("\n\n<script>var currentStepID = {id};</script>\n").as_bytes());
    body.extend_from_slice(embed::NOTES_TRAILER.as_bytes());
    response::respond_html(request, body)
}

/// Map a url path to a step id: `/` is step 0, `/{digits}` is that step.
fn parse_step_id(path: &str) -> Option<usize> {
    if path == "/" {
        return Some(0);
    }
    let digits = path.strip_prefix('/')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpStream;

    /// Serve exactly one request through the real handler and return the
    /// raw HTTP response for `path`.
    fn serve_one(path: &str, notes: Arc<SpeakerNotes>) -> String {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let config = ServeConfig::new(
            dir.path().to_path_buf(),
            std::path::Path::new("dais.html"),
            false,
        );

        let handle = std::thread::spawn(move || {
            let request = server.recv().unwrap();
            handle_request(request, &config, &notes).unwrap();
        });

        let mut stream = TcpStream::connect(addr).unwrap();
        stream
            .write_all(format!("GET {path} HTTP/1.0\r\n\r\n").as_bytes())
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        handle.join().unwrap();

        response
    }

    #[test]
    fn test_currentstep_is_zero_before_any_render() {
        let response = serve_one("/currentstep", Arc::new(SpeakerNotes::new()));

        assert!(response.contains(" 200 "), "unexpected status: {response}");
        let body = response.split("\r\n\r\n").nth(1).unwrap_or("");
        assert_eq!(body, "0");
    }

    #[test]
    fn test_currentstep_reflects_recorded_step() {
        let notes = Arc::new(SpeakerNotes::new());
        notes.record_current(3, b"<h1>three</h1>");

        let response = serve_one("/currentstep", Arc::clone(&notes));
        let body = response.split("\r\n\r\n").nth(1).unwrap_or("");
        assert_eq!(body, "3");
    }

    #[test]
    fn test_parse_step_id_root() {
        assert_eq!(parse_step_id("/"), Some(0));
    }

    #[test]
    fn test_parse_step_id_numbered() {
        assert_eq!(parse_step_id("/1"), Some(1));
        assert_eq!(parse_step_id("/42"), Some(42));
    }

    #[test]
    fn test_parse_step_id_rejects_non_integers() {
        assert_eq!(parse_step_id("/abc"), None);
        assert_eq!(parse_step_id("/1a"), None);
        assert_eq!(parse_step_id("/-1"), None);
        assert_eq!(parse_step_id("/+1"), None);
        assert_eq!(parse_step_id("/1/2"), None);
        assert_eq!(parse_step_id(""), None);
    }
}
