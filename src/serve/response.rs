//! HTTP response helpers.

use anyhow::Result;
use tiny_http::{Header, Request, Response, StatusCode};

const HTML: &str = "text/html; charset=utf-8";
const PLAIN: &str = "text/plain; charset=utf-8";
const JAVASCRIPT: &str = "application/javascript; charset=utf-8";

/// Respond with a rendered HTML document.
pub fn respond_html(request: Request, body: Vec<u8>) -> Result<()> {
    send_body(request, 200, HTML, body)
}

/// Respond with plain text (used by the /currentstep poll).
pub fn respond_plain(request: Request, body: String) -> Result<()> {
    send_body(request, 200, PLAIN, body.into_bytes())
}

/// Respond with 404 Not Found.
pub fn respond_not_found(request: Request) -> Result<()> {
    send_body(request, 404, PLAIN, b"404 Not Found".to_vec())
}

/// Respond with 500 for a request-level failure. Other requests are
/// unaffected.
pub fn respond_server_error(request: Request, message: &str) -> Result<()> {
    send_body(request, 500, PLAIN, message.as_bytes().to_vec())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

/// Respond with the step interactivity script from memory.
pub fn respond_step_js(request: Request) -> Result<()> {
    send_body(request, 200, JAVASCRIPT, crate::embed::STEP_JS.into())
}

/// Respond with reload.js from memory, with the WebSocket port injected.
pub fn respond_reload_js(request: Request, ws_port: u16) -> Result<()> {
    use crate::embed::{RELOAD_JS, ReloadVars};

    let body = RELOAD_JS.render(&ReloadVars { ws_port });
    send_body(request, 200, JAVASCRIPT, body.into_bytes())
}

fn send_body(request: Request, status: u16, content_type: &'static str, body: Vec<u8>) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}
