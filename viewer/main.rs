/// ferrite-train report viewer
///
/// Serves a run report directory (written by `ferrite_train::write_report`)
/// over a synchronous tiny_http server; no JavaScript required.
///
/// Run with:
///   cargo run --bin viewer -- report/
/// Then open http://127.0.0.1:7878

use std::io::Cursor;
use std::path::{Component, Path, PathBuf};

use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

fn main() {
    let dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "report".to_string());
    let dir = PathBuf::from(dir);
    if !dir.join("report.html").exists() {
        eprintln!(
            "No report.html under {} — run the classify demo first.",
            dir.display()
        );
        std::process::exit(1);
    }

    let addr = "127.0.0.1:7878";
    let server = Server::http(addr).expect("Failed to bind HTTP server");

    println!("ferrite-train viewer");
    println!("Serving {} at http://{}", dir.display(), addr);

    for request in server.incoming_requests() {
        dispatch(request, &dir);
    }
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

fn dispatch(request: Request, dir: &Path) {
    if *request.method() != Method::Get {
        let _ = request.respond(not_found());
        return;
    }

    let url = request.url().to_owned();
    let path = url.split('?').next().unwrap_or("");

    let response = match path {
        "/" => file_response(dir, "report.html"),
        _ => file_response(dir, path.trim_start_matches('/')),
    };

    let _ = request.respond(response);
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn file_response(dir: &Path, name: &str) -> Response<Cursor<Vec<u8>>> {
    // Reject path traversal; only plain file names inside the report
    // directory are served.
    let relative = Path::new(name);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return not_found();
    }

    match std::fs::read(dir.join(relative)) {
        Ok(bytes) => {
            let len = bytes.len();
            Response::new(
                StatusCode(200),
                vec![Header::from_bytes(b"Content-Type", content_type(name)).unwrap()],
                Cursor::new(bytes),
                Some(len),
                None,
            )
        }
        Err(_) => not_found(),
    }
}

fn content_type(name: &str) -> &'static [u8] {
    match name.rsplit('.').next() {
        Some("html") => b"text/html; charset=utf-8",
        Some("png") => b"image/png",
        Some("json") => b"application/json",
        _ => b"application/octet-stream",
    }
}

fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = b"404 Not Found".to_vec();
    let len = body.len();
    Response::new(
        StatusCode(404),
        vec![Header::from_bytes(b"Content-Type", b"text/plain").unwrap()],
        Cursor::new(body),
        Some(len),
        None,
    )
}
