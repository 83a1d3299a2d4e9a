//! Static file server for the output directory.

use std::fs::File;
use std::path::{Component, Path, PathBuf};

use tiny_http::{Header, Request, Response, Server};

use crate::error::CliError;

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// File served for a directory request.
const INDEX: &str = "index.html";

/// Maps a request URL onto a file under `root`.
///
/// The query string is dropped and a trailing slash serves `index.html`.
/// Returns `None` for URLs that would escape `root`.
pub fn resolve(root: &Path, url: &str) -> Option<PathBuf> {
    let path = url.split(['?', '#']).next().unwrap_or("");
    let mut resolved = root.to_path_buf();
    for component in Path::new(path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if path.is_empty() || path.ends_with('/') || resolved.is_dir() {
        resolved.push(INDEX);
    }
    Some(resolved)
}

/// MIME type by file extension. Browsers refuse to stream-compile wasm
/// without `application/wasm`.
pub fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("wasm") => "application/wasm",
        Some("json") => "application/json",
        Some("css") => "text/css; charset=utf-8",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("ts") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

fn respond(root: &Path, request: Request) -> std::io::Result<()> {
    let url = request.url().to_string();
    let file = resolve(root, &url).and_then(|path| {
        let file = File::open(&path).ok()?;
        Some((path, file))
    });

    match file {
        Some((path, file)) => {
            log::debug!("200 {url}");
            let mut response = Response::from_file(file);
            let value = content_type(&path);
            if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], value.as_bytes()) {
                response = response.with_header(header);
            }
            request.respond(response)
        }
        None => {
            log::warn!("404 {url}");
            request.respond(Response::from_string("not found").with_status_code(404))
        }
    }
}

/// Serves `root` on `addr` until the process is stopped.
pub fn serve(root: &Path, addr: &str) -> Result<(), CliError> {
    if !root.is_dir() {
        return Err(CliError::Input(format!(
            "nothing to serve: {} does not exist",
            root.display()
        )));
    }
    let server =
        Server::http(addr).map_err(|e| CliError::Io(format!("cannot listen on {addr}: {e}")))?;
    log::info!("serving {} at http://{addr}/", root.display());

    for request in server.incoming_requests() {
        if let Err(e) = respond(root, request) {
            log::warn!("failed to send response: {e}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpStream;
    use tempfile::TempDir;

    #[test]
    fn root_url_serves_index() {
        let root = Path::new("/srv/dist");
        assert_eq!(resolve(root, "/"), Some(root.join("index.html")));
        assert_eq!(resolve(root, ""), Some(root.join("index.html")));
    }

    #[test]
    fn query_string_is_dropped() {
        let root = Path::new("/srv/dist");
        assert_eq!(resolve(root, "/?demo=multi-texture"), Some(root.join("index.html")));
        assert_eq!(resolve(root, "/glbook_wasm.js?v=2"), Some(root.join("glbook_wasm.js")));
    }

    #[test]
    fn nested_paths_resolve_under_root() {
        let root = Path::new("/srv/dist");
        assert_eq!(resolve(root, "/css/./site.css"), Some(root.join("css/site.css")));
    }

    #[test]
    fn parent_components_are_rejected() {
        let root = Path::new("/srv/dist");
        assert_eq!(resolve(root, "/../secret.txt"), None);
        assert_eq!(resolve(root, "/css/../../etc/passwd"), None);
    }

    #[test]
    fn wasm_gets_streaming_mime_type() {
        assert_eq!(content_type(Path::new("glbook_wasm_bg.wasm")), "application/wasm");
        assert!(content_type(Path::new("glbook_wasm.js")).starts_with("text/javascript"));
        assert_eq!(content_type(Path::new("star.jpg")), "image/jpeg");
        assert_eq!(content_type(Path::new("LICENSE")), "application/octet-stream");
    }

    #[test]
    fn serve_rejects_missing_root() {
        let root = TempDir::new().unwrap();
        let err = serve(&root.path().join("dist"), "127.0.0.1:0").unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    fn get(port: u16, path: &str) -> String {
        let mut stream = TcpStream::connect(("127.0.0.1", port)).unwrap();
        write!(
            stream,
            "GET {path} HTTP/1.0\r\nHost: localhost\r\nConnection: close\r\n\r\n"
        )
        .unwrap();
        let mut body = String::new();
        stream.read_to_string(&mut body).unwrap();
        body
    }

    #[test]
    fn responds_with_files_and_404() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("index.html"), "<canvas id=\"glCanvas\">").unwrap();

        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let dir = root.path().to_path_buf();
        let handle = std::thread::spawn(move || {
            for _ in 0..2 {
                let request = server.recv().unwrap();
                respond(&dir, request).unwrap();
            }
        });

        let page = get(port, "/?demo=animated-cube");
        assert!(page.starts_with("HTTP/1.0 200") || page.starts_with("HTTP/1.1 200"));
        assert!(page.contains("text/html"), "got: {page}");
        assert!(page.contains("glCanvas"));

        let missing = get(port, "/leaves.jpg");
        assert!(missing.contains(" 404 "), "got: {missing}");

        handle.join().unwrap();
    }
}
