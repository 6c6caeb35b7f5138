//! Minimal HTTP/1.1 server that serves a fixed set of files for integration tests.
//!
//! GET of a known path returns 200 with the body; anything else returns 404.
//! Every request path is recorded so tests can assert on network calls.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

pub struct CorpusServer {
    /// Base URL ending in `/`, e.g. `http://127.0.0.1:12345/romn/`.
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CorpusServer {
    /// Paths requested so far, relative to `base_url`, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }
}

/// Starts a server in a background thread serving `files` (relative path to body)
/// under `/romn/`. The server runs until the process exits.
pub fn start(files: HashMap<String, Vec<u8>>) -> CorpusServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let files = Arc::new(files);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    thread::spawn(move || {
        // One connection at a time keeps the recorded order equal to the client's order.
        for stream in listener.incoming().flatten() {
            handle(stream, &files, &recorded);
        }
    });
    CorpusServer {
        base_url: format!("http://127.0.0.1:{}/romn/", port),
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    files: &HashMap<String, Vec<u8>>,
    requests: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("");
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nConnection: close\r\n\r\n");
        return;
    }

    let rel = target.strip_prefix("/romn/").unwrap_or(target);
    requests.lock().unwrap().push(rel.to_string());

    match files.get(rel) {
        Some(body) => {
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
        }
        None => {
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
        }
    }
}
