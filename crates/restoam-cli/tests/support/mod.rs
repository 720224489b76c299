//! Minimal fixture HTTP server for e2e tests.
//!
//! Serves canned responses from a routing closure and records every request
//! (method, path, query, body) for assertions. One connection at a time,
//! `Connection: close`, just enough HTTP for the client under test.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// One request as seen by the fixture server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
    pub body: String,
}

impl Recorded {
    /// True if the query string contains `pair` (e.g. `"page=0"`).
    pub fn query_has(&self, pair: &str) -> bool {
        self.query.split('&').any(|p| p == pair)
    }

    /// True if any query parameter has the given key.
    pub fn query_has_key(&self, key: &str) -> bool {
        self.query
            .split('&')
            .any(|p| p.split('=').next() == Some(key))
    }

    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

type Router = dyn Fn(&Recorded) -> (u16, String) + Send + Sync + 'static;

pub struct FixtureServer {
    base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FixtureServer {
    /// Start a server on an ephemeral port; `route` maps each request to a
    /// `(status, json_body)` pair.
    pub fn start(route: impl Fn(&Recorded) -> (u16, String) + Send + Sync + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fixture server");
        let addr = listener.local_addr().expect("fixture server addr");
        let requests: Arc<Mutex<Vec<Recorded>>> = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        let route: Arc<Router> = Arc::new(route);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                handle(stream, route.as_ref(), &seen);
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    /// Base URL to point `RESTOAM_WORKORDER_API` at.
    pub fn url(&self) -> String {
        format!("{}/workorders", self.base_url)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests()
            .last()
            .cloned()
            .expect("at least one request was made")
    }
}

fn handle(stream: TcpStream, route: &Router, seen: &Mutex<Vec<Recorded>>) {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() || request_line.is_empty() {
        return;
    }

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default();
    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), q.to_string()),
        None => (target.to_string(), String::new()),
    };

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).is_err() {
            return;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    if content_length > 0 && reader.read_exact(&mut body).is_err() {
        return;
    }

    let recorded = Recorded {
        method,
        path,
        query,
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    let (status, response_body) = route(&recorded);
    seen.lock().expect("requests lock").push(recorded);

    let reason = match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        404 => "Not Found",
        _ => "Internal Server Error",
    };
    let mut stream = stream;
    let _ = write!(
        stream,
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{response_body}",
        response_body.len()
    );
    let _ = stream.flush();
}

/// A canned workorder JSON object.
pub fn workorder_json(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": null,
        "status": "OPEN",
        "priority": "MEDIUM",
        "assetId": null,
        "locationId": null,
        "createdDate": "2026-03-01T09:30:00Z"
    })
}

/// A canned one-page list response.
pub fn page_json(items: &[serde_json::Value], total_pages: usize) -> String {
    serde_json::json!({ "content": items, "totalPages": total_pages }).to_string()
}
