//! Minimal HTTP/1.1 server standing in for one mirror in integration tests.
//!
//! Answers every request with the same scripted status and headers. HEAD gets
//! headers only; GET also gets a zero-filled body of `content_length` bytes.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, SystemTime};

#[derive(Debug, Clone)]
pub struct MirrorServerOptions {
    pub status: u16,
    pub content_length: u64,
    /// Sent verbatim as `Last-Modified`, if set.
    pub last_modified: Option<String>,
    pub content_type: Option<String>,
    /// If false, HEAD returns 405 (simulates servers that block HEAD).
    pub head_allowed: bool,
    /// Wait this long before answering.
    pub delay: Duration,
}

impl Default for MirrorServerOptions {
    fn default() -> Self {
        Self {
            status: 200,
            content_length: 0,
            last_modified: None,
            content_type: None,
            head_allowed: true,
            delay: Duration::ZERO,
        }
    }
}

impl MirrorServerOptions {
    /// 200 with the given size and `Last-Modified` date.
    pub fn serving(content_length: u64, modified: SystemTime) -> Self {
        Self {
            content_length,
            last_modified: Some(httpdate::fmt_http_date(modified)),
            ..Self::default()
        }
    }
}

/// Handle to a running server: its base URL and the request lines it saw.
pub struct MirrorServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MirrorServer {
    /// `"HEAD /path HTTP/1.1"` style request lines, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|l| l.split_whitespace().next().map(str::to_string))
            .collect()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(opts: MirrorServerOptions) -> MirrorServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    let opts = Arc::new(opts);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let opts = Arc::clone(&opts);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &opts, &seen));
        }
    });
    MirrorServer {
        base_url: format!("http://127.0.0.1:{}/", port),
        requests,
    }
}

fn handle(mut stream: TcpStream, opts: &MirrorServerOptions, seen: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let request_line = request.lines().next().unwrap_or_default().to_string();
    let method = request_line
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();
    seen.lock().unwrap().push(request_line);

    if !opts.delay.is_zero() {
        thread::sleep(opts.delay);
    }

    if method.eq_ignore_ascii_case("HEAD") && !opts.head_allowed {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }

    let mut response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        opts.status,
        reason(opts.status),
        opts.content_length
    );
    if let Some(lm) = &opts.last_modified {
        response.push_str(&format!("Last-Modified: {}\r\n", lm));
    }
    if let Some(ct) = &opts.content_type {
        response.push_str(&format!("Content-Type: {}\r\n", ct));
    }
    response.push_str("\r\n");
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }

    if method.eq_ignore_ascii_case("GET") {
        // The client hangs up after the first chunk; write errors are expected.
        let chunk = vec![0u8; 4096];
        let mut left = opts.content_length;
        while left > 0 {
            let n = left.min(chunk.len() as u64) as usize;
            if stream.write_all(&chunk[..n]).is_err() {
                return;
            }
            left -= n as u64;
        }
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
