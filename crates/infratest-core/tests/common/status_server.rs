//! Minimal HTTP/1.1 server for polling tests.
//!
//! Answers the first `unhealthy_requests` requests with 503 and every request
//! after that with 200 and a fixed body. Counts requests served.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

pub struct StatusServer {
    pub url: String,
    requests: Arc<AtomicUsize>,
}

impl StatusServer {
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start(unhealthy_requests: usize, body: &str) -> StatusServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&requests);
    let body = Arc::new(body.to_string());
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            let body = Arc::clone(&body);
            thread::spawn(move || handle(stream, n < unhealthy_requests, &body));
        }
    });
    StatusServer {
        url: format!("http://127.0.0.1:{}/health", port),
        requests,
    }
}

fn handle(mut stream: std::net::TcpStream, unhealthy: bool, body: &str) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(_) => {}
    }
    let (status, body) = if unhealthy {
        ("503 Service Unavailable", "warming up")
    } else {
        ("200 OK", body)
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}
