//! Mock Monobank API server for testing
//!
//! Serves the two personal endpoints from canned data:
//! - GET /personal/statement/{account}/{from}/{to} returns `[...]`
//! - GET /personal/client-info returns `{ clientId, name, accounts }`
//!
//! Any `X-Token` other than [`MOCK_TOKEN`] gets a 403.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::domain::{ClientInfo, TransactionRecord};

/// The only token the mock accepts
pub const MOCK_TOKEN: &str = "mock_token";

#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    pub transactions: Vec<TransactionRecord>,
    pub client_info: ClientInfo,
    /// Answer every request with 429
    pub rate_limit: bool,
}

pub struct MockMonobankServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<String>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl MockMonobankServer {
    /// Start on a random free port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(Mutex::new(Vec::new()));

        // Non-blocking so the loop can notice shutdown
        listener.set_nonblocking(true)?;

        let running_clone = running.clone();
        let requests_clone = requests.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let requests = requests_clone.clone();
                        thread::spawn(move || handle_connection(stream, &cfg, &requests));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Paths of authorized requests, in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockMonobankServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, requests: &Mutex<Vec<String>>) {
    // Accepted sockets may inherit non-blocking mode on some platforms
    let _ = stream.set_nonblocking(false);

    let mut buffer = [0; 4096];
    let Ok(n) = stream.read(&mut buffer) else {
        return;
    };
    let request = String::from_utf8_lossy(&buffer[..n]);

    let first_line = request.lines().next().unwrap_or("");
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    if parts.len() < 2 {
        send_response(&mut stream, 400, "Bad Request", r#"{"errorDescription": "Invalid request"}"#);
        return;
    }
    let (method, path) = (parts[0], parts[1]);

    let token_header = format!("x-token: {}", MOCK_TOKEN.to_lowercase());
    if !request.to_lowercase().contains(&token_header) {
        send_response(&mut stream, 403, "Forbidden", r#"{"errorDescription": "Unknown 'X-Token'"}"#);
        return;
    }

    if config.rate_limit {
        send_response(
            &mut stream,
            429,
            "Too Many Requests",
            r#"{"errorDescription": "Too many requests"}"#,
        );
        return;
    }

    requests.lock().unwrap().push(path.to_string());

    if method != "GET" {
        send_response(&mut stream, 405, "Method Not Allowed", r#"{"errorDescription": "Method not allowed"}"#);
        return;
    }

    if path == "/personal/client-info" {
        let json = serde_json::to_string(&config.client_info).unwrap();
        send_response(&mut stream, 200, "OK", &json);
    } else if path.starts_with("/personal/statement/") {
        let json = serde_json::to_string(&config.transactions).unwrap();
        send_response(&mut stream, 200, "OK", &json);
    } else {
        send_response(&mut stream, 404, "Not Found", r#"{"errorDescription": "Not found"}"#);
    }
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_server_starts() {
        let server = MockMonobankServer::start(MockConfig::default()).unwrap();
        assert!(server.base_url().starts_with("http://127.0.0.1:"));
        assert!(server.requests().is_empty());
    }
}
