//! Minimal HTTP/1.1 server standing in for the speech endpoint in tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// How the server answers one connection.
pub enum Reply {
    /// 200 with the given body.
    Complete(Vec<u8>),
    /// Error status with a text body.
    Status(u16, String),
    /// Promises a longer body than it sends, then holds the connection open.
    Stall(Vec<u8>),
}

pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    replied: mpsc::UnboundedReceiver<usize>,
}

impl StubServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Raw requests received so far, in order.
    #[allow(clippy::unwrap_used)]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Waits until the next reply has been written to its connection.
    pub async fn replied(&mut self) {
        let _ = self.replied.recv().await;
    }
}

/// Binds a local port and answers one connection per entry in `replies`.
#[allow(clippy::unwrap_used)]
pub async fn serve(replies: Vec<Reply>) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let (tx, replied) = mpsc::unbounded_channel();

    let log = Arc::clone(&requests);
    tokio::spawn(async move {
        for (index, reply) in replies.into_iter().enumerate() {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };

            let request = read_request(&mut stream).await;
            log.lock().unwrap().push(request);

            let stall = matches!(reply, Reply::Stall(_));
            write_reply(&mut stream, reply).await;
            let _ = tx.send(index);

            if stall {
                tokio::spawn(async move {
                    let _held = stream;
                    std::future::pending::<()>().await;
                });
            }
        }
    });

    StubServer {
        addr,
        requests,
        replied,
    }
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }

        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

async fn write_reply(stream: &mut TcpStream, reply: Reply) {
    let (status, declared, body) = match reply {
        Reply::Complete(body) => ("200 OK".to_string(), body.len(), body),
        Reply::Status(code, text) => (format!("{code} Error"), text.len(), text.into_bytes()),
        Reply::Stall(partial) => ("200 OK".to_string(), partial.len() + 4096, partial),
    };

    let head = format!(
        "HTTP/1.1 {status}\r\ncontent-type: audio/mpeg\r\ncontent-length: {declared}\r\nconnection: close\r\n\r\n"
    );

    let _ = stream.write_all(head.as_bytes()).await;
    let _ = stream.write_all(&body).await;
    let _ = stream.flush().await;
}
