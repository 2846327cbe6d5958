use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// What the stub endpoint does for one request.
#[derive(Clone, Debug)]
pub enum Reply {
    Json(&'static str),
    Status(u16),
    /// Never answers, forcing a client-side timeout.
    Hang,
}

type Script = dyn Fn(&str, u32) -> Reply + Send + Sync;

/// Minimal HTTP/1.1 server answering `GET /info/<address>` from a script
/// keyed on the address and the attempt number for that address.
pub struct StubEndpoint {
    addr: SocketAddr,
    hits: Arc<Mutex<HashMap<String, u32>>>,
    handle: JoinHandle<()>,
}

impl StubEndpoint {
    pub async fn start<F>(script: F) -> Self
    where
        F: Fn(&str, u32) -> Reply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits: Arc<Mutex<HashMap<String, u32>>> = Arc::default();
        let script: Arc<Script> = Arc::new(script);

        let accept_hits = Arc::clone(&hits);
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let hits = Arc::clone(&accept_hits);
                let script = Arc::clone(&script);
                tokio::spawn(async move {
                    let _ = serve(stream, hits, script).await;
                });
            }
        });

        Self { addr, hits, handle }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/info/{{IP}}", self.addr)
    }

    pub fn hits(&self, address: &str) -> u32 {
        self.hits.lock().unwrap().get(address).copied().unwrap_or(0)
    }
}

impl Drop for StubEndpoint {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(
    mut stream: TcpStream,
    hits: Arc<Mutex<HashMap<String, u32>>>,
    script: Arc<Script>,
) -> std::io::Result<()> {
    let mut request: Vec<u8> = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        request.extend_from_slice(&buf[..n]);
    }

    let head = String::from_utf8_lossy(&request);
    let path = head.split_whitespace().nth(1).unwrap_or("/");
    let address = path.rsplit('/').next().unwrap_or_default().to_string();

    let attempt = {
        let mut hits = hits.lock().unwrap();
        let count = hits.entry(address.clone()).or_insert(0);
        *count += 1;
        *count
    };

    let (status, body) = match script(&address, attempt) {
        Reply::Json(body) => (200, body.to_string()),
        Reply::Status(code) => (code, String::new()),
        Reply::Hang => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            return Ok(());
        }
    };

    let response = format!(
        "HTTP/1.1 {status} STUB\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}
