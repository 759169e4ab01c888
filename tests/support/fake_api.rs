//! Minimal in-process HTTP server answering with canned JSON responses.
//!
//! Each connection serves exactly one request and is closed afterwards.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use url::Url;

/// A request as seen by the fake server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    fn url(&self) -> Url {
        Url::parse(&format!("http://fake{}", self.target)).expect("request target")
    }

    pub fn path(&self) -> String {
        self.url().path().to_string()
    }

    pub fn query(&self, key: &str) -> Option<String> {
        self.url()
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response returned by a handler.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl CannedResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::json(200, body)
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Handler = dyn Fn(&RecordedRequest) -> CannedResponse + Send + Sync;

/// Running fake server. Stops on drop.
pub struct FakeApi {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl FakeApi {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> CannedResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let handler: Arc<Handler> = Arc::new(handler);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let handle = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let handler = Arc::clone(&handler);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    serve(socket, handler, recorded).await;
                });
            }
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    /// Versioned base URL, as configured for the real API.
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path() == path)
            .collect()
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(
    mut socket: TcpStream,
    handler: Arc<Handler>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }

    let Some(request) = parse_request(&String::from_utf8_lossy(&buf)) else {
        return;
    };
    recorded.lock().push(request.clone());

    let response = handler(&request);
    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }

    let reply = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        if response.status == 200 { "OK" } else { "Error" },
        response.body.len(),
        response.body
    );
    let _ = socket.write_all(reply.as_bytes()).await;
    let _ = socket.shutdown().await;
}

fn parse_request(raw: &str) -> Option<RecordedRequest> {
    let mut lines = raw.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let headers = lines
        .take_while(|line| !line.is_empty())
        .filter_map(|line| {
            let (name, value) = line.split_once(':')?;
            Some((name.trim().to_string(), value.trim().to_string()))
        })
        .collect();

    Some(RecordedRequest {
        method,
        target,
        headers,
    })
}

// ---------------------------------------------------------------------------
// Canned CoinMarketCap payloads
// ---------------------------------------------------------------------------

pub const OK_STATUS: &str = r#"{"timestamp":"2024-05-01T00:00:00.000Z","error_code":0,"error_message":null}"#;

/// `exchange/map` body listing `(id, name)` pairs.
pub fn map_body(entries: &[(u64, &str)]) -> String {
    let data: Vec<String> = entries
        .iter()
        .map(|(id, name)| {
            format!(
                r#"{{"id":{id},"name":"{name}","slug":"{}","is_active":1}}"#,
                name.to_lowercase().replace(' ', "-")
            )
        })
        .collect();
    format!(r#"{{"data":[{}],"status":{OK_STATUS}}}"#, data.join(","))
}

/// `exchange/info` body for one exchange.
pub fn info_body(id: u64, name: &str) -> String {
    format!(
        r#"{{"data":{{"{id}":{{"id":{id},"name":"{name}","slug":"{slug}","logo":"https://img.example/{id}.png","description":"{name} exchange","date_launched":"2017-07-14T00:00:00.000Z","urls":{{"website":["https://{slug}.example"]}},"maker_fee":0.02,"taker_fee":0.04,"spot_volume_usd":1000000.5}}}},"status":{OK_STATUS}}}"#,
        slug = name.to_lowercase()
    )
}

/// Error body with the given in-body code.
pub fn error_body(code: u16, message: &str) -> String {
    format!(r#"{{"status":{{"error_code":{code},"error_message":"{message}"}}}}"#)
}
