//! In-process stub of the automation service.
//!
//! Serves scripted replies in order (the last one repeats) and records every
//! request it sees. Each reply closes its connection, so every attempt made by
//! the client shows up as a separate recorded request.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use instapro::{ClientBuilder, FakeApi, InstaproApi, LogSink, RetryPolicy};
use log::Level;
use serde_json::Value;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    sync::oneshot,
};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with `application/json`.
    Json(String),
    /// 200 with the given content type (or none) and body.
    Raw {
        content_type: Option<&'static str>,
        body: String,
    },
    /// Read the request, then close the socket without answering.
    Hangup,
}

impl Reply {
    pub fn json(body: impl Into<String>) -> Self {
        Reply::Json(body.into())
    }

    pub fn text(body: impl Into<String>) -> Self {
        Reply::Raw {
            content_type: Some("text/plain; charset=utf-8"),
            body: body.into(),
        }
    }

    pub fn empty() -> Self {
        Reply::Raw {
            content_type: None,
            body: String::new(),
        }
    }
}

/// A request as the stub saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub target: String,
    pub body: String,
}

impl Recorded {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn query(&self) -> &str {
        self.target.split_once('?').map_or("", |(_, q)| q)
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub struct StubServer {
    port: u16,
    requests: Arc<Mutex<Vec<Recorded>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl StubServer {
    pub async fn start(replies: Vec<Reply>) -> Self {
        assert!(!replies.is_empty());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let log = requests.clone();
        tokio::spawn(async move {
            let mut served = 0;
            loop {
                tokio::select! {
                    accepted = listener.accept() => {
                        let Ok((mut stream, _)) = accepted else { continue };
                        let Some(request) = read_request(&mut stream).await else { continue };
                        log.lock().unwrap().push(request);
                        let reply = replies.get(served).unwrap_or(&replies[replies.len() - 1]);
                        served += 1;
                        write_reply(&mut stream, reply).await;
                    }
                    _ = &mut shutdown_rx => break,
                }
            }
        });

        Self {
            port,
            requests,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn builder(&self) -> ClientBuilder {
        ClientBuilder::new("127.0.0.1", self.port)
    }

    pub fn api(&self) -> InstaproApi {
        self.builder().start().unwrap()
    }

    pub fn fake_api(&self) -> FakeApi {
        self.builder().start_fake().unwrap()
    }

    /// A client whose log lines go to the returned recorder.
    pub fn recorded_api(&self) -> (InstaproApi, Arc<Recorder>) {
        let sink = Arc::new(Recorder::default());
        let api = self
            .builder()
            .retry_policy(RetryPolicy::default())
            .log_sink(sink.clone())
            .start()
            .unwrap();
        (api, sink)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn read_request(stream: &mut TcpStream) -> Option<Recorded> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split(' ');
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();
    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < head_end + content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[head_end..]).to_string();

    Some(Recorded {
        method,
        target,
        body,
    })
}

async fn write_reply(stream: &mut TcpStream, reply: &Reply) {
    let (content_type, body) = match reply {
        Reply::Json(body) => (Some("application/json"), body.as_str()),
        Reply::Raw { content_type, body } => (*content_type, body.as_str()),
        Reply::Hangup => {
            let _ = stream.shutdown().await;
            return;
        }
    };
    let mut response = format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n",
        body.len()
    );
    if let Some(ct) = content_type {
        response.push_str(&format!("Content-Type: {ct}\r\n"));
    }
    response.push_str("\r\n");
    response.push_str(body);
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// [`LogSink`] that keeps every line.
#[derive(Default)]
pub struct Recorder {
    lines: Mutex<Vec<(Level, String)>>,
}

impl Recorder {
    pub fn count(&self, level: Level) -> usize {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap().clone()
    }
}

impl LogSink for Recorder {
    fn log(&self, level: Level, method: &str, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((level, format!("{method}: {message}")));
    }
}

pub const ACCOUNT: &str = r#"{"id":"a1","login":"nasa","password":"secret","sub_server_id":"s1","user_id":"u1"}"#;

pub const USER: &str = r#"{"telegram_id":501,"id":"u1","accounts_ids":["a1"],
    "subscribes":[{"action_type":"WATCH_STORIES","account_id":"a1","subscribe_date":"2024-06-01T00:00:00"}]}"#;

pub fn action(id: &str) -> String {
    format!(
        r#"{{"id":"{id}","action_type":"WATCH_STORIES","status":"FAILED","account_id":"a1","update_id":"9"}}"#
    )
}
