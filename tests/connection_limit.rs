mod common;

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use common::read_request;
use instapro::ClientBuilder;
use tokio::{
    io::AsyncWriteExt,
    net::TcpListener,
    time::{sleep, Instant},
};

#[derive(Debug, Clone, Copy)]
struct Exchange {
    arrived: Instant,
    body_sent: Instant,
}

/// Serves connections concurrently; every body trails its headers by `lag`.
async fn slow_body_server(lag: Duration) -> (u16, Arc<Mutex<Vec<Exchange>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let log = seen.clone();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let log = log.clone();
            tokio::spawn(async move {
                if read_request(&mut stream).await.is_none() {
                    return;
                }
                let arrived = Instant::now();
                let body = r#""abc""#;
                let head = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = stream.write_all(head.as_bytes()).await;
                let _ = stream.flush().await;
                sleep(lag).await;
                log.lock().unwrap().push(Exchange {
                    arrived,
                    body_sent: Instant::now(),
                });
                let _ = stream.write_all(body.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    (port, seen)
}

#[tokio::test]
async fn slot_is_held_until_the_body_is_read() {
    let (port, seen) = slow_body_server(Duration::from_millis(400)).await;
    let api = ClientBuilder::new("127.0.0.1", port)
        .max_connections(1)
        .start()
        .unwrap();

    let (a, b) = tokio::join!(api.get_result("x1", "k"), api.get_result("x2", "k"));
    assert_eq!(a.unwrap().as_deref(), Some("abc"));
    assert_eq!(b.unwrap().as_deref(), Some("abc"));

    let mut exchanges = seen.lock().unwrap().clone();
    exchanges.sort_by_key(|e| e.arrived);
    assert_eq!(exchanges.len(), 2);
    assert!(
        exchanges[1].arrived >= exchanges[0].body_sent,
        "ceiling of 1 exceeded: second request arrived before the first body was sent"
    );
    assert_eq!(api.connection().available_connections(), 1);
    api.stop();
}
