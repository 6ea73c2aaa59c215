//! Connection-level behavior of the session loop, driven over raw sockets.

use std::time::Duration;

mod common;

#[tokio::test]
async fn dot_dot_target_is_rejected_verbatim() {
    let server = common::start_server().await;

    let response = common::raw_exchange(
        server.addr,
        "GET /api/../api/items HTTP/1.1\r\nHost: test\r\nConnection: close\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 400"), "{response}");
    assert!(response.contains("Illegal request-target"), "{response}");

    server.shutdown.trigger();
}

#[tokio::test]
async fn keep_alive_serves_pipelined_requests() {
    let server = common::start_server().await;

    let body = r#"{"name":"x"}"#;
    let request = format!(
        "POST /api/items HTTP/1.1\r\nHost: test\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}\
         GET /api/items/1 HTTP/1.1\r\nHost: test\r\nConnection: close\r\n\r\n",
        body.len(),
        body
    );
    let response = common::raw_exchange(server.addr, &request).await;

    assert!(response.starts_with("HTTP/1.1 201"), "{response}");
    assert!(response.contains("connection: keep-alive"), "{response}");
    assert!(response.contains("HTTP/1.1 200"), "{response}");
    assert!(response.contains("connection: close"), "{response}");
    assert_eq!(response.matches(r#""name":"x""#).count(), 2, "{response}");

    server.shutdown.trigger();
}

#[tokio::test]
async fn http10_closes_by_default() {
    let server = common::start_server().await;

    let response = common::raw_exchange(server.addr, "GET /api HTTP/1.0\r\n\r\n").await;
    assert!(response.contains(" 200 OK"), "{response}");
    assert!(response.contains("connection: close"), "{response}");

    server.shutdown.trigger();
}

#[tokio::test]
async fn bad_request_does_not_poison_connection() {
    let server = common::start_server().await;

    let request = "PUT /api/items/1 HTTP/1.1\r\nHost: test\r\nContent-Length: 3\r\n\r\nabc\
                   GET /api HTTP/1.1\r\nHost: test\r\nConnection: close\r\n\r\n";
    let response = common::raw_exchange(server.addr, request).await;

    assert!(response.starts_with("HTTP/1.1 400"), "{response}");
    assert!(response.contains("HTTP/1.1 200"), "{response}");

    server.shutdown.trigger();
}

#[tokio::test]
async fn shutdown_stops_accepting() {
    let server = common::start_server().await;
    let res = reqwest::get(format!("{}/api", server.url())).await.unwrap();
    assert_eq!(res.status(), 200);

    server.shutdown.trigger();
    let finished = tokio::time::timeout(Duration::from_secs(5), server.handle).await;
    assert!(matches!(finished, Ok(Ok(Ok(())))));

    assert!(tokio::net::TcpStream::connect(server.addr).await.is_err());
}

/// Read from `stream` until `needle` shows up in what was received.
async fn read_until(stream: &mut tokio::net::TcpStream, needle: &str) -> String {
    use tokio::io::AsyncReadExt;

    let mut received = Vec::new();
    let mut buf = [0u8; 1024];
    while !String::from_utf8_lossy(&received).contains(needle) {
        let n = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut buf))
            .await
            .expect("no response from server")
            .unwrap();
        assert!(n > 0, "connection closed before {needle:?} arrived");
        received.extend_from_slice(&buf[..n]);
    }
    String::from_utf8_lossy(&received).into_owned()
}

#[tokio::test]
async fn idle_keep_alive_session_does_not_hold_shutdown() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let mut config = item_server::ServiceConfig::default();
    config.listener.shutdown_grace_secs = 30;
    let server = common::start_server_with(config).await;

    let body = r#"{"name":"x"}"#;
    let post = format!(
        "POST /api/items HTTP/1.1\r\nHost: test\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    );

    let mut stream = tokio::net::TcpStream::connect(server.addr).await.unwrap();
    stream.write_all(post.as_bytes()).await.unwrap();
    let response = read_until(&mut stream, r#""name":"x"}"#).await;
    assert!(response.starts_with("HTTP/1.1 201"), "{response}");

    server.shutdown.trigger();
    let finished = tokio::time::timeout(Duration::from_secs(5), server.handle).await;
    assert!(matches!(finished, Ok(Ok(Ok(())))), "idle session held shutdown");

    // The session was closed, so nothing more reaches the store.
    let _ = stream.write_all(post.as_bytes()).await;
    let mut rest = Vec::new();
    let read = tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut rest)).await;
    assert!(read.is_ok(), "session left open after shutdown");
    assert!(!String::from_utf8_lossy(&rest).contains("201"));
    assert_eq!(server.store.len(), 1);
}

#[tokio::test]
async fn stalled_session_is_aborted_after_grace() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let server = common::start_server().await;

    let mut stalled = tokio::net::TcpStream::connect(server.addr).await.unwrap();
    stalled
        .write_all(b"POST /api/items HTTP/1.1\r\nHost: test\r\nContent-Length: 100\r\n\r\n{")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    server.shutdown.trigger();
    let finished = tokio::time::timeout(Duration::from_secs(5), server.handle).await;
    assert!(matches!(finished, Ok(Ok(Ok(())))));

    let mut rest = Vec::new();
    let read = tokio::time::timeout(Duration::from_secs(5), stalled.read_to_end(&mut rest)).await;
    assert!(read.is_ok(), "aborted session left its socket open");
    assert!(server.store.is_empty());
}
