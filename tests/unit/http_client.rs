// HTTP Client Tests
// "End to end against a socket we control"

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use rolodex::config::ApiSettings;
use rolodex::http::classify::ErrorClassifier;
use rolodex::http::connectivity::ConnectivityProbe;
use rolodex::http::hooks::StatusHooks;
use rolodex::http::HttpClient;
use rolodex::ErrorKind;

struct FixedProbe {
    online: bool,
    reachable: bool,
}

#[async_trait]
impl ConnectivityProbe for FixedProbe {
    async fn online(&self) -> bool {
        self.online
    }

    async fn reach(&self) -> bool {
        self.reachable
    }
}

fn client_for(base_url: String, online: bool, reachable: bool) -> HttpClient {
    let settings = ApiSettings {
        base_url,
        timeout_secs: 5,
    };
    let probe = Arc::new(FixedProbe { online, reachable });
    let classifier = ErrorClassifier::new(probe, StatusHooks::new());
    HttpClient::new(&settings, classifier).expect("client should build")
}

/// Serve exactly one canned HTTP response on a local ephemeral port.
async fn serve_once(status_line: &'static str, body: serde_json::Value) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;

        let body = body.to_string();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.expect("write");
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn canceled_token_wins_mid_flight() {
    // The request would fail on its own; the fired token must win anyway.
    let client = client_for("http://127.0.0.1:9".to_string(), true, true);
    let token = CancellationToken::new();
    token.cancel();

    let err = client
        .get_json("/passenger", &[], Some(&token))
        .await
        .expect_err("canceled request must fail");

    assert_eq!(err.kind, ErrorKind::RequestCanceled);
    assert_eq!(err.status, 0);
}

#[tokio::test]
async fn connection_refused_goes_through_the_network_branch() {
    // Port 9 (discard) is closed; connect is refused without leaving the host.
    let client = client_for("http://127.0.0.1:9".to_string(), false, true);

    let err = client
        .get_json("/passenger", &[], None)
        .await
        .expect_err("refused connection must fail");

    assert_eq!(err.kind, ErrorKind::NoInternet);
    assert_eq!(err.status, 0);
}

#[tokio::test]
async fn connection_refused_while_reachable_is_server_unreachable() {
    let client = client_for("http://127.0.0.1:9".to_string(), true, true);

    let err = client
        .get_json("/passenger", &[], None)
        .await
        .expect_err("refused connection must fail");

    assert_eq!(err.kind, ErrorKind::ServerUnreachable);
}

#[tokio::test]
async fn error_status_carries_body_as_payload() {
    let base = serve_once("404 Not Found", json!({"message": "not found"})).await;
    let client = client_for(base, true, true);

    let err = client
        .get_json("/passenger/42", &[], None)
        .await
        .expect_err("404 must fail");

    assert_eq!(err.kind, ErrorKind::ApiError);
    assert_eq!(err.status, 404);
    assert_eq!(err.payload, Some(json!({"message": "not found"})));
}

#[tokio::test]
async fn server_error_status_lands_in_the_same_branch() {
    let base = serve_once("500 Internal Server Error", json!({"trace": "boom"})).await;
    let client = client_for(base, true, true);

    let err = client
        .get_json("/passenger", &[], None)
        .await
        .expect_err("500 must fail");

    assert_eq!(err.kind, ErrorKind::ApiError);
    assert_eq!(err.status, 500);
    assert_eq!(err.payload, Some(json!({"trace": "boom"})));
}

#[tokio::test]
async fn success_returns_normalized_response() {
    let base = serve_once("200 OK", json!({"id": 7})).await;
    let client = client_for(base, true, true);

    let response = client
        .get_json("/passenger/7", &[], None)
        .await
        .expect("200 must succeed");

    assert_eq!(response.status, 200);
    assert_eq!(response.message, "OK");
    assert_eq!(response.data, json!({"id": 7}));
}

#[tokio::test]
async fn undecodable_success_body_is_invalid_response() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let body = "this is not json";
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.expect("write");
    });

    let client = client_for(format!("http://{addr}"), true, true);
    let err = client
        .get_json("/passenger", &[], None)
        .await
        .expect_err("garbage body must fail");

    assert_eq!(err.kind, ErrorKind::InvalidResponse);
    assert_eq!(err.status, 0);
}
