//! Tests for `ReqwestClient`.
//!
//! These cover construction and the failure mapping. Truncated responses
//! are served from a throwaway local socket.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use super::*;

mod reqwest_client {
    use super::*;

    #[test]
    fn with_timeout_builds_client() {
        let client = ReqwestClient::with_timeout(Duration::from_secs(120)).unwrap();

        assert!(format!("{client:?}").contains("ReqwestClient"));
    }

    #[test]
    fn from_client_accepts_custom_client() {
        let custom = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();
        let client = ReqwestClient::from_client(custom);

        let _ = format!("{client:?}");
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }

    #[tokio::test]
    async fn request_to_invalid_host_returns_error_or_proxy_response() {
        let client = ReqwestClient::default();
        let url = url::Url::parse("http://invalid.invalid.invalid/").unwrap();

        let result = client.request(HttpRequest::get(url)).await;

        // With a proxy in the environment, the proxy may answer with an
        // error status instead of failing the connection.
        match result {
            Err(TransportError::Connection(_)) => {}
            Ok(resp) if !resp.is_success() => {}
            other => panic!("Expected connection error or proxy error response, got {other:?}"),
        }
    }
}

mod truncated_body {
    use super::*;

    /// Serves one response whose body is shorter than its `Content-Length`.
    fn serve_truncated(status_line: &'static str) -> url::Url {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!("{status_line}\r\nContent-Length: 64\r\n\r\npartial");
            stream.write_all(response.as_bytes()).unwrap();
        });

        url::Url::parse(&format!("http://{addr}/chat/getChats")).unwrap()
    }

    fn direct_client() -> ReqwestClient {
        ReqwestClient::from_client(reqwest::Client::builder().no_proxy().build().unwrap())
    }

    #[tokio::test]
    async fn error_status_survives_unreadable_body() {
        let url = serve_truncated("HTTP/1.1 502 Bad Gateway");

        let response = direct_client()
            .request(HttpRequest::get(url))
            .await
            .unwrap();

        assert_eq!(response.status, ::http::StatusCode::BAD_GATEWAY);
        assert!(response.body.is_empty());
    }

    #[tokio::test]
    async fn unreadable_success_body_is_a_connection_error() {
        let url = serve_truncated("HTTP/1.1 200 OK");

        let result = direct_client().request(HttpRequest::get(url)).await;

        assert!(matches!(result, Err(TransportError::Connection(_))));
    }
}
