//! Tests for `ApiClient`: the full request/response contract.

use std::time::Duration;

use http::StatusCode;
use serde_json::json;

use crate::client::{ApiClient, ClientSettings};
use crate::error::ErrorKind;
use crate::notify::Severity;
use crate::pipeline::{PipelineError, RequestConfig, RequestInterceptor, RequestPipeline, messages};
use crate::test_fixtures::{FailingSink, MockTransport, RecordingSink};
use crate::transport::TransportError;

fn client(transport: MockTransport) -> ApiClient<MockTransport, RecordingSink> {
    ApiClient::new(transport, RecordingSink::default(), ClientSettings::default())
}

const LOGICAL_MS: Duration = Duration::from_millis(3000);
const ERROR_MS: Duration = Duration::from_millis(5000);

mod success_path {
    use super::*;

    #[tokio::test]
    async fn bare_payload_passes_through_unchanged() {
        let body = r#"[{"id":1,"content":"hi"},{"id":2,"content":"there"}]"#;
        let client = client(MockTransport::respond(200, body));

        let payload = client
            .request(RequestConfig::get("http://localhost:8080/chat/getChats"))
            .await
            .unwrap();

        assert_eq!(payload, serde_json::from_str::<serde_json::Value>(body).unwrap());
        assert!(client.sink().notifications().is_empty());
    }

    #[tokio::test]
    async fn bare_object_without_discriminators_passes_through() {
        let client = client(MockTransport::respond(200, r#"{"answer":"42","data":"x"}"#));

        let payload = client
            .request(RequestConfig::post("http://localhost:8000/chatbyqwen3"))
            .await
            .unwrap();

        assert_eq!(payload, json!({"answer": "42", "data": "x"}));
    }

    #[tokio::test]
    async fn success_envelope_unwraps_data() {
        let client = client(MockTransport::respond(
            200,
            r#"{"code":200,"data":{"sessionId":9},"msg":"ok"}"#,
        ));

        let payload = client
            .request(RequestConfig::post("http://localhost:8080/session/add"))
            .await
            .unwrap();

        assert_eq!(payload, json!({"sessionId": 9}));
    }

    #[tokio::test]
    async fn success_envelope_without_data_returns_whole_envelope() {
        let client = client(MockTransport::respond(200, r#"{"code":200,"msg":"deleted"}"#));

        let payload = client
            .request(RequestConfig::delete("http://localhost:8080/chat/deleteChat"))
            .await
            .unwrap();

        assert_eq!(payload, json!({"code": 200, "msg": "deleted"}));
    }

    #[tokio::test]
    async fn empty_body_resolves_to_null() {
        let client = client(MockTransport::respond(204, ""));

        let payload = client
            .request(RequestConfig::put("http://localhost:8080/chat/updateChat"))
            .await
            .unwrap();

        assert!(payload.is_null());
    }

    #[tokio::test]
    async fn request_as_deserializes_payload() {
        #[derive(serde::Deserialize)]
        struct Session {
            id: i64,
        }
        let client = client(MockTransport::respond(200, r#"{"code":200,"data":{"id":3}}"#));

        let session: Session = client
            .request_as(RequestConfig::get("http://localhost:8080/session/getSessions"))
            .await
            .unwrap();

        assert_eq!(session.id, 3);
    }
}

mod logical_failure {
    use super::*;

    #[tokio::test]
    async fn envelope_error_code_rejects_with_msg() {
        let client = client(MockTransport::respond(200, r#"{"code":500,"msg":"db down"}"#));

        let error = client
            .request(RequestConfig::post("http://localhost:8080/chat/addChat"))
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::LogicalFailure);
        assert_eq!(error.message(), "db down");
        assert_eq!(error.source_status(), Some(StatusCode::OK));

        let notice = client.sink().only();
        assert_eq!(notice.message, "db down");
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.duration, LOGICAL_MS);
    }

    #[tokio::test]
    async fn falls_back_to_message_field() {
        let client = client(MockTransport::respond(
            200,
            r#"{"code":401,"message":"token expired"}"#,
        ));

        let error = client
            .request(RequestConfig::get("http://localhost:8080/user/me"))
            .await
            .unwrap_err();

        assert_eq!(error.message(), "token expired");
    }

    #[tokio::test]
    async fn falls_back_to_default_message() {
        let client = client(MockTransport::respond(200, r#"{"code":1001,"data":null}"#));

        let error = client
            .request(RequestConfig::get("http://localhost:8080/chat/getChats"))
            .await
            .unwrap_err();

        assert_eq!(error.message(), "request error");
        assert_eq!(client.sink().only().message, "request error");
    }
}

mod classified_failures {
    use super::*;

    #[tokio::test]
    async fn timeout_notifies_longer_than_logical_failures() {
        let client = client(MockTransport::fail(TransportError::Timeout));

        let error = client
            .request(RequestConfig::post("http://localhost:8000/chatbyqwen3"))
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Timeout);
        assert_eq!(error.message(), messages::TIMEOUT);

        let notice = client.sink().only();
        assert_eq!(notice.duration, ERROR_MS);
        assert!(notice.duration > LOGICAL_MS);
    }

    #[tokio::test]
    async fn get_without_response_is_no_response() {
        let client = client(MockTransport::fail(TransportError::Connection(Box::new(
            std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
        ))));

        let error = client
            .request(RequestConfig::get("http://localhost:8080/session/getSessions"))
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::NoResponse);
        assert_eq!(
            error.message(),
            "network unreachable; check connection or backend availability."
        );
        assert_eq!(client.sink().only().duration, ERROR_MS);
    }

    #[tokio::test]
    async fn delete_404_without_body_includes_url() {
        let client = client(MockTransport::respond(404, ""));

        let error = client
            .request(
                RequestConfig::delete("http://localhost:8080/chat/deleteChat")
                    .with_param("sessionId", 5),
            )
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::HttpStatus(StatusCode::NOT_FOUND));
        assert!(
            error
                .message()
                .contains("http://localhost:8080/chat/deleteChat")
        );
        assert_eq!(client.sink().only().duration, ERROR_MS);
    }

    #[tokio::test]
    async fn status_body_message_overrides_table() {
        let client = client(MockTransport::respond(400, r#"{"msg":"userId is required"}"#));

        let error = client
            .request(RequestConfig::get("http://localhost:8080/session/getSessions"))
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::HttpStatus(StatusCode::BAD_REQUEST));
        assert_eq!(error.message(), "userId is required");
    }

    #[tokio::test]
    async fn unauthorized_is_inspectable() {
        let client = client(MockTransport::respond(401, ""));

        let error = client
            .request(RequestConfig::get("http://localhost:8080/user/me"))
            .await
            .unwrap_err();

        assert!(error.is_unauthorized());
        assert_eq!(error.message(), messages::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unparsable_url_is_unknown_and_never_sent() {
        let transport = MockTransport::new(vec![]);
        let client = client(transport);

        let error = client
            .request(RequestConfig::get("not a url"))
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Unknown);
        assert!(error.message().contains("not a url"));
        assert_eq!(client.transport().calls(), 0);
        assert_eq!(client.sink().notifications().len(), 1);
    }

    #[tokio::test]
    async fn undecodable_typed_payload_is_unknown() {
        let client = client(MockTransport::respond(200, r#"{"code":200,"data":"text"}"#));

        let result: Result<Vec<i64>, _> = client
            .request_as(RequestConfig::get("http://localhost:8080/chat/getChats"))
            .await;

        let error = result.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unknown);
        assert_eq!(client.sink().notifications().len(), 1);
    }

    #[tokio::test]
    async fn failing_sink_does_not_change_the_error() {
        let client = ApiClient::new(
            MockTransport::respond(502, ""),
            FailingSink::default(),
            ClientSettings::default(),
        );

        let error = client
            .request(RequestConfig::get("http://localhost:8080/chat/getChats"))
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::HttpStatus(StatusCode::BAD_GATEWAY));
        assert_eq!(error.message(), messages::BAD_GATEWAY);
        assert_eq!(client.sink().attempts(), 1);
    }
}

mod request_pipeline {
    use super::*;

    struct Reject;

    impl RequestInterceptor for Reject {
        fn intercept(&self, _config: RequestConfig) -> Result<RequestConfig, PipelineError> {
            Err(PipelineError::Rejected("session expired locally".to_string()))
        }
    }

    #[tokio::test]
    async fn sends_json_content_type_and_default_timeout() {
        let client = client(MockTransport::respond(200, "{}"));

        client
            .request(RequestConfig::post("http://localhost:8080/user/login").with_data(json!({
                "username": "a",
                "password": "b"
            })))
            .await
            .unwrap();

        let sent = client.transport().last_request();
        assert_eq!(
            sent.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(sent.timeout, Some(Duration::from_secs(120)));
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(sent.body.as_deref().unwrap()).unwrap(),
            json!({"username": "a", "password": "b"})
        );
    }

    #[tokio::test]
    async fn bearer_setting_attaches_authorization() {
        let settings = ClientSettings {
            bearer: Some("abc".to_string()),
            ..ClientSettings::default()
        };
        let client = ApiClient::new(
            MockTransport::respond(200, "{}"),
            RecordingSink::default(),
            settings,
        );

        client
            .request(RequestConfig::get("http://localhost:8080/session/getSessions"))
            .await
            .unwrap();

        let sent = client.transport().last_request();
        assert_eq!(
            sent.headers.get(http::header::AUTHORIZATION).unwrap(),
            "Bearer abc"
        );
    }

    #[tokio::test]
    async fn relative_url_joins_base_url() {
        let settings = ClientSettings {
            base_url: Some(url::Url::parse("http://localhost:8080/").unwrap()),
            ..ClientSettings::default()
        };
        let client = ApiClient::new(
            MockTransport::respond(200, "[]"),
            RecordingSink::default(),
            settings,
        );

        client
            .request(RequestConfig::get("session/getSessions").with_param("userId", 4))
            .await
            .unwrap();

        assert_eq!(
            client.transport().last_request().url.as_str(),
            "http://localhost:8080/session/getSessions?userId=4"
        );
    }

    #[tokio::test]
    async fn interceptor_rejection_propagates_message_without_sending() {
        let client = client(MockTransport::new(vec![])).with_interceptor(Reject);

        let error = client
            .request(RequestConfig::get("http://localhost:8080/chat/getChats"))
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Unknown);
        assert_eq!(error.message(), "session expired locally");
        assert_eq!(client.transport().calls(), 0);
        assert_eq!(client.sink().notifications().len(), 1);
    }

    #[tokio::test]
    async fn replaced_pipeline_skips_default_headers() {
        let client =
            client(MockTransport::respond(200, "{}")).with_request_pipeline(RequestPipeline::new());

        client
            .request(RequestConfig::get("http://localhost:8080/chat/getChats"))
            .await
            .unwrap();

        assert!(client.transport().last_request().headers.is_empty());
    }

    #[tokio::test]
    async fn each_request_is_sent_exactly_once() {
        let client = client(MockTransport::new(vec![
            Err(TransportError::Timeout),
            Ok(crate::transport::HttpResponse::with_status(StatusCode::OK, "1")),
        ]));

        let first = client
            .request(RequestConfig::get("http://localhost:8080/a"))
            .await;
        let second = client
            .request(RequestConfig::get("http://localhost:8080/b"))
            .await;

        assert!(first.is_err());
        assert_eq!(second.unwrap(), json!(1));
        assert_eq!(client.transport().calls(), 2);
        let urls: Vec<String> = client
            .transport()
            .captured_requests()
            .iter()
            .map(|r| r.url.path().to_string())
            .collect();
        assert_eq!(urls, vec!["/a", "/b"]);
    }
}
