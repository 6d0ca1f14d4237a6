//! HTTP client wrapper integration tests
//!
//! Dispatch against a mock server and check envelope unwrapping, bearer
//! attachment, failure classification, and the session-expiry protocol.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use icsmobile::client::{ApiClient, RequestDescriptor};
use icsmobile::config::Config;
use icsmobile::error::{ApiError, NETWORK_FAILURE_MESSAGE};
use icsmobile::session::{MemoryCredentialStore, SessionContext, SessionEvent};

fn client_for(base_url: &str, token: Option<&str>) -> (ApiClient, UnboundedReceiver<SessionEvent>) {
    let store: Arc<MemoryCredentialStore> = match token {
        Some(token) => Arc::new(MemoryCredentialStore::with_token(token)),
        None => Arc::new(MemoryCredentialStore::new()),
    };
    let (session, events) = SessionContext::new(store);
    let config = Config::builder().base_url(base_url).build().unwrap();
    (ApiClient::new(config, session).unwrap(), events)
}

#[tokio::test]
async fn enveloped_success_yields_inner_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "message": "ok",
            "data": {"id": 1, "title": "打印机故障"}
        })))
        .mount(&server)
        .await;

    let (client, _events) = client_for(&server.uri(), Some("abc"));
    let data = client.send(RequestDescriptor::get("/tickets/1")).await.unwrap();
    assert_eq!(data, json!({"id": 1, "title": "打印机故障"}));
}

#[tokio::test]
async fn raw_payload_passes_through_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc",
            "user": {"id": 1, "name": "张三"}
        })))
        .mount(&server)
        .await;

    let (client, _events) = client_for(&server.uri(), None);
    let data = client
        .send(RequestDescriptor::post("/users/login").json(&json!({"username": "u", "password": "p"})))
        .await
        .unwrap();
    assert_eq!(data["token"], "abc");
    assert_eq!(data["user"]["name"], "张三");
}

#[tokio::test]
async fn bearer_header_attached_when_logged_in() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/info"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _events) = client_for(&server.uri(), Some("secret-token"));
    client.send(RequestDescriptor::get("/users/info")).await.unwrap();
}

#[tokio::test]
async fn no_authorization_header_when_logged_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"records": [], "total": 0})))
        .mount(&server)
        .await;

    let (client, _events) = client_for(&server.uri(), None);
    client.send(RequestDescriptor::get("/tickets/list")).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn http_401_expires_the_session_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/info"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})))
        .mount(&server)
        .await;

    let (client, mut events) = client_for(&server.uri(), Some("stale"));

    let err = client.send(RequestDescriptor::get("/users/info")).await.unwrap_err();
    assert!(err.is_unauthenticated(), "401 must not surface as a generic error");
    assert!(!client.session().is_logged_in());
    assert_eq!(events.try_recv().unwrap(), SessionEvent::Expired);

    // A second stale call still fails but triggers no second cycle.
    let err = client.send(RequestDescriptor::get("/users/info")).await.unwrap_err();
    assert!(err.is_unauthenticated());
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn auth_fragment_is_treated_as_401() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/list"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": {"message": "无效的认证令牌", "errors": []}
        })))
        .mount(&server)
        .await;

    let (client, mut events) = client_for(&server.uri(), Some("stale"));
    let err = client.send(RequestDescriptor::get("/orders/list")).await.unwrap_err();

    assert!(err.is_unauthenticated());
    assert_eq!(events.try_recv().unwrap(), SessionEvent::Expired);
}

#[tokio::test]
async fn server_error_keeps_credential_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets/list"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "服务器错误"})))
        .mount(&server)
        .await;

    let (client, mut events) = client_for(&server.uri(), Some("abc"));
    let err = client.send(RequestDescriptor::get("/tickets/list")).await.unwrap_err();

    assert_eq!(err, ApiError::api(Some(500), "服务器错误"));
    assert_eq!(client.session().token().as_deref(), Some("abc"));
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn error_message_precedence_over_shapes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": {"message": "标题不能为空", "errors": ["title"]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "工单不存在"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
        .mount(&server)
        .await;

    let (client, _events) = client_for(&server.uri(), Some("abc"));
    let err = client.send(RequestDescriptor::get("/a")).await.unwrap_err();
    assert_eq!(err.message(), "标题不能为空");
    let err = client.send(RequestDescriptor::get("/b")).await.unwrap_err();
    assert_eq!(err.message(), "工单不存在");
    let err = client.send(RequestDescriptor::get("/c")).await.unwrap_err();
    assert_eq!(err.message(), "请求的资源不存在");
}

#[tokio::test]
async fn business_code_failure_on_http_200() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tickets/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 500,
            "message": "参数错误"
        })))
        .mount(&server)
        .await;

    let (client, _events) = client_for(&server.uri(), Some("abc"));
    let err = client
        .send(RequestDescriptor::post("/tickets/submit").json(&json!({"title": "t"})))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::api(None, "参数错误"));
}

#[tokio::test]
async fn multipart_body_omits_json_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tickets/3/attachments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": null})))
        .mount(&server)
        .await;

    let (client, _events) = client_for(&server.uri(), Some("abc"));
    client
        .send(icsmobile::api::ticket::upload_attachment(
            3,
            "photo.jpg",
            "image/jpeg",
            vec![0xff, 0xd8, 0xff],
        ))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("multipart/form-data"),
        "got content type {content_type:?}"
    );
}

#[tokio::test]
async fn connection_failure_surfaces_generic_network_message() {
    // Nothing listens here.
    let (client, _events) = client_for("http://127.0.0.1:1", None);
    let err = client.send(RequestDescriptor::get("/tickets/list")).await.unwrap_err();
    assert_eq!(err, ApiError::Network { message: NETWORK_FAILURE_MESSAGE.to_string() });
}

#[tokio::test]
async fn timeout_surfaces_as_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets/list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"records": [], "total": 0}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let (session, _events) = SessionContext::new(Arc::new(MemoryCredentialStore::new()));
    let config = Config::builder()
        .base_url(server.uri())
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let client = ApiClient::new(config, session).unwrap();

    let err = client.send(RequestDescriptor::get("/tickets/list")).await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }));
}
