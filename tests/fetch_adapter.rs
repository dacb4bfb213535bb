//! Fetch adapter against a mocked Figma API.

use figma_reduce::{DocumentRef, FetchConfig, FigmaClient, ReduceError, fetch::TOKEN_HEADER};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> FigmaClient {
    FigmaClient::new(&FetchConfig::default().with_api_base(server.uri()), "secret").unwrap()
}

fn doc() -> DocumentRef {
    DocumentRef::new("ABC123", "12-34").unwrap()
}

#[tokio::test]
async fn fetch_sends_token_and_colon_node_id() {
    let server = MockServer::start().await;
    let entry = json!({ "document": { "id": "12:34", "name": "Frame", "type": "FRAME" } });

    Mock::given(method("GET"))
        .and(path("/v1/files/ABC123/nodes"))
        .and(query_param("ids", "12:34"))
        .and(header(TOKEN_HEADER, "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "nodes": { "12:34": entry } })))
        .expect(1)
        .mount(&server)
        .await;

    let fetched = client(&server).fetch_entry(&doc()).await.unwrap();
    assert_eq!(fetched, entry);
}

#[tokio::test]
async fn fetch_node_unwraps_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/ABC123/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Site",
            "nodes": { "12:34": { "document": { "id": "12:34", "name": "Hero" }, "components": {} } }
        })))
        .mount(&server)
        .await;

    let node = client(&server).fetch_node(&doc()).await.unwrap();
    assert_eq!(node.name.as_deref(), Some("Hero"));
}

#[tokio::test]
async fn null_node_entry_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "nodes": { "12:34": null } })))
        .mount(&server)
        .await;

    let err = client(&server).fetch_entry(&doc()).await.unwrap_err();
    assert!(matches!(err, ReduceError::NodeNotFound { .. }), "{err}");
}

#[tokio::test]
async fn forbidden_is_access_denied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "status": 403, "err": "Invalid token" })))
        .mount(&server)
        .await;

    let err = client(&server).fetch_entry(&doc()).await.unwrap_err();
    assert!(matches!(err, ReduceError::AccessDenied), "{err}");
}

#[tokio::test]
async fn unauthorized_is_access_denied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "status": 401, "err": "Unauthorized" })))
        .mount(&server)
        .await;

    let err = client(&server).fetch_entry(&doc()).await.unwrap_err();
    assert!(matches!(err, ReduceError::AccessDenied), "{err}");
}

#[tokio::test]
async fn deeply_nested_node_is_fetched_and_decoded() {
    const LEVELS: usize = 200;
    let tree = format!(
        "{}{}{}",
        r#"{"id":"n","type":"FRAME","children":["#.repeat(LEVELS),
        r#"{"id":"leaf","type":"TEXT"}"#,
        "]}".repeat(LEVELS)
    );
    let body = format!(r#"{{"nodes":{{"12:34":{{"document":{tree}}}}}}}"#);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/ABC123/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let node = client(&server).fetch_node(&doc()).await.unwrap();
    let reduced = figma_reduce::reduce(Some(&node)).unwrap();
    assert_eq!(reduced.node_count(), LEVELS + 1);
}

#[tokio::test]
async fn missing_file_is_file_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "status": 404, "err": "Not found" })))
        .mount(&server)
        .await;

    let err = client(&server).fetch_entry(&doc()).await.unwrap_err();
    assert!(matches!(err, ReduceError::FileNotFound), "{err}");
}

#[tokio::test]
async fn other_statuses_are_upstream_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "status": 500, "err": "Internal" })))
        .mount(&server)
        .await;

    let err = client(&server).fetch_entry(&doc()).await.unwrap_err();
    match err {
        ReduceError::Upstream(msg) => assert!(msg.contains("500") && msg.contains("Internal"), "{msg}"),
        other => panic!("expected upstream error, got {other}"),
    }
}

#[tokio::test]
async fn malformed_body_is_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
        .mount(&server)
        .await;

    let err = client(&server).fetch_entry(&doc()).await.unwrap_err();
    assert!(matches!(err, ReduceError::Upstream(_)), "{err}");
}

#[tokio::test]
async fn unreachable_api_is_upstream_failure() {
    // Bind then release a port so nothing is listening on it.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let uri = format!("http://{addr}");

    let client = FigmaClient::new(&FetchConfig::default().with_api_base(uri), "secret").unwrap();
    let err = client.fetch_entry(&doc()).await.unwrap_err();
    assert!(matches!(err, ReduceError::Upstream(_)), "{err}");
}
