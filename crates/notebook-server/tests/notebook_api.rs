//! End-to-end API tests over the in-memory store.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use serde_json::{Value, json};
use tower::ServiceExt;

use notebook_server::auth::issue_token;
use notebook_server::{AppState, ServerConfig, StorageBackend, StoreNotebookService, build_app};
use notebook_store::MemoryStore;

const SECRET: &str = "integration-secret";

struct TestClient {
    app: Router,
    bearer: String,
    csrf: String,
}

impl TestClient {
    async fn new() -> Self {
        let config = ServerConfig {
            storage: StorageBackend::Memory,
            jwt_secret: SECRET.to_string(),
            ..ServerConfig::default()
        };
        let service = StoreNotebookService::new(Arc::new(MemoryStore::new()));
        let app = build_app(AppState::new(Arc::new(service), config));
        let bearer = issue_token("alice", &["ROLE_USER"], SECRET, 1).unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/csrf")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .get("set-cookie")
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("XSRF-TOKEN=")
        );
        let csrf = body_json(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        Self { app, bearer, csrf }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", format!("Bearer {}", self.bearer))
            .header("cookie", format!("XSRF-TOKEN={}", self.csrf))
            .header("x-xsrf-token", &self.csrf);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.app.clone().oneshot(request).await.unwrap()
    }
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_groceries_scenario() {
    let client = TestClient::new().await;

    let response = client
        .send(
            Method::POST,
            "/api/notebook/create",
            Some(json!({"title": "Groceries"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["title"], "Groceries");

    let response = client
        .send(Method::GET, &format!("/api/notebook/{}", id), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Groceries");

    let response = client
        .send(
            Method::POST,
            &format!("/api/notebook/{}/add-note", id),
            Some(json!({"title": "Milk"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let note = body_json(response).await;
    let note_id = note["id"].as_str().unwrap().to_string();
    assert!(!note_id.is_empty());

    let response = client
        .send(Method::GET, &format!("/api/notebook/note/{}", note_id), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Milk");

    let response = client
        .send(
            Method::POST,
            "/api/notebook/create",
            Some(json!({"title": ""})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rename_list_and_delete() {
    let client = TestClient::new().await;

    let created = body_json(
        client
            .send(
                Method::POST,
                "/api/notebook/create",
                Some(json!({"title": "Groceries"})),
            )
            .await,
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();
    client
        .send(
            Method::POST,
            &format!("/api/notebook/{}/add-note", id),
            Some(json!({"title": "Milk", "content": "2 litres"})),
        )
        .await;

    let response = client
        .send(
            Method::PUT,
            "/api/notebook/update",
            Some(json!({"id": id, "title": "Shopping", "notes": []})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["title"], "Shopping");
    assert_eq!(updated["notes"].as_array().unwrap().len(), 1);

    let listed = body_json(client.send(Method::GET, "/api/notebook", None).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["note_count"], 1);

    let response = client
        .send(Method::DELETE, &format!("/api/notebook/{}", id), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .send(Method::DELETE, &format!("/api/notebook/{}", id), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let listed = body_json(client.send(Method::GET, "/api/notebook", None).await).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let client = TestClient::new().await;

    for uri in ["/api/notebook/missing", "/api/notebook/note/missing"] {
        let response = client.send(Method::GET, uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn test_every_response_has_request_id() {
    let client = TestClient::new().await;

    let ok = client.send(Method::GET, "/api/notebook", None).await;
    assert!(ok.headers().contains_key("x-request-id"));

    let unauthenticated = client
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/notebook")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);
    assert!(unauthenticated.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_bad_token_is_unauthorized() {
    let client = TestClient::new().await;
    let forged = issue_token("mallory", &["USER"], "other-secret", 1).unwrap();

    let response = client
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/notebook")
                .header("authorization", format!("Bearer {}", forged))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let client = TestClient::new().await;

    let response = client
        .app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"status": "ok", "storage": "memory"})
    );
}

#[tokio::test]
async fn test_static_segments_read_as_notebook_ids() {
    let client = TestClient::new().await;

    let response = client.send(Method::GET, "/api/notebook/create", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");

    let response = client
        .send(Method::DELETE, "/api/notebook/update", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"]["message"],
        "Notebook update not found"
    );
}

#[tokio::test]
async fn test_update_without_id_names_field() {
    let client = TestClient::new().await;

    let response = client
        .send(
            Method::PUT,
            "/api/notebook/update",
            Some(json!({"title": "Shopping"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["field"], "id");
}
