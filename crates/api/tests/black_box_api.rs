use reqwest::StatusCode;
use serde_json::json;
use usersvc_api::config::ApiConfig;
use usersvc_auth::{ApiToken, StaticTokenSet};

const TOKEN: &str = "black-box-token";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        Self::spawn_with(true).await
    }

    async fn spawn_with(disclose_ids: bool) -> Self {
        let config = ApiConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            tokens: StaticTokenSet::new([ApiToken::new(TOKEN)]),
            disclose_ids_on_not_found: disclose_ids,
        };
        // Same router as prod, bound to an ephemeral port.
        let app = usersvc_api::app::build_app(&config);
        let listener = tokio::net::TcpListener::bind(config.bind_addr)
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn names(body: &serde_json::Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn token_required_for_user_endpoints() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/users")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["statusCode"], 401);
    assert_eq!(body["error"], "Missing authentication token.");

    let res = client
        .get(srv.url("/users"))
        .bearer_auth("nope")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Invalid authentication token.");
}

#[tokio::test]
async fn every_token_source_is_accepted() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url("/users/1"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(srv.url("/users/1"))
        .header("X-API-Token", TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(srv.url(&format!("/users/1?token={TOKEN}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "id": 1, "name": "John Doe", "email": "john.doe@example.com" }));
}

#[tokio::test]
async fn health_and_docs_bypass_the_gate() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(srv.url("/docs")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["routes"].as_array().unwrap().len() >= 5);
}

#[tokio::test]
async fn crud_scenario_against_seeded_store() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Unknown id lists the live ids.
    let res = client
        .get(srv.url("/users/99"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["availableIds"], json!([1, 2, 3]));

    // Create
    let res = client
        .post(srv.url("/users"))
        .bearer_auth(TOKEN)
        .json(&json!({ "name": "Ann Lee", "email": "ann@x.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()["location"], "/users/4");
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["id"], 4);

    // Sorted, paged listing
    let res = client
        .get(srv.url("/users?sortBy=name&sortOrder=desc&pageSize=2&page=1"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let page: serde_json::Value = res.json().await.unwrap();
    assert_eq!(names(&page), vec!["John Doe", "Jane Smith"]);
    assert_eq!(page["pagination"]["totalUsers"], 4);
    assert_eq!(page["pagination"]["totalPages"], 2);
    assert_eq!(page["pagination"]["hasNextPage"], true);
    assert_eq!(page["pagination"]["hasPreviousPage"], false);
    assert_eq!(page["sorting"], json!({ "sortBy": "name", "sortOrder": "desc" }));

    // Email taken by another record
    let res = client
        .put(srv.url("/users/4"))
        .bearer_auth(TOKEN)
        .json(&json!({ "name": "Ann Lee", "email": "jane.smith@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "conflict");

    // Own email in a different case is fine.
    let res = client
        .put(srv.url("/users/4"))
        .bearer_auth(TOKEN)
        .json(&json!({ "name": "Ann B. Lee", "email": "ANN@x.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["id"], 4);
    assert_eq!(updated["name"], "Ann B. Lee");

    // Delete, then it is gone.
    let res = client
        .delete(srv.url("/users/4"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await.unwrap().is_empty());

    let res = client
        .get(srv.url("/users/4"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_listing_parameters_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for query in [
        "page=0",
        "pageSize=0",
        "pageSize=101",
        "page=abc",
        "sortBy=age",
        "sortOrder=sideways",
    ] {
        let res = client
            .get(srv.url(&format!("/users?{query}")))
            .bearer_auth(TOKEN)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{query}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "invalid_argument", "{query}");
    }
}

#[tokio::test]
async fn filters_and_out_of_range_pages() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url("/users?nameFilter=%20JA%20&emailFilter=example"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    let page: serde_json::Value = res.json().await.unwrap();
    assert_eq!(names(&page), vec!["Jane Smith"]);
    assert_eq!(page["filters"]["nameFilter"], "JA");

    let res = client
        .get(srv.url("/users?page=9"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let page: serde_json::Value = res.json().await.unwrap();
    assert!(names(&page).is_empty());
    assert_eq!(page["pagination"]["hasPreviousPage"], true);
}

#[tokio::test]
async fn create_validation_failures() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/users"))
        .bearer_auth(TOKEN)
        .json(&json!({ "name": "R2D2", "email": "not-an-email" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_failed");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "email"]);

    // Missing body
    let res = client
        .post(srv.url("/users"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "User data is required.");

    // Case-insensitive duplicate
    let res = client
        .post(srv.url("/users"))
        .bearer_auth(TOKEN)
        .json(&json!({ "name": "John Again", "email": "JOHN.DOE@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn non_positive_ids_are_invalid_arguments() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for id in ["0", "-5", "abc"] {
        let res = client
            .delete(srv.url(&format!("/users/{id}")))
            .bearer_auth(TOKEN)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{id}");
    }
}

#[tokio::test]
async fn id_disclosure_can_be_turned_off() {
    let srv = TestServer::spawn_with(false).await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url("/users/99"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body.get("availableIds").is_none());
}

#[tokio::test]
async fn unknown_route_is_a_generic_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url("/orders"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "The requested resource was not found." }));
}

#[tokio::test]
async fn update_with_invalid_fields_leaves_record_untouched() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(srv.url("/users/1"))
        .bearer_auth(TOKEN)
        .json(&json!({ "name": "R2D2", "email": "bad" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_failed");
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);

    let res = client
        .get(srv.url("/users/1"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let user: serde_json::Value = res.json().await.unwrap();
    assert_eq!(user, json!({ "id": 1, "name": "John Doe", "email": "john.doe@example.com" }));
}

#[tokio::test]
async fn wrong_method_gets_a_json_error() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .patch(srv.url("/users/1"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "method_not_allowed");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn oversized_body_gets_a_json_error() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Just above axum's default 2 MiB body limit.
    let res = client
        .post(srv.url("/users"))
        .bearer_auth(TOKEN)
        .header("content-type", "application/json")
        .body(vec![b' '; 2 * 1024 * 1024 + 1])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "payload_too_large");
}

#[tokio::test]
async fn repeated_query_token_uses_first_value() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url(&format!("/users/2?token={TOKEN}&token={TOKEN}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
