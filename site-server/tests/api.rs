//! HTTP surface tests against the full router with an in-memory database.
//! Run: cargo test -p site-server --test api

use axum::body::Body;
use http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use site_server::auth::JwtConfig;
use site_server::core::{build_router, Config};
use site_server::db::DbService;
use site_server::ServerState;
use tower::Service;

async fn test_app() -> (axum::Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        work_dir: dir.path().to_string_lossy().to_string(),
        http_port: 0,
        jwt: JwtConfig {
            secret: "integration-test-secret-key-0123456789".to_string(),
            expiration_minutes: 60,
            issuer: "site-server".to_string(),
            audience: "site-admin".to_string(),
        },
        environment: "development".to_string(),
        admin_username: "admin".to_string(),
        admin_password: Some("admin-password".to_string()),
        log_dir: None,
    };

    let db = DbService::memory().await.unwrap().db;
    let state = ServerState::with_db(config, db).await.unwrap();
    (build_router(state), dir)
}

async fn send(app: &mut axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.call(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: Method, path: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn login(app: &mut axum::Router) -> String {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/auth/login",
            None,
            json!({"username": "admin", "password": "admin-password"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let (mut app, _dir) = test_app().await;
    let (status, body) = send(&mut app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn admin_routes_reject_missing_and_bad_tokens() {
    let (mut app, _dir) = test_app().await;

    let (status, body) = send(
        &mut app,
        json_request(Method::POST, "/api/categories", None, json!({"name": "Tea"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");

    let (status, body) = send(
        &mut app,
        json_request(
            Method::POST,
            "/api/categories",
            Some("not-a-token"),
            json!({"name": "Tea"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3002");
}

#[tokio::test]
async fn login_rejects_bad_credentials_uniformly() {
    let (mut app, _dir) = test_app().await;

    for (user, pass) in [("admin", "wrong"), ("ghost", "admin-password")] {
        let (status, body) = send(
            &mut app,
            json_request(
                Method::POST,
                "/api/auth/login",
                None,
                json!({"username": user, "password": pass}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid username or password");
    }
}

#[tokio::test]
async fn menu_crud_and_filtering() {
    let (mut app, _dir) = test_app().await;
    let token = login(&mut app).await;

    // Categories
    let (status, rice) = send(
        &mut app,
        json_request(Method::POST, "/api/categories", Some(&token), json!({"name": "Rice"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rice_id = rice["id"].as_str().unwrap().to_string();

    let (_, tea) = send(
        &mut app,
        json_request(Method::POST, "/api/categories", Some(&token), json!({"name": "Tea"})),
    )
    .await;
    let tea_id = tea["id"].as_str().unwrap().to_string();

    // Create requires at least one category
    let (status, body) = send(
        &mut app,
        json_request(
            Method::POST,
            "/api/menu",
            Some(&token),
            json!({"name": "Orphan", "price": "5.00"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");

    // Create items
    let (status, biryani) = send(
        &mut app,
        json_request(
            Method::POST,
            "/api/menu",
            Some(&token),
            json!({
                "name": "Veg Biryani",
                "description": "Fragrant rice with vegetables",
                "price": "12.00",
                "category_ids": [rice_id],
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(biryani["category_names"], json!(["Rice"]));
    assert_eq!(biryani["is_today_special"], false);

    let (status, _chai) = send(
        &mut app,
        json_request(
            Method::POST,
            "/api/menu",
            Some(&token),
            json!({
                "name": "Masala Chai",
                "description": "Spiced tea with milk",
                "price": "2.50",
                "category_ids": [tea_id],
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Public list
    let (status, all) = send(&mut app, get("/api/menu")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    // Category filter
    let (_, rice_only) = send(
        &mut app,
        get(&format!("/api/menu?category={}", urlencode(&rice_id))),
    )
    .await;
    assert_eq!(rice_only.as_array().unwrap().len(), 1);
    assert_eq!(rice_only[0]["name"], "Veg Biryani");

    // Search matches description, case-insensitive
    let (_, searched) = send(&mut app, get("/api/menu?search=SPICED")).await;
    assert_eq!(searched.as_array().unwrap().len(), 1);
    assert_eq!(searched[0]["name"], "Masala Chai");

    // Combined filters with no match
    let (_, none) = send(
        &mut app,
        get(&format!("/api/menu?category={}&search=chai", urlencode(&rice_id))),
    )
    .await;
    assert_eq!(none.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn special_toggle_via_http() {
    let (mut app, _dir) = test_app().await;
    let token = login(&mut app).await;

    let (_, cat) = send(
        &mut app,
        json_request(Method::POST, "/api/categories", Some(&token), json!({"name": "Mains"})),
    )
    .await;
    let (_, item) = send(
        &mut app,
        json_request(
            Method::POST,
            "/api/menu",
            Some(&token),
            json!({"name": "Thali", "price": "15.00", "category_ids": [cat["id"]]}),
        ),
    )
    .await;
    let item_id = item["id"].as_str().unwrap().to_string();
    let special_path = format!("/api/menu/{}/special", urlencode(&item_id));

    // No specials yet
    let (_, specials) = send(&mut app, get("/api/specials")).await;
    assert_eq!(specials.as_array().unwrap().len(), 0);

    // Mark
    let (status, marked) = send(
        &mut app,
        json_request(Method::POST, &special_path, Some(&token), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(marked["is_today_special"], true);
    assert!(marked["special_remaining"].as_str().unwrap().ends_with("remaining"));

    let (_, specials) = send(&mut app, get("/api/specials")).await;
    assert_eq!(specials.as_array().unwrap().len(), 1);

    // Unmark restores null
    let (status, cleared) = send(
        &mut app,
        json_request(Method::DELETE, &special_path, Some(&token), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["is_today_special"], false);
    assert!(cleared["today_special_at"].is_null());
}

#[tokio::test]
async fn settings_roundtrip() {
    let (mut app, _dir) = test_app().await;
    let token = login(&mut app).await;

    // Public read of the seeded singleton
    let (status, initial) = send(&mut app, get("/api/settings")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(initial["is_closed"], false);

    // Unauthenticated write is rejected
    let (status, _) = send(
        &mut app,
        json_request(Method::PUT, "/api/settings", None, json!({"is_closed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Admin write returns the post-commit row
    let (status, updated) = send(
        &mut app,
        json_request(
            Method::PUT,
            "/api/settings",
            Some(&token),
            json!({"is_closed": true, "reopening_date": "2025-07-01"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["is_closed"], true);
    assert_eq!(updated["reopening_date"], "2025-07-01");

    let (_, reread) = send(&mut app, get("/api/settings")).await;
    assert_eq!(reread["is_closed"], true);
    assert_eq!(reread["reopening_date"], "2025-07-01");
}

#[tokio::test]
async fn reviews_validate_rating() {
    let (mut app, _dir) = test_app().await;
    let token = login(&mut app).await;

    let (status, body) = send(
        &mut app,
        json_request(
            Method::POST,
            "/api/reviews",
            Some(&token),
            json!({"customer_name": "Asha", "rating": 6}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");

    let (status, review) = send(
        &mut app,
        json_request(
            Method::POST,
            "/api/reviews",
            Some(&token),
            json!({"customer_name": "Asha", "rating": 5, "comment": "Lovely dosa"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(review["rating"], 5);

    let (_, listed) = send(&mut app, get("/api/reviews")).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

fn multipart_upload(path: &str, token: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "------------------------a1b2c3d4";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn uploads_between_two_and_five_megabytes_reach_validation() {
    let (mut app, _dir) = test_app().await;
    let token = login(&mut app).await;

    // 3 MB of garbage sails past the request-body limit and is rejected by
    // the image check, not by a multipart length error
    let payload = vec![0u8; 3 * 1024 * 1024];
    for path in ["/api/upload", "/api/gallery"] {
        let (status, body) = send(
            &mut app,
            multipart_upload(path, &token, "big.png", &payload),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["message"].as_str().unwrap();
        assert!(
            message.starts_with("Invalid image file"),
            "unexpected rejection for {path}: {message}"
        );
    }

    // Just over the file cap still gets the size error, not a body-limit one
    let payload = vec![0u8; 5 * 1024 * 1024 + 1];
    let (status, body) = send(
        &mut app,
        multipart_upload("/api/upload", &token, "huge.png", &payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("File too large"));
}

#[tokio::test]
async fn me_reflects_the_token() {
    let (mut app, _dir) = test_app().await;
    let token = login(&mut app).await;

    let mut req = get("/api/auth/me");
    req.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    let (status, body) = send(&mut app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "admin");
}

/// Record ids contain a ':' which must be escaped in query strings
fn urlencode(s: &str) -> String {
    s.replace(':', "%3A")
}
