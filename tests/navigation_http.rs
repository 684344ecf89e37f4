#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use salonnav::{
    api,
    auth::AuthClient,
    navigation::{roles::default_permissions, Role},
    store::LayoutStore,
};
use secrecy::SecretString;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower::ServiceExt;

const SERVICE_KEY: &str = "service-key";
const ORG_ID: &str = "0190f5d6-8a0b-7c3e-9d4f-000000000001";

fn grants_for(user: &str, roles: &[Role]) -> Value {
    let permissions: Vec<&str> = roles
        .iter()
        .flat_map(|role| default_permissions(*role).iter().map(|p| p.as_str()))
        .collect();
    json!({
        "user_id": user,
        "organization_id": ORG_ID,
        "roles": roles.iter().map(|role| role.as_str()).collect::<Vec<_>>(),
        "permissions": permissions,
        "platform_roles": [],
    })
}

async fn stub_grants(headers: HeaderMap) -> Response {
    if headers.get("apikey").and_then(|v| v.to_str().ok()) != Some(SERVICE_KEY) {
        return StatusCode::FORBIDDEN.into_response();
    }
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let grants = match token {
        Some("stylist-token") => grants_for("0190f5d6-8a0b-7c3e-9d4f-00000000000a", &[Role::Stylist]),
        Some("admin-token") => grants_for("0190f5d6-8a0b-7c3e-9d4f-00000000000b", &[Role::Admin]),
        Some("bookkeeper-token") => {
            grants_for("0190f5d6-8a0b-7c3e-9d4f-00000000000c", &[Role::Bookkeeper])
        }
        _ => return StatusCode::UNAUTHORIZED.into_response(),
    };
    Json(grants).into_response()
}

/// Start the stub session service and return its base URL.
async fn spawn_auth_stub() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = Router::new().route("/v1/session/grants", get(stub_grants));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// App wired to the stub auth service and a database nobody listens on.
async fn test_app(service_key: &str) -> Router {
    let auth_url = spawn_auth_stub().await;
    let auth = AuthClient::new(&auth_url, SecretString::from(service_key)).unwrap();
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(300))
        .connect_lazy("postgres://salon@127.0.0.1:1/salon")
        .unwrap();

    api::app(
        LayoutStore::new(pool),
        Arc::new(auth),
        HeaderValue::from_static("http://localhost:3000"),
    )
}

async fn post_navigation(app: Router, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method("POST").uri("/v1/navigation");
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn section<'a>(body: &'a Value, id: &str) -> Option<&'a Value> {
    body["navigation"]["entries"]
        .as_array()?
        .iter()
        .find(|entry| entry["kind"] == "section" && entry["id"] == id)
}

fn section_ids(body: &Value) -> Vec<String> {
    body["navigation"]["entries"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry["id"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

fn item<'a>(section: &'a Value, href: &str) -> Option<&'a Value> {
    section["items"]
        .as_array()?
        .iter()
        .find(|item| item["href"] == href)
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = test_app(SERVICE_KEY).await;
    let (status, _) = post_navigation(app, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn rejected_token_is_unauthorized() {
    let app = test_app(SERVICE_KEY).await;
    let (status, _) = post_navigation(app, Some("forged"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn service_key_is_forwarded() {
    let app = test_app("wrong-key").await;
    let (status, _) = post_navigation(app, Some("stylist-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn stylist_sidebar_degrades_without_database() {
    let app = test_app(SERVICE_KEY).await;
    let (status, body) = post_navigation(app, Some("stylist-token"), None).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        section_ids(&body),
        vec!["main", "growth", "stats", "housekeeping", "gethelp"]
    );
    assert!(body.get("view_as").is_none());

    let main = section(&body, "main").unwrap();
    assert_eq!(item(main, "/dashboard").unwrap()["badge"], 0);

    // Onboarding progress failed to load: no shortcut, link stays.
    let housekeeping = section(&body, "housekeeping").unwrap();
    assert!(item(housekeeping, "/dashboard/onboarding").is_some());

    let stats = section(&body, "stats").unwrap();
    assert_eq!(item(stats, "/dashboard/stats").unwrap()["label"], "My Stats");
    assert!(item(stats, "/dashboard/my-clients").is_some());

    let help = section(&body, "gethelp").unwrap();
    assert_eq!(
        item(help, "/dashboard/assistant-schedule").unwrap()["label"],
        "Request An Assistant"
    );
}

#[tokio::test]
async fn bookkeeper_sees_only_ungated_links() {
    let app = test_app(SERVICE_KEY).await;
    let (status, body) = post_navigation(app, Some("bookkeeper-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(section_ids(&body), vec!["housekeeping", "gethelp"]);

    let help = section(&body, "gethelp").unwrap();
    assert_eq!(help["items"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn spanish_labels() {
    let app = test_app(SERVICE_KEY).await;
    let (status, body) =
        post_navigation(app, Some("stylist-token"), Some(json!({"locale": "es-MX"}))).await;
    assert_eq!(status, StatusCode::OK);

    let main = section(&body, "main").unwrap();
    assert_eq!(item(main, "/dashboard").unwrap()["label"], "Centro de Mando");
}

#[tokio::test]
async fn invalid_locale_is_rejected() {
    let app = test_app(SERVICE_KEY).await;
    let (status, _) =
        post_navigation(app, Some("stylist-token"), Some(json!({"locale": "<en>"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn view_as_requires_permission() {
    let app = test_app(SERVICE_KEY).await;
    let (status, _) = post_navigation(
        app,
        Some("stylist-token"),
        Some(json!({"view_as": {"role": "admin"}})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn view_as_unknown_role_is_bad_request() {
    let app = test_app(SERVICE_KEY).await;
    let (status, _) = post_navigation(
        app,
        Some("admin-token"),
        Some(json!({"view_as": {"role": "wizard"}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_previews_stylist() {
    let app = test_app(SERVICE_KEY).await;

    let (status, own) = post_navigation(app.clone(), Some("admin-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(section(&own, "manager").is_some());
    assert!(section(&own, "adminOnly").is_some());

    let (status, preview) = post_navigation(
        app,
        Some("admin-token"),
        Some(json!({"view_as": {"role": "stylist"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["view_as"], json!({"mode": "role", "role": "stylist"}));
    assert!(section(&preview, "manager").is_none());
    assert!(section(&preview, "adminOnly").is_none());
    assert_eq!(
        section_ids(&preview),
        vec!["main", "growth", "stats", "housekeeping", "gethelp"]
    );
}

#[tokio::test]
async fn malformed_view_as_is_bad_request() {
    let app = test_app(SERVICE_KEY).await;
    for body in [
        json!({"view_as": {"role": 5}}),
        json!({"view_as": "stylist"}),
        json!({"view_as": {"team": "front-desk"}}),
    ] {
        let (status, response) =
            post_navigation(app.clone(), Some("admin-token"), Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert!(response.get("navigation").is_none());
    }
}

#[tokio::test]
async fn truncated_or_untyped_body_is_bad_request() {
    let app = test_app(SERVICE_KEY).await;

    let truncated = Request::builder()
        .method("POST")
        .uri("/v1/navigation")
        .header(header::AUTHORIZATION, "Bearer admin-token")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"view_as":{"role":"stylist"}"#))
        .unwrap();
    let response = app.clone().oneshot(truncated).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let untyped = Request::builder()
        .method("POST")
        .uri("/v1/navigation")
        .header(header::AUTHORIZATION, "Bearer admin-token")
        .body(Body::from(r#"{"view_as":{"role":"stylist"}}"#))
        .unwrap();
    let response = app.oneshot(untyped).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn view_as_user_needs_the_database() {
    let app = test_app(SERVICE_KEY).await;
    let (status, _) = post_navigation(
        app,
        Some("admin-token"),
        Some(json!({"view_as": {"user_id": "0190f5d6-8a0b-7c3e-9d4f-00000000000a"}})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn defaults_are_public() {
    let app = test_app(SERVICE_KEY).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/navigation/defaults")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["section_order"][0], "main");
    assert_eq!(body["management_sub_groups"][0]["id"], "team");
}

#[tokio::test]
async fn health_reports_database_down() {
    let app = test_app(SERVICE_KEY).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "health-check-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.headers().contains_key("x-app"));
    assert_eq!(
        response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("health-check-1")
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["database"], "error");
    assert_eq!(body["name"], "salonnav");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = test_app(SERVICE_KEY).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["paths"]["/v1/navigation"].is_object());
}
