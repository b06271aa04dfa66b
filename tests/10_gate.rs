mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    middleware::from_fn,
    routing::any,
    Router,
};

use xc_team_api::middleware::cors_middleware;

fn assert_cors(response: &axum::response::Response) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, PUT, DELETE, OPTIONS");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type, Authorization");
}

#[tokio::test]
async fn options_is_answered_without_reaching_the_handler() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let probe = Router::new()
        .route(
            "/api/athletes",
            any(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    StatusCode::IM_A_TEAPOT
                }
            }),
        )
        .layer(from_fn(cors_middleware));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/athletes")
        .body(Body::empty())
        .unwrap();
    let response = common::send(probe.clone(), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    let request = Request::get("/api/athletes").body(Body::empty()).unwrap();
    let response = common::send(probe, request).await;
    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    assert_cors(&response);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn options_on_any_path_is_ok() {
    let router = common::offline_router(&common::frontend_fixture("options"));
    for path in ["/api/meets", "/api/login", "/nowhere"] {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri(path)
            .body(Body::empty())
            .unwrap();
        let response = common::send(router.clone(), request).await;
        assert_eq!(response.status(), StatusCode::OK, "OPTIONS {}", path);
        assert_cors(&response);
    }
}

#[tokio::test]
async fn write_without_token_is_rejected_with_cors_headers() {
    let router = common::offline_router(&common::frontend_fixture("no-token"));
    let request = Request::post("/api/athletes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"Ada","grade":11}"#))
        .unwrap();

    let response = common::send(router, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_cors(&response);
    assert_eq!(common::body_json(response).await, serde_json::json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn every_token_failure_looks_the_same() {
    let router = common::offline_router(&common::frontend_fixture("bad-token"));
    let expired = xc_team_api::auth::TokenAuthority::new(&common::security())
        .issue_at(common::ADMIN_USERNAME, chrono::Utc::now() - chrono::Duration::hours(48));

    let cases = [
        "Bearer garbage".to_string(),
        "Bearer ".to_string(),
        format!("Token {}", common::admin_token()),
        format!("Bearer {}", expired),
        format!("Bearer {}x", common::admin_token()),
    ];

    for authorization in cases {
        for method in [Method::POST, Method::PUT, Method::DELETE] {
            let request = Request::builder()
                .method(method.clone())
                .uri("/api/meets?id=1")
                .header(header::AUTHORIZATION, authorization.as_str())
                .body(Body::empty())
                .unwrap();
            let response = common::send(router.clone(), request).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{} with {:?}", method, authorization);
            assert_eq!(common::body_json(response).await["error"], "Unauthorized");
        }
    }
}

#[tokio::test]
async fn reads_ignore_the_authorization_header() {
    let router = common::offline_router(&common::frontend_fixture("open-reads"));

    for authorization in [None, Some("Bearer garbage"), Some("Basic YWRtaW46YWRtaW4=")] {
        let mut request = Request::get("/api/meets");
        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }
        let response = common::send(router.clone(), request.body(Body::empty()).unwrap()).await;

        // The offline pool makes the list handler fail, which proves it ran
        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "GET with {:?}",
            authorization
        );
        assert_cors(&response);
    }
}

#[tokio::test]
async fn valid_token_reaches_request_validation() {
    let router = common::offline_router(&common::frontend_fixture("valid-token"));
    let bearer = format!("Bearer {}", common::admin_token());

    // name is required, so the body is rejected before the datastore is touched
    let request = Request::post("/api/athletes")
        .header(header::AUTHORIZATION, bearer.as_str())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"grade":11}"#))
        .unwrap();
    let response = common::send(router.clone(), request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = Request::delete("/api/coaches")
        .header(header::AUTHORIZATION, bearer.as_str())
        .body(Body::empty())
        .unwrap();
    let response = common::send(router.clone(), request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::body_json(response).await["error"], "ID parameter required");

    let request = Request::put("/api/coaches?id=seven")
        .header(header::AUTHORIZATION, bearer.as_str())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"Pat","title":"Head Coach"}"#))
        .unwrap();
    let response = common::send(router, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::body_json(response).await["error"], "Invalid ID format");
}

#[tokio::test]
async fn unsupported_methods_are_405() {
    let router = common::offline_router(&common::frontend_fixture("405"));
    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/api/athletes")
        .header(header::AUTHORIZATION, format!("Bearer {}", common::admin_token()))
        .body(Body::empty())
        .unwrap();

    let response = common::send(router, request).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors(&response);
}

#[tokio::test]
async fn malformed_results_filter_is_rejected() {
    let router = common::offline_router(&common::frontend_fixture("filter"));
    let request = Request::get("/api/results?meetId=abc").body(Body::empty()).unwrap();

    let response = common::send(router, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_paths_serve_the_frontend() {
    let dir = common::frontend_fixture("spa");
    std::fs::write(dir.join("app.js"), "console.log('xc');").unwrap();
    let router = common::offline_router(&dir);

    let response = common::send(router.clone(), Request::get("/roster/varsity").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(common::body_text(response).await.contains("<title>XC Team</title>"));

    let response = common::send(router, Request::get("/app.js").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_text(response).await, "console.log('xc');");
}

#[tokio::test]
async fn health_reports_unreachable_datastore() {
    let router = common::offline_router(&common::frontend_fixture("health"));

    let response = common::send(router, Request::get("/health").body(Body::empty()).unwrap()).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(common::body_json(response).await["status"], "unhealthy");
}

#[tokio::test]
async fn body_without_json_content_type_is_400() {
    let router = common::offline_router(&common::frontend_fixture("content-type"));
    let request = Request::post("/api/coaches")
        .header(header::AUTHORIZATION, format!("Bearer {}", common::admin_token()))
        .body(Body::from(r#"{"name":"Pat","title":"Head Coach"}"#))
        .unwrap();

    let response = common::send(router, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(common::body_json(response).await["error"].is_string());
}
