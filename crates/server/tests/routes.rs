use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use models::TableName;
use service::errors::ServiceError;
use service::store::{
    DeleteItemOutput, DeleteItemRequest, GetItemOutput, GetItemRequest, PutItemOutput,
    PutItemRequest, VisitStore,
};
use tower::ServiceExt;

use server::routes;
use server::state::AppState;

struct Throttled;

#[async_trait]
impl VisitStore for Throttled {
    async fn get_item(&self, _: GetItemRequest) -> Result<GetItemOutput, ServiceError> {
        Err(ServiceError::Store("ProvisionedThroughputExceededException".into()))
    }
    async fn put_item(&self, _: PutItemRequest) -> Result<PutItemOutput, ServiceError> {
        Err(ServiceError::Store("ProvisionedThroughputExceededException".into()))
    }
    async fn delete_item(&self, _: DeleteItemRequest) -> Result<DeleteItemOutput, ServiceError> {
        Err(ServiceError::Store("ProvisionedThroughputExceededException".into()))
    }
}

fn build_app_with_origin(allow_origin: &str) -> Router {
    let state = AppState::new(Arc::new(Throttled), TableName::new("visits").unwrap(), allow_origin);
    routes::build_router(state, routes::build_cors(allow_origin))
}

fn build_app() -> Router {
    build_app_with_origin("origin")
}

fn preflight(uri: &str, method: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri(uri)
        .header("origin", "https://example.com")
        .header("access-control-request-method", method)
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn store_failure_is_opaque_500() -> anyhow::Result<()> {
    for (method, uri, body) in [
        (Method::GET, "/visits/abc", Body::empty()),
        (Method::POST, "/visits/abc/increment", Body::empty()),
        (Method::DELETE, "/visits/abc", Body::empty()),
        (Method::POST, "/invoke/get", Body::from(r#"{"id":"abc"}"#)),
    ] {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)?;
        let res = build_app().oneshot(req).await?;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        let bytes = to_bytes(res.into_body(), usize::MAX).await?;
        let json: serde_json::Value = serde_json::from_slice(&bytes)?;
        assert_eq!(json["error"], "internal error");
    }
    Ok(())
}

#[tokio::test]
async fn preflight_allows_configured_origin_and_methods() -> anyhow::Result<()> {
    let res = build_app().oneshot(preflight("/visits/abc", "DELETE")).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-origin"], "origin");
    let methods = res.headers()["access-control-allow-methods"].to_str()?;
    assert!(methods.contains("DELETE"));
    let headers = res.headers()["access-control-allow-headers"].to_str()?;
    assert!(headers.contains("content-type"));
    Ok(())
}

#[tokio::test]
async fn preflight_for_json_invoke_with_wildcard_origin() -> anyhow::Result<()> {
    let res = build_app_with_origin("*").oneshot(preflight("/invoke/increment", "POST")).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    Ok(())
}
