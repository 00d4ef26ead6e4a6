use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, StoreBackend};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use service::store::MemoryVisitStore;
use tokio::net::TcpListener;
use uuid::Uuid;

use server::routes;
use server::state::AppState;

struct TestApp {
    base_url: String,
}

async fn serve(app: Router) -> anyhow::Result<TestApp> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

async fn start_server() -> anyhow::Result<TestApp> {
    let table = models::TableName::new("visits")?;
    let state = AppState::new(Arc::new(MemoryVisitStore::new()), table, "origin");
    serve(routes::build_router(state, routes::build_cors("origin"))).await
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_invoke_scenario_returns_envelopes() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let invoke = |op: &str| format!("{}/invoke/{}", app.base_url, op);

    let res = c.post(invoke("increment")).json(&json!({"id": "abc"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(
        body,
        json!({"statusCode": "200", "headers": {"Access-Control-Allow-Origin": "origin"}, "body": "1"})
    );

    let body = c.post(invoke("increment")).json(&json!({"id": "abc"})).send().await?
        .json::<serde_json::Value>().await?;
    assert_eq!(body["body"], "2");

    let body = c.post(invoke("get")).json(&json!({"id": "abc"})).send().await?
        .json::<serde_json::Value>().await?;
    assert_eq!(body["statusCode"], "200");
    assert_eq!(body["body"], json!({"id": "abc", "count": 2}));

    let body = c.post(invoke("delete")).json(&json!({"id": "abc"})).send().await?
        .json::<serde_json::Value>().await?;
    assert_eq!(body, json!({"statusCode": "200", "body": "Record abc deleted"}));

    let body = c.post(invoke("get")).json(&json!({"id": "abc"})).send().await?
        .json::<serde_json::Value>().await?;
    assert_eq!(body, json!({"statusCode": "404", "body": "Not found"}));
    Ok(())
}

#[tokio::test]
async fn e2e_invoke_without_id_is_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new()
        .post(format!("{}/invoke/increment", app.base_url))
        .json(&json!({"page": "abc"}))
        .send().await?;
    assert!(res.status().is_client_error());
    Ok(())
}

#[tokio::test]
async fn e2e_rest_routes_unwrap_envelope() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let url = format!("{}/visits/home", app.base_url);

    let res = c.get(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    // the CORS layer stamps the configured origin on every HTTP reply
    assert_eq!(res.headers()["access-control-allow-origin"], "origin");
    assert_eq!(res.text().await?, "Not found");

    let res = c.post(format!("{}/increment", url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-origin"], "origin");
    assert_eq!(res.text().await?, "1");

    let res = c.get(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"id": "home", "count": 1}));

    let res = c.delete(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "Record home deleted");

    let res = c.delete(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_file_backend_survives_restart() -> anyhow::Result<()> {
    let data_dir = std::env::temp_dir().join(format!("visit_e2e_{}", Uuid::new_v4()));
    let mut cfg = AppConfig::default();
    cfg.store.table_name = "visits".into();
    cfg.store.backend = StoreBackend::File;
    cfg.store.data_dir = data_dir.clone();

    let c = reqwest::Client::new();
    let first = serve(server::startup::build_app(&cfg).await?).await?;
    for _ in 0..3 {
        c.post(format!("{}/visits/blog/increment", first.base_url)).send().await?;
    }

    // a fresh app over the same directory sees the persisted count
    let second = serve(server::startup::build_app(&cfg).await?).await?;
    let res = c.get(format!("{}/visits/blog", second.base_url)).send().await?;
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"id": "blog", "count": 3}));

    let _ = tokio::fs::remove_dir_all(&data_dir).await;
    Ok(())
}
