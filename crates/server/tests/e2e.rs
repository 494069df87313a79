//! End-to-end over a real TCP listener.

use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use server::startup::build_app;

struct TestApp {
    base_url: String,
    _dir: tempfile::TempDir,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let dir = tempfile::tempdir()?;
    let app = build_app(&dir.path().join("books.json"));
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url, _dir: dir })
}

#[tokio::test]
async fn e2e_book_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c
        .post(format!("{}/books", app.base_url))
        .json(&json!({"title": "Dune", "author": "Herbert", "available": true}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert_eq!(created["id"], 1);

    let res = c
        .put(format!("{}/books/1", app.base_url))
        .json(&json!({"available": false}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(format!("{}/books/available", app.base_url)).send().await?;
    assert_eq!(res.json::<Value>().await?, json!([]));

    let res = c.delete(format!("{}/books/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["available"], false);

    let res = c.get(format!("{}/books", app.base_url)).send().await?;
    assert_eq!(res.json::<Value>().await?, json!([]));
    Ok(())
}
