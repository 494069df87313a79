//! Concurrent mutations against a real file.

use std::sync::Arc;

use serde_json::json;
use service::books::{BookService, NewBook};
use service::storage::{BookStore, JsonFileBookStore};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_unique_ids() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("books.json");
    let svc = Arc::new(BookService::new(Arc::new(JsonFileBookStore::new(&path))));

    let mut handles = Vec::new();
    for i in 0..16 {
        let svc = Arc::clone(&svc);
        handles.push(tokio::spawn(async move {
            svc.create(NewBook { title: format!("book {i}"), author: "a".into(), available: i % 2 == 0 })
                .await
        }));
    }
    for h in handles {
        h.await??;
    }

    let books = JsonFileBookStore::new(&path).load().await?;
    let mut ids: Vec<i64> = books.iter().map(|b| b.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=16).collect::<Vec<i64>>());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_are_not_lost() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("books.json");
    let svc = Arc::new(BookService::new(Arc::new(JsonFileBookStore::new(&path))));
    svc.create(NewBook { title: "t".into(), author: "a".into(), available: true }).await?;
    svc.create(NewBook { title: "t".into(), author: "a".into(), available: true }).await?;

    let first = json!({"title": "first"});
    let second = json!({"title": "second"});
    let a = {
        let svc = Arc::clone(&svc);
        tokio::spawn(async move { svc.update(1, &first).await })
    };
    let b = {
        let svc = Arc::clone(&svc);
        tokio::spawn(async move { svc.update(2, &second).await })
    };
    a.await??;
    b.await??;

    let text = std::fs::read_to_string(&path)?;
    let books: Vec<service::books::Book> = serde_json::from_str(&text)?;
    assert_eq!(books[0].title, "first");
    assert_eq!(books[1].title, "second");
    Ok(())
}
