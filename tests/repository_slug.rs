mod common;

use sqlx::PgPool;
use split_shortener::domain::entities::{NewSlugRecord, Route};
use split_shortener::domain::repositories::SlugRepository;
use split_shortener::error::AppError;
use split_shortener::infrastructure::persistence::PgSlugRepository;
use std::sync::Arc;

fn new_record(slug: &str, primary: i32, secondary_url: Option<&str>, secondary: i32) -> NewSlugRecord {
    NewSlugRecord {
        slug: slug.to_string(),
        primary_url: "https://good.example".to_string(),
        secondary_url: secondary_url.map(str::to_string),
        primary_remaining: primary,
        secondary_remaining: secondary,
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_insert_and_find(pool: PgPool) {
    let repo = PgSlugRepository::new(Arc::new(pool));

    let created = repo
        .insert(new_record("abcd1234", 2, Some("https://bad.example"), 1))
        .await
        .unwrap();

    assert_eq!(created.slug, "abcd1234");
    assert!(created.expires_at > created.created_at);

    let found = repo.find_by_slug("abcd1234").await.unwrap().unwrap();
    assert_eq!(found.primary_remaining, 2);
    assert_eq!(found.secondary_url.as_deref(), Some("https://bad.example"));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_find_missing(pool: PgPool) {
    let repo = PgSlugRepository::new(Arc::new(pool));

    assert!(repo.find_by_slug("nope0000").await.unwrap().is_none());
    assert!(repo.take_serve("nope0000").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_insert_duplicate_conflicts(pool: PgPool) {
    let repo = PgSlugRepository::new(Arc::new(pool));

    repo.insert(new_record("dup00001", 1, None, 0)).await.unwrap();
    let result = repo.insert(new_record("dup00001", 5, None, 0)).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_upsert_resets_counters(pool: PgPool) {
    let repo = PgSlugRepository::new(Arc::new(pool.clone()));

    repo.insert(new_record("up000001", 1, None, 0)).await.unwrap();
    repo.take_serve("up000001").await.unwrap();
    assert_eq!(common::counters(&pool, "up000001").await, (0, 0));

    repo.upsert(new_record("up000001", 7, Some("https://bad.example"), 3))
        .await
        .unwrap();

    assert_eq!(common::counters(&pool, "up000001").await, (7, 3));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_take_serve_sequence(pool: PgPool) {
    let repo = PgSlugRepository::new(Arc::new(pool.clone()));
    repo.insert(new_record("seq00001", 1, Some("https://bad.example"), 1))
        .await
        .unwrap();

    let first = repo.take_serve("seq00001").await.unwrap().unwrap();
    let second = repo.take_serve("seq00001").await.unwrap().unwrap();
    let third = repo.take_serve("seq00001").await.unwrap().unwrap();

    assert_eq!(first.route, Route::Primary);
    assert_eq!(second.route, Route::Secondary);
    assert_eq!(second.destination, "https://bad.example");
    assert_eq!(third.route, Route::Fallback);
    assert_eq!(third.destination, "https://good.example");
    assert_eq!(common::counters(&pool, "seq00001").await, (0, 0));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_take_serve_concurrent(pool: PgPool) {
    let repo = Arc::new(PgSlugRepository::new(Arc::new(pool.clone())));
    repo.insert(new_record("con00001", 10, Some("https://bad.example"), 5))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..30 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.take_serve("con00001").await.unwrap().unwrap().route
        }));
    }

    let mut routes = Vec::new();
    for handle in handles {
        routes.push(handle.await.unwrap());
    }

    assert_eq!(routes.iter().filter(|r| **r == Route::Primary).count(), 10);
    assert_eq!(routes.iter().filter(|r| **r == Route::Secondary).count(), 5);
    assert_eq!(routes.iter().filter(|r| **r == Route::Fallback).count(), 15);
    assert_eq!(common::counters(&pool, "con00001").await, (0, 0));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_registry_over_postgres(pool: PgPool) {
    let state = common::create_pg_state(pool);

    let slug = common::create_test_slug(&state, "https://example.com", 1, None, 0).await;
    assert_eq!(slug, "100680ad");

    assert_eq!(state.registry.resolve(&slug).await.unwrap(), "https://example.com");
    assert_eq!(state.registry.resolve(&slug).await.unwrap(), "https://example.com");
    assert!(state.registry.check_storage().await.is_ok());
}
