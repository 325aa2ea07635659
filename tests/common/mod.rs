#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use split_shortener::application::services::{CreateSlug, DuplicatePolicy, SlugRegistry};
use split_shortener::infrastructure::cache::NullCache;
use split_shortener::infrastructure::persistence::{MemorySlugRepository, PgSlugRepository};
use split_shortener::state::AppState;
use split_shortener::utils::slug_generator::{SlugGenerator, SlugLength};

pub fn create_test_state() -> AppState {
    create_test_state_with_policy(DuplicatePolicy::Reject)
}

pub fn create_test_state_with_policy(policy: DuplicatePolicy) -> AppState {
    create_state_over(Arc::new(MemorySlugRepository::new()), policy)
}

pub fn create_state_over(
    repository: Arc<MemorySlugRepository>,
    policy: DuplicatePolicy,
) -> AppState {
    let registry = SlugRegistry::new(
        repository,
        Arc::new(NullCache::new()),
        SlugGenerator::new(SlugLength::Eight),
        policy,
    );

    AppState::new(Arc::new(registry))
}

pub fn create_pg_state(pool: PgPool) -> AppState {
    let registry = SlugRegistry::new(
        Arc::new(PgSlugRepository::new(Arc::new(pool))),
        Arc::new(NullCache::new()),
        SlugGenerator::new(SlugLength::Eight),
        DuplicatePolicy::Reject,
    );

    AppState::new(Arc::new(registry))
}

pub async fn create_test_slug(
    state: &AppState,
    primary: &str,
    primary_count: i64,
    secondary: Option<&str>,
    secondary_count: i64,
) -> String {
    state
        .registry
        .create(CreateSlug {
            primary_url: primary.to_string(),
            secondary_url: secondary.map(str::to_string),
            primary_remaining: primary_count,
            secondary_remaining: secondary_count,
        })
        .await
        .unwrap()
        .slug
}

pub async fn counters(pool: &PgPool, slug: &str) -> (i32, i32) {
    sqlx::query_as("SELECT primary_remaining, secondary_remaining FROM slugs WHERE slug = $1")
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}
