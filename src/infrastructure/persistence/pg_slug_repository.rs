//! PostgreSQL implementation of the slug repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::{NewSlugRecord, Serve, SlugRecord};
use crate::domain::repositories::SlugRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_slug;

#[derive(FromRow)]
struct SlugRow {
    slug: String,
    primary_url: String,
    secondary_url: Option<String>,
    primary_remaining: i32,
    secondary_remaining: i32,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<SlugRow> for SlugRecord {
    fn from(row: SlugRow) -> Self {
        SlugRecord {
            slug: row.slug,
            primary_url: row.primary_url,
            secondary_url: row.secondary_url,
            primary_remaining: row.primary_remaining,
            secondary_remaining: row.secondary_remaining,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

/// PostgreSQL repository for slug records.
///
/// Uses bound parameters throughout. Resolution runs in a transaction that
/// holds a row lock between reading and writing the counters.
pub struct PgSlugRepository {
    pool: Arc<PgPool>,
}

impl PgSlugRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlugRepository for PgSlugRepository {
    async fn insert(&self, new_record: NewSlugRecord) -> Result<SlugRecord, AppError> {
        let result = sqlx::query_as::<_, SlugRow>(
            r#"
            INSERT INTO slugs (slug, primary_url, secondary_url, primary_remaining, secondary_remaining)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING slug, primary_url, secondary_url, primary_remaining, secondary_remaining,
                      created_at, expires_at
            "#,
        )
        .bind(&new_record.slug)
        .bind(&new_record.primary_url)
        .bind(&new_record.secondary_url)
        .bind(new_record.primary_remaining)
        .bind(new_record.secondary_remaining)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_unique_violation_on_slug(&e) => Err(AppError::conflict(
                "Slug already exists",
                json!({ "slug": new_record.slug }),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn upsert(&self, new_record: NewSlugRecord) -> Result<SlugRecord, AppError> {
        let row = sqlx::query_as::<_, SlugRow>(
            r#"
            INSERT INTO slugs (slug, primary_url, secondary_url, primary_remaining, secondary_remaining)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (slug) DO UPDATE SET
                primary_url = EXCLUDED.primary_url,
                secondary_url = EXCLUDED.secondary_url,
                primary_remaining = EXCLUDED.primary_remaining,
                secondary_remaining = EXCLUDED.secondary_remaining,
                created_at = NOW(),
                expires_at = NOW() + INTERVAL '10 years'
            RETURNING slug, primary_url, secondary_url, primary_remaining, secondary_remaining,
                      created_at, expires_at
            "#,
        )
        .bind(&new_record.slug)
        .bind(&new_record.primary_url)
        .bind(&new_record.secondary_url)
        .bind(new_record.primary_remaining)
        .bind(new_record.secondary_remaining)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<SlugRecord>, AppError> {
        let row = sqlx::query_as::<_, SlugRow>(
            r#"
            SELECT slug, primary_url, secondary_url, primary_remaining, secondary_remaining,
                   created_at, expires_at
            FROM slugs
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn take_serve(&self, slug: &str) -> Result<Option<Serve>, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, SlugRow>(
            r#"
            SELECT slug, primary_url, secondary_url, primary_remaining, secondary_remaining,
                   created_at, expires_at
            FROM slugs
            WHERE slug = $1
            FOR UPDATE
            "#,
        )
        .bind(slug)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        let mut record = SlugRecord::from(row);
        let serve = record.serve();

        if serve.route.is_mutating() {
            sqlx::query(
                r#"
                UPDATE slugs
                SET primary_remaining = $2, secondary_remaining = $3
                WHERE slug = $1
                "#,
            )
            .bind(slug)
            .bind(record.primary_remaining)
            .bind(record.secondary_remaining)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(
            slug,
            route = serve.route.as_str(),
            primary_remaining = record.primary_remaining,
            secondary_remaining = record.secondary_remaining,
            "Served slug"
        );

        Ok(Some(serve))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
