//! In-process implementation of the slug repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;

use crate::domain::entities::{NewSlugRecord, Serve, SlugRecord};
use crate::domain::repositories::SlugRepository;
use crate::error::AppError;

/// Slug storage backed by a concurrent hash map.
///
/// Selected with `DATABASE_URL=memory://`. Nothing survives a restart.
/// Each resolution runs while holding the shard write guard for its key, so
/// hits on the same slug are serialised and hits on different slugs are not.
#[derive(Default)]
pub struct MemorySlugRepository {
    records: DashMap<String, SlugRecord>,
}

impl MemorySlugRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl SlugRepository for MemorySlugRepository {
    async fn insert(&self, new_record: NewSlugRecord) -> Result<SlugRecord, AppError> {
        match self.records.entry(new_record.slug.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Slug already exists",
                json!({ "slug": new_record.slug }),
            )),
            Entry::Vacant(vacant) => {
                let record = SlugRecord::from_new(new_record, Utc::now());
                vacant.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn upsert(&self, new_record: NewSlugRecord) -> Result<SlugRecord, AppError> {
        let record = SlugRecord::from_new(new_record, Utc::now());
        self.records.insert(record.slug.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<SlugRecord>, AppError> {
        Ok(self.records.get(slug).map(|r| r.value().clone()))
    }

    async fn take_serve(&self, slug: &str) -> Result<Option<Serve>, AppError> {
        Ok(self.records.get_mut(slug).map(|mut record| record.serve()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
