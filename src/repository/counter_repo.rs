use async_trait::async_trait;
use bson::doc;
use chrono::NaiveDate;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::Database;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::repository::repository_error::{RepositoryError, RepositoryResult};

/// One counter document per calendar day, keyed by the ISO date.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Counter {
    #[serde(rename = "_id")]
    id: String,
    seq: i64,
}

/// Allocates per-day quotation sequence numbers.
///
/// The increment runs as a single `find_one_and_update` with upsert, which
/// MongoDB executes atomically. Concurrent creations therefore always receive
/// distinct, strictly increasing sequence numbers. This replaces counting
/// today's quotations in memory, which could hand out duplicates under
/// simultaneous creation.
#[async_trait]
pub trait CounterRepository: Send + Sync {
    async fn next_sequence(&self, date: NaiveDate) -> RepositoryResult<u32>;
}

pub struct MongoCounterRepository {
    collection: mongodb::Collection<Counter>,
}

impl MongoCounterRepository {
    pub fn new(db: &Database) -> Self {
        MongoCounterRepository {
            collection: db.collection::<Counter>("counters"),
        }
    }
}

#[async_trait]
impl CounterRepository for MongoCounterRepository {
    #[tracing::instrument(skip(self), fields(date = %date))]
    async fn next_sequence(&self, date: NaiveDate) -> RepositoryResult<u32> {
        let key = format!("quotation-{}", date.format("%Y-%m-%d"));
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();
        let counter = self
            .collection
            .find_one_and_update(
                doc! { "_id": &key },
                doc! { "$inc": { "seq": 1_i64 } },
                options,
            )
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to allocate sequence: {}", e)))?
            .ok_or_else(|| {
                RepositoryError::database("Upserted counter did not return a document".to_string())
            })?;

        info!(key = %key, seq = counter.seq, "Allocated quotation sequence");
        u32::try_from(counter.seq)
            .map_err(|_| RepositoryError::database(format!("Counter overflow for {}", key)))
    }
}
