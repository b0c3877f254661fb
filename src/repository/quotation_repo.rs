use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::Database;
use tracing::{error, info};

use crate::model::quotation::{Quotation, QuotationStatus};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait QuotationRepository: Send + Sync {
    async fn create(&self, quotation: Quotation) -> RepositoryResult<Quotation>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Quotation>;
    async fn update(&self, id: ObjectId, quotation: Quotation) -> RepositoryResult<Quotation>;
    async fn update_status(
        &self,
        id: ObjectId,
        from: QuotationStatus,
        to: QuotationStatus,
    ) -> RepositoryResult<Quotation>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    async fn list(&self, page: u32, limit: u32, q: Option<&str>) -> RepositoryResult<Vec<Quotation>>;
    async fn list_all(&self) -> RepositoryResult<Vec<Quotation>>;
    async fn list_by_status(&self, status: QuotationStatus) -> RepositoryResult<Vec<Quotation>>;
    async fn recent(&self, limit: u32) -> RepositoryResult<Vec<Quotation>>;
    async fn count(&self, q: Option<&str>) -> RepositoryResult<u64>;
    async fn count_by_status(&self, status: QuotationStatus) -> RepositoryResult<u64>;
}

pub struct MongoQuotationRepository {
    collection: mongodb::Collection<Quotation>,
}

impl MongoQuotationRepository {
    pub fn new(db: &Database) -> Self {
        MongoQuotationRepository {
            collection: db.collection::<Quotation>("quotations"),
        }
    }

    /// Case-insensitive search over the generated number and the notes.
    fn search_filter(q: Option<&str>) -> Option<Document> {
        q.filter(|s| !s.trim().is_empty()).map(|s| {
            let pattern = super::client_repo::regex_escape(s.trim());
            doc! {
                "$or": [
                    { "number": { "$regex": &pattern, "$options": "i" } },
                    { "notes": { "$regex": &pattern, "$options": "i" } },
                ]
            }
        })
    }

    async fn collect(&self, filter: Option<Document>, options: Option<FindOptions>) -> RepositoryResult<Vec<Quotation>> {
        let cursor = self
            .collection
            .find(filter, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list quotations: {}", e)))?;
        cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::serialization(format!("Failed to deserialize quotation: {}", e)))
    }
}

#[async_trait]
impl QuotationRepository for MongoQuotationRepository {
    #[tracing::instrument(skip(self, quotation), fields(number = %quotation.number))]
    async fn create(&self, quotation: Quotation) -> RepositoryResult<Quotation> {
        info!("Creating new quotation");
        let mut new_quotation = quotation;
        new_quotation.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        new_quotation.created_at = Some(now.clone());
        new_quotation.updated_at = Some(now);

        match self.collection.insert_one(new_quotation.clone(), None).await {
            Ok(_) => {
                info!("Quotation created successfully");
                Ok(new_quotation)
            }
            Err(e) => {
                error!("Failed to create quotation: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Quotation> {
        let filter = doc! { "_id": id };
        match self.collection.find_one(filter, None).await {
            Ok(Some(quotation)) => Ok(quotation),
            Ok(None) => {
                error!("Quotation not found for ID: {}", id);
                Err(RepositoryError::not_found(format!("Quotation not found for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to fetch quotation by ID: {}", e);
                Err(RepositoryError::database(format!("Failed to fetch quotation by ID: {}", e)))
            }
        }
    }

    /// Replaces the stored document wholesale, items included. Single-document
    /// update, so the delete-then-recreate of the item list is atomic.
    #[tracing::instrument(skip(self, quotation), fields(id = %id))]
    async fn update(&self, id: ObjectId, quotation: Quotation) -> RepositoryResult<Quotation> {
        info!("Updating quotation with ID: {}", id);
        let mut updated = quotation;
        updated.updated_at = Some(chrono::Utc::now().to_rfc3339());

        let filter = doc! { "_id": id };
        let mut doc = bson::to_document(&updated).map_err(|e| {
            RepositoryError::serialization(format!("Failed to serialize quotation: {}", e))
        })?;
        doc.remove("_id");
        let update = doc! { "$set": doc };
        let result = self
            .collection
            .update_one(filter, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to update quotation: {}", e)))?;
        if result.matched_count == 0 {
            error!("No quotation found to update for ID: {}", id);
            return Err(RepositoryError::not_found(format!(
                "No quotation found to update for ID: {}",
                id
            )));
        }
        updated.id = Some(id);
        Ok(updated)
    }

    /// Compare-and-set: the filter pins the expected current status, so two
    /// concurrent transitions from the same state cannot both succeed.
    #[tracing::instrument(skip(self), fields(id = %id, from = %from, to = %to))]
    async fn update_status(
        &self,
        id: ObjectId,
        from: QuotationStatus,
        to: QuotationStatus,
    ) -> RepositoryResult<Quotation> {
        info!(quotation_id = %id, from = %from, to = %to, "Updating quotation status");
        let filter = doc! { "_id": id, "status": from.as_str() };
        let update = doc! {
            "$set": {
                "status": to.as_str(),
                "updated_at": chrono::Utc::now().to_rfc3339(),
            }
        };
        let result = self
            .collection
            .update_one(filter, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to update quotation status: {}", e)))?;
        if result.matched_count == 0 {
            // Distinguish a missing document from a lost race.
            let current = self.get_by_id(id).await?;
            error!(
                "Quotation {} is {} rather than {}, not updating status",
                id, current.status, from
            );
            return Err(RepositoryError::already_exists(format!(
                "Quotation {} is {} and cannot move from {} to {}",
                current.number, current.status, from, to
            )));
        }
        self.get_by_id(id).await
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        info!("Deleting quotation with ID: {}", id);
        let filter = doc! { "_id": id };
        let result = self
            .collection
            .delete_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to delete quotation: {}", e)))?;
        if result.deleted_count == 0 {
            error!("No quotation found to delete for ID: {}", id);
            return Err(RepositoryError::not_found(format!(
                "No quotation found to delete for ID: {}",
                id
            )));
        }
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(page = page, limit = limit))]
    async fn list(&self, page: u32, limit: u32, q: Option<&str>) -> RepositoryResult<Vec<Quotation>> {
        let skip = u64::from(page.saturating_sub(1)) * u64::from(limit);
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(skip)
            .limit(i64::from(limit))
            .build();
        let quotations = self.collect(Self::search_filter(q), Some(options)).await?;
        info!("Fetched {} quotations", quotations.len());
        Ok(quotations)
    }

    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> RepositoryResult<Vec<Quotation>> {
        let options = FindOptions::builder().sort(doc! { "created_at": -1 }).build();
        self.collect(None, Some(options)).await
    }

    #[tracing::instrument(skip(self), fields(status = %status))]
    async fn list_by_status(&self, status: QuotationStatus) -> RepositoryResult<Vec<Quotation>> {
        self.collect(Some(doc! { "status": status.as_str() }), None).await
    }

    #[tracing::instrument(skip(self), fields(limit = limit))]
    async fn recent(&self, limit: u32) -> RepositoryResult<Vec<Quotation>> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .limit(i64::from(limit))
            .build();
        self.collect(None, Some(options)).await
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self, q: Option<&str>) -> RepositoryResult<u64> {
        self.collection
            .count_documents(Self::search_filter(q), None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count quotations: {}", e)))
    }

    #[tracing::instrument(skip(self), fields(status = %status))]
    async fn count_by_status(&self, status: QuotationStatus) -> RepositoryResult<u64> {
        self.collection
            .count_documents(Some(doc! { "status": status.as_str() }), None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count quotations: {}", e)))
    }
}
