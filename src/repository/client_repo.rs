use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::Database;
use tracing::{error, info};

use crate::model::client::Client;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn create(&self, client: Client) -> RepositoryResult<Client>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Client>;
    async fn update(&self, id: ObjectId, client: Client) -> RepositoryResult<Client>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    async fn list(&self, page: u32, limit: u32, q: Option<&str>) -> RepositoryResult<Vec<Client>>;
    async fn count(&self, q: Option<&str>) -> RepositoryResult<u64>;
}

pub struct MongoClientRepository {
    collection: mongodb::Collection<Client>,
}

impl MongoClientRepository {
    pub fn new(db: &Database) -> Self {
        MongoClientRepository {
            collection: db.collection::<Client>("clients"),
        }
    }

    /// Case-insensitive search over name, company and email.
    fn search_filter(q: Option<&str>) -> Option<Document> {
        q.filter(|s| !s.trim().is_empty()).map(|s| {
            let pattern = regex_escape(s.trim());
            doc! {
                "$or": [
                    { "name": { "$regex": &pattern, "$options": "i" } },
                    { "company": { "$regex": &pattern, "$options": "i" } },
                    { "email": { "$regex": &pattern, "$options": "i" } },
                ]
            }
        })
    }
}

/// Escapes regex metacharacters so a search term is matched literally.
pub(crate) fn regex_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if ".^$*+?()[]{}|\\".contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[async_trait]
impl ClientRepository for MongoClientRepository {
    #[tracing::instrument(skip(self, client), fields(name = %client.name))]
    async fn create(&self, client: Client) -> RepositoryResult<Client> {
        info!("Creating new client");
        let mut new_client = client;
        new_client.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        new_client.created_at = Some(now.clone());
        new_client.updated_at = Some(now);

        match self.collection.insert_one(new_client.clone(), None).await {
            Ok(_) => {
                info!("Client created successfully");
                Ok(new_client)
            }
            Err(e) => {
                error!("Failed to create client: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Client> {
        let filter = doc! { "_id": id };
        match self.collection.find_one(filter, None).await {
            Ok(Some(client)) => Ok(client),
            Ok(None) => {
                error!("Client not found for ID: {}", id);
                Err(RepositoryError::not_found(format!("Client not found for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to fetch client by ID: {}", e);
                Err(RepositoryError::database(format!("Failed to fetch client by ID: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self, client), fields(id = %id))]
    async fn update(&self, id: ObjectId, client: Client) -> RepositoryResult<Client> {
        info!("Updating client with ID: {}", id);
        let mut updated = client;
        updated.updated_at = Some(chrono::Utc::now().to_rfc3339());

        let filter = doc! { "_id": id };
        let mut doc = bson::to_document(&updated)
            .map_err(|e| RepositoryError::serialization(format!("Failed to serialize client: {}", e)))?;
        doc.remove("_id");
        let update = doc! { "$set": doc };
        let result = self
            .collection
            .update_one(filter, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to update client: {}", e)))?;
        if result.matched_count == 0 {
            error!("No client found to update for ID: {}", id);
            return Err(RepositoryError::not_found(format!(
                "No client found to update for ID: {}",
                id
            )));
        }
        updated.id = Some(id);
        Ok(updated)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        info!("Deleting client with ID: {}", id);
        let filter = doc! { "_id": id };
        let result = self
            .collection
            .delete_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to delete client: {}", e)))?;
        if result.deleted_count == 0 {
            error!("No client found to delete for ID: {}", id);
            return Err(RepositoryError::not_found(format!(
                "No client found to delete for ID: {}",
                id
            )));
        }
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(page = page, limit = limit))]
    async fn list(&self, page: u32, limit: u32, q: Option<&str>) -> RepositoryResult<Vec<Client>> {
        let skip = u64::from(page.saturating_sub(1)) * u64::from(limit);
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(skip)
            .limit(i64::from(limit))
            .build();
        let cursor = self
            .collection
            .find(Self::search_filter(q), options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list clients: {}", e)))?;
        let clients: Vec<Client> = cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::serialization(format!("Failed to deserialize client: {}", e)))?;
        info!("Fetched {} clients", clients.len());
        Ok(clients)
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self, q: Option<&str>) -> RepositoryResult<u64> {
        self.collection
            .count_documents(Self::search_filter(q), None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count clients: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_escape() {
        assert_eq!(regex_escape("a.b"), "a\\.b");
        assert_eq!(regex_escape("acme (ltd)"), "acme \\(ltd\\)");
        assert_eq!(regex_escape("plain"), "plain");
    }

    #[test]
    fn test_search_filter_empty_is_none() {
        assert!(MongoClientRepository::search_filter(None).is_none());
        assert!(MongoClientRepository::search_filter(Some("   ")).is_none());
        assert!(MongoClientRepository::search_filter(Some("acme")).is_some());
    }
}
