use async_trait::async_trait;
use bson::doc;
use mongodb::options::{FindOneAndReplaceOptions, ReturnDocument};
use mongodb::Database;
use tracing::info;

use crate::model::settings::Settings;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

/// The settings collection holds a single well-known document.
const SETTINGS_KEY: &str = "app";

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Returns the stored settings, or the defaults when none were saved yet.
    async fn get(&self) -> RepositoryResult<Settings>;
    async fn upsert(&self, settings: Settings) -> RepositoryResult<Settings>;
}

pub struct MongoSettingsRepository {
    collection: mongodb::Collection<bson::Document>,
}

impl MongoSettingsRepository {
    pub fn new(db: &Database) -> Self {
        MongoSettingsRepository {
            collection: db.collection::<bson::Document>("settings"),
        }
    }
}

#[async_trait]
impl SettingsRepository for MongoSettingsRepository {
    #[tracing::instrument(skip(self))]
    async fn get(&self) -> RepositoryResult<Settings> {
        let found = self
            .collection
            .find_one(doc! { "key": SETTINGS_KEY }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to fetch settings: {}", e)))?;
        match found {
            Some(mut doc) => {
                doc.remove("key");
                let settings: Settings = bson::from_document(doc)?;
                Ok(settings)
            }
            None => Ok(Settings::default()),
        }
    }

    #[tracing::instrument(skip(self, settings))]
    async fn upsert(&self, settings: Settings) -> RepositoryResult<Settings> {
        let mut updated = settings;
        updated.updated_at = Some(chrono::Utc::now().to_rfc3339());

        let mut doc = bson::to_document(&updated)?;
        doc.remove("_id");
        doc.insert("key", SETTINGS_KEY);

        let options = FindOneAndReplaceOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();
        self.collection
            .find_one_and_replace(doc! { "key": SETTINGS_KEY }, doc, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to save settings: {}", e)))?;

        info!("Settings saved");
        Ok(updated)
    }
}
