use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::{Database, SYSTEM_CONFIG_COLLECTION},
    errors::{AppError, AppResult},
    models::domain::SystemConfig,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SystemConfigRepository: Send + Sync {
    async fn upsert(&self, key: &str, value: serde_json::Value) -> AppResult<SystemConfig>;
    async fn find_by_key(&self, key: &str) -> AppResult<Option<SystemConfig>>;
    async fn list_all(&self) -> AppResult<Vec<SystemConfig>>;
}

pub struct MongoSystemConfigRepository {
    collection: Collection<SystemConfig>,
}

impl MongoSystemConfigRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(SYSTEM_CONFIG_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let key_index = IndexModel::builder()
            .keys(doc! { "key": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("key_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(key_index).await?;
        log::info!("Created unique index on system_configs.key");
        Ok(())
    }
}

#[async_trait]
impl SystemConfigRepository for MongoSystemConfigRepository {
    async fn upsert(&self, key: &str, value: serde_json::Value) -> AppResult<SystemConfig> {
        let update = doc! {
            "$set": { "value": to_bson(&value)?, "updatedAt": to_bson(&Utc::now())? }
        };

        self.collection
            .find_one_and_update(doc! { "key": key }, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::InternalError(format!("Upsert of config '{}' returned nothing", key)))
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<SystemConfig>> {
        let config = self.collection.find_one(doc! { "key": key }).await?;
        Ok(config)
    }

    async fn list_all(&self) -> AppResult<Vec<SystemConfig>> {
        let configs = self
            .collection
            .find(doc! {})
            .sort(doc! { "key": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(configs)
    }
}
