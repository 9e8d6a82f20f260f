use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, CATEGORIES_COLLECTION},
    errors::AppResult,
    models::domain::Category,
};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: Category) -> AppResult<Category>;
    async fn find_owned(&self, id: &str, created_by: &str) -> AppResult<Option<Category>>;
    async fn list_by_creator(&self, created_by: &str) -> AppResult<Vec<Category>>;
}

pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(CATEGORIES_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for categories collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // Names are unique per coach, not globally
        let name_owner_index = IndexModel::builder()
            .keys(doc! { "name": 1, "createdBy": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("name_created_by_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(name_owner_index).await?;

        log::info!("Successfully created indexes for categories collection");
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    async fn create(&self, category: Category) -> AppResult<Category> {
        self.collection.insert_one(&category).await?;
        Ok(category)
    }

    async fn find_owned(&self, id: &str, created_by: &str) -> AppResult<Option<Category>> {
        let category = self
            .collection
            .find_one(doc! { "id": id, "createdBy": created_by })
            .await?;
        Ok(category)
    }

    async fn list_by_creator(&self, created_by: &str) -> AppResult<Vec<Category>> {
        let categories = self
            .collection
            .find(doc! { "createdBy": created_by })
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(categories)
    }
}
